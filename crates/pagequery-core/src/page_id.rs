use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, Result};

pub const NAMESPACE_SEPARATOR: char = ':';

/// Canonical, hierarchical page identifier such as `wiki:syntax:tables`.
///
/// Ordering is the byte order of the id text. The index hands out ids that are
/// already canonical, so `new_unchecked` wraps them as they are; `parse`
/// is for ids arriving from users or snapshots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageId(String);

impl PageId {
    pub fn parse(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(LookupError::InvalidPageId(value.to_string()));
        }
        if value.split(NAMESPACE_SEPARATOR).any(str::is_empty) {
            return Err(LookupError::InvalidPageId(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of `:`-separated segments; `start` is 1, `a:b:c` is 3.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.split(NAMESPACE_SEPARATOR).count()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(NAMESPACE_SEPARATOR)
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.0
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map(|(namespace, _)| namespace)
    }

    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.0
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map_or(self.0.as_str(), |(_, name)| name)
    }

    /// The id without its first segment: `a:b:c` becomes `b:c`. Ids without a
    /// namespace are returned whole.
    #[must_use]
    pub fn strip_leading_namespace(&self) -> &str {
        self.0
            .split_once(NAMESPACE_SEPARATOR)
            .map_or(self.0.as_str(), |(_, rest)| rest)
    }

    /// True when the id lives below `namespace` (segment boundary respected).
    #[must_use]
    pub fn is_within(&self, namespace: &str) -> bool {
        if namespace.is_empty() {
            return false;
        }
        self.0
            .strip_prefix(namespace)
            .is_some_and(|rest| rest.starts_with(NAMESPACE_SEPARATOR))
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PageId {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PageId {
    type Error = LookupError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PageId> for String {
    fn from(id: PageId) -> Self {
        id.0
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalizes free text into page-id form before matching.
pub trait IdCleaner: Send + Sync {
    fn clean(&self, raw: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIdCleaner;

impl IdCleaner for DefaultIdCleaner {
    fn clean(&self, raw: &str) -> String {
        clean_id(raw)
    }
}

#[must_use]
pub fn clean_id(raw: &str) -> String {
    let mut mapped = String::with_capacity(raw.len());
    for ch in raw.trim().chars().flat_map(char::to_lowercase) {
        let next = if ch.is_whitespace() {
            '_'
        } else if ch == '/' || ch == ';' {
            NAMESPACE_SEPARATOR
        } else if ch.is_alphanumeric() || matches!(ch, '_' | '.' | '-' | NAMESPACE_SEPARATOR) {
            ch
        } else {
            '_'
        };
        if next == '_' && mapped.ends_with('_') {
            continue;
        }
        mapped.push(next);
    }

    mapped
        .split(NAMESPACE_SEPARATOR)
        .map(|segment| segment.trim_matches(|c: char| matches!(c, '_' | '.' | '-')))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(":")
}
