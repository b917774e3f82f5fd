use std::sync::Arc;

use crate::error::{LookupError, Result};
use crate::index::{ValueMatcher, title_contains, title_equals, title_starts_with};

use super::env::{parse_enabled_default_true, parse_list, read_non_empty_env};

pub const ENV_TITLE_MATCH: &str = "PAGEQUERY_TITLE_MATCH";
pub const ENV_TITLE_SEARCH: &str = "PAGEQUERY_TITLE_SEARCH";
pub const ENV_DATE_EXPRESSIONS: &str = "PAGEQUERY_DATE_EXPRESSIONS";
pub const ENV_HIDDEN_PAGES: &str = "PAGEQUERY_HIDDEN_PAGES";

/// How the title pass compares the cleaned query with stored titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleMatchMode {
    #[default]
    Contains,
    Prefix,
    Exact,
}

impl TitleMatchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Prefix => "prefix",
            Self::Exact => "exact",
        }
    }

    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let normalized = raw.map(|value| value.trim().to_ascii_lowercase());
        match normalized.as_deref() {
            None | Some("contains") => Ok(Self::Contains),
            Some("prefix") => Ok(Self::Prefix),
            Some("exact") => Ok(Self::Exact),
            Some(other) => Err(LookupError::Validation(format!(
                "invalid {ENV_TITLE_MATCH}: {other} (expected contains|prefix|exact)"
            ))),
        }
    }

    #[must_use]
    pub fn matcher(self) -> Arc<ValueMatcher> {
        match self {
            Self::Contains => Arc::new(title_contains),
            Self::Prefix => Arc::new(title_starts_with),
            Self::Exact => Arc::new(title_equals),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub title_match: TitleMatchMode,
    /// Default for `in_title` when a caller does not say.
    pub title_search: bool,
    pub date_expressions: bool,
    /// Glob patterns of page ids hidden from search.
    pub hidden_pages: Vec<String>,
}

impl SearchConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            title_match: TitleMatchMode::parse(std::env::var(ENV_TITLE_MATCH).ok().as_deref())?,
            title_search: parse_enabled_default_true(
                std::env::var(ENV_TITLE_SEARCH).ok().as_deref(),
            ),
            date_expressions: parse_enabled_default_true(
                std::env::var(ENV_DATE_EXPRESSIONS).ok().as_deref(),
            ),
            hidden_pages: parse_list(read_non_empty_env(ENV_HIDDEN_PAGES).as_deref()),
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            title_match: TitleMatchMode::Contains,
            title_search: true,
            date_expressions: true,
            hidden_pages: Vec::new(),
        }
    }
}
