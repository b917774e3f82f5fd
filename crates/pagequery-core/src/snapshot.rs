use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access::AccessGate;
use crate::clock::TimeSource;
use crate::error::{LookupError, Result};
use crate::index::{
    IndexReader, KeyMatches, RELATION_MEDIA, RELATION_REFERENCES, RELATION_TITLE, ValueMatcher,
};
use crate::page_id::PageId;

const fn default_true() -> bool {
    true
}

/// One page as stored in a JSON snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageRecord {
    pub id: PageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub exists: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_true")]
    pub readable: bool,
    /// Page ids this page links to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    /// Media ids this page embeds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
}

impl PageRecord {
    #[must_use]
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            title: None,
            modified: None,
            exists: true,
            hidden: false,
            readable: true,
            references: Vec::new(),
            media: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSnapshot {
    /// Fixed "now" for date expressions; wall clock when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

/// Index, access gate and time source backed by an in-memory snapshot.
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    pages: BTreeMap<PageId, PageRecord>,
    hidden: GlobSet,
    now: Option<DateTime<Utc>>,
}

impl MemoryIndex {
    pub fn from_snapshot(snapshot: PageSnapshot) -> Result<Self> {
        let mut pages = BTreeMap::new();
        for record in snapshot.pages {
            if pages.contains_key(&record.id) {
                return Err(LookupError::Validation(format!(
                    "duplicate page in snapshot: {}",
                    record.id
                )));
            }
            pages.insert(record.id.clone(), record);
        }
        Ok(Self {
            pages,
            hidden: GlobSet::empty(),
            now: snapshot.now,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let snapshot = serde_json::from_str::<PageSnapshot>(raw)?;
        Self::from_snapshot(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let index = Self::from_json(&raw)?;
        debug!(path = %path.display(), pages = index.len(), "loaded page snapshot");
        Ok(index)
    }

    /// Hides every page whose id matches one of the glob patterns.
    pub fn with_hidden_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let trimmed = pattern.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            let glob = Glob::new(trimmed).map_err(|err| {
                LookupError::Validation(format!("invalid hidden page glob '{trimmed}': {err}"))
            })?;
            builder.add(glob);
        }
        self.hidden = builder
            .build()
            .map_err(|err| LookupError::Validation(format!("invalid hidden page globs: {err}")))?;
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &PageId) -> Option<&PageRecord> {
        self.pages.get(id)
    }
}

fn value_matches(matcher: Option<&ValueMatcher>, searched: &str, stored: &str) -> bool {
    match matcher {
        Some(matcher) => matcher(searched, stored),
        None => searched == stored,
    }
}

impl IndexReader for MemoryIndex {
    fn lookup_key(
        &self,
        relation: &str,
        value: &str,
        matcher: Option<&ValueMatcher>,
    ) -> Result<KeyMatches> {
        let field: fn(&PageRecord) -> &[String] = match relation {
            RELATION_TITLE => |record| record.title.as_slice(),
            RELATION_REFERENCES => |record| record.references.as_slice(),
            RELATION_MEDIA => |record| record.media.as_slice(),
            other => {
                return Err(LookupError::Index(format!("unknown relation: {other}")));
            }
        };

        let mut out = KeyMatches::new();
        for (id, record) in &self.pages {
            let stored = field(record)
                .iter()
                .find(|stored| value_matches(matcher, value, stored));
            if let Some(stored) = stored {
                out.insert(id.clone(), stored.clone());
            }
        }
        Ok(out)
    }

    fn list_all_pages(&self) -> Result<Vec<PageId>> {
        Ok(self.pages.keys().cloned().collect())
    }

    fn first_heading(&self, id: &PageId) -> Result<Option<String>> {
        Ok(self.pages.get(id).and_then(|record| record.title.clone()))
    }
}

impl AccessGate for MemoryIndex {
    fn is_readable(&self, id: &PageId) -> Result<bool> {
        Ok(self.pages.get(id).is_some_and(|record| record.readable))
    }

    fn exists(&self, id: &PageId) -> Result<bool> {
        Ok(self.pages.get(id).is_some_and(|record| record.exists))
    }

    fn is_visible(&self, id: &PageId) -> Result<bool> {
        let hidden_by_record = self.pages.get(id).is_some_and(|record| record.hidden);
        Ok(!hidden_by_record && !self.hidden.is_match(id.as_str()))
    }
}

impl TimeSource for MemoryIndex {
    fn modification_time(&self, id: &PageId) -> Result<Option<DateTime<Utc>>> {
        Ok(self.pages.get(id).and_then(|record| record.modified))
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{MemoryIndex, PageRecord, PageSnapshot};
    use crate::access::AccessGate;
    use crate::index::{
        IndexReader, RELATION_REFERENCES, RELATION_TITLE, ValueMatcher, title_contains,
    };
    use crate::page_id::PageId;

    fn id(raw: &str) -> PageId {
        PageId::new_unchecked(raw)
    }

    fn record(raw: &str) -> PageRecord {
        PageRecord::new(id(raw))
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let snapshot = PageSnapshot {
            now: None,
            pages: vec![record("start"), record("start")],
        };
        let err = MemoryIndex::from_snapshot(snapshot).expect_err("duplicate");
        assert_eq!(err.code(), "VALIDATION_FAILED");
    }

    #[test]
    fn unknown_fields_and_bad_ids_fail_to_parse() {
        let err = MemoryIndex::from_json(r#"{"pages":[{"id":"a","color":"red"}]}"#)
            .expect_err("unknown field");
        assert_eq!(err.code(), "JSON_ERROR");

        let err = MemoryIndex::from_json(r#"{"pages":[{"id":"a::b"}]}"#).expect_err("bad id");
        assert_eq!(err.code(), "JSON_ERROR");
    }

    #[test]
    fn exact_lookup_without_matcher() {
        let mut linker = record("wiki:linker");
        linker.references = vec!["start".to_string()];
        let mut other = record("other");
        other.references = vec!["start:sub".to_string()];
        let index = MemoryIndex::from_snapshot(PageSnapshot {
            now: None,
            pages: vec![linker, other],
        })
        .expect("index");

        let hits = index
            .lookup_key(RELATION_REFERENCES, "start", None)
            .expect("lookup");
        assert_eq!(hits.keys().collect::<Vec<_>>(), vec![&id("wiki:linker")]);
        assert_eq!(hits.get(&id("wiki:linker")).map(String::as_str), Some("start"));
    }

    #[test]
    fn title_lookup_uses_supplied_matcher() {
        let mut page = record("wiki:syntax");
        page.title = Some("Formatting Syntax".to_string());
        let index = MemoryIndex::from_snapshot(PageSnapshot {
            now: None,
            pages: vec![page, record("untitled")],
        })
        .expect("index");

        let matcher: &ValueMatcher = &title_contains;
        let hits = index
            .lookup_key(RELATION_TITLE, "syntax", Some(matcher))
            .expect("lookup");
        assert_eq!(hits.len(), 1);
        assert!(index
            .lookup_key(RELATION_TITLE, "syntax", None)
            .expect("lookup")
            .is_empty());
    }

    #[test]
    fn unknown_relation_is_an_index_error() {
        let index = MemoryIndex::from_snapshot(PageSnapshot::default()).expect("index");
        let err = index
            .lookup_key("relation_nonsense", "x", None)
            .expect_err("unknown relation");
        assert_eq!(err.code(), "INDEX_ERROR");
    }

    #[test]
    fn hidden_patterns_and_flags_hide_pages() {
        let mut flagged = record("wiki:flagged");
        flagged.hidden = true;
        let index = MemoryIndex::from_snapshot(PageSnapshot {
            now: None,
            pages: vec![flagged, record("playground:sandbox"), record("wiki:open")],
        })
        .expect("index")
        .with_hidden_patterns(["playground:*", "  "])
        .expect("patterns");

        assert!(!index.is_visible(&id("wiki:flagged")).expect("visible"));
        assert!(!index.is_visible(&id("playground:sandbox")).expect("visible"));
        assert!(index.is_visible(&id("wiki:open")).expect("visible"));
    }

    #[test]
    fn invalid_hidden_pattern_is_a_validation_error() {
        let err = MemoryIndex::from_snapshot(PageSnapshot::default())
            .expect("index")
            .with_hidden_patterns(["wiki:[oops"])
            .expect_err("bad glob");
        assert_eq!(err.code(), "VALIDATION_FAILED");
    }

    #[test]
    fn unknown_pages_do_not_exist_and_are_unreadable() {
        let index = MemoryIndex::from_json(&json!({"pages": []}).to_string()).expect("index");
        assert!(!index.exists(&id("ghost")).expect("exists"));
        assert!(!index.is_readable(&id("ghost")).expect("readable"));
    }
}
