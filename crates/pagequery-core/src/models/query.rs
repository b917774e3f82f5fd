use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One end of a modification-time window.
///
/// Numbers deserialize as unix seconds, RFC 3339 strings as instants, and any
/// other string is kept as a free-form expression for the time source to
/// resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeBound {
    Epoch(i64),
    Instant(DateTime<Utc>),
    Expression(String),
}

impl From<DateTime<Utc>> for TimeBound {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value)
    }
}

impl From<i64> for TimeBound {
    fn from(value: i64) -> Self {
        Self::Epoch(value)
    }
}

impl From<&str> for TimeBound {
    fn from(value: &str) -> Self {
        Self::Expression(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Segments of the first namespace token; `None` when the query had none.
    #[serde(default)]
    pub namespace_scope: Option<Vec<String>>,
    #[serde(default)]
    pub excluded_namespaces: Vec<Vec<String>>,
    #[serde(default)]
    pub highlight_terms: Vec<String>,
    #[serde(default)]
    pub search_in_title: bool,
    #[serde(default)]
    pub match_namespace: bool,
    #[serde(default)]
    pub after: Option<TimeBound>,
    #[serde(default)]
    pub before: Option<TimeBound>,
}

impl StructuredQuery {
    #[must_use]
    pub fn joined_terms(&self) -> String {
        self.highlight_terms.join(" ")
    }

    #[must_use]
    pub fn has_time_bounds(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }
}
