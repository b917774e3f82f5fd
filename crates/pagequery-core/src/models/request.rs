use serde::{Deserialize, Serialize};

use crate::access::{PermissionMode, deserialize_permission_mode};

use super::query::TimeBound;

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLookupRequest {
    pub query: String,
    #[serde(default)]
    pub in_namespace: bool,
    #[serde(default = "default_true")]
    pub in_title: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<TimeBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<TimeBound>,
}

impl PageLookupRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            in_namespace: false,
            in_title: true,
            after: None,
            before: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Backlinks,
    MediaUse,
}

/// Backlink or media-usage request as it arrives from a loosely typed caller.
///
/// `ignore_permissions` only becomes [`PermissionMode::Ignore`] for the JSON
/// literal `true`; numbers (an old page-limit argument), strings and null keep
/// permissions enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRequest {
    pub kind: ReferenceKind,
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_permission_mode")]
    pub ignore_permissions: PermissionMode,
}
