use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::page_id::PageId;

/// Read-side permission and visibility checks for pages.
///
/// Errors are collaborator failures (an ACL backend that cannot answer), not
/// denials; a denial is `Ok(false)`.
pub trait AccessGate: Send + Sync {
    fn is_readable(&self, id: &PageId) -> Result<bool>;
    fn exists(&self, id: &PageId) -> Result<bool>;
    /// False for pages hidden from listings and search.
    fn is_visible(&self, id: &PageId) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "bool")]
pub enum PermissionMode {
    #[default]
    Enforce,
    /// Skip ACL and visibility checks; existence is still checked.
    Ignore,
}

impl PermissionMode {
    #[must_use]
    pub const fn from_flag(ignore_permissions: bool) -> Self {
        if ignore_permissions {
            Self::Ignore
        } else {
            Self::Enforce
        }
    }

    /// Reads a loosely typed "ignore permissions" argument. Only the boolean
    /// `true` disables checks; legacy numeric limits and everything else keep
    /// them on.
    #[must_use]
    pub fn from_legacy_value(value: &Value) -> Self {
        if *value == Value::Bool(true) {
            Self::Ignore
        } else {
            Self::Enforce
        }
    }

    #[must_use]
    pub const fn checks_permissions(self) -> bool {
        matches!(self, Self::Enforce)
    }
}

impl From<PermissionMode> for bool {
    fn from(mode: PermissionMode) -> Self {
        matches!(mode, PermissionMode::Ignore)
    }
}

pub(crate) fn deserialize_permission_mode<'de, D>(
    deserializer: D,
) -> std::result::Result<PermissionMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(PermissionMode::from_legacy_value(&value))
}
