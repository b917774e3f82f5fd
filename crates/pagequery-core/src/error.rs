use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid page id: {0}")]
    InvalidPageId(String),

    #[error("index unavailable: {0}")]
    Index(String),

    #[error("access check failed: {0}")]
    Access(String),

    #[error("time source failed: {0}")]
    TimeSource(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl LookupError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPageId(_) => "INVALID_PAGE_ID",
            Self::Index(_) => "INDEX_ERROR",
            Self::Access(_) => "ACCESS_ERROR",
            Self::TimeSource(_) => "TIME_SOURCE_ERROR",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>, page: Option<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            page,
        }
    }
}
