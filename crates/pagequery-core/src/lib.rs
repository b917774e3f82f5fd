// Public fallible APIs in this crate share one concrete error contract (`LookupError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod access;
pub mod clock;
pub mod config;
pub mod error;
pub mod index;
pub mod lookup;
pub mod models;
pub mod page_id;
pub mod query;
pub mod snapshot;

pub use access::{AccessGate, PermissionMode};
pub use clock::{TimeSource, resolve_date_expression};
pub use config::{SearchConfig, TitleMatchMode};
pub use error::{ErrorPayload, LookupError, Result};
pub use index::{IndexReader, ValueMatcher};
pub use lookup::{CandidateOverride, PageSearch};
pub use models::{
    CandidateSet, PageHit, PageLookupRequest, ReferenceKind, ReferenceRequest, StructuredQuery,
    TimeBound,
};
pub use page_id::{DefaultIdCleaner, IdCleaner, PageId};
pub use query::parse_query;
pub use snapshot::{MemoryIndex, PageRecord, PageSnapshot};
