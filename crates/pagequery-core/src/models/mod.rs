mod query;
mod request;
mod result;

pub use query::{StructuredQuery, TimeBound};
pub use request::{PageLookupRequest, ReferenceKind, ReferenceRequest};
pub use result::{CandidateSet, PageHit};
