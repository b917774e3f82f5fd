use crate::error::Result;
use crate::models::{CandidateSet, StructuredQuery};

/// Replaces or post-processes candidate collection before filtering.
///
/// `default` runs the built-in id/title matching for a query. An override may
/// call it and adjust the output, call it with a rewritten query, or ignore
/// it and return its own set. Whatever it returns still goes through access
/// and time filtering.
pub trait CandidateOverride: Send + Sync {
    fn candidates(
        &self,
        query: &StructuredQuery,
        default: &dyn Fn(&StructuredQuery) -> Result<CandidateSet>,
    ) -> Result<CandidateSet>;
}

impl<F> CandidateOverride for F
where
    F: Fn(&StructuredQuery, &dyn Fn(&StructuredQuery) -> Result<CandidateSet>) -> Result<CandidateSet>
        + Send
        + Sync,
{
    fn candidates(
        &self,
        query: &StructuredQuery,
        default: &dyn Fn(&StructuredQuery) -> Result<CandidateSet>,
    ) -> Result<CandidateSet> {
        self(query, default)
    }
}
