use tracing::debug;

use crate::access::{AccessGate, PermissionMode};
use crate::error::Result;
use crate::index::IndexReader;
use crate::models::{CandidateSet, PageHit};
use crate::page_id::PageId;

use super::filter::retain_accessible;

/// Pages recorded under `relation` for `id`, filtered for access and sorted
/// by id.
///
/// When the index has no entry the gate is never consulted.
pub fn lookup_references(
    index: &dyn IndexReader,
    gate: &dyn AccessGate,
    relation: &str,
    id: &str,
    mode: PermissionMode,
) -> Result<Vec<PageId>> {
    let matches = index.lookup_key(relation, id, None)?;
    if matches.is_empty() {
        debug!(relation, id, "no references recorded");
        return Ok(Vec::new());
    }

    let total = matches.len();
    let candidates = matches
        .into_keys()
        .map(|page| PageHit::new(page, None))
        .collect::<CandidateSet>();
    let filtered = retain_accessible(candidates, gate, mode)?;

    let mut pages = filtered
        .into_hits()
        .into_iter()
        .map(|hit| hit.id)
        .collect::<Vec<_>>();
    pages.sort();
    debug!(relation, id, total, kept = pages.len(), "resolved references");
    Ok(pages)
}
