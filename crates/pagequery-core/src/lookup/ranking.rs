use std::cmp::Ordering;

use crate::models::{CandidateSet, PageHit};
use crate::page_id::PageId;

/// Shallower ids first, then byte-wise id order.
#[must_use]
pub fn compare_pages(a: &PageId, b: &PageId) -> Ordering {
    a.depth()
        .cmp(&b.depth())
        .then_with(|| a.as_str().cmp(b.as_str()))
}

fn compare_hits_depth_then_id(a: &PageHit, b: &PageHit) -> Ordering {
    compare_pages(&a.id, &b.id)
}

#[must_use]
pub fn rank(candidates: CandidateSet) -> Vec<PageHit> {
    let mut hits = candidates.into_hits();
    hits.sort_by(compare_hits_depth_then_id);
    hits
}
