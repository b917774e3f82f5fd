use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::page_id::PageId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHit {
    pub id: PageId,
    /// First heading of the page, if the index knows one.
    pub title: Option<String>,
}

impl PageHit {
    #[must_use]
    pub fn new(id: PageId, title: Option<String>) -> Self {
        Self { id, title }
    }
}

/// Insertion-ordered set of matched pages keyed by id. The first write for an
/// id wins; removals keep the relative order of the survivors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    hits: Vec<PageHit>,
    seen: HashSet<PageId>,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &PageId) -> bool {
        self.seen.contains(id)
    }

    #[must_use]
    pub fn get(&self, id: &PageId) -> Option<&PageHit> {
        if !self.seen.contains(id) {
            return None;
        }
        self.hits.iter().find(|hit| &hit.id == id)
    }

    pub fn insert(&mut self, id: PageId, title: Option<String>) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        self.seen.insert(id.clone());
        self.hits.push(PageHit::new(id, title));
        true
    }

    /// Inserts `id` unless present, resolving its title only when it is new.
    pub fn insert_with<F>(&mut self, id: PageId, resolve_title: F) -> Result<bool>
    where
        F: FnOnce(&PageId) -> Result<Option<String>>,
    {
        if self.seen.contains(&id) {
            return Ok(false);
        }
        let title = resolve_title(&id)?;
        Ok(self.insert(id, title))
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&PageHit) -> bool,
    {
        let seen = &mut self.seen;
        self.hits.retain(|hit| {
            let kept = keep(hit);
            if !kept {
                seen.remove(&hit.id);
            }
            kept
        });
    }

    pub fn try_retain<F>(&mut self, mut keep: F) -> Result<()>
    where
        F: FnMut(&PageHit) -> Result<bool>,
    {
        let mut kept = Vec::with_capacity(self.hits.len());
        for hit in std::mem::take(&mut self.hits) {
            if keep(&hit)? {
                kept.push(hit);
            } else {
                self.seen.remove(&hit.id);
            }
        }
        self.hits = kept;
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageHit> {
        self.hits.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &PageId> {
        self.hits.iter().map(|hit| &hit.id)
    }

    #[must_use]
    pub fn into_hits(self) -> Vec<PageHit> {
        self.hits
    }
}

impl FromIterator<PageHit> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = PageHit>>(iter: I) -> Self {
        let mut set = Self::new();
        for hit in iter {
            set.insert(hit.id, hit.title);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a PageHit;
    type IntoIter = std::slice::Iter<'a, PageHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}
