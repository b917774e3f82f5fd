use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::access::{AccessGate, PermissionMode};
use crate::clock::TimeSource;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::index::{IndexReader, RELATION_MEDIA, RELATION_REFERENCES, ValueMatcher};
use crate::models::{
    CandidateSet, PageHit, PageLookupRequest, ReferenceKind, ReferenceRequest, StructuredQuery,
    TimeBound,
};
use crate::page_id::{DefaultIdCleaner, IdCleaner, PageId};
use crate::query::parse_query;

use super::filter::ResultFilter;
use super::hook::CandidateOverride;
use super::matcher::collect_candidates;
use super::ranking::rank;
use super::references::lookup_references;

/// Page lookup, backlinks and media usage over injected collaborators.
///
/// Holds no per-call state; one instance can serve concurrent calls as long
/// as the collaborators allow concurrent reads.
#[derive(Clone)]
pub struct PageSearch {
    index: Arc<dyn IndexReader>,
    gate: Arc<dyn AccessGate>,
    clock: Arc<dyn TimeSource>,
    cleaner: Arc<dyn IdCleaner>,
    title_matcher: Arc<ValueMatcher>,
    candidate_override: Option<Arc<dyn CandidateOverride>>,
    config: SearchConfig,
}

impl PageSearch {
    #[must_use]
    pub fn new(
        index: Arc<dyn IndexReader>,
        gate: Arc<dyn AccessGate>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self::with_config(index, gate, clock, SearchConfig::default())
    }

    #[must_use]
    pub fn with_config(
        index: Arc<dyn IndexReader>,
        gate: Arc<dyn AccessGate>,
        clock: Arc<dyn TimeSource>,
        config: SearchConfig,
    ) -> Self {
        Self {
            index,
            gate,
            clock,
            cleaner: Arc::new(DefaultIdCleaner),
            title_matcher: config.title_match.matcher(),
            candidate_override: None,
            config,
        }
    }

    #[must_use]
    pub fn with_cleaner(mut self, cleaner: Arc<dyn IdCleaner>) -> Self {
        self.cleaner = cleaner;
        self
    }

    /// Replaces the title predicate chosen by the configured match mode.
    #[must_use]
    pub fn with_title_matcher(mut self, matcher: Arc<ValueMatcher>) -> Self {
        self.title_matcher = matcher;
        self
    }

    #[must_use]
    pub fn with_override(mut self, candidate_override: Arc<dyn CandidateOverride>) -> Self {
        self.candidate_override = Some(candidate_override);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Matches, filters and ranks pages for a raw query.
    pub fn page_lookup(
        &self,
        raw: &str,
        in_namespace: bool,
        in_title: bool,
        after: Option<TimeBound>,
        before: Option<TimeBound>,
    ) -> Result<Vec<PageHit>> {
        let mut query = parse_query(raw);
        query.match_namespace = in_namespace;
        query.search_in_title = in_title;
        query.after = after;
        query.before = before;
        self.query(&query)
    }

    pub fn lookup(&self, request: &PageLookupRequest) -> Result<Vec<PageHit>> {
        self.page_lookup(
            &request.query,
            request.in_namespace,
            request.in_title,
            request.after.clone(),
            request.before.clone(),
        )
    }

    /// Runs the pipeline for an already structured query.
    pub fn query(&self, query: &StructuredQuery) -> Result<Vec<PageHit>> {
        let candidates = self.candidates(query)?;
        let discovered = candidates.len();
        let filtered = ResultFilter::new(self.gate.as_ref(), self.clock.as_ref())
            .with_permission_mode(PermissionMode::Enforce)
            .with_date_expressions(self.config.date_expressions)
            .apply(candidates, query.after.as_ref(), query.before.as_ref())?;
        let ranked = rank(filtered);
        debug!(
            terms = query.highlight_terms.len(),
            discovered,
            returned = ranked.len(),
            "page lookup finished"
        );
        Ok(ranked)
    }

    /// Unfiltered candidates, through the override when one is installed.
    pub fn candidates(&self, query: &StructuredQuery) -> Result<CandidateSet> {
        let default = |query: &StructuredQuery| self.default_candidates(query);
        match &self.candidate_override {
            Some(candidate_override) => {
                debug!("candidate override installed");
                candidate_override.candidates(query, &default)
            }
            None => default(query),
        }
    }

    fn default_candidates(&self, query: &StructuredQuery) -> Result<CandidateSet> {
        collect_candidates(
            query,
            self.index.as_ref(),
            self.cleaner.as_ref(),
            self.title_matcher.as_ref(),
        )
    }

    pub fn backlinks(&self, id: &str, mode: PermissionMode) -> Result<Vec<PageId>> {
        lookup_references(
            self.index.as_ref(),
            self.gate.as_ref(),
            RELATION_REFERENCES,
            id,
            mode,
        )
    }

    pub fn media_users(&self, media_id: &str, mode: PermissionMode) -> Result<Vec<PageId>> {
        lookup_references(
            self.index.as_ref(),
            self.gate.as_ref(),
            RELATION_MEDIA,
            media_id,
            mode,
        )
    }

    pub fn references(&self, request: &ReferenceRequest) -> Result<Vec<PageId>> {
        match request.kind {
            ReferenceKind::Backlinks => self.backlinks(&request.id, request.ignore_permissions),
            ReferenceKind::MediaUse => self.media_users(&request.id, request.ignore_permissions),
        }
    }
}

impl fmt::Debug for PageSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSearch")
            .field("config", &self.config)
            .field("has_override", &self.candidate_override.is_some())
            .finish_non_exhaustive()
    }
}
