use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::access::{AccessGate, PermissionMode};
use crate::clock::TimeSource;
use crate::error::Result;
use crate::models::{CandidateSet, PageHit, TimeBound};

/// Removes candidates that fail access or modification-time checks.
///
/// Never adds or reorders entries, so applying it twice gives the same set.
#[derive(Clone, Copy)]
pub struct ResultFilter<'a> {
    gate: &'a dyn AccessGate,
    clock: &'a dyn TimeSource,
    mode: PermissionMode,
    resolve_expressions: bool,
}

impl<'a> ResultFilter<'a> {
    #[must_use]
    pub fn new(gate: &'a dyn AccessGate, clock: &'a dyn TimeSource) -> Self {
        Self {
            gate,
            clock,
            mode: PermissionMode::Enforce,
            resolve_expressions: true,
        }
    }

    #[must_use]
    pub const fn with_permission_mode(mut self, mode: PermissionMode) -> Self {
        self.mode = mode;
        self
    }

    /// When off, free-form date expressions are treated as absent bounds.
    #[must_use]
    pub const fn with_date_expressions(mut self, enabled: bool) -> Self {
        self.resolve_expressions = enabled;
        self
    }

    pub fn apply(
        &self,
        candidates: CandidateSet,
        after: Option<&TimeBound>,
        before: Option<&TimeBound>,
    ) -> Result<CandidateSet> {
        let candidates = self.apply_access(candidates)?;
        self.apply_time_window(candidates, after, before)
    }

    pub fn apply_access(&self, candidates: CandidateSet) -> Result<CandidateSet> {
        retain_accessible(candidates, self.gate, self.mode)
    }

    pub fn apply_time_window(
        &self,
        mut candidates: CandidateSet,
        after: Option<&TimeBound>,
        before: Option<&TimeBound>,
    ) -> Result<CandidateSet> {
        let after = after.and_then(|bound| self.resolve_bound("after", bound));
        let before = before.and_then(|bound| self.resolve_bound("before", bound));
        if after.is_none() && before.is_none() {
            return Ok(candidates);
        }

        let total = candidates.len();
        candidates.try_retain(|hit| {
            let Some(modified) = self.clock.modification_time(&hit.id)? else {
                return Ok(false);
            };
            Ok(within_window(modified, after, before))
        })?;
        debug!(
            before = total,
            after = candidates.len(),
            "applied modification time window"
        );
        Ok(candidates)
    }

    fn resolve_bound(&self, name: &str, bound: &TimeBound) -> Option<DateTime<Utc>> {
        let resolved = match bound {
            TimeBound::Instant(instant) => Some(*instant),
            TimeBound::Epoch(seconds) => DateTime::from_timestamp(*seconds, 0),
            TimeBound::Expression(expression) if self.resolve_expressions => {
                self.clock.resolve_date(expression)
            }
            TimeBound::Expression(_) => {
                debug!(bound = name, "date expressions disabled; bound ignored");
                return None;
            }
        };
        if resolved.is_none() {
            warn!(bound = name, value = ?bound, "unresolvable time bound ignored");
        }
        resolved
    }
}

/// Visibility, existence and ACL pass. [`PermissionMode::Ignore`] leaves only
/// the existence check.
pub(super) fn retain_accessible(
    mut candidates: CandidateSet,
    gate: &dyn AccessGate,
    mode: PermissionMode,
) -> Result<CandidateSet> {
    let before = candidates.len();
    candidates.try_retain(|hit| passes_access(gate, mode, hit))?;
    debug!(
        before,
        after = candidates.len(),
        checks_permissions = mode.checks_permissions(),
        "applied access filter"
    );
    Ok(candidates)
}

fn passes_access(gate: &dyn AccessGate, mode: PermissionMode, hit: &PageHit) -> Result<bool> {
    if mode.checks_permissions() && !gate.is_visible(&hit.id)? {
        return Ok(false);
    }
    if !gate.exists(&hit.id)? {
        return Ok(false);
    }
    if mode.checks_permissions() && !gate.is_readable(&hit.id)? {
        return Ok(false);
    }
    Ok(true)
}

/// Both ends are inclusive: only strictly earlier than `after` or strictly
/// later than `before` is outside.
fn within_window(
    modified: DateTime<Utc>,
    after: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
) -> bool {
    if after.is_some_and(|after| modified < after) {
        return false;
    }
    if before.is_some_and(|before| modified > before) {
        return false;
    }
    true
}

/// One-call form of [`ResultFilter`]: access pass, then the time window.
pub fn filter_candidates(
    candidates: CandidateSet,
    gate: &dyn AccessGate,
    clock: &dyn TimeSource,
    after: Option<&TimeBound>,
    before: Option<&TimeBound>,
    mode: PermissionMode,
) -> Result<CandidateSet> {
    ResultFilter::new(gate, clock)
        .with_permission_mode(mode)
        .apply(candidates, after, before)
}
