use tracing::debug;

use crate::error::Result;
use crate::index::{IndexReader, RELATION_TITLE, ValueMatcher};
use crate::models::{CandidateSet, StructuredQuery};
use crate::page_id::{IdCleaner, NAMESPACE_SEPARATOR};

/// Id and title matching for one structured query.
///
/// The cleaned query must be non-empty; an empty needle would match every
/// page. Ids matched by the id pass keep their display value when the title
/// pass finds them again.
pub fn collect_candidates(
    query: &StructuredQuery,
    index: &dyn IndexReader,
    cleaner: &dyn IdCleaner,
    title_matcher: &ValueMatcher,
) -> Result<CandidateSet> {
    let mut candidates = CandidateSet::new();
    let cleaned = cleaner.clean(&query.joined_terms());
    if cleaned.is_empty() {
        debug!(terms = query.highlight_terms.len(), "query cleans to nothing; no candidates");
        return Ok(candidates);
    }

    for id in index.list_all_pages()? {
        let key = if query.match_namespace {
            id.as_str()
        } else {
            id.strip_leading_namespace()
        };
        if !key.contains(cleaned.as_str()) {
            continue;
        }
        candidates.insert_with(id, |id| index.first_heading(id))?;
    }
    let id_matches = candidates.len();

    if query.search_in_title {
        for (id, title) in index.lookup_key(RELATION_TITLE, &cleaned, Some(title_matcher))? {
            candidates.insert(id, Some(title));
        }
    }
    debug!(
        needle = %cleaned,
        id_matches,
        title_matches = candidates.len() - id_matches,
        "collected page candidates"
    );

    apply_namespace_rules(&mut candidates, query, cleaner);
    Ok(candidates)
}

fn apply_namespace_rules(
    candidates: &mut CandidateSet,
    query: &StructuredQuery,
    cleaner: &dyn IdCleaner,
) {
    if let Some(scope) = &query.namespace_scope {
        let namespace = cleaner.clean(&join_segments(scope));
        // A scope that cleans to nothing admits no page.
        candidates.retain(|hit| hit.id.is_within(&namespace));
        debug!(namespace = %namespace, remaining = candidates.len(), "applied namespace scope");
    }

    let excluded = query
        .excluded_namespaces
        .iter()
        .map(|segments| cleaner.clean(&join_segments(segments)))
        .filter(|namespace| !namespace.is_empty())
        .collect::<Vec<_>>();
    if !excluded.is_empty() {
        candidates.retain(|hit| !excluded.iter().any(|namespace| hit.id.is_within(namespace)));
    }
}

fn join_segments(segments: &[String]) -> String {
    segments.join(NAMESPACE_SEPARATOR.to_string().as_str())
}
