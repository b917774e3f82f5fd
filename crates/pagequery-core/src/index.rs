use std::collections::BTreeMap;

use crate::error::Result;
use crate::page_id::PageId;

pub const RELATION_TITLE: &str = "title";
pub const RELATION_REFERENCES: &str = "references-this-page";
pub const RELATION_MEDIA: &str = "uses-this-media";

/// Page id -> the stored metadata value that matched.
pub type KeyMatches = BTreeMap<PageId, String>;

/// `matcher(searched_value, stored_value)`.
pub type ValueMatcher = dyn Fn(&str, &str) -> bool + Send + Sync;

/// Read interface of the metadata index. The core never writes through it.
pub trait IndexReader: Send + Sync {
    /// Pages whose `relation` metadata matches `value`. Without a matcher a
    /// stored value must equal `value`; with one, the matcher decides.
    fn lookup_key(
        &self,
        relation: &str,
        value: &str,
        matcher: Option<&ValueMatcher>,
    ) -> Result<KeyMatches>;

    fn list_all_pages(&self) -> Result<Vec<PageId>>;

    fn first_heading(&self, id: &PageId) -> Result<Option<String>>;
}

/// Case-insensitive containment. The searched value usually arrives in
/// cleaned id form, so `_` also matches a space in the title.
#[must_use]
pub fn title_contains(search: &str, title: &str) -> bool {
    let title = title.to_lowercase();
    let search = search.to_lowercase();
    title.contains(&search) || title.contains(&search.replace('_', " "))
}

#[must_use]
pub fn title_starts_with(search: &str, title: &str) -> bool {
    let title = title.to_lowercase();
    let search = search.to_lowercase();
    title.starts_with(&search) || title.starts_with(&search.replace('_', " "))
}

#[must_use]
pub fn title_equals(search: &str, title: &str) -> bool {
    let title = title.trim().to_lowercase();
    let search = search.to_lowercase();
    title == search || title == search.replace('_', " ")
}
