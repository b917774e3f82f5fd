mod engine;
mod filter;
mod hook;
mod matcher;
mod ranking;
mod references;

pub use engine::PageSearch;
pub use filter::{ResultFilter, filter_candidates};
pub use hook::CandidateOverride;
pub use matcher::collect_candidates;
pub use ranking::{compare_pages, rank};
pub use references::lookup_references;
