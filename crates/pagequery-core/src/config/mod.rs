mod env;
mod search;

pub use search::{
    ENV_DATE_EXPRESSIONS, ENV_HIDDEN_PAGES, ENV_TITLE_MATCH, ENV_TITLE_SEARCH, SearchConfig,
    TitleMatchMode,
};
