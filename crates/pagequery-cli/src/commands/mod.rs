use std::sync::Arc;

use anyhow::{Context, Result};
use pagequery_core::{LookupError, MemoryIndex, PageSearch, PermissionMode, SearchConfig};
use tracing::debug;

use crate::cli::{Cli, Commands};

mod support;


use self::support::{parse_time_bound, print_error_payload, print_json};

pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = SearchConfig::from_env()?;
    let index = MemoryIndex::load(&cli.snapshot)
        .with_context(|| format!("failed to load snapshot {}", cli.snapshot.display()))?
        .with_hidden_patterns(&config.hidden_pages)?;
    debug!(pages = index.len(), "snapshot ready");

    let index = Arc::new(index);
    let search = PageSearch::with_config(index.clone(), index.clone(), index, config);
    run_command(&search, cli.command)
}

fn run_command(search: &PageSearch, command: Commands) -> Result<()> {
    match command {
        Commands::Lookup(args) => {
            let in_title = !args.no_title && search.config().title_search;
            let hits = search.page_lookup(
                &args.query,
                args.in_namespace,
                in_title,
                args.after.as_deref().map(parse_time_bound),
                args.before.as_deref().map(parse_time_bound),
            )?;
            print_json(&hits)?;
        }
        Commands::Backlinks(args) => {
            let pages = search.backlinks(&args.id, PermissionMode::from_flag(args.ignore_permissions))?;
            print_json(&pages)?;
        }
        Commands::MediaUse(args) => {
            let pages =
                search.media_users(&args.id, PermissionMode::from_flag(args.ignore_permissions))?;
            print_json(&pages)?;
        }
    }
    Ok(())
}

/// Core errors go to stderr as an error payload; anything else as text.
pub(crate) fn report_error(operation: &str, err: &anyhow::Error) {
    match err.downcast_ref::<LookupError>() {
        Some(lookup_error) => {
            if print_error_payload(&lookup_error.to_payload(operation, None)).is_err() {
                eprintln!("error: {err:#}");
            }
        }
        None => eprintln!("error: {err:#}"),
    }
}
