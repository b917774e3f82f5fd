use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;


pub use args::{LookupArgs, ReferenceArgs};

#[derive(Debug, Parser)]
#[command(name = "pagequery")]
#[command(about = "Page lookup, backlinks and media usage over a page snapshot", version)]
pub struct Cli {
    /// JSON page snapshot to search.
    #[arg(long, default_value = "pages.json")]
    pub snapshot: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Match page ids and titles, then filter and rank them.
    Lookup(LookupArgs),
    /// Pages linking to a page.
    Backlinks(ReferenceArgs),
    /// Pages embedding a media file.
    MediaUse(ReferenceArgs),
}

impl Commands {
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Lookup(_) => "page_lookup",
            Self::Backlinks(_) => "backlinks",
            Self::MediaUse(_) => "media_use",
        }
    }
}
