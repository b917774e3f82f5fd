use clap::Args;

#[derive(Debug, Args)]
pub struct LookupArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    /// Match the query against full ids, namespace included.
    #[arg(long, default_value_t = false)]
    pub in_namespace: bool,
    /// Skip the title pass.
    #[arg(long, default_value_t = false)]
    pub no_title: bool,
    /// Keep pages modified at or after this time (unix seconds or a date expression).
    #[arg(long, value_name = "WHEN", allow_hyphen_values = true)]
    pub after: Option<String>,
    /// Keep pages modified at or before this time.
    #[arg(long, value_name = "WHEN", allow_hyphen_values = true)]
    pub before: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReferenceArgs {
    pub id: String,
    /// Skip ACL and visibility checks. Pages must still exist.
    #[arg(long, default_value_t = false)]
    pub ignore_permissions: bool,
}
