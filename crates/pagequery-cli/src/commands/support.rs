use std::io::{self, Write};

use anyhow::Result;
use pagequery_core::{ErrorPayload, TimeBound};

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(super) fn print_error_payload(payload: &ErrorPayload) -> Result<()> {
    let mut stderr = io::stderr().lock();
    serde_json::to_writer_pretty(&mut stderr, payload)?;
    writeln!(stderr)?;
    Ok(())
}

/// Whole numbers are unix seconds; everything else is left for the time
/// source to resolve.
pub(super) fn parse_time_bound(raw: &str) -> TimeBound {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(seconds) => TimeBound::Epoch(seconds),
        Err(_) => TimeBound::Expression(trimmed.to_string()),
    }
}
