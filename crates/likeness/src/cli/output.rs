//! Result printing.

use super::commands::OutputFormat;
use anyhow::Result;
use serde::Serialize;

/// Print `value` as pretty JSON, or run `human` for the human format.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, human: impl FnOnce(&T)) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Human => human(value),
    }
    Ok(())
}
