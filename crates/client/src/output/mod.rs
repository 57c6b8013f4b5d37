//! Output formatting functions.

pub mod json;
pub mod pretty;

use dynoql_core::attribute::DecodedRecord;

use crate::cli::OutputFormat;

/// Format query records for output.
pub fn format_records(records: &[DecodedRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(&records),
        OutputFormat::Pretty => pretty::format_records(records),
    }
}
