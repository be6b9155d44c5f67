//! Output formatting for query outcomes.

use serde::Serialize;

use crate::error::Result;
use crate::lookup::Lookup;
use crate::query::{QueryOutcome, QueryResult};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Serializes any result value as JSON or YAML.
///
/// [`OutputFormat::Table`] falls back to pretty JSON; use
/// [`format_outcomes`] for a tabular view of query outcomes.
pub fn format_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/// Formats query outcomes in the requested output format.
pub fn format_outcomes(outcomes: &[QueryOutcome], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(outcomes_to_table(outcomes)),
        OutputFormat::Json | OutputFormat::Yaml => format_value(&outcomes, format),
    }
}

fn lookup_cell<T: std::fmt::Display>(lookup: &Lookup<T>) -> String {
    match lookup {
        Lookup::NotFound => "(not found)".to_string(),
        Lookup::Ambiguous(count) => format!("(ambiguous: {count} values)"),
        Lookup::Found(value) => value.to_string(),
    }
}

fn outcomes_to_table(outcomes: &[QueryOutcome]) -> String {
    let rows: Vec<(String, String, String)> = outcomes
        .iter()
        .map(|outcome| {
            let kind = format!("{:?}", outcome.kind).to_lowercase();
            let result = match &outcome.result {
                QueryResult::Values(values) if values.is_empty() => "(none)".to_string(),
                QueryResult::Values(values) => values.join(" "),
                QueryResult::Float(lookup) => lookup_cell(lookup),
                QueryResult::Int(lookup) => lookup_cell(lookup),
                QueryResult::Present(present) => present.to_string(),
            };
            (outcome.flag.clone(), kind, result)
        })
        .collect();

    let flag_width = rows
        .iter()
        .map(|(flag, _, _)| flag.len())
        .max()
        .unwrap_or(0)
        .max("FLAG".len());
    let kind_width = rows
        .iter()
        .map(|(_, kind, _)| kind.len())
        .max()
        .unwrap_or(0)
        .max("KIND".len());

    let mut out = format!("{:<flag_width$}  {:<kind_width$}  RESULT\n", "FLAG", "KIND");
    for (flag, kind, result) in rows {
        out.push_str(&format!("{flag:<flag_width$}  {kind:<kind_width$}  {result}\n"));
    }
    out
}
