//! YAML-configured flag queries.
//!
//! A query file lists the flags to read back from a recorded command line
//! and how each one should be interpreted.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! queries:
//!   - flag: "-q"
//!     kind: values
//!   - flag: "--l"
//!     kind: float
//!   - flag: "-b"
//!     kind: int
//!   - flag: "--noconstant"
//!     kind: present
//! ```

use std::collections::HashSet;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command_line::RecordedCommandLine;
use crate::error::{OptsError, Result};
use crate::lookup::Lookup;

/// How the values of a queried flag are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Every recorded value, as text.
    Values,
    /// The single value as a float.
    Float,
    /// The single value as an integer.
    Int,
    /// Whether the flag was recorded at all.
    Present,
}

/// A single flag to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagQuery {
    /// Literal flag text, dashes included (e.g. `"--quadratic"`).
    pub flag: String,
    pub kind: QueryKind,
}

impl FlagQuery {
    pub fn new(flag: impl Into<String>, kind: QueryKind) -> Self {
        Self {
            flag: flag.into(),
            kind,
        }
    }

    /// Evaluates this query against `command_line`.
    pub fn evaluate(&self, command_line: &RecordedCommandLine<'_>) -> QueryOutcome {
        let result = match self.kind {
            QueryKind::Values => QueryResult::Values(command_line.values(&self.flag)),
            QueryKind::Float => QueryResult::Float(command_line.lookup(&self.flag)),
            QueryKind::Int => QueryResult::Int(command_line.lookup(&self.flag)),
            QueryKind::Present => QueryResult::Present(command_line.contains(&self.flag)),
        };
        QueryOutcome {
            flag: self.flag.clone(),
            kind: self.kind,
            result,
        }
    }
}

/// The value(s) read for one [`FlagQuery`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryResult {
    Values(Vec<String>),
    Float(Lookup<f64>),
    Int(Lookup<i64>),
    Present(bool),
}

/// A query paired with its result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub flag: String,
    pub kind: QueryKind,
    pub result: QueryResult,
}

/// A set of flag queries, loaded from YAML.
///
/// # Examples
///
/// ```
/// use slim_opts_core::{Lookup, QueryConfig, QueryResult, RecordedCommandLine};
///
/// let config = QueryConfig::from_yaml_str(r#"
/// version: "1.0"
/// queries:
///   - { flag: "--l", kind: float }
/// "#).unwrap();
///
/// let outcomes = config.evaluate(&RecordedCommandLine::new("--l 0.5"));
/// assert_eq!(outcomes[0].result, QueryResult::Float(Lookup::Found(0.5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    #[serde(default)]
    pub queries: Vec<FlagQuery>,
}

impl QueryConfig {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            queries: Vec::new(),
        }
    }

    /// Adds a query, builder style.
    pub fn with_query(mut self, flag: impl Into<String>, kind: QueryKind) -> Self {
        self.queries.push(FlagQuery::new(flag, kind));
        self
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](OptsError::YamlError) if parsing fails, or
    /// [`InvalidQuery`](OptsError::InvalidQuery) if validation fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](OptsError::IoError) if the file cannot be read,
    /// [`YamlError`](OptsError::YamlError) if parsing fails, or
    /// [`InvalidQuery`](OptsError::InvalidQuery) if validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        debug!(path = %path.display(), queries = config.queries.len(), "Loaded query config");
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](OptsError::IoError) if the file cannot be
    /// written, or [`YamlError`](OptsError::YamlError) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks for an empty version, empty flag names, and duplicate queries.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQuery`](OptsError::InvalidQuery) describing the
    /// first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(OptsError::InvalidQuery(
                "version cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for query in &self.queries {
            if query.flag.trim().is_empty() {
                return Err(OptsError::InvalidQuery(
                    "flag cannot be empty".to_string(),
                ));
            }
            if !seen.insert((query.flag.as_str(), query.kind)) {
                return Err(OptsError::InvalidQuery(format!(
                    "duplicate query: {} ({:?})",
                    query.flag, query.kind
                )));
            }
        }

        Ok(())
    }

    /// Evaluates every query in order.
    pub fn evaluate(&self, command_line: &RecordedCommandLine<'_>) -> Vec<QueryOutcome> {
        self.queries
            .iter()
            .map(|query| query.evaluate(command_line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
queries:
  - flag: "-q"
    kind: values
  - flag: "--l"
    kind: float
  - flag: "-b"
    kind: int
  - flag: "--noconstant"
    kind: present
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config = QueryConfig::from_yaml_str(sample_yaml()).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.queries.len(), 4);
        assert_eq!(config.queries[0], FlagQuery::new("-q", QueryKind::Values));
        assert_eq!(config.queries[3].kind, QueryKind::Present);
    }

    #[test]
    fn test_missing_queries_defaults_to_empty() {
        let config = QueryConfig::from_yaml_str("version: \"1.0\"\n").unwrap();
        assert!(config.queries.is_empty());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let yaml = "version: \"1.0\"\nqueries:\n  - { flag: \"-b\", kind: bool }\n";
        assert!(matches!(
            QueryConfig::from_yaml_str(yaml),
            Err(OptsError::YamlError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_version() {
        let err = QueryConfig::new(" ").validate().unwrap_err();
        assert!(matches!(err, OptsError::InvalidQuery(_)));
    }

    #[test]
    fn test_validate_rejects_empty_flag() {
        let config = QueryConfig::new("1.0").with_query("", QueryKind::Values);
        assert!(matches!(
            config.validate(),
            Err(OptsError::InvalidQuery(msg)) if msg == "flag cannot be empty"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = QueryConfig::new("1.0")
            .with_query("-b", QueryKind::Int)
            .with_query("-b", QueryKind::Int);
        assert!(config.validate().is_err());

        // Same flag read two different ways is fine.
        let config = QueryConfig::new("1.0")
            .with_query("-b", QueryKind::Int)
            .with_query("-b", QueryKind::Values);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_evaluate() {
        let config = QueryConfig::from_yaml_str(sample_yaml()).unwrap();
        let recorded = RecordedCommandLine::new("-b 18 -q ab -q cd --l 0.5 --l 0.7");
        let outcomes = config.evaluate(&recorded);

        assert_eq!(
            outcomes[0].result,
            QueryResult::Values(vec!["ab".to_string(), "cd".to_string()])
        );
        assert_eq!(outcomes[1].result, QueryResult::Float(Lookup::Ambiguous(2)));
        assert_eq!(outcomes[2].result, QueryResult::Int(Lookup::Found(18)));
        assert_eq!(outcomes[3].result, QueryResult::Present(false));
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = FlagQuery::new("-b", QueryKind::Int).evaluate(&RecordedCommandLine::new("-b 18"));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "flag": "-b",
                "kind": "int",
                "result": {"int": {"status": "found", "value": 18}}
            })
        );
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queries.yml");

        let original = QueryConfig::from_yaml_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = QueryConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = QueryConfig::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, OptsError::IoError(_)));
    }
}
