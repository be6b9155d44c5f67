//! Option values from recorded command lines.
//!
//! A trained model stores the command line it was trained with. An
//! inference-only runtime needs a handful of those settings back (feature
//! interactions, hash seed, exploration parameters) without pulling in a
//! full argument parser. This crate scans the recorded text directly:
//!
//! - [`extract_values`] — every value recorded for a flag, in order.
//! - [`lookup`] — the single value of a flag as a number, distinguishing
//!   missing ([`Lookup::NotFound`]) from repeated ([`Lookup::Ambiguous`]).
//! - [`extract_typed`], [`extract_float`], [`extract_int`] — the same as a
//!   `(value, found)` pair where missing and repeated both read as "use the
//!   default".
//! - [`RecordedCommandLine`] — method-style access to all of the above.
//! - [`QueryConfig`] — a YAML list of flags to read, evaluated in one go.
//!
//! Numbers are converted leniently ([`LenientParse`]): the numeric prefix of
//! a value is used and the rest ignored, so `18bits` reads as `18`.
//!
//! # Example
//!
//! ```
//! use slim_opts_core::*;
//!
//! let recorded = "-b 18 -q ab -q cd --epsilon 0.05 --l 0.5 --l 0.7 --noconstant";
//!
//! assert_eq!(extract_values(recorded, "-q"), vec!["ab", "cd"]);
//! assert_eq!(extract_float(recorded, "--epsilon"), (0.05, true));
//! assert_eq!(extract_int(recorded, "-b"), (18, true));
//!
//! // Repeated single-value flags are reported as ambiguous...
//! assert_eq!(lookup::<f32>(recorded, "--l"), Lookup::Ambiguous(2));
//! // ...and read as "not found" through the boolean interface.
//! assert_eq!(extract_float(recorded, "--l"), (0.0, false));
//!
//! assert!(RecordedCommandLine::new(recorded).contains("--noconstant"));
//! ```

mod command_line;
mod error;
mod lookup;
mod numeric;
mod output;
mod query;
mod scan;

pub use command_line::RecordedCommandLine;
pub use error::{OptsError, Result};
pub use lookup::{Lookup, extract_float, extract_int, extract_typed, find_opt_parse, lookup};
pub use numeric::{LenientParse, serialize_number};
pub use output::{OutputFormat, format_outcomes, format_value};
pub use query::{FlagQuery, QueryConfig, QueryKind, QueryOutcome, QueryResult};
pub use scan::{extract_value_slices, extract_values, extract_values_into};
