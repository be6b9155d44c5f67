//! Typed lookup of single-valued flags.
//!
//! [`lookup`] reports whether a flag was missing, repeated, or present
//! exactly once. [`extract_typed`] collapses that into the `(value, found)`
//! pair older callers expect, where missing and repeated are both
//! `found == false`.

use serde::Serialize;

use crate::numeric::{LenientParse, serialize_number};
use crate::scan::extract_value_slices;

/// Result of looking up a flag that is expected to carry one value.
///
/// Serialized with a `status` tag. A found infinity or NaN is written as
/// the string `"inf"`, `"-inf"` or `"nan"` so JSON output keeps it.
///
/// # Examples
///
/// ```
/// use slim_opts_core::{Lookup, lookup};
///
/// assert_eq!(lookup::<f32>("--l 0.5", "--l"), Lookup::Found(0.5));
/// assert_eq!(lookup::<f32>("--l 0.5 --l 0.7", "--l"), Lookup::Ambiguous(2));
/// assert_eq!(lookup::<f32>("-b 18", "--l"), Lookup::NotFound);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
#[serde(bound(serialize = "T: LenientParse + Serialize"))]
pub enum Lookup<T> {
    /// The flag has no recorded value.
    NotFound,
    /// The flag has this many recorded values (always at least two).
    Ambiguous(usize),
    /// The flag has exactly one recorded value.
    #[serde(serialize_with = "serialize_number")]
    Found(T),
}

impl<T> Lookup<T> {
    /// Returns `true` for [`Lookup::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the value when exactly one was recorded.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound | Self::Ambiguous(_) => None,
        }
    }

    /// Returns the value, or `default` when missing or repeated.
    pub fn unwrap_or(self, default: T) -> T {
        self.found().unwrap_or(default)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::NotFound => Lookup::NotFound,
            Self::Ambiguous(count) => Lookup::Ambiguous(count),
            Self::Found(value) => Lookup::Found(f(value)),
        }
    }

    /// Collapses into the `(value, found)` pair, using `default` when the
    /// flag is missing or repeated.
    pub fn into_legacy(self, default: T) -> (T, bool) {
        match self {
            Self::Found(value) => (value, true),
            Self::NotFound | Self::Ambiguous(_) => (default, false),
        }
    }
}

/// Looks up `flag_name` and converts its single value to `T`.
pub fn lookup<T: LenientParse>(buffer: &str, flag_name: &str) -> Lookup<T> {
    match extract_value_slices(buffer, flag_name).as_slice() {
        [] => Lookup::NotFound,
        [value] => Lookup::Found(T::parse_lenient(value)),
        values => Lookup::Ambiguous(values.len()),
    }
}

/// Converts the single value of `flag_name` to `T`.
///
/// Returns `(value, true)` when the flag occurs exactly once. When it is
/// missing or repeated the result is `(T::default(), false)`; use
/// [`lookup`] to tell those two cases apart.
///
/// # Examples
///
/// ```
/// use slim_opts_core::extract_typed;
///
/// assert_eq!(extract_typed::<f32>("--l 0.5", "--l"), (0.5, true));
/// assert!(!extract_typed::<f32>("--l 0.5 --l 0.7", "--l").1);
/// ```
pub fn extract_typed<T: LenientParse>(buffer: &str, flag_name: &str) -> (T, bool) {
    lookup(buffer, flag_name).into_legacy(T::default())
}

/// Writes the single value of `flag_name` into `value` and returns `true`.
///
/// `value` is left untouched when the flag is missing or repeated, so
/// callers can pre-fill it with their default.
pub fn find_opt_parse<T: LenientParse>(buffer: &str, flag_name: &str, value: &mut T) -> bool {
    match lookup(buffer, flag_name) {
        Lookup::Found(parsed) => {
            *value = parsed;
            true
        }
        Lookup::NotFound | Lookup::Ambiguous(_) => false,
    }
}

/// [`extract_typed`] for `f32`.
pub fn extract_float(buffer: &str, flag_name: &str) -> (f32, bool) {
    extract_typed(buffer, flag_name)
}

/// [`extract_typed`] for `i32`.
pub fn extract_int(buffer: &str, flag_name: &str) -> (i32, bool) {
    extract_typed(buffer, flag_name)
}
