//! Borrowed view over a recorded command line.

use std::fmt;

use serde::Serialize;

use crate::lookup::{Lookup, lookup};
use crate::numeric::LenientParse;
use crate::scan::{extract_value_slices, extract_values};

/// The command line stored alongside a trained model.
///
/// Wraps the recorded text so the scanning functions can be called as
/// methods. The view never copies the buffer.
///
/// # Examples
///
/// ```
/// use slim_opts_core::{Lookup, RecordedCommandLine};
///
/// let recorded = RecordedCommandLine::new("-b 18 -q ab -q cd --noconstant");
/// assert_eq!(recorded.values("-q"), vec!["ab", "cd"]);
/// assert_eq!(recorded.int("-b"), (18, true));
/// assert_eq!(recorded.lookup::<i32>("-q"), Lookup::Ambiguous(2));
/// assert!(recorded.contains("--noconstant"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordedCommandLine<'a> {
    text: &'a str,
}

impl<'a> RecordedCommandLine<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Returns the recorded text.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn values(&self, flag_name: &str) -> Vec<String> {
        extract_values(self.text, flag_name)
    }

    pub fn value_slices(&self, flag_name: &str) -> Vec<&'a str> {
        extract_value_slices(self.text, flag_name)
    }

    pub fn lookup<T: LenientParse>(&self, flag_name: &str) -> Lookup<T> {
        lookup(self.text, flag_name)
    }

    /// Same as [`extract_typed`](crate::extract_typed).
    pub fn typed<T: LenientParse>(&self, flag_name: &str) -> (T, bool) {
        self.lookup(flag_name).into_legacy(T::default())
    }

    pub fn float(&self, flag_name: &str) -> (f32, bool) {
        self.typed(flag_name)
    }

    pub fn int(&self, flag_name: &str) -> (i32, bool) {
        self.typed(flag_name)
    }

    /// Returns `true` if `flag_name` was recorded, with or without a value.
    ///
    /// Matches `flag_name` followed by a space or at the very end of the
    /// text. Like value scanning, the left side of the match is unbounded.
    /// An empty `flag_name` is never contained.
    pub fn contains(&self, flag_name: &str) -> bool {
        if flag_name.is_empty() {
            return false;
        }
        let mut pattern = String::with_capacity(flag_name.len() + 1);
        pattern.push_str(flag_name);
        pattern.push(' ');
        self.text.contains(&pattern) || self.text.ends_with(flag_name)
    }
}

impl<'a> From<&'a str> for RecordedCommandLine<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for RecordedCommandLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_switch_without_value() {
        let recorded = RecordedCommandLine::new("--noconstant -b 18");
        assert!(recorded.contains("--noconstant"));
        assert!(recorded.contains("-b"));
        assert!(!recorded.contains("--hash_seed"));
    }

    #[test]
    fn test_contains_at_end_of_text() {
        let recorded = RecordedCommandLine::new("-b 18 --noconstant");
        assert!(recorded.contains("--noconstant"));
        assert!(!recorded.contains("--noconst"));
    }

    #[test]
    fn test_contains_rejects_empty_flag() {
        assert!(!RecordedCommandLine::new("-b 18").contains(""));
        assert!(!RecordedCommandLine::new("").contains(""));
    }

    #[test]
    fn test_typed_accessors() {
        let recorded = RecordedCommandLine::from("--epsilon 0.25 --hash_seed 7");
        assert_eq!(recorded.float("--epsilon"), (0.25, true));
        assert_eq!(recorded.typed::<u64>("--hash_seed"), (7, true));
        assert_eq!(recorded.int("--bits"), (0, false));
    }

    #[test]
    fn test_display_and_serialize_as_text() {
        let recorded = RecordedCommandLine::new("-q ab");
        assert_eq!(recorded.to_string(), "-q ab");
        assert_eq!(serde_json::to_string(&recorded).unwrap(), "\"-q ab\"");
        assert_eq!(recorded.value_slices("-q"), vec!["ab"]);
        assert_eq!(recorded.as_str(), "-q ab");
    }
}
