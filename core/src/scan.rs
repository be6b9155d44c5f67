//! Flag value scanning over a recorded command line.
//!
//! The scanner is a plain substring search: it looks for `flag + " "`,
//! skips whitespace, and then either takes the following token as a value
//! or, when the token looks like another flag (`-` not followed by a
//! digit), resumes the search from that token.
//!
//! Two matching rules are deliberately loose and callers may observe them:
//!
//! - The left side of a match is unbounded, so searching for `q` also
//!   matches the tail of `freq `.
//! - After a value is taken the search resumes one byte past the start of
//!   that value rather than past its end, so a value that itself ends with
//!   the flag name can produce another match.
//!
//! # Examples
//!
//! ```
//! use slim_opts_core::extract_values;
//!
//! assert_eq!(extract_values("-q ab -v -q cd", "-q"), vec!["ab", "cd"]);
//! assert_eq!(extract_values("-r -5.2", "-r"), vec!["-5.2"]);
//! assert!(extract_values("-r -v", "-r").is_empty());
//! ```

use tracing::{debug, trace};

/// Returns `true` for the bytes C's `isspace` accepts in the "C" locale.
///
/// Unlike [`u8::is_ascii_whitespace`], this includes vertical tab (`0x0B`).
pub(crate) fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() || needle.len() > haystack.len() - from {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}

/// Returns the values recorded for `flag_name` as slices of `buffer`.
///
/// This is the allocation-free core of [`extract_values`]; only the result
/// vector is allocated. Values are returned in order of appearance and
/// repeats are kept.
pub fn extract_value_slices<'a>(buffer: &'a str, flag_name: &str) -> Vec<&'a str> {
    let mut pattern = String::with_capacity(flag_name.len() + 1);
    pattern.push_str(flag_name);
    pattern.push(' ');

    let bytes = buffer.as_bytes();
    let needle = pattern.as_bytes();
    let mut values = Vec::new();
    let mut start = 0;

    while start < bytes.len() {
        let Some(idx) = find_from(bytes, needle, start) else {
            break;
        };

        let mut value_start = idx + needle.len();
        while value_start < bytes.len() && is_c_space(bytes[value_start]) {
            value_start += 1;
        }
        if value_start == bytes.len() {
            break;
        }

        // `-5.2` is a value, `-v` is the next flag.
        let next_is_digit = bytes
            .get(value_start + 1)
            .is_some_and(|byte| byte.is_ascii_digit());
        if bytes[value_start] == b'-' && !next_is_digit {
            trace!(flag = flag_name, offset = value_start, "Skipping flag-like token");
            start = value_start;
            continue;
        }

        let mut value_end = value_start;
        while value_end < bytes.len() && !is_c_space(bytes[value_end]) {
            value_end += 1;
        }

        // Both ends sit next to ASCII bytes, so they are char boundaries.
        let value = &buffer[value_start..value_end];
        if !value.is_empty() {
            values.push(value);
        }

        start = value_start + 1;
    }

    debug!(flag = flag_name, count = values.len(), "Scanned recorded command line");
    values
}

/// Appends the values recorded for `flag_name` to `out`.
///
/// Existing contents of `out` are left in place.
pub fn extract_values_into(buffer: &str, flag_name: &str, out: &mut Vec<String>) {
    out.extend(
        extract_value_slices(buffer, flag_name)
            .into_iter()
            .map(str::to_string),
    );
}

/// Returns every value recorded for `flag_name`, in order of appearance.
///
/// A flag that never occurs yields an empty vector.
///
/// # Examples
///
/// ```
/// use slim_opts_core::extract_values;
///
/// let recorded = "--l 0.5 --l 0.7";
/// assert_eq!(extract_values(recorded, "--l"), vec!["0.5", "0.7"]);
/// assert!(extract_values(recorded, "--power_t").is_empty());
/// ```
pub fn extract_values(buffer: &str, flag_name: &str) -> Vec<String> {
    let mut values = Vec::new();
    extract_values_into(buffer, flag_name, &mut values);
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_flag_with_interleaved_switch() {
        assert_eq!(extract_values("-q ab -v -q cd", "-q"), vec!["ab", "cd"]);
    }

    #[test]
    fn test_missing_flag_yields_nothing() {
        assert!(extract_values("--quadratic ab", "-q").is_empty());
        assert!(extract_values("", "-q").is_empty());
    }

    #[test]
    fn test_flag_requires_trailing_space() {
        // `-q` at the very end has no separator, so it never matches.
        assert!(extract_values("-b 18 -q", "-q").is_empty());
        assert!(extract_values("--quadratic ab", "--quad").is_empty());
    }

    #[test]
    fn test_trailing_flag_without_value() {
        assert!(extract_values("-q   ", "-q").is_empty());
        assert_eq!(extract_values("-q ab -q \t", "-q"), vec!["ab"]);
    }

    #[test]
    fn test_negative_number_is_a_value() {
        assert_eq!(extract_values("-r -5.2", "-r"), vec!["-5.2"]);
        assert_eq!(extract_values("--l1 -1e-3 -b 2", "--l1"), vec!["-1e-3"]);
    }

    #[test]
    fn test_dash_token_is_next_flag() {
        assert!(extract_values("-r -v", "-r").is_empty());
        assert!(extract_values("-r --", "-r").is_empty());
        assert!(extract_values("-r -", "-r").is_empty());
    }

    #[test]
    fn test_rejected_flag_is_searched_again() {
        // The rejected `-q` token is itself an occurrence of the flag.
        assert_eq!(extract_values("-q -q x", "-q"), vec!["x"]);
    }

    #[test]
    fn test_extra_whitespace_between_flag_and_value() {
        assert_eq!(
            extract_values("--l \t\n 0.5\x0b--l  0.7", "--l"),
            vec!["0.5", "0.7"]
        );
    }

    #[test]
    fn test_vertical_tab_terminates_value() {
        assert_eq!(extract_values("-b 18\x0b-q ab", "-b"), vec!["18"]);
    }

    #[test]
    fn test_left_side_of_match_is_unbounded() {
        assert_eq!(extract_values("--freq 3", "q"), vec!["3"]);
    }

    #[test]
    fn test_resume_inside_consumed_value() {
        // The search restarts one byte into `yx`, so the `x ` inside it
        // matches again and `z` is picked up as a second value.
        assert_eq!(extract_values("x yx z", "x"), vec!["yx", "z"]);
    }

    #[test]
    fn test_multibyte_values_are_kept_whole() {
        assert_eq!(
            extract_values("--name ünïcødé --name 名前", "--name"),
            vec!["ünïcødé", "名前"]
        );
    }

    #[test]
    fn test_empty_flag_name_does_not_panic() {
        assert_eq!(extract_values("a b", ""), vec!["b"]);
    }

    #[test]
    fn test_extract_values_into_appends() {
        let mut out = vec!["existing".to_string()];
        extract_values_into("-q ab -q cd", "-q", &mut out);
        assert_eq!(out, vec!["existing", "ab", "cd"]);
    }

    #[test]
    fn test_slices_borrow_from_buffer() {
        let buffer = String::from("--interactions abc --interactions de");
        let slices = extract_value_slices(&buffer, "--interactions");
        assert_eq!(slices, vec!["abc", "de"]);
        let base = buffer.as_ptr() as usize;
        assert_eq!(slices[0].as_ptr() as usize - base, 15);
    }

    #[test]
    fn test_is_c_space() {
        for byte in [b' ', b'\t', b'\n', 0x0b, 0x0c, b'\r'] {
            assert!(is_c_space(byte));
        }
        assert!(!is_c_space(b'a'));
        assert!(!is_c_space(0xa0));
    }
}
