//! Lenient text-to-number conversion.
//!
//! Recorded values are converted the way C's `atof` and `atoi` do it: the
//! longest numeric prefix is used, anything after it is ignored, and text
//! with no numeric prefix converts to zero. Conversion never fails and is
//! independent of the process locale.

use serde::{Serialize, Serializer};

use crate::scan::is_c_space;

/// Numeric types that can be read from a recorded value token.
///
/// # Examples
///
/// ```
/// use slim_opts_core::LenientParse;
///
/// assert_eq!(f32::parse_lenient("0.5"), 0.5);
/// assert_eq!(i32::parse_lenient("18bits"), 18);
/// assert_eq!(f64::parse_lenient("abc"), 0.0);
/// ```
pub trait LenientParse: Sized + Copy + Default {
    /// Converts the numeric prefix of `text`, or returns zero.
    fn parse_lenient(text: &str) -> Self;

    /// Text for values JSON has no number for (`inf`, `-inf`, `nan`).
    fn non_finite_label(&self) -> Option<&'static str> {
        None
    }
}

fn float_label(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Serializes a converted value, writing infinities and NaN as strings.
///
/// `serde_json` turns non-finite floats into `null`, which reads the same
/// as a missing value. Use with `#[serde(serialize_with = "...")]`.
pub fn serialize_number<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: LenientParse + Serialize,
    S: Serializer,
{
    match value.non_finite_label() {
        Some(label) => serializer.serialize_str(label),
        None => value.serialize(serializer),
    }
}

fn skip_space(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_c_space(bytes[i]) {
        i += 1;
    }
    i
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Parses the `strtod`-style decimal prefix of `text`.
fn float_prefix(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let start = skip_space(bytes, 0);
    let mut i = start;
    let negative = bytes.get(i) == Some(&b'-');
    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }

    let rest = &text[i..];
    if starts_with_ignore_case(rest, "inf") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if starts_with_ignore_case(rest, "nan") {
        return f64::NAN;
    }

    let int_end = skip_digits(bytes, i);
    let mut digits = int_end - i;
    i = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = skip_digits(bytes, i + 1);
        digits += frac_end - (i + 1);
        i = frac_end;
    }
    if digits == 0 {
        return 0.0;
    }

    let mut end = i;
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = skip_digits(bytes, j);
        if exp_end > j {
            end = exp_end;
        }
    }

    text[start..end].parse().unwrap_or(0.0)
}

/// Parses the `atoi`-style decimal prefix of `text`, saturating on overflow.
fn integer_prefix(text: &str) -> i128 {
    let bytes = text.as_bytes();
    let mut i = skip_space(bytes, 0);
    let negative = bytes.get(i) == Some(&b'-');
    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }

    let mut value: i128 = 0;
    while let Some(digit) = bytes.get(i).filter(|b| b.is_ascii_digit()) {
        value = value
            .saturating_mul(10)
            .saturating_add(i128::from(digit - b'0'));
        i += 1;
    }

    if negative { -value } else { value }
}

impl LenientParse for f64 {
    fn parse_lenient(text: &str) -> Self {
        float_prefix(text)
    }

    fn non_finite_label(&self) -> Option<&'static str> {
        float_label(*self)
    }
}

impl LenientParse for f32 {
    fn parse_lenient(text: &str) -> Self {
        float_prefix(text) as f32
    }

    fn non_finite_label(&self) -> Option<&'static str> {
        float_label(f64::from(*self))
    }
}

macro_rules! impl_lenient_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LenientParse for $ty {
                fn parse_lenient(text: &str) -> Self {
                    let value = integer_prefix(text);
                    <$ty>::try_from(value).unwrap_or(if value < 0 {
                        <$ty>::MIN
                    } else {
                        <$ty>::MAX
                    })
                }
            }
        )*
    };
}

impl_lenient_int!(i32, i64, u32, u64, usize);
