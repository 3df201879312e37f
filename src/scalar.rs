//! Scalar encoding: one `key=value` fragment at a time.
//!
//! This is the leaf of the encoder. It knows how to percent-encode text in
//! either [`EncodingMode`], how to render numbers and booleans, and how to
//! decorate a key with the literal prefix/suffix handed down by the walker.
//!
//! ```rust
//! use serde_formquery::scalar::{encode_component, format_float};
//! use serde_formquery::EncodingMode;
//!
//! assert_eq!(encode_component("a b~c", EncodingMode::Legacy), "a+b%7Ec");
//! assert_eq!(encode_component("a b~c", EncodingMode::Strict), "a%20b~c");
//! assert_eq!(format_float(1e25), "1.0E+25");
//! ```

use crate::EncodingMode;
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped in legacy mode: everything except alphanumerics and `-_.`.
/// Space is escaped too, then rewritten to `+`.
const LEGACY_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Bytes escaped in strict mode: everything except alphanumerics and `-_.~`.
const STRICT_SET: &AsciiSet = &LEGACY_SET.remove(b'~');

/// Percent-encodes `input` and appends it to `out`.
pub(crate) fn push_encoded(out: &mut String, input: &str, mode: EncodingMode) {
    match mode {
        EncodingMode::Legacy => {
            for chunk in percent_encode(input.as_bytes(), LEGACY_SET) {
                if chunk == "%20" {
                    out.push('+');
                } else {
                    out.push_str(chunk);
                }
            }
        }
        EncodingMode::Strict => {
            for chunk in percent_encode(input.as_bytes(), STRICT_SET) {
                out.push_str(chunk);
            }
        }
    }
}

/// Percent-encodes a single key or value.
///
/// Hex digits are uppercase. Non-ASCII text is encoded byte by byte from its
/// UTF-8 form.
///
/// ```rust
/// use serde_formquery::scalar::encode_component;
/// use serde_formquery::EncodingMode;
///
/// assert_eq!(encode_component("é&=", EncodingMode::Strict), "%C3%A9%26%3D");
/// ```
#[must_use]
pub fn encode_component(input: &str, mode: EncodingMode) -> String {
    let mut out = String::with_capacity(input.len());
    push_encoded(&mut out, input, mode);
    out
}

/// Renders a float with the shortest digits that round-trip.
///
/// Values whose decimal exponent lies in `[-4, 15)` are written positionally
/// (`0.0001`, `123.5`, `100`); everything else uses `E` notation with an
/// explicit sign (`1.0E+25`, `1.5E-7`). Non-finite values render as `INF`,
/// `-INF` and `NAN`.
///
/// ```rust
/// use serde_formquery::scalar::format_float;
///
/// assert_eq!(format_float(0.1), "0.1");
/// assert_eq!(format_float(100.0), "100");
/// assert_eq!(format_float(-0.0), "-0");
/// assert_eq!(format_float(0.00001), "1.0E-5");
/// assert_eq!(format_float(f64::NAN), "NAN");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let mut out = String::with_capacity(24);
    if value.is_sign_negative() {
        out.push('-');
    }
    let magnitude = value.abs();
    if magnitude == 0.0 {
        out.push('0');
        return out;
    }

    let mut buf = ryu::Buffer::new();
    let (digits, point) = shortest_digits(buf.format_finite(magnitude));

    if point < -3 || point > 15 {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        out.push('.');
        out.push_str(if rest.is_empty() { "0" } else { rest });
        let exponent = point - 1;
        out.push('E');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.unsigned_abs().to_string());
    } else if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
        out.push_str(&digits);
    } else {
        let point = point as usize;
        if digits.len() <= point {
            out.push_str(&digits);
            out.extend(std::iter::repeat('0').take(point - digits.len()));
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    }
    out
}

/// Splits ryu output into significant digits and the decimal point position,
/// so that the value is `0.DIGITS × 10^point`.
fn shortest_digits(raw: &str) -> (String, i32) {
    let (mantissa, exponent) = match raw.split_once(['e', 'E']) {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (raw, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let mut point = int_part.len() as i32 + exponent;

    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading);
    point -= leading as i32;
    let significant = digits.trim_end_matches('0').len();
    digits.truncate(significant);

    (digits, point)
}

/// A primitive value ready to be written. Null and resources never get here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Scalar<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// A borrowed entry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyRef<'a> {
    Index(i64),
    Name(&'a str),
}

/// Literal text wrapped around a key. None of it is percent-encoded.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Decoration<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
    /// Written before integer keys only.
    pub numeric_prefix: &'a str,
}

/// Appends the decorated key, without the trailing `=`.
pub(crate) fn push_key(out: &mut String, key: KeyRef<'_>, deco: &Decoration<'_>, mode: EncodingMode) {
    out.push_str(deco.prefix);
    match key {
        KeyRef::Name(name) => push_encoded(out, name, mode),
        KeyRef::Index(index) => {
            out.push_str(deco.numeric_prefix);
            out.push_str(&index.to_string());
        }
    }
    out.push_str(deco.suffix);
}

/// Appends one `key=value` fragment, preceded by `separator` unless `out` is empty.
pub(crate) fn write_scalar(
    out: &mut String,
    key: KeyRef<'_>,
    value: Scalar<'_>,
    deco: &Decoration<'_>,
    separator: &str,
    mode: EncodingMode,
) {
    if !out.is_empty() {
        out.push_str(separator);
    }
    push_key(out, key, deco, mode);
    out.push('=');

    match value {
        Scalar::Str(s) => push_encoded(out, s, mode),
        Scalar::Int(i) => out.push_str(&i.to_string()),
        Scalar::Float(f) => push_encoded(out, &format_float(f), mode),
        Scalar::Bool(b) => out.push(if b { '1' } else { '0' }),
    }
}
