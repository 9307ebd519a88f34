//! String-to-value coercion, dispatched by field kind.
//!
//! The table maps each primitive [`Kind`] to a [`Coercer`]. It is a plain
//! `static`, built once and never mutated. Every coercer parses first and
//! writes the slot only on success, so a failed coercion leaves the field
//! untouched.

use std::ops::Neg;
use std::str::FromStr;

use num_complex::Complex;

use crate::error::CoerceError;
use crate::kind::{FieldRef, Kind};

/// Parses a raw string and writes it into a slot of the matching kind.
pub type Coercer = fn(FieldRef<'_>, &str) -> Result<(), CoerceError>;

static MAPPING: [(Kind, Coercer); 16] = [
    (Kind::String, parse_string),
    (Kind::Bool, parse_bool),
    (Kind::Int, parse_int),
    (Kind::Int8, parse_int8),
    (Kind::Int16, parse_int16),
    (Kind::Int32, parse_int32),
    (Kind::Int64, parse_int64),
    (Kind::Uint, parse_uint),
    (Kind::Uint8, parse_uint8),
    (Kind::Uint16, parse_uint16),
    (Kind::Uint32, parse_uint32),
    (Kind::Uint64, parse_uint64),
    (Kind::Float32, parse_float32),
    (Kind::Float64, parse_float64),
    (Kind::Complex64, parse_complex64),
    (Kind::Complex128, parse_complex128),
];

/// Look up the coercer registered for `kind`.
pub fn mapping(kind: Kind) -> Option<Coercer> {
    MAPPING
        .iter()
        .find(|(registered, _)| *registered == kind)
        .map(|(_, coercer)| *coercer)
}

/// Coerce `raw` into `slot` using the entry for the slot's own kind.
pub fn coerce(slot: FieldRef<'_>, raw: &str) -> Result<(), CoerceError> {
    let kind = slot.kind();
    let coercer = mapping(kind).ok_or(CoerceError::Unsupported { kind })?;
    coercer(slot, raw)
}

fn mismatch(expected: Kind, slot: &FieldRef<'_>) -> CoerceError {
    CoerceError::Mismatch {
        expected,
        found: slot.kind(),
    }
}

fn parse_string(slot: FieldRef<'_>, raw: &str) -> Result<(), CoerceError> {
    match slot {
        FieldRef::String(target) => {
            *target = raw.to_string();
            Ok(())
        }
        other => Err(mismatch(Kind::String, &other)),
    }
}

fn parse_bool(slot: FieldRef<'_>, raw: &str) -> Result<(), CoerceError> {
    let value = match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        _ => return Err(CoerceError::parse(Kind::Bool, raw, "not a boolean literal")),
    };

    match slot {
        FieldRef::Bool(target) => {
            *target = value;
            Ok(())
        }
        other => Err(mismatch(Kind::Bool, &other)),
    }
}

// Integers and floats share one shape: the slot variant, the kind and the
// parsed type line up one to one.
macro_rules! std_coercer {
    ($name:ident, $variant:ident, $ty:ty, $parse:ident) => {
        fn $name(slot: FieldRef<'_>, raw: &str) -> Result<(), CoerceError> {
            match slot {
                FieldRef::$variant(target) => {
                    *target = $parse::<$ty>(raw)
                        .map_err(|message| CoerceError::parse(Kind::$variant, raw, message))?;
                    Ok(())
                }
                other => Err(mismatch(Kind::$variant, &other)),
            }
        }
    };
}

std_coercer!(parse_int, Int, isize, parse_number);
std_coercer!(parse_int8, Int8, i8, parse_number);
std_coercer!(parse_int16, Int16, i16, parse_number);
std_coercer!(parse_int32, Int32, i32, parse_number);
std_coercer!(parse_int64, Int64, i64, parse_number);
std_coercer!(parse_uint, Uint, usize, parse_unsigned);
std_coercer!(parse_uint8, Uint8, u8, parse_unsigned);
std_coercer!(parse_uint16, Uint16, u16, parse_unsigned);
std_coercer!(parse_uint32, Uint32, u32, parse_unsigned);
std_coercer!(parse_uint64, Uint64, u64, parse_unsigned);
std_coercer!(parse_float32, Float32, f32, parse_float);
std_coercer!(parse_float64, Float64, f64, parse_float);

fn parse_number<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| e.to_string())
}

/// Unsigned values carry no sign, not even `+`.
fn parse_unsigned<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if raw.starts_with('+') {
        return Err("unexpected sign on unsigned value".to_string());
    }
    parse_number(raw)
}

/// Floating-point component type of the float and complex kinds.
trait Float: FromStr + Default + From<u8> + Neg<Output = Self> {
    fn is_finite(&self) -> bool;
}

impl Float for f32 {
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Float for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

/// Parse a float, rejecting literals out of range for `T`.
///
/// Only an explicit `inf`, `infinity` or `nan` literal may produce a
/// non-finite value.
fn parse_float<T>(raw: &str) -> Result<T, String>
where
    T: Float,
    T::Err: std::fmt::Display,
{
    let value = parse_number::<T>(raw)?;
    if !value.is_finite() && !is_non_finite_literal(raw) {
        return Err("value out of range".to_string());
    }
    Ok(value)
}

fn is_non_finite_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|literal| unsigned.eq_ignore_ascii_case(literal))
}

fn parse_complex64(slot: FieldRef<'_>, raw: &str) -> Result<(), CoerceError> {
    match slot {
        FieldRef::Complex64(target) => {
            *target = parse_complex::<f32>(raw)
                .map_err(|message| CoerceError::parse(Kind::Complex64, raw, message))?;
            Ok(())
        }
        other => Err(mismatch(Kind::Complex64, &other)),
    }
}

fn parse_complex128(slot: FieldRef<'_>, raw: &str) -> Result<(), CoerceError> {
    match slot {
        FieldRef::Complex128(target) => {
            *target = parse_complex::<f64>(raw)
                .map_err(|message| CoerceError::parse(Kind::Complex128, raw, message))?;
            Ok(())
        }
        other => Err(mismatch(Kind::Complex128, &other)),
    }
}

/// Parse `re`, `imi` or `re±imi`, optionally wrapped in parentheses.
///
/// A bare `i`, `+i` or `-i` imaginary part stands for one.
fn parse_complex<T>(raw: &str) -> Result<Complex<T>, String>
where
    T: Float,
    T::Err: std::fmt::Display,
{
    let s = raw
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(raw);
    if s.is_empty() {
        return Err("empty complex literal".to_string());
    }

    let part = |text: &str| parse_float::<T>(text).map_err(|e| format!("'{text}': {e}"));

    let Some(body) = s.strip_suffix('i') else {
        return Ok(Complex::new(part(s)?, T::default()));
    };

    let (re, im) = match split_imaginary(body) {
        Some(at) => (part(&body[..at])?, &body[at..]),
        None => (T::default(), body),
    };
    let im = match im {
        "" | "+" => T::from(1),
        "-" => -T::from(1),
        text => part(text)?,
    };

    Ok(Complex::new(re, im))
}

/// Byte offset of the sign that starts the imaginary part, skipping the
/// leading sign and any exponent signs.
fn split_imaginary(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len())
        .rev()
        .find(|&at| matches!(bytes[at], b'+' | b'-') && !matches!(bytes[at - 1], b'e' | b'E'))
}
