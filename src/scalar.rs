//! Coercion of raw values into the scalar kinds a record field can hold.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

/// The closed set of types a value can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Uint,
    Float,
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "signed integer"),
            Self::Uint => write!(f, "unsigned integer"),
            Self::Float => write!(f, "floating point"),
        }
    }
}

/// A coerced value, widened to 64 bits.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

/// What a destination field can be bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// The field's type has no coercion; binding it always fails.
    Unsupported(&'static str),
}

/// The value did not parse as the requested kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoerceError {
    pub kind: ScalarKind,
}

impl Display for CoerceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "value is not a valid {}", self.kind)
    }
}

impl StdError for CoerceError {}

/// Coerce `raw` into a scalar of the given kind.
pub fn coerce(kind: ScalarKind, raw: &str) -> Result<Scalar, CoerceError> {
    let scalar = match kind {
        ScalarKind::String => Some(Scalar::String(raw.to_owned())),
        ScalarKind::Int => parse_int(raw).map(Scalar::Int),
        ScalarKind::Uint => parse_uint(raw).map(Scalar::Uint),
        ScalarKind::Float => parse_float(raw).map(Scalar::Float),
    };
    scalar.ok_or(CoerceError { kind })
}

/// Unsigned integer with an optional `0x`, `0o` or `0b` radix prefix.
///
/// A bare leading `0` followed by more digits is read as octal. Single `_`
/// separators may follow the prefix or sit between digits (`1_000`, `0x_1F`).
pub fn parse_uint(raw: &str) -> Option<u64> {
    if !underscores_ok(raw) {
        return None;
    }
    let (digits, radix) = split_radix(raw);
    let digits = if digits.contains('_') {
        Cow::Owned(digits.replace('_', ""))
    } else {
        Cow::Borrowed(digits)
    };
    // from_str_radix accepts a leading `+`, which is not part of the grammar.
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    u64::from_str_radix(&digits, radix).ok()
}

/// Signed counterpart of [`parse_uint`], accepting a leading `+` or `-`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let (negative, magnitude) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let magnitude = parse_uint(magnitude)?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

pub fn parse_float(raw: &str) -> Option<f64> {
    raw.parse().ok()
}

/// A radix prefix counts as a digit, so `_` may never lead, trail or repeat.
fn underscores_ok(raw: &str) -> bool {
    !raw.starts_with('_') && !raw.ends_with('_') && !raw.contains("__")
}

fn split_radix(raw: &str) -> (&str, u32) {
    let bytes = raw.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return (raw, 10);
    }

    match bytes[1] {
        b'x' | b'X' => (&raw[2..], 16),
        b'o' | b'O' => (&raw[2..], 8),
        b'b' | b'B' => (&raw[2..], 2),
        _ => (&raw[1..], 8),
    }
}

/// A Rust type a record field may have.
///
/// Integer and float types narrower than 64 bits are range-checked when a
/// coerced scalar is stored into them.
pub trait EnvField: Sized {
    const KIND: FieldKind;

    /// Narrow a coerced scalar into `Self`, or `None` when it does not fit.
    fn from_scalar(scalar: Scalar) -> Option<Self>;
}

impl EnvField for String {
    const KIND: FieldKind = FieldKind::Scalar(ScalarKind::String);

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::String(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! impl_int_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvField for $ty {
                const KIND: FieldKind = FieldKind::Scalar(ScalarKind::Int);

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::Int(value) => <$ty>::try_from(value).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_uint_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvField for $ty {
                const KIND: FieldKind = FieldKind::Scalar(ScalarKind::Uint);

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::Uint(value) => <$ty>::try_from(value).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_int_field!(i8, i16, i32, i64, isize);
impl_uint_field!(u8, u16, u32, u64, usize);

impl EnvField for f64 {
    const KIND: FieldKind = FieldKind::Scalar(ScalarKind::Float);

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Float(value) => Some(value),
            _ => None,
        }
    }
}

impl EnvField for f32 {
    const KIND: FieldKind = FieldKind::Scalar(ScalarKind::Float);

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Float(value) if value.is_finite() && value.abs() > f32::MAX as f64 => None,
            Scalar::Float(value) => Some(value as f32),
            _ => None,
        }
    }
}

// Declarable as fields so a binding table can name them, but never coercible.
impl EnvField for bool {
    const KIND: FieldKind = FieldKind::Unsupported("bool");

    fn from_scalar(_: Scalar) -> Option<Self> {
        None
    }
}

impl EnvField for char {
    const KIND: FieldKind = FieldKind::Unsupported("char");

    fn from_scalar(_: Scalar) -> Option<Self> {
        None
    }
}
