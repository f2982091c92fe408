//! Parsing numbers from strings into native values.

use std::fmt::Display;
use std::str::FromStr;

use crate::convert::ParseMode;
use crate::value::{ScalarKind, Value};

/// Integer and floating-point primitives the converter can produce.
pub trait Number: Copy + Display + FromStr + PartialEq + Send + Sync + 'static {
    /// Scalar kind this type is tagged with.
    const KIND: ScalarKind;

    /// Parse base-10 (integers) or decimal/scientific (floats) text.
    fn parse_with(input: &str, mode: ParseMode) -> Result<Self, String>;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! integer_number {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl Number for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn parse_with(input: &str, mode: ParseMode) -> Result<Self, String> {
                match mode {
                    ParseMode::Strict => input.parse::<$ty>().map_err(|e| e.to_string()),
                    // Wide parse, then wrap into the declared width
                    ParseMode::Legacy => input
                        .parse::<i128>()
                        .map(|wide| wide as $ty)
                        .map_err(|e| e.to_string()),
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(n) => Some(*n),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! float_number {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl Number for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn parse_with(input: &str, mode: ParseMode) -> Result<Self, String> {
                let wide = input.parse::<f64>().map_err(|e| e.to_string())?;
                let narrowed = wide as $ty;
                if mode == ParseMode::Strict && wide.is_finite() && !narrowed.is_finite() {
                    return Err(format!("value out of range for {}", Self::KIND.tag()));
                }
                Ok(narrowed)
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(n) => Some(*n),
                    _ => None,
                }
            }
        }
    };
}

integer_number!(isize, Int, Int);
integer_number!(i8, Int8, Int8);
integer_number!(i16, Int16, Int16);
integer_number!(i32, Int32, Int32);
integer_number!(i64, Int64, Int64);
integer_number!(usize, Uint, Uint);
integer_number!(u8, Uint8, Uint8);
integer_number!(u16, Uint16, Uint16);
integer_number!(u32, Uint32, Uint32);
integer_number!(u64, Uint64, Uint64);
float_number!(f32, Float32, Float32);
float_number!(f64, Float64, Float64);

/// Parse a string into a number of type `N`.
pub fn parse_number<N: Number>(input: &str, mode: ParseMode) -> Result<N, String> {
    N::parse_with(input, mode)
}

/// Render a number the way extraction renders it.
pub fn number_to_string<N: Number>(n: N) -> String {
    n.to_string()
}

/// Parse into the numeric `kind`, producing a typed `Value`.
pub(crate) fn parse_kind(kind: ScalarKind, input: &str, mode: ParseMode) -> Result<Value, String> {
    fn typed<N: Number>(input: &str, mode: ParseMode) -> Result<Value, String> {
        N::parse_with(input, mode).map(N::into_value)
    }

    match kind {
        ScalarKind::Int => typed::<isize>(input, mode),
        ScalarKind::Int8 => typed::<i8>(input, mode),
        ScalarKind::Int16 => typed::<i16>(input, mode),
        ScalarKind::Int32 => typed::<i32>(input, mode),
        ScalarKind::Int64 => typed::<i64>(input, mode),
        ScalarKind::Uint => typed::<usize>(input, mode),
        ScalarKind::Uint8 => typed::<u8>(input, mode),
        ScalarKind::Uint16 => typed::<u16>(input, mode),
        ScalarKind::Uint32 => typed::<u32>(input, mode),
        ScalarKind::Uint64 => typed::<u64>(input, mode),
        ScalarKind::Float32 => typed::<f32>(input, mode),
        ScalarKind::Float64 => typed::<f64>(input, mode),
        ScalarKind::Bool | ScalarKind::String => Err(format!("{} is not numeric", kind.tag())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_floats() {
        let f: f32 = parse_number("1.32", ParseMode::Strict).unwrap();
        assert_eq!(f, 1.32);
        let f: f64 = parse_number("1.64", ParseMode::Strict).unwrap();
        assert_eq!(f, 1.64);
    }

    #[test]
    fn test_parse_int() {
        let n: isize = parse_number("100", ParseMode::Strict).unwrap();
        assert_eq!(n, 100);
        assert!(parse_number::<i32>("abc", ParseMode::Strict).is_err());
        assert!(parse_number::<i32>("abc", ParseMode::Legacy).is_err());
    }

    #[test]
    fn test_overflow_is_an_error_in_strict_mode() {
        assert!(parse_number::<u8>("257", ParseMode::Strict).is_err());
    }

    #[test]
    fn test_overflow_truncates_in_legacy_mode() {
        assert_eq!(parse_number::<u8>("257", ParseMode::Legacy), Ok(1));
        assert_eq!(parse_number::<i8>("200", ParseMode::Legacy), Ok(-56));
    }

    #[test]
    fn test_f32_range() {
        assert!(parse_number::<f32>("1e300", ParseMode::Strict).is_err());
        assert_eq!(
            parse_number::<f32>("1e300", ParseMode::Legacy),
            Ok(f32::INFINITY)
        );
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(3.14_f64), "3.14");
        assert_eq!(number_to_string(75_i32), "75");
    }

    #[test]
    fn test_parse_kind_rejects_non_numeric_kinds() {
        assert!(parse_kind(ScalarKind::Bool, "1", ParseMode::Strict).is_err());
        assert_eq!(
            parse_kind(ScalarKind::Uint16, "65535", ParseMode::Strict),
            Ok(Value::Uint16(65535))
        );
    }
}
