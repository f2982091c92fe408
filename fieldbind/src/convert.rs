//! String to typed value conversion for built-in kinds.
//!
//! Resolution order for a tag: `bool`, integer kinds, float kinds, bracketed
//! numeric sequences, `string`. Anything else is a domain tag and is resolved
//! by the capability registry (see [`Binder::convert`](crate::Binder::convert)).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{BindError, Result};
use crate::number::parse_kind;
use crate::value::{ElemKind, Kind, ScalarKind, TypeTag, Value};

/// How forgiving numeric parsing is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Surface the first parse error
    #[default]
    Strict,
    /// Compatibility mode: integer overflow truncates to the declared width
    /// and unparsable sequence tokens become zero
    Legacy,
}

/// Convert `input` for a built-in tag.
///
/// Returns `UnsupportedType` for tags that are not built in.
pub fn convert_builtin(tag: &TypeTag, input: &str, mode: ParseMode) -> Result<Value> {
    match tag.kind() {
        Some(Kind::Scalar(kind)) => convert_scalar(kind, input, mode),
        Some(Kind::Sequence(elem)) => parse_sequence(elem, input, mode),
        None => Err(BindError::unsupported(tag.as_str())),
    }
}

fn convert_scalar(kind: ScalarKind, input: &str, mode: ParseMode) -> Result<Value> {
    match kind {
        ScalarKind::Bool => parse_bool(input).map(Value::Bool),
        ScalarKind::String => Ok(Value::Str(input.to_string())),
        numeric => parse_kind(numeric, input, mode)
            .map_err(|message| BindError::conversion(numeric.tag(), input, message)),
    }
}

/// Exact, case-sensitive `true` / `false`.
pub fn parse_bool(input: &str) -> Result<bool> {
    match input {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(BindError::conversion(
            ScalarKind::Bool.tag(),
            input,
            "expected true or false",
        )),
    }
}

/// Parse a bracketed, whitespace-separated numeric sequence such as `[1 2 3]`.
///
/// All leading and trailing brackets are trimmed; `[]` is an empty sequence.
pub fn parse_sequence(elem: ElemKind, input: &str, mode: ParseMode) -> Result<Value> {
    let body = input.trim_matches(|c| c == '[' || c == ']');
    let mut items = Vec::new();
    for (index, token) in body.split_whitespace().enumerate() {
        match parse_element(elem, token, mode) {
            Ok(item) => items.push(item),
            Err(message) if mode == ParseMode::Legacy => {
                trace!(index, token, %message, "sequence token replaced with zero");
                items.push(element_zero(elem));
            }
            Err(message) => {
                return Err(BindError::conversion(
                    elem.sequence_tag(),
                    input,
                    format!("token {index} ({token:?}): {message}"),
                ))
            }
        }
    }
    Ok(Value::List { elem, items })
}

fn parse_element(elem: ElemKind, token: &str, mode: ParseMode) -> std::result::Result<Value, String> {
    match elem {
        ElemKind::Numeric(kind) => parse_kind(kind, token, mode),
        // integer first, float second
        ElemKind::Any => parse_kind(ScalarKind::Int64, token, ParseMode::Strict)
            .or_else(|_| parse_kind(ScalarKind::Float64, token, mode)),
    }
}

fn element_zero(elem: ElemKind) -> Value {
    match elem {
        ElemKind::Numeric(kind) => kind.zero().unwrap_or(Value::Int64(0)),
        ElemKind::Any => Value::Float64(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(tag: &str, input: &str) -> Result<Value> {
        convert_builtin(&TypeTag::from(tag), input, ParseMode::Strict)
    }

    fn convert_legacy(tag: &str, input: &str) -> Result<Value> {
        convert_builtin(&TypeTag::from(tag), input, ParseMode::Legacy)
    }

    #[test]
    fn test_bool_is_exact() {
        assert_eq!(convert("bool", "true"), Ok(Value::Bool(true)));
        assert_eq!(convert("bool", "false"), Ok(Value::Bool(false)));
        assert!(convert("bool", "True").is_err());
        assert!(convert("bool", "1").is_err());
        assert!(convert_legacy("bool", "yes").is_err());
    }

    #[test]
    fn test_integer_kinds() {
        assert_eq!(convert("int", "-42"), Ok(Value::Int(-42)));
        assert_eq!(convert("int8", "127"), Ok(Value::Int8(127)));
        assert_eq!(convert("uint64", "18446744073709551615"), Ok(Value::Uint64(u64::MAX)));
        assert!(convert("int8", "128").is_err());
        assert!(convert("uint", "-1").is_err());
    }

    #[test]
    fn test_legacy_overflow_truncates() {
        assert_eq!(convert_legacy("uint8", "257"), Ok(Value::Uint8(1)));
        assert_eq!(convert_legacy("int16", "65537"), Ok(Value::Int16(1)));
    }

    #[test]
    fn test_floats_narrow() {
        assert_eq!(convert("float64", "30.5"), Ok(Value::Float64(30.5)));
        assert_eq!(convert("float32", "1.5"), Ok(Value::Float32(1.5)));
        assert!(convert("float64", "thirty").is_err());
    }

    #[test]
    fn test_sequences() {
        assert_eq!(
            convert("[]int", "[1 2 3]"),
            Ok(Value::List {
                elem: ElemKind::Numeric(ScalarKind::Int),
                items: vec![Value::Int(1), Value::Int(2), Value::Int(3)],
            })
        );
        assert_eq!(
            convert("[]float64", "[1.5 2.5]"),
            Ok(Value::List {
                elem: ElemKind::Numeric(ScalarKind::Float64),
                items: vec![Value::Float64(1.5), Value::Float64(2.5)],
            })
        );
    }

    #[test]
    fn test_sequence_whitespace_and_empty() {
        let Value::List { items, .. } = convert("[]int32", "[ 4   5\t6 ]").unwrap() else {
            panic!("expected a list");
        };
        assert_eq!(items, vec![Value::Int32(4), Value::Int32(5), Value::Int32(6)]);

        let Value::List { items, .. } = convert("[]int", "[]").unwrap() else {
            panic!("expected a list");
        };
        assert!(items.is_empty());
    }

    #[test]
    fn test_bad_token_strict_fails() {
        let err = convert("[]int", "[1 x 3]").unwrap_err();
        assert!(matches!(err, BindError::Conversion { .. }));
        assert!(err.to_string().contains("token 1"));
    }

    #[test]
    fn test_bad_token_legacy_becomes_zero() {
        assert_eq!(
            convert_legacy("[]float64", "[1.5 x]"),
            Ok(Value::List {
                elem: ElemKind::Numeric(ScalarKind::Float64),
                items: vec![Value::Float64(1.5), Value::Float64(0.0)],
            })
        );
    }

    #[test]
    fn test_any_sequence_prefers_integers() {
        assert_eq!(
            convert("[]any", "[1 2.5]"),
            Ok(Value::List {
                elem: ElemKind::Any,
                items: vec![Value::Int64(1), Value::Float64(2.5)],
            })
        );
    }

    #[test]
    fn test_string_passthrough() {
        assert_eq!(convert("string", " [x] "), Ok(Value::Str(" [x] ".into())));
    }

    #[test]
    fn test_unknown_tag_unsupported() {
        assert_eq!(
            convert("map[string]int", "{}"),
            Err(BindError::unsupported("map[string]int"))
        );
        assert_eq!(
            convert("[]string", "[a b]"),
            Err(BindError::unsupported("[]string"))
        );
    }
}
