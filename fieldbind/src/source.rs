//! Extraction sources and apply targets.

use indexmap::IndexMap;

use crate::error::{BindError, Result};
use crate::record::{display_name, Member, Record};
use crate::value::{json_kind, ElemKind, Value};

/// Ordered string-keyed mapping. Iteration follows insertion order.
pub type Mapping = IndexMap<String, Value>;

/// Something fields can be extracted from.
#[derive(Clone, Copy)]
pub enum Source<'a> {
    Record(&'a dyn Record),
    Mapping(&'a Mapping),
    /// A decoded JSON document; must be an object
    Document(&'a serde_json::Value),
}

impl<'a> Source<'a> {
    /// Members in discovery order.
    pub(crate) fn members(&self) -> Result<Vec<Member>> {
        match self {
            Self::Record(record) => Ok(record.members()),
            Self::Mapping(mapping) => Ok(mapping
                .iter()
                .map(|(key, value)| Member::new(key, display_name(key), value.clone()))
                .collect()),
            Self::Document(serde_json::Value::Object(object)) => Ok(object
                .iter()
                .map(|(key, json)| Member::new(key, display_name(key), value_from_json(json)))
                .collect()),
            Self::Document(other) => Err(BindError::InvalidInputKind {
                found: json_kind(other).to_string(),
            }),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Mapping(_) => "mapping",
            Self::Document(_) => "document",
        }
    }
}

/// Something applied fields are written into.
pub enum Target<'a> {
    Record(&'a mut dyn Record),
    Mapping(&'a mut Mapping),
    /// A decoded JSON document; must be an object
    Document(&'a mut serde_json::Value),
}

impl<'a> Target<'a> {
    /// Fail early when the target cannot take fields at all.
    pub(crate) fn check_writable(&self) -> Result<()> {
        match self {
            Self::Document(json) if !json.is_object() => Err(BindError::InvalidTargetKind {
                found: json_kind(json).to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Check that `value` could be written under `name` without writing it.
    pub(crate) fn check(&self, name: &str, value: &Value) -> Result<()> {
        let Self::Record(record) = self else {
            return Ok(());
        };
        let expected = record
            .member_tag(name)
            .ok_or_else(|| BindError::UnknownField {
                name: name.to_string(),
            })?;
        let found = value.type_tag();
        if expected == found {
            Ok(())
        } else {
            Err(BindError::TypeMismatch {
                field: name.to_string(),
                expected: expected.to_string(),
                found: found.to_string(),
            })
        }
    }

    pub(crate) fn write(&mut self, name: &str, value: Value) -> Result<()> {
        match self {
            Self::Record(record) => record.assign(name, value),
            Self::Mapping(mapping) => {
                mapping.insert(name.to_string(), value);
                Ok(())
            }
            Self::Document(json) => match json {
                serde_json::Value::Object(object) => {
                    object.insert(name.to_string(), value.to_json());
                    Ok(())
                }
                other => Err(BindError::InvalidTargetKind {
                    found: json_kind(other).to_string(),
                }),
            },
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Mapping(_) => "mapping",
            Self::Document(_) => "document",
        }
    }
}

/// Convert a decoded document member into a [`Value`].
///
/// Every number becomes `float64` whether or not it is whole, and arrays of
/// numbers `[]any`. Nulls, objects and other arrays stay opaque JSON.
pub fn value_from_json(json: &serde_json::Value) -> Value {
    use serde_json::Value as Json;
    match json {
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => number_value(n),
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(items) if items.iter().all(Json::is_number) => Value::List {
            elem: ElemKind::Any,
            items: items
                .iter()
                .filter_map(Json::as_number)
                .map(number_value)
                .collect(),
        },
        other => Value::Json(other.clone()),
    }
}

fn number_value(n: &serde_json::Number) -> Value {
    Value::Float64(n.as_f64().unwrap_or_default())
}
