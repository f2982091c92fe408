//! Typed values and the type tags that describe them.
//!
//! A `TypeTag` is the string discriminator that selects conversion,
//! validation and rendering behaviour for a field. Built-in tags name the
//! primitive kinds (`bool`, `int8`, `float64`, `string`, ...) and bracketed
//! numeric sequences (`[]int`, `[]float64`, `[]any`). Any other tag belongs
//! to a domain type resolved through the capability registry.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::{DomainType, DomainValue};

/// Primitive kinds understood by the generic converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
}

impl ScalarKind {
    /// Every scalar kind, in tag order.
    pub const ALL: [ScalarKind; 14] = [
        Self::Bool,
        Self::Int,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::String,
    ];

    /// The tag string for this kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Zero of a numeric kind. `None` for `bool` and `string`.
    pub fn zero(self) -> Option<Value> {
        let zero = match self {
            Self::Int => Value::Int(0),
            Self::Int8 => Value::Int8(0),
            Self::Int16 => Value::Int16(0),
            Self::Int32 => Value::Int32(0),
            Self::Int64 => Value::Int64(0),
            Self::Uint => Value::Uint(0),
            Self::Uint8 => Value::Uint8(0),
            Self::Uint16 => Value::Uint16(0),
            Self::Uint32 => Value::Uint32(0),
            Self::Uint64 => Value::Uint64(0),
            Self::Float32 => Value::Float32(0.0),
            Self::Float64 => Value::Float64(0.0),
            Self::Bool | Self::String => return None,
        };
        Some(zero)
    }
}

/// Element kind of a bracketed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElemKind {
    /// Every token has this numeric kind
    Numeric(ScalarKind),
    /// Tokens are integers where they parse as such, floats otherwise
    Any,
}

impl ElemKind {
    /// Tag of a sequence holding this element kind, e.g. `[]int32`.
    pub const fn sequence_tag(self) -> &'static str {
        match self {
            Self::Numeric(ScalarKind::Int) => "[]int",
            Self::Numeric(ScalarKind::Int8) => "[]int8",
            Self::Numeric(ScalarKind::Int16) => "[]int16",
            Self::Numeric(ScalarKind::Int32) => "[]int32",
            Self::Numeric(ScalarKind::Int64) => "[]int64",
            Self::Numeric(ScalarKind::Uint) => "[]uint",
            Self::Numeric(ScalarKind::Uint8) => "[]uint8",
            Self::Numeric(ScalarKind::Uint16) => "[]uint16",
            Self::Numeric(ScalarKind::Uint32) => "[]uint32",
            Self::Numeric(ScalarKind::Uint64) => "[]uint64",
            Self::Numeric(ScalarKind::Float32) => "[]float32",
            Self::Numeric(ScalarKind::Float64) => "[]float64",
            Self::Numeric(ScalarKind::Bool) => "[]bool",
            Self::Numeric(ScalarKind::String) => "[]string",
            Self::Any => "[]any",
        }
    }

    fn from_elem_tag(tag: &str) -> Option<Self> {
        if tag == "any" {
            return Some(Self::Any);
        }
        ScalarKind::from_tag(tag)
            .filter(|kind| kind.is_numeric())
            .map(Self::Numeric)
    }
}

/// Classification of a built-in tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar(ScalarKind),
    Sequence(ElemKind),
}

/// String discriminator for a field's type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the tag. `None` means a domain or otherwise unknown tag.
    pub fn kind(&self) -> Option<Kind> {
        if let Some(elem) = self.0.strip_prefix("[]") {
            return ElemKind::from_elem_tag(elem).map(Kind::Sequence);
        }
        ScalarKind::from_tag(&self.0).map(Kind::Scalar)
    }

    pub fn is_builtin(&self) -> bool {
        self.kind().is_some()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<ScalarKind> for TypeTag {
    fn from(kind: ScalarKind) -> Self {
        Self::from_static(kind.tag())
    }
}

impl PartialEq<str> for TypeTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Owned, type-erased domain value.
pub struct DomainBox(Box<dyn DomainValue>);

impl DomainBox {
    pub fn new<T: DomainType>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn from_boxed(value: Box<dyn DomainValue>) -> Self {
        Self(value)
    }

    pub fn get(&self) -> &dyn DomainValue {
        self.0.as_ref()
    }

    pub fn get_mut(&mut self) -> &mut dyn DomainValue {
        self.0.as_mut()
    }

    pub fn downcast_ref<T: DomainType>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: DomainType>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }
}

impl Clone for DomainBox {
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl PartialEq for DomainBox {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_dyn(other.0.as_ref())
    }
}

impl fmt::Debug for DomainBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// A field's current typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    /// Bracketed numeric sequence
    List { elem: ElemKind, items: Vec<Value> },
    /// Registered domain type
    Domain(DomainBox),
    /// Document member that is neither a scalar nor a numeric array
    Json(serde_json::Value),
}

impl Value {
    pub fn domain<T: DomainType>(value: T) -> Self {
        Self::Domain(DomainBox::new(value))
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => ScalarKind::Bool.into(),
            Self::Int(_) => ScalarKind::Int.into(),
            Self::Int8(_) => ScalarKind::Int8.into(),
            Self::Int16(_) => ScalarKind::Int16.into(),
            Self::Int32(_) => ScalarKind::Int32.into(),
            Self::Int64(_) => ScalarKind::Int64.into(),
            Self::Uint(_) => ScalarKind::Uint.into(),
            Self::Uint8(_) => ScalarKind::Uint8.into(),
            Self::Uint16(_) => ScalarKind::Uint16.into(),
            Self::Uint32(_) => ScalarKind::Uint32.into(),
            Self::Uint64(_) => ScalarKind::Uint64.into(),
            Self::Float32(_) => ScalarKind::Float32.into(),
            Self::Float64(_) => ScalarKind::Float64.into(),
            Self::Str(_) => ScalarKind::String.into(),
            Self::List { elem, .. } => TypeTag::from_static(elem.sequence_tag()),
            Self::Domain(domain) => domain.get().domain_tag(),
            Self::Json(json) => TypeTag::from_static(json_kind(json)),
        }
    }

    pub fn as_domain<T: DomainType>(&self) -> Option<&T> {
        match self {
            Self::Domain(domain) => domain.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn as_domain_mut<T: DomainType>(&mut self) -> Option<&mut T> {
        match self {
            Self::Domain(domain) => domain.downcast_mut::<T>(),
            _ => None,
        }
    }

    /// Convert into a JSON value for writing back into a document.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(n) => Json::from(*n as i64),
            Self::Int8(n) => Json::from(*n),
            Self::Int16(n) => Json::from(*n),
            Self::Int32(n) => Json::from(*n),
            Self::Int64(n) => Json::from(*n),
            Self::Uint(n) => Json::from(*n as u64),
            Self::Uint8(n) => Json::from(*n),
            Self::Uint16(n) => Json::from(*n),
            Self::Uint32(n) => Json::from(*n),
            Self::Uint64(n) => Json::from(*n),
            // Non-finite floats have no JSON form and become null
            Self::Float32(n) => Json::from(n.to_string().parse::<f64>().unwrap_or(f64::from(*n))),
            Self::Float64(n) => float_json(*n),
            Self::Str(s) => Json::String(s.clone()),
            Self::List { items, .. } => Json::Array(items.iter().map(Value::to_json).collect()),
            Self::Domain(domain) => Json::String(domain.get().value_string()),
            Self::Json(json) => json.clone(),
        }
    }
}

/// Whole floats inside the exactly representable range are written as JSON integers.
fn float_json(n: f64) -> serde_json::Value {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() <= EXACT {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Value::from(n)
    }
}

pub(crate) fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Int8(n) => write!(f, "{n}"),
            Self::Int16(n) => write!(f, "{n}"),
            Self::Int32(n) => write!(f, "{n}"),
            Self::Int64(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Uint8(n) => write!(f, "{n}"),
            Self::Uint16(n) => write!(f, "{n}"),
            Self::Uint32(n) => write!(f, "{n}"),
            Self::Uint64(n) => write!(f, "{n}"),
            Self::Float32(n) => write!(f, "{n}"),
            Self::Float64(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::List { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Domain(domain) => f.write_str(&domain.get().value_string()),
            Self::Json(json) => write!(f, "{json}"),
        }
    }
}
