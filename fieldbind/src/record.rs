//! Compile-time record introspection.
//!
//! `#[derive(Record)]` generates [`Record`] for a struct with named fields.
//! Every member type must implement [`FieldValue`], which maps it to and from
//! the dynamic [`Value`] the binder works with.

use crate::error::{BindError, Result};
use crate::number::Number;
use crate::value::{ElemKind, TypeTag, Value};

/// One member of a record as seen by the extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub name_display: String,
    pub value: Value,
}

impl Member {
    pub fn new(name: impl Into<String>, name_display: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            name_display: name_display.into(),
            value,
        }
    }
}

/// A structured record whose members can be listed and written by name.
pub trait Record {
    /// Members in declaration order.
    fn members(&self) -> Vec<Member>;

    /// Write `value` into the member called `name`.
    fn assign(&mut self, name: &str, value: Value) -> Result<()>;

    /// Type tag of the member called `name`, without building the member list.
    ///
    /// The derive answers from the declared member types. The default scans
    /// [`members`](Record::members).
    fn member_tag(&self, name: &str) -> Option<TypeTag> {
        self.members()
            .into_iter()
            .find(|member| member.name == name)
            .map(|member| member.value.type_tag())
    }
}

/// Conversion between a member's Rust type and [`Value`].
pub trait FieldValue: Sized {
    fn type_tag() -> TypeTag;

    fn to_value(&self) -> Value;

    /// Take the native value out, or hand the value back if the variant does not match.
    fn from_value(value: Value) -> std::result::Result<Self, Value>;
}

/// Assign `value` to `slot`, reporting a [`BindError::TypeMismatch`] on the wrong variant.
pub fn assign_field<T: FieldValue>(slot: &mut T, field: &str, value: Value) -> Result<()> {
    match T::from_value(value) {
        Ok(native) => {
            *slot = native;
            Ok(())
        }
        Err(value) => Err(BindError::TypeMismatch {
            field: field.to_string(),
            expected: T::type_tag().to_string(),
            found: value.type_tag().to_string(),
        }),
    }
}

/// Display label for a raw member name: first character upper-cased.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl FieldValue for bool {
    fn type_tag() -> TypeTag {
        TypeTag::from_static("bool")
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FieldValue for String {
    fn type_tag() -> TypeTag {
        TypeTag::from_static("string")
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(other),
        }
    }
}

macro_rules! numeric_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn type_tag() -> TypeTag {
                    TypeTag::from(<$ty as Number>::KIND)
                }

                fn to_value(&self) -> Value {
                    Number::into_value(*self)
                }

                fn from_value(value: Value) -> std::result::Result<Self, Value> {
                    <$ty as Number>::from_value(&value).ok_or(value)
                }
            }

            impl FieldValue for Vec<$ty> {
                fn type_tag() -> TypeTag {
                    TypeTag::from_static(ElemKind::Numeric(<$ty as Number>::KIND).sequence_tag())
                }

                fn to_value(&self) -> Value {
                    Value::List {
                        elem: ElemKind::Numeric(<$ty as Number>::KIND),
                        items: self.iter().map(|n| Number::into_value(*n)).collect(),
                    }
                }

                fn from_value(value: Value) -> std::result::Result<Self, Value> {
                    let native = match &value {
                        Value::List { elem, items } if *elem == ElemKind::Numeric(<$ty as Number>::KIND) => items
                            .iter()
                            .map(<$ty as Number>::from_value)
                            .collect::<Option<Vec<$ty>>>(),
                        _ => None,
                    };
                    native.ok_or(value)
                }
            }
        )*
    };
}

numeric_field_value!(isize, i8, i16, i32, i64, usize, u8, u16, u32, u64, f32, f64);

/// Implement [`FieldValue`] for a [`DomainType`](crate::DomainType) so it can
/// be a record member.
///
/// ```ignore
/// fieldbind::domain_field_value!(Hex);
/// ```
#[macro_export]
macro_rules! domain_field_value {
    ($ty:ty) => {
        impl $crate::FieldValue for $ty {
            fn type_tag() -> $crate::TypeTag {
                $crate::TypeTag::from_static(<$ty as $crate::DomainType>::TYPE_TAG)
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::domain(::std::clone::Clone::clone(self))
            }

            fn from_value(value: $crate::Value) -> ::std::result::Result<Self, $crate::Value> {
                match value.as_domain::<$ty>() {
                    Some(native) => Ok(::std::clone::Clone::clone(native)),
                    None => Err(value),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Password;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("name"), "Name");
        assert_eq!(display_name("Age"), "Age");
        assert_eq!(display_name("ßeta"), "SSeta");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_assign_field_mismatch() {
        let mut age = 0_i32;
        let err = assign_field(&mut age, "age", Value::Str("x".into())).unwrap_err();
        assert_eq!(
            err,
            BindError::TypeMismatch {
                field: "age".into(),
                expected: "int32".into(),
                found: "string".into(),
            }
        );
        assign_field(&mut age, "age", Value::Int32(7)).unwrap();
        assert_eq!(age, 7);
    }

    #[test]
    fn test_width_must_match() {
        assert_eq!(
            <i64 as FieldValue>::from_value(Value::Int32(1)),
            Err(Value::Int32(1))
        );
    }

    #[test]
    fn test_sequence_field_value() {
        let scores = vec![1.5_f64, 2.5];
        let value = scores.to_value();
        assert_eq!(value.to_string(), "[1.5 2.5]");
        assert_eq!(Vec::<f64>::from_value(value), Ok(scores));
        assert_eq!(Vec::<u8>::type_tag(), "[]uint8");
        assert!(Vec::<i32>::from_value(vec![1_i64].to_value()).is_err());
    }

    struct Pair {
        left: i32,
        right: Password,
    }

    impl Record for Pair {
        fn members(&self) -> Vec<Member> {
            vec![
                Member::new("left", "Left", self.left.to_value()),
                Member::new("right", "Right", self.right.to_value()),
            ]
        }

        fn assign(&mut self, name: &str, value: Value) -> Result<()> {
            match name {
                "left" => assign_field(&mut self.left, name, value),
                "right" => assign_field(&mut self.right, name, value),
                _ => Err(BindError::UnknownField { name: name.into() }),
            }
        }
    }

    #[test]
    fn test_default_member_tag_scans_members() {
        let pair = Pair {
            left: 1,
            right: Password::new("x"),
        };
        assert_eq!(pair.member_tag("left").unwrap(), "int32");
        assert_eq!(pair.member_tag("right").unwrap(), "password");
        assert_eq!(pair.member_tag("other"), None);
    }

    #[test]
    fn test_domain_field_value() {
        let secret = Password::new("hunter2");
        let value = secret.to_value();
        assert_eq!(value.type_tag(), "password");
        assert_eq!(Password::from_value(value), Ok(secret));
        assert!(Password::from_value(Value::Bool(true)).is_err());
    }
}
