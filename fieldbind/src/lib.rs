//! Bidirectional field binding
//!
//! `fieldbind` turns a typed record, an ordered mapping or a decoded JSON
//! document into an ordered list of field descriptors that a string-based
//! editor can render, then converts the edited strings back into typed values
//! and writes them into the original target.
//!
//! # Architecture
//!
//! - **No runtime reflection**: records describe themselves through `#[derive(Record)]`
//! - **Open type dispatch**: domain types (email, password, multi-line text,
//!   choice groups, or your own) plug in through a [`Registry`] keyed by type tag
//! - **Explicit context**: a [`Binder`] carries the registry and [`BindConfig`];
//!   there is no global state
//! - **Renderer-agnostic**: each descriptor carries an opaque entry handle
//!   and an optional [`RenderHint`]
//!
//! ```ignore
//! use fieldbind::{Binder, FieldInput, Record, Source, Target};
//!
//! #[derive(Record)]
//! struct Person {
//!     name: String,
//!     age: f64,
//! }
//!
//! let mut person = Person { name: "Joe".into(), age: 30.5 };
//! let binder = Binder::default();
//! let fields = binder.extract::<(), _>(Source::Record(&person), |_| {})?;
//! let report = fields.apply(Target::Record(&mut person), |field| {
//!     FieldInput::from(field.value_str())
//! })?;
//! ```

extern crate self as fieldbind;

pub mod collection;
pub mod config;
pub mod context;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod number;
pub mod record;
pub mod registry;
pub mod source;
pub mod types;
pub mod validate;
pub mod value;

pub use collection::{ApplyMode, ApplyReport, FieldCollection, FieldFailure};
pub use config::{BindConfig, ENV_PREFIX};
pub use context::{Binder, BinderBuilder};
pub use convert::{convert_builtin, parse_bool, parse_sequence, ParseMode};
pub use descriptor::{FieldDescriptor, FieldInput};
pub use error::{BindError, Result};
pub use fieldbind_macros::Record;
pub use number::{number_to_string, parse_number, Number};
pub use record::{assign_field, display_name, FieldValue, Member, Record};
pub use registry::{
    Capability, Choice, DomainType, DomainValue, Registry, RegistryBuilder, RenderHint, Widget,
};
pub use source::{value_from_json, Mapping, Source, Target};
pub use types::{ChoiceGroup, Email, Multiline, Password};
pub use value::{DomainBox, ElemKind, Kind, ScalarKind, TypeTag, Value};
