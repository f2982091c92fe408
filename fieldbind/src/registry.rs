//! Type capability registry.
//!
//! Domain value types (email, password, multi-line text, choice groups, or
//! anything a consumer defines) take part in extraction and apply without the
//! core knowing their representation. Each type implements [`DomainType`];
//! the registry stores one type-erased [`Capability`] per tag and is built
//! once, then shared read-only.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BindError, Result};
use crate::types::{ChoiceGroup, Email, Multiline, Password};
use crate::value::{TypeTag, Value};

/// How a renderer should present a domain field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Widget {
    /// Single-line text entry
    Entry {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        /// Pattern the renderer can check while the user types
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    /// Masked text entry
    Password,
    MultiLine {
        rows: usize,
    },
    /// Single-choice group
    Radio {
        options: Vec<String>,
        horizontal: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selected: Option<String>,
    },
}

/// Render descriptor plus whether the renderer should show hint text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderHint {
    pub widget: Widget,
    #[serde(default)]
    pub show_hint: bool,
}

impl RenderHint {
    pub fn new(widget: Widget, show_hint: bool) -> Self {
        Self { widget, show_hint }
    }
}

/// Selection behaviour shared by choice-style domain types.
pub trait Choice {
    fn options(&self) -> &[String];

    fn selected_index(&self) -> Option<usize>;

    /// Select the first option equal to `label`; clears the selection if none matches.
    fn set_selected(&mut self, label: &str);

    /// Select by position; out-of-range indices clear the selection.
    fn select_index(&mut self, index: Option<usize>);

    fn selected_label(&self) -> Option<&str> {
        self.selected_index()
            .and_then(|i| self.options().get(i))
            .map(String::as_str)
    }
}

/// A value type that manages its own string form.
///
/// `set_value` is functional: it consumes the current value and returns the
/// updated one, so types that keep extra state (rows, options) carry it over.
pub trait DomainType: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Registry key for this type.
    const TYPE_TAG: &'static str;

    /// Canonical serialization.
    fn get_value(&self) -> String;

    fn set_value(self, input: &str) -> Result<Self>;

    fn render_hint(&self) -> RenderHint;

    /// Syntactic rule checked by the renderer before apply.
    fn validate(_input: &str) -> std::result::Result<(), String> {
        Ok(())
    }

    /// Applied when the renderer already updated the stored value and no
    /// string round-trip is needed.
    fn commit(self) -> Self {
        self
    }

    /// Build a value from a string alone, with no prior state.
    fn from_input(input: &str) -> Result<Self> {
        Err(BindError::conversion(
            Self::TYPE_TAG,
            input,
            "an existing value is required",
        ))
    }

    fn as_choice(&self) -> Option<&dyn Choice> {
        None
    }

    fn as_choice_mut(&mut self) -> Option<&mut dyn Choice> {
        None
    }
}

/// Object-safe view of a domain value stored inside [`Value::Domain`].
pub trait DomainValue: fmt::Debug + Send + Sync + 'static {
    fn domain_tag(&self) -> TypeTag;

    fn value_string(&self) -> String;

    fn hint(&self) -> RenderHint;

    fn choice(&self) -> Option<&dyn Choice>;

    fn choice_mut(&mut self) -> Option<&mut dyn Choice>;

    fn clone_box(&self) -> Box<dyn DomainValue>;

    fn eq_dyn(&self, other: &dyn DomainValue) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: DomainType> DomainValue for T {
    fn domain_tag(&self) -> TypeTag {
        TypeTag::from_static(T::TYPE_TAG)
    }

    fn value_string(&self) -> String {
        self.get_value()
    }

    fn hint(&self) -> RenderHint {
        self.render_hint()
    }

    fn choice(&self) -> Option<&dyn Choice> {
        self.as_choice()
    }

    fn choice_mut(&mut self) -> Option<&mut dyn Choice> {
        self.as_choice_mut()
    }

    fn clone_box(&self) -> Box<dyn DomainValue> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn DomainValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One registry entry: the behaviour table for a tag.
pub trait Capability: Send + Sync {
    fn type_tag(&self) -> TypeTag;

    /// Convert `input`, starting from the field's current value when there is one.
    fn parse(&self, current: Option<&Value>, input: &str) -> Result<Value>;

    /// String form of a stored value; `None` if the value is not this type.
    fn render(&self, value: &Value) -> Option<String>;

    fn validate(&self, input: &str) -> std::result::Result<(), String>;

    fn render_hint(&self, value: &Value) -> Option<RenderHint>;

    /// Domain setter used when the caller skips the string round-trip.
    fn commit(&self, value: &Value) -> Result<Value>;
}

/// Capability backed by a concrete [`DomainType`].
struct TypedCapability<T>(PhantomData<fn() -> T>);

impl<T: DomainType> TypedCapability<T> {
    fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: DomainType> Capability for TypedCapability<T> {
    fn type_tag(&self) -> TypeTag {
        TypeTag::from_static(T::TYPE_TAG)
    }

    fn parse(&self, current: Option<&Value>, input: &str) -> Result<Value> {
        let next = match current.and_then(Value::as_domain::<T>) {
            Some(existing) => existing.clone().set_value(input)?,
            None => T::from_input(input)?,
        };
        Ok(Value::domain(next))
    }

    fn render(&self, value: &Value) -> Option<String> {
        value.as_domain::<T>().map(T::get_value)
    }

    fn validate(&self, input: &str) -> std::result::Result<(), String> {
        T::validate(input)
    }

    fn render_hint(&self, value: &Value) -> Option<RenderHint> {
        value.as_domain::<T>().map(T::render_hint)
    }

    fn commit(&self, value: &Value) -> Result<Value> {
        let stored = value.as_domain::<T>().ok_or_else(|| {
            BindError::conversion(
                T::TYPE_TAG,
                value.to_string(),
                format!("stored value is {}", value.type_tag()),
            )
        })?;
        Ok(Value::domain(stored.clone().commit()))
    }
}

/// Tag-keyed table of domain capabilities. Immutable once built.
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<TypeTag, Arc<dyn Capability>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry holding no domain types.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the built-in email, password, multiline and choice types.
    pub fn with_defaults() -> Self {
        let mut entries: HashMap<TypeTag, Arc<dyn Capability>> = HashMap::new();
        for capability in default_capabilities() {
            entries.insert(capability.type_tag(), capability);
        }
        Self { entries }
    }

    /// Look up a tag. An unregistered tag is not an error.
    pub fn get(&self, tag: &str) -> Option<&dyn Capability> {
        self.entries.get(tag).map(|entry| entry.as_ref())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&TypeTag> {
        let mut tags: Vec<_> = self.entries.keys().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("tags", &self.tags())
            .finish()
    }
}

fn default_capabilities() -> Vec<Arc<dyn Capability>> {
    vec![
        Arc::new(TypedCapability::<Email>::new()),
        Arc::new(TypedCapability::<Password>::new()),
        Arc::new(TypedCapability::<Multiline>::new()),
        Arc::new(TypedCapability::<ChoiceGroup>::new()),
    ]
}

/// Builder for [`Registry`]. Duplicate tags are reported by `build`.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Arc<dyn Capability>>,
}

impl RegistryBuilder {
    /// Register a concrete domain type.
    pub fn register<T: DomainType>(mut self) -> Self {
        self.entries.push(Arc::new(TypedCapability::<T>::new()));
        self
    }

    /// Register a hand-written capability.
    pub fn register_capability(mut self, capability: Arc<dyn Capability>) -> Self {
        self.entries.push(capability);
        self
    }

    /// Add the built-in domain types.
    pub fn with_defaults(mut self) -> Self {
        self.entries.extend(default_capabilities());
        self
    }

    pub fn build(self) -> Result<Registry> {
        let mut entries = HashMap::with_capacity(self.entries.len());
        for capability in self.entries {
            let tag = capability.type_tag();
            if entries.contains_key(&tag) {
                return Err(BindError::DuplicateType {
                    type_tag: tag.to_string(),
                });
            }
            entries.insert(tag, capability);
        }
        debug!(types = entries.len(), "capability registry built");
        Ok(Registry { entries })
    }
}
