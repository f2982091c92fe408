//! Field descriptors: one editable member plus its renderer handle.

use crate::registry::RenderHint;
use crate::value::{TypeTag, Value};

/// Metadata and current value of one member, produced by extraction.
///
/// `H` is the renderer's entry handle. The binder never looks inside it.
#[derive(Debug, Clone)]
pub struct FieldDescriptor<H> {
    name: String,
    name_display: String,
    type_tag: TypeTag,
    value_str: String,
    value: Value,
    render_hint: Option<RenderHint>,
    entry: Option<H>,
}

impl<H> FieldDescriptor<H> {
    pub(crate) fn new(
        name: String,
        name_display: String,
        type_tag: TypeTag,
        value_str: String,
        value: Value,
        render_hint: Option<RenderHint>,
    ) -> Self {
        Self {
            name,
            name_display,
            type_tag,
            value_str,
            value,
            render_hint,
            entry: None,
        }
    }

    /// Member name, unique within one extraction.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_display(&self) -> &str {
        &self.name_display
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    /// Initial string form of the value.
    pub fn value_str(&self) -> &str {
        &self.value_str
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Mutable access to the stored value, for renderers that update domain
    /// state directly before a [`FieldInput::Stored`] apply.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Registry-supplied render hint for domain types.
    pub fn render_hint(&self) -> Option<&RenderHint> {
        self.render_hint.as_ref()
    }

    /// Label plus type, e.g. `Age (float64)`.
    pub fn hint_text(&self) -> String {
        format!("{} ({})", self.name_display, self.type_tag)
    }

    /// Attach the renderer's entry handle, replacing any earlier one.
    pub fn attach(&mut self, handle: H) {
        self.entry = Some(handle);
    }

    pub fn entry(&self) -> Option<&H> {
        self.entry.as_ref()
    }

    pub fn entry_mut(&mut self) -> Option<&mut H> {
        self.entry.as_mut()
    }

    pub fn take_entry(&mut self) -> Option<H> {
        self.entry.take()
    }
}

/// What the caller hands back for one field during apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// An edited string to convert
    Text(String),
    /// No string round-trip; commit the stored value through its domain setter
    Stored,
}

impl From<String> for FieldInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FieldInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
