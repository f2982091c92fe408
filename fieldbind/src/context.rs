//! Binder: the main API surface.
//!
//! A `Binder` pairs a built [`Registry`] with a [`BindConfig`]. It extracts
//! field collections from records, mappings and documents, and converts and
//! validates single strings. Collections keep a clone of the binder that
//! produced them, so apply needs no extra context.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::collection::{ApplyMode, FieldCollection};
use crate::config::BindConfig;
use crate::convert::{convert_builtin, ParseMode};
use crate::descriptor::{FieldDescriptor, FieldInput};
use crate::error::{BindError, Result};
use crate::registry::Registry;
use crate::source::Source;
use crate::validate;
use crate::value::{TypeTag, Value};

#[derive(Debug, Clone)]
pub struct Binder {
    registry: Arc<Registry>,
    config: BindConfig,
}

impl Default for Binder {
    /// Built-in domain types and default configuration.
    fn default() -> Self {
        Self::new(Registry::with_defaults())
    }
}

impl Binder {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            config: BindConfig::default(),
        }
    }

    pub fn builder() -> BinderBuilder {
        BinderBuilder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// Build descriptors for every member of `source`, calling `on_field` on
    /// each one in discovery order before returning.
    pub fn extract<H, F>(&self, source: Source<'_>, mut on_field: F) -> Result<FieldCollection<H>>
    where
        F: FnMut(&mut FieldDescriptor<H>),
    {
        let members = source.members()?;
        let mut seen = HashSet::with_capacity(members.len());
        let mut fields = Vec::with_capacity(members.len());

        for member in members {
            if !seen.insert(member.name.clone()) {
                warn!(field = %member.name, "duplicate member name skipped");
                continue;
            }
            let type_tag = member.value.type_tag();
            let (value_str, render_hint) = match self.registry.get(type_tag.as_str()) {
                Some(capability) => (
                    capability
                        .render(&member.value)
                        .unwrap_or_else(|| member.value.to_string()),
                    capability.render_hint(&member.value),
                ),
                None => {
                    if let Value::Domain(domain) = &member.value {
                        warn!(field = %member.name, %type_tag, "domain type is not registered");
                        (member.value.to_string(), Some(domain.get().hint()))
                    } else {
                        (member.value.to_string(), None)
                    }
                }
            };
            trace!(field = %member.name, %type_tag, "field extracted");

            let mut field = FieldDescriptor::new(
                member.name,
                member.name_display,
                type_tag,
                value_str,
                member.value,
                render_hint,
            );
            on_field(&mut field);
            fields.push(field);
        }

        debug!(source = source.kind_name(), fields = fields.len(), "fields extracted");
        Ok(FieldCollection::new(self.clone(), fields))
    }

    /// Convert `input` for `tag` with no prior value.
    ///
    /// Built-in kinds are tried first, then the registry.
    pub fn convert(&self, tag: &str, input: &str) -> Result<Value> {
        self.convert_from(&TypeTag::from(tag), None, input)
    }

    /// Convert `input`, letting a domain type start from `current`.
    pub fn convert_from(&self, tag: &TypeTag, current: Option<&Value>, input: &str) -> Result<Value> {
        if tag.is_builtin() {
            return convert_builtin(tag, input, self.config.parse_mode);
        }
        match self.registry.get(tag.as_str()) {
            Some(capability) => capability.parse(current, input),
            None => Err(BindError::unsupported(tag.as_str())),
        }
    }

    /// Generic syntactic check for `field`.
    pub fn validate(&self, field: &str, tag: &str, input: &str) -> Result<()> {
        validate::validate(field, &TypeTag::from(tag), input, self.config.parse_mode)
    }

    /// The registered domain rule for `tag`; unregistered tags pass.
    pub fn validate_domain(&self, field: &str, tag: &str, input: &str) -> Result<()> {
        validate::validate_domain(&self.registry, field, &TypeTag::from(tag), input)
    }

    /// Generic check, then the domain rule, for an extracted field.
    pub fn validate_field<H>(&self, field: &FieldDescriptor<H>, input: &str) -> Result<()> {
        validate::validate(field.name(), field.type_tag(), input, self.config.parse_mode)?;
        validate::validate_domain(&self.registry, field.name(), field.type_tag(), input)
    }

    /// The value apply writes for `field` given the caller's input.
    ///
    /// The registry is consulted before the generic converter.
    pub(crate) fn resolve<H>(&self, field: &FieldDescriptor<H>, input: FieldInput) -> Result<Value> {
        let tag = field.type_tag();
        let capability = self.registry.get(tag.as_str());
        match (input, capability) {
            (FieldInput::Text(text), Some(capability)) => capability.parse(Some(field.value()), &text),
            (FieldInput::Text(text), None) if tag.is_builtin() => {
                convert_builtin(tag, &text, self.config.parse_mode)
            }
            (FieldInput::Text(_), None) => Err(BindError::unsupported(tag.as_str())),
            (FieldInput::Stored, Some(capability)) => capability.commit(field.value()),
            (FieldInput::Stored, None) => Ok(field.value().clone()),
        }
    }
}

/// Builder for [`Binder`].
#[derive(Debug, Default)]
pub struct BinderBuilder {
    registry: Option<Registry>,
    config: BindConfig,
}

impl BinderBuilder {
    /// Use `registry` instead of the built-in defaults.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn config(mut self, config: BindConfig) -> Self {
        self.config = config;
        self
    }

    pub fn parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.config.parse_mode = parse_mode;
        self
    }

    pub fn apply_mode(mut self, apply_mode: ApplyMode) -> Self {
        self.config.apply_mode = apply_mode;
        self
    }

    pub fn build(self) -> Binder {
        Binder {
            registry: Arc::new(self.registry.unwrap_or_else(Registry::with_defaults)),
            config: self.config,
        }
    }
}
