//! Ordered descriptor collections and bulk apply.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::context::Binder;
use crate::descriptor::{FieldDescriptor, FieldInput};
use crate::error::{BindError, Result};
use crate::source::Target;
use crate::value::Value;

/// Whether apply writes fields one by one or only when all of them convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyMode {
    /// Each field is written as soon as it converts; failures do not stop later fields
    #[default]
    Independent,
    /// Every field is converted and checked first; nothing is written if any fails
    AllOrNothing,
}

/// A field that could not be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub field: String,
    pub error: BindError,
}

/// Outcome of one apply pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Names of the fields written, in order
    pub applied: Vec<String>,
    pub failures: Vec<FieldFailure>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure for `field`, if it failed.
    pub fn failure(&self, field: &str) -> Option<&BindError> {
        self.failures
            .iter()
            .find(|failure| failure.field == field)
            .map(|failure| &failure.error)
    }

    fn fail(&mut self, field: &str, error: BindError) {
        warn!(field, %error, "field not applied");
        self.failures.push(FieldFailure {
            field: field.to_string(),
            error,
        });
    }
}

/// Descriptors from one extraction, in discovery order.
///
/// Membership is fixed; apply consumes the collection.
#[derive(Debug, Clone)]
pub struct FieldCollection<H> {
    binder: Binder,
    fields: Vec<FieldDescriptor<H>>,
}

impl<H> FieldCollection<H> {
    pub(crate) fn new(binder: Binder, fields: Vec<FieldDescriptor<H>>) -> Self {
        Self { binder, fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor<H>> {
        self.fields.iter()
    }

    /// Mutable access to the descriptors; the set of fields stays fixed.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FieldDescriptor<H>> {
        self.fields.iter_mut()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor<H>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldDescriptor<H>> {
        self.fields.iter_mut().find(|field| field.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldDescriptor::name).collect()
    }

    /// Write every field into `target`, asking `per_field` for each input in order.
    ///
    /// A target that cannot take fields fails the whole call before
    /// `per_field` runs. Per-field failures are collected in the report.
    pub fn apply<F>(mut self, mut target: Target<'_>, mut per_field: F) -> Result<ApplyReport>
    where
        F: FnMut(&mut FieldDescriptor<H>) -> FieldInput,
    {
        target.check_writable()?;
        let mode = self.binder.config().apply_mode;
        let mut report = ApplyReport::default();
        let mut staged: Vec<(String, Value)> = Vec::new();

        for field in &mut self.fields {
            let input = per_field(field);
            trace!(
                field = field.name(),
                stored = matches!(input, FieldInput::Stored),
                "applying field"
            );
            let resolved = self
                .binder
                .resolve(field, input)
                .and_then(|value| match mode {
                    ApplyMode::Independent => {
                        target.write(field.name(), value)?;
                        Ok(None)
                    }
                    ApplyMode::AllOrNothing => {
                        target.check(field.name(), &value)?;
                        Ok(Some(value))
                    }
                });
            match resolved {
                Ok(Some(value)) => staged.push((field.name().to_string(), value)),
                Ok(None) => report.applied.push(field.name().to_string()),
                Err(error) => report.fail(field.name(), error),
            }
        }

        if mode == ApplyMode::AllOrNothing {
            if report.is_success() {
                for (name, value) in staged {
                    match target.write(&name, value) {
                        Ok(()) => report.applied.push(name),
                        Err(error) => report.fail(&name, error),
                    }
                }
            } else {
                debug!(
                    staged = staged.len(),
                    failed = report.failures.len(),
                    "apply rolled back"
                );
            }
        }

        debug!(
            target = target.kind_name(),
            applied = report.applied.len(),
            failed = report.failures.len(),
            ?mode,
            "fields applied"
        );
        Ok(report)
    }
}

impl<H> IntoIterator for FieldCollection<H> {
    type Item = FieldDescriptor<H>;
    type IntoIter = std::vec::IntoIter<FieldDescriptor<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a, H> IntoIterator for &'a FieldCollection<H> {
    type Item = &'a FieldDescriptor<H>;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindConfig;
    use crate::source::{Mapping, Source};

    fn mapping() -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert("name".into(), Value::Str("Joe".into()));
        mapping.insert("age".into(), Value::Int(30));
        mapping.insert("on".into(), Value::Bool(false));
        mapping
    }

    fn binder(apply_mode: ApplyMode) -> Binder {
        Binder::builder()
            .config(BindConfig {
                apply_mode,
                ..BindConfig::default()
            })
            .build()
    }

    #[test_log::test]
    fn test_independent_keeps_going_after_failure() {
        let mut target = mapping();
        let fields = binder(ApplyMode::Independent)
            .extract::<(), _>(Source::Mapping(&target.clone()), |_| {})
            .unwrap();
        let inputs = ["Jane", "thirty", "true"];
        let mut next = inputs.iter();
        let report = fields
            .apply(Target::Mapping(&mut target), |_| {
                FieldInput::from(*next.next().unwrap())
            })
            .unwrap();

        assert_eq!(report.applied, ["name", "on"]);
        assert!(matches!(
            report.failure("age"),
            Some(BindError::Conversion { .. })
        ));
        assert_eq!(target["name"], Value::Str("Jane".into()));
        assert_eq!(target["age"], Value::Int(30));
        assert_eq!(target["on"], Value::Bool(true));
    }

    #[test_log::test]
    fn test_all_or_nothing_writes_nothing_on_failure() {
        let original = mapping();
        let mut target = original.clone();
        let fields = binder(ApplyMode::AllOrNothing)
            .extract::<(), _>(Source::Mapping(&original), |_| {})
            .unwrap();
        let inputs = ["Jane", "thirty", "true"];
        let mut next = inputs.iter();
        let report = fields
            .apply(Target::Mapping(&mut target), |_| {
                FieldInput::from(*next.next().unwrap())
            })
            .unwrap();

        assert!(report.applied.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(target, original);
    }

    #[test]
    fn test_all_or_nothing_applies_when_clean() {
        let original = mapping();
        let mut target = original.clone();
        let fields = binder(ApplyMode::AllOrNothing)
            .extract::<(), _>(Source::Mapping(&original), |_| {})
            .unwrap();
        let report = fields
            .apply(Target::Mapping(&mut target), |field| {
                FieldInput::from(field.value_str())
            })
            .unwrap();
        assert!(report.is_success());
        assert_eq!(report.applied.len(), 3);
        assert_eq!(target, original);
    }

    #[test]
    fn test_get_by_name() {
        let source = mapping();
        let fields = Binder::default()
            .extract::<(), _>(Source::Mapping(&source), |_| {})
            .unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("age").unwrap().value_str(), "30");
        assert!(fields.get("missing").is_none());
        assert_eq!(fields.names(), ["name", "age", "on"]);
    }
}
