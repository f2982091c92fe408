//! Single-choice option group.

use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{BindError, Result};
use crate::registry::{Choice, DomainType, RenderHint, Widget};

/// An ordered, non-empty set of option labels with at most one selected.
///
/// `selected` is `None` when nothing is selected. Selecting a label that is
/// not among the options clears the selection instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceGroup {
    #[serde(deserialize_with = "non_empty_options")]
    options: Vec<String>,
    /// Layout hint for the renderer
    #[serde(default)]
    horizontal: bool,
    #[serde(default)]
    selected: Option<usize>,
}

impl ChoiceGroup {
    pub fn new<I, S>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(BindError::EmptyChoices);
        }
        Ok(Self {
            options,
            horizontal: false,
            selected: None,
        })
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_selected(mut self, label: &str) -> Self {
        self.set_selected(label);
        self
    }

    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }
}

fn non_empty_options<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let options = Vec::<String>::deserialize(deserializer)?;
    if options.is_empty() {
        return Err(de::Error::custom(BindError::EmptyChoices));
    }
    Ok(options)
}

impl Choice for ChoiceGroup {
    fn options(&self) -> &[String] {
        &self.options
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected.filter(|&i| i < self.options.len())
    }

    fn set_selected(&mut self, label: &str) {
        self.selected = self.options.iter().position(|option| option == label);
        if self.selected.is_none() {
            debug!(label, "label is not an option, selection cleared");
        }
    }

    fn select_index(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.options.len());
    }
}

impl DomainType for ChoiceGroup {
    const TYPE_TAG: &'static str = "choice";

    /// The selected label, or an empty string with no selection.
    fn get_value(&self) -> String {
        self.selected_label().unwrap_or_default().to_string()
    }

    fn set_value(mut self, input: &str) -> Result<Self> {
        self.set_selected(input);
        Ok(self)
    }

    fn render_hint(&self) -> RenderHint {
        RenderHint::new(
            Widget::Radio {
                options: self.options.clone(),
                horizontal: self.horizontal,
                selected: self.selected_label().map(str::to_string),
            },
            true,
        )
    }

    fn as_choice(&self) -> Option<&dyn Choice> {
        Some(self)
    }

    fn as_choice_mut(&mut self) -> Option<&mut dyn Choice> {
        Some(self)
    }
}

crate::domain_field_value!(ChoiceGroup);

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> ChoiceGroup {
        ChoiceGroup::new(["small", "medium", "large", "medium"]).unwrap()
    }

    #[test]
    fn test_empty_options_rejected() {
        assert_eq!(
            ChoiceGroup::new(Vec::<String>::new()),
            Err(BindError::EmptyChoices)
        );
    }

    #[test]
    fn test_set_selected_first_match() {
        let mut group = sizes();
        group.set_selected("medium");
        assert_eq!(group.selected_index(), Some(1));
        assert_eq!(group.get_value(), "medium");
    }

    #[test]
    fn test_unknown_label_clears_selection() {
        let mut group = sizes().with_selected("large");
        assert_eq!(group.selected_index(), Some(2));
        group.set_selected("huge");
        assert_eq!(group.selected_index(), None);
        assert_eq!(group.get_value(), "");
    }

    #[test]
    fn test_select_index_out_of_range() {
        let mut group = sizes();
        group.select_index(Some(0));
        assert_eq!(group.selected_label(), Some("small"));
        group.select_index(Some(9));
        assert_eq!(group.selected_index(), None);
    }

    #[test]
    fn test_from_input_needs_options() {
        assert!(ChoiceGroup::from_input("small").is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_options() {
        assert!(serde_json::from_str::<ChoiceGroup>(r#"{"options":[]}"#).is_err());
    }

    #[test]
    fn test_deserialized_out_of_range_selection_reads_as_none() {
        let group: ChoiceGroup =
            serde_json::from_str(r#"{"options":["a","b"],"selected":5}"#).unwrap();
        assert_eq!(group.selected_index(), None);
        assert_eq!(group.get_value(), "");
    }
}
