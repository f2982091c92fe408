//! Multi-line text entry.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{DomainType, RenderHint, Widget};

/// Free text shown in a multi-line editor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Multiline {
    pub value: String,
    /// Rows visible without scrolling
    #[serde(default, rename = "multiline_rows")]
    pub rows: usize,
}

impl Multiline {
    pub fn new(value: impl Into<String>, rows: usize) -> Self {
        Self {
            value: value.into(),
            rows,
        }
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }
}

impl DomainType for Multiline {
    const TYPE_TAG: &'static str = "multiline";

    fn get_value(&self) -> String {
        self.value.clone()
    }

    fn set_value(mut self, input: &str) -> Result<Self> {
        self.value = input.to_string();
        Ok(self)
    }

    fn render_hint(&self) -> RenderHint {
        RenderHint::new(Widget::MultiLine { rows: self.rows }, false)
    }

    fn from_input(input: &str) -> Result<Self> {
        Ok(Self::new(input, 0))
    }
}

crate::domain_field_value!(Multiline);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_keeps_rows() {
        let text = Multiline::new("one", 5).set_value("one\ntwo").unwrap();
        assert_eq!(text.rows, 5);
        assert_eq!(text.get_value(), "one\ntwo");
        assert_eq!(text.render_hint().widget, Widget::MultiLine { rows: 5 });
    }

    #[test]
    fn test_rows_serde_name() {
        let text: Multiline =
            serde_json::from_str(r#"{"value":"x","multiline_rows":3}"#).unwrap();
        assert_eq!(text, Multiline::new("x", 3));
    }
}
