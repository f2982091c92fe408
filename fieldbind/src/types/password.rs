//! Password entry.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{DomainType, RenderHint, Widget};

/// A secret rendered as a masked entry.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Password {
    pub value: String,
}

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

// Keep secrets out of logs.
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password").field("value", &"***").finish()
    }
}

impl DomainType for Password {
    const TYPE_TAG: &'static str = "password";

    fn get_value(&self) -> String {
        self.value.clone()
    }

    fn set_value(mut self, input: &str) -> Result<Self> {
        self.value = input.to_string();
        Ok(self)
    }

    fn render_hint(&self) -> RenderHint {
        RenderHint::new(Widget::Password, true)
    }

    fn from_input(input: &str) -> Result<Self> {
        Ok(Self::new(input))
    }
}

crate::domain_field_value!(Password);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_value() {
        let shown = format!("{:?}", Password::new("hunter2"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Password::new("s3cret")).unwrap();
        assert_eq!(json, serde_json::json!({ "value": "s3cret" }));
    }
}
