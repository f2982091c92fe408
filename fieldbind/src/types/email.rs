//! Email entry.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{DomainType, RenderHint, Widget};

const EMAIL_PATTERN: &str = r"\w{1,}@\w{1,}\.\w{1,4}";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// An email address, stored as entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(pub String);

impl From<&str> for Email {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl DomainType for Email {
    const TYPE_TAG: &'static str = "email";

    fn get_value(&self) -> String {
        self.0.clone()
    }

    fn set_value(self, input: &str) -> Result<Self> {
        Ok(Self(input.to_string()))
    }

    fn render_hint(&self) -> RenderHint {
        RenderHint::new(
            Widget::Entry {
                placeholder: Some("test@example.com".to_string()),
                pattern: Some(EMAIL_PATTERN.to_string()),
            },
            true,
        )
    }

    fn validate(input: &str) -> std::result::Result<(), String> {
        if EMAIL_RE.is_match(input) {
            Ok(())
        } else {
            Err("not a valid email".to_string())
        }
    }

    fn from_input(input: &str) -> Result<Self> {
        Ok(Self(input.to_string()))
    }
}

crate::domain_field_value!(Email);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Email::validate("joe@example.com").is_ok());
        assert_eq!(
            Email::validate("joe.example.com"),
            Err("not a valid email".to_string())
        );
        assert!(Email::validate("@example.com").is_err());
    }

    #[test]
    fn test_set_value_replaces() {
        let email = Email::from("a@b.io").set_value("c@d.io").unwrap();
        assert_eq!(email.get_value(), "c@d.io");
    }

    #[test]
    fn test_hint_carries_placeholder() {
        let hint = Email::default().render_hint();
        assert!(hint.show_hint);
        match hint.widget {
            Widget::Entry { placeholder, .. } => {
                assert_eq!(placeholder.as_deref(), Some("test@example.com"))
            }
            other => panic!("unexpected widget {other:?}"),
        }
    }
}
