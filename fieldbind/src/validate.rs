//! Syntactic checks on edited strings, run before apply.

use crate::convert::ParseMode;
use crate::error::{BindError, Result};
use crate::number::parse_kind;
use crate::registry::Registry;
use crate::value::{Kind, TypeTag};

/// Check `input` against the generic rule for `tag`.
///
/// Integer kinds need a base-10 parse and float kinds a float parse. Every
/// other tag is accepted here; domain rules live in [`validate_domain`].
pub fn validate(field: &str, tag: &TypeTag, input: &str, mode: ParseMode) -> Result<()> {
    let ok = match tag.kind() {
        Some(Kind::Scalar(kind)) if kind.is_integer() => match mode {
            ParseMode::Strict => parse_kind(kind, input, mode).is_ok(),
            ParseMode::Legacy => input.parse::<i128>().is_ok(),
        },
        Some(Kind::Scalar(kind)) if kind.is_float() => input.parse::<f64>().is_ok(),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(BindError::Validation {
            field: field.to_string(),
            expected_type: tag.to_string(),
        })
    }
}

/// Run the registered domain rule for `tag`, if there is one.
pub fn validate_domain(registry: &Registry, field: &str, tag: &TypeTag, input: &str) -> Result<()> {
    match registry.get(tag.as_str()) {
        Some(capability) => {
            capability
                .validate(input)
                .map_err(|message| BindError::DomainValidation {
                    field: field.to_string(),
                    message,
                })
        }
        None => Ok(()),
    }
}
