//! Error types for field binding

use thiserror::Error;

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, BindError>;

/// Errors that can occur while extracting, converting, validating or applying fields
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    /// Extraction source is neither a record nor a string-keyed mapping
    #[error("cannot extract fields from {found}: expected a record or a mapping")]
    InvalidInputKind { found: String },

    /// Apply target is neither a writable record nor a writable mapping
    #[error("cannot apply fields to {found}: expected a record or a mapping")]
    InvalidTargetKind { found: String },

    /// A string could not be turned into a value of the requested type
    #[error("can't set {type_tag} from {input:?}: {message}")]
    Conversion {
        type_tag: String,
        input: String,
        message: String,
    },

    /// No converter and no registry entry exists for a type tag
    #[error("unsupported type: {type_tag}")]
    UnsupportedType { type_tag: String },

    /// A string failed the syntactic check for its field
    #[error("type of {field} value should be {expected_type}")]
    Validation {
        field: String,
        expected_type: String,
    },

    /// A domain type rejected a string with its own rule
    #[error("invalid value for {field}: {message}")]
    DomainValidation { field: String, message: String },

    /// Record has no member with this name
    #[error("unknown field: {name}")]
    UnknownField { name: String },

    /// Value variant does not match the member it is assigned to
    #[error("field {field} expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// Choice group constructed without options
    #[error("choice group needs at least one option")]
    EmptyChoices,

    /// Two capabilities registered under one tag
    #[error("duplicate type tag in registry: {type_tag}")]
    DuplicateType { type_tag: String },

    /// Configuration could not be loaded
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl BindError {
    /// Shorthand for a conversion failure.
    pub fn conversion(
        type_tag: impl Into<String>,
        input: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            type_tag: type_tag.into(),
            input: input.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an unsupported tag.
    pub fn unsupported(type_tag: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_tag: type_tag.into(),
        }
    }

    /// Whole-input shape errors abort the call; everything else is reported per field.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputKind { .. } | Self::InvalidTargetKind { .. }
        )
    }
}

impl From<figment::Error> for BindError {
    fn from(error: figment::Error) -> Self {
        Self::Config {
            message: error.to_string(),
        }
    }
}
