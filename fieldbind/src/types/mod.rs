//! Built-in domain value types.
//!
//! Each type implements [`DomainType`](crate::DomainType) and is registered by
//! [`Registry::with_defaults`](crate::Registry::with_defaults).

mod choice;
mod email;
mod multiline;
mod password;

pub use choice::ChoiceGroup;
pub use email::Email;
pub use multiline::Multiline;
pub use password::Password;
