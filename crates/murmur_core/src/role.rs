//! Who a prompt message speaks for.

use serde::{Deserialize, Serialize};

/// Prompt roles. Murmur only ever sends instructions and the request itself.
///
/// # Examples
///
/// ```
/// use murmur_core::Role;
///
/// assert_eq!(Role::User.as_wire(), "user");
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// Standing instructions, sent as the system prompt
    System,
    /// The tweet request
    User,
}

impl Role {
    /// Lowercase name used by OpenAI- and Anthropic-style APIs.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}
