//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Author of a message sent to a text model.
///
/// # Examples
///
/// ```
/// use storyteller_core::Role;
///
/// assert_ne!(Role::User, Role::System);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// Standing instructions for the model
    System,
    /// Content written by the service on behalf of the listener
    User,
    /// Prior model output
    Assistant,
}
