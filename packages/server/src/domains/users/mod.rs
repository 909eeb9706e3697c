//! Users domain - listing accounts and managing their role claims
//!
//! Architecture:
//!   HTTP route → action (gate, validate) → activity → identity provider

pub mod actions;
pub mod activities;
pub mod errors;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use actions::*;
pub use errors::UsersError;
pub use models::*;
pub use validation::PermissionUpdateSchema;
