// Common types shared across domains
pub mod auth;
pub mod callable;

pub use auth::*;
pub use callable::{decode_callable_data, read_callable_data, MAX_CALLABLE_BODY_BYTES};
