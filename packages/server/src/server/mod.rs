// HTTP server setup (Axum + callable protocol)
pub mod app;
pub mod callable;
pub mod middleware;
pub mod routes;
pub mod token;

pub use app::*;
pub use middleware::TokenVerifiers;
pub use token::{TokenError, TokenVerifier};
