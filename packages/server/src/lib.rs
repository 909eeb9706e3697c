// Role Claims - API Core
//
// Per-user role claims across five independent domains (Equipment, Chat,
// System, Storage, Calendar), stored as custom claims on a hosted identity
// provider. Every privileged operation passes the authorization gate in
// common::auth before touching its payload.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
