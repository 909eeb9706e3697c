//! Users domain actions - privileged operations
//!
//! Each action checks its gate first, then does the work through the
//! collaborators in `ServerDeps`.

mod list_users;
mod update_permissions;

pub use list_users::{list_users, LIST_USERS_GATE};
pub use update_permissions::{update_user_permissions, UPDATE_PERMISSIONS_GATE};
