//! List users action

use tracing::info;

use crate::common::auth::{AuthenticationContext, AuthorizationGate, PermissionLevel};
use crate::domains::users::activities::list_user_summaries;
use crate::domains::users::errors::UsersError;
use crate::domains::users::models::{Domain, UserSummary};
use crate::kernel::ServerDeps;

pub const LIST_USERS_GATE: AuthorizationGate =
    AuthorizationGate::at_least(Domain::System.claim_key(), PermissionLevel::Reader);

/// List every account with its domain roles.
///
/// Requires `SystemRole` of at least reader.
pub async fn list_users(
    context: &AuthenticationContext,
    deps: &ServerDeps,
) -> Result<Vec<UserSummary>, UsersError> {
    LIST_USERS_GATE.check(context)?;

    info!(requested_by = ?context.uid(), "Listing users");

    let users = list_user_summaries(deps.identity.as_ref(), deps.list_users_page_size).await?;

    info!(count = users.len(), "Listed users");
    Ok(users)
}
