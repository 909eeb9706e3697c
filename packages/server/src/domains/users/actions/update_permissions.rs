//! Update user permissions action

use axum::body::Body;
use tracing::info;

use crate::common::auth::{AuthenticationContext, AuthorizationGate, PermissionLevel};
use crate::common::read_callable_data;
use crate::domains::users::activities::write_role_claims;
use crate::domains::users::errors::UsersError;
use crate::domains::users::models::Domain;
use crate::kernel::ServerDeps;

pub const UPDATE_PERMISSIONS_GATE: AuthorizationGate =
    AuthorizationGate::at_least(Domain::System.claim_key(), PermissionLevel::Admin);

/// Change one account's domain roles.
///
/// Requires `SystemRole` admin. The body is only read once the gate has
/// passed, and nothing is written unless the whole body validates.
pub async fn update_user_permissions(
    context: &AuthenticationContext,
    body: Body,
    deps: &ServerDeps,
) -> Result<(), UsersError> {
    UPDATE_PERMISSIONS_GATE.check(context)?;

    let data = read_callable_data(body)
        .await
        .map_err(UsersError::MalformedRequest)?;
    let request = deps
        .validator
        .validate(&data)
        .map_err(UsersError::ValidationFailed)?;

    info!(
        requested_by = ?context.uid(),
        uid = %request.uid,
        "Updating user permissions"
    );

    write_role_claims(deps.identity.as_ref(), &request).await?;

    info!(uid = %request.uid, "User permissions updated");
    Ok(())
}
