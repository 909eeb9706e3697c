use axum::extract::{Extension, Request};

use crate::common::auth::AuthenticationContext;
use crate::domains::users::{list_users, update_user_permissions, UserSummary, UsersError};
use crate::server::app::AxumAppState;
use crate::server::callable::CallableResult;

/// `POST /ListUsers`. The request payload is not used.
pub async fn list_users_handler(
    Extension(state): Extension<AxumAppState>,
    Extension(context): Extension<AuthenticationContext>,
) -> Result<CallableResult<Vec<UserSummary>>, UsersError> {
    let users = list_users(&context, &state.server_deps).await?;
    Ok(CallableResult(users))
}

/// `POST /UpdateUserPermissions`. The body stream is passed through unread
/// so the action can run its gate before buffering it.
pub async fn update_user_permissions_handler(
    Extension(state): Extension<AxumAppState>,
    Extension(context): Extension<AuthenticationContext>,
    request: Request,
) -> Result<CallableResult<()>, UsersError> {
    update_user_permissions(&context, request.into_body(), &state.server_deps).await?;
    Ok(CallableResult(()))
}
