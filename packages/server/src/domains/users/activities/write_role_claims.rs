//! Persist a permission update without dropping unrelated claims

use tracing::info;

use crate::domains::users::models::PermissionUpdateRequest;
use crate::kernel::{BaseIdentityProvider, ProviderError};

/// Read the account's current claims, apply the requested changes and write
/// the merged set back. The provider replaces claims wholesale, so writing
/// only the requested domains would erase the others.
pub async fn write_role_claims(
    identity: &dyn BaseIdentityProvider,
    request: &PermissionUpdateRequest,
) -> Result<(), ProviderError> {
    let record = identity.get_user(&request.uid).await?;

    let mut claims = record.custom_claims;
    request.changes.apply_to(&mut claims);

    info!(
        uid = %request.uid,
        changed_domains = request.changes.len(),
        "Writing role claims"
    );
    identity.set_custom_claims(&request.uid, claims).await
}
