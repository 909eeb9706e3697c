//! Users domain activities - calls out to the identity provider

mod list_user_summaries;
mod write_role_claims;

pub use list_user_summaries::list_user_summaries;
pub use write_role_claims::write_role_claims;
