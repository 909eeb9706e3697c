//! Walk every page of the identity store and project each account

use tracing::debug;

use crate::domains::users::models::UserSummary;
use crate::kernel::{BaseIdentityProvider, ProviderError};

/// Fetch pages one after another until the provider stops returning a page
/// token, keeping the provider's order. An empty token ends the walk too.
pub async fn list_user_summaries(
    identity: &dyn BaseIdentityProvider,
    page_size: Option<u32>,
) -> Result<Vec<UserSummary>, ProviderError> {
    let mut summaries = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = identity.list_users(page_size, page_token.take()).await?;
        pages += 1;
        debug!(page = pages, records = page.records.len(), "Fetched user page");

        summaries.extend(page.records.iter().map(UserSummary::from_record));

        match page.next_page_token.filter(|token| !token.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(summaries)
}
