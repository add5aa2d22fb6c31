//! Search trait for paging through entities.

use async_trait::async_trait;

use crate::client::TaleoClient;
use crate::error::Result;
use crate::search::SearchResultSet;
use crate::traits::Entity;

/// Page size used by [`Search::search_all`].
pub const SEARCH_ALL_LIMIT: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// Search entities page by page.
///
/// Implemented for every [`Entity`].
///
/// # Example
///
/// ```ignore
/// use taleo::{Employee, Search, TaleoClient};
///
/// let client = TaleoClient::from_env()?;
///
/// // Fetch a single page
/// let page = Employee::search_page(&client, 1, 10).await?;
///
/// // Fetch all pages
/// let all_employees = Employee::search_all(&client).await?;
/// ```
#[async_trait]
pub trait Search: Sized + Send {
    /// Fetch one page of results, `start` being 1-based.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn search_page(client: &TaleoClient, start: u32, limit: u32)
        -> Result<SearchResultSet>;

    /// Fetch every result, following `next` links until the last page.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn search_all(client: &TaleoClient) -> Result<Vec<Self>>;
}

#[async_trait]
impl<T: Entity> Search for T {
    async fn search_page(
        client: &TaleoClient,
        start: u32,
        limit: u32,
    ) -> Result<SearchResultSet> {
        client.search(T::kind(), start, limit).await
    }

    async fn search_all(client: &TaleoClient) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = client.search(T::kind(), 1, SEARCH_ALL_LIMIT).await?;
        let mut pages = 1;

        loop {
            let next = page.next_page(client).await?;
            for resource in page {
                all_items.push(T::from_resource(resource)?);
            }

            match next {
                Some(next) => page = next,
                None => break,
            }
            pages += 1;

            // Safety limit to prevent infinite loops
            if pages > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
