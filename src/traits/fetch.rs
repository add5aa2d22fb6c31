//! Fetch trait for retrieving single entities.

use async_trait::async_trait;

use crate::client::TaleoClient;
use crate::error::Result;
use crate::traits::Entity;

/// Fetch a single entity by ID.
///
/// Implemented for every [`Entity`].
///
/// # Example
///
/// ```ignore
/// use taleo::{Employee, Fetch, TaleoClient};
///
/// let client = TaleoClient::from_env()?;
/// let employee = Employee::fetch(&client, 42).await?;
/// ```
#[async_trait]
pub trait Fetch: Sized {
    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope reports failure or the request fails.
    async fn fetch(client: &TaleoClient, id: u64) -> Result<Self>;
}

#[async_trait]
impl<T: Entity> Fetch for T {
    async fn fetch(client: &TaleoClient, id: u64) -> Result<Self> {
        let resource = client.fetch_object(T::kind(), id).await?;
        T::from_resource(resource)
    }
}
