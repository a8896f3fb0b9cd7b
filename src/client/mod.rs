//! PingOne API client

use async_trait::async_trait;

use crate::error::Result;

pub mod identity;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use identity::{Endpoints, IdentityClient};
#[cfg(test)]
pub use mock::MockIdentityClient;
pub use models::{AccessToken, Credentials, Population, PopulationLookup, User};
pub use pagination::{LinkedPage, collect_linked_pages};

/// Operations the background tasks need from the identity provider.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Exchange client credentials for a bearer token.
    ///
    /// Returns `None` on any failure: transport error, rejected credentials,
    /// server error and an unreadable body all look the same to callers.
    async fn acquire_token(&self) -> Option<AccessToken>;

    /// URL of the first page of the users collection
    fn users_url(&self) -> String;

    /// List all populations of the environment
    async fn list_populations(&self, token: &AccessToken) -> Result<Vec<Population>>;

    /// Fetch one page of users from `url`
    async fn fetch_users_page(&self, token: &AccessToken, url: &str) -> Result<LinkedPage<User>>;

    /// Delete a single user
    async fn delete_user(&self, token: &AccessToken, user_id: &str) -> Result<()>;
}
