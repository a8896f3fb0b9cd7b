//! Mock identity client for testing
//!
//! Provides an in-memory implementation of [`IdentityApi`] so the background
//! tasks can be exercised without a network.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::{AccessToken, Population, User};
use super::{IdentityApi, LinkedPage};
use crate::error::{ApiError, Result};

const USERS_URL: &str = "mock://users";

/// Mock API client for testing.
///
/// Configure responses via builder methods, then hand it to a task.
///
/// # Example
/// ```ignore
/// let mock = MockIdentityClient::new()
///     .with_token("tok")
///     .with_user_pages(vec![vec![user("a")], vec![user("b")]]);
/// ```
#[derive(Default)]
pub struct MockIdentityClient {
    /// Token to hand out; `None` simulates an authentication failure
    token: Option<String>,
    /// Populations returned by list_populations
    populations: Vec<Population>,
    /// Error returned by list_populations instead of data
    populations_error: Option<String>,
    /// Users pages keyed by URL
    pages: HashMap<String, LinkedPage<User>>,
    /// Page URL that fails when requested
    failing_page: Option<String>,
    /// User IDs whose deletion fails
    failing_deletes: HashSet<String>,
    /// Recorded calls for assertions
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockIdentityClient {
    /// Create a new mock client that fails authentication and has no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out `token` from acquire_token.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Configure populations to return.
    pub fn with_populations(mut self, populations: Vec<Population>) -> Self {
        self.populations = populations;
        self
    }

    /// Make list_populations fail.
    pub fn with_populations_error(mut self, message: &str) -> Self {
        self.populations_error = Some(message.to_string());
        self
    }

    /// Configure users pages. Page N links to page N+1; the last has no next.
    pub fn with_user_pages(mut self, pages: Vec<Vec<User>>) -> Self {
        let count = pages.len();
        self.pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, users)| {
                let page = if i + 1 < count {
                    LinkedPage::with_next(users, page_url(i + 1))
                } else {
                    LinkedPage::last(users)
                };
                (page_url(i), page)
            })
            .collect();
        self
    }

    /// Make the page at `index` (0-based) fail when fetched.
    pub fn with_failing_page(mut self, index: usize) -> Self {
        self.failing_page = Some(page_url(index));
        self
    }

    /// Make deleting any of `ids` fail.
    pub fn with_failing_deletes(mut self, ids: &[&str]) -> Self {
        self.failing_deletes = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Shared handle to the call log, usable after the mock moves into a task.
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    async fn record(&self, call: String) {
        self.calls.lock().await.push(call);
    }

    fn check_token(&self, token: &AccessToken) -> Result<()> {
        match &self.token {
            Some(expected) if expected == token.as_str() => Ok(()),
            _ => Err(ApiError::Unauthorized.into()),
        }
    }
}

fn page_url(index: usize) -> String {
    if index == 0 {
        USERS_URL.to_string()
    } else {
        format!("{}?page={}", USERS_URL, index)
    }
}

/// Build a user with the given ID and population
pub fn user(id: &str, population_id: &str) -> User {
    let mut user = User {
        id: id.to_string(),
        username: format!("{}-login", id),
        email: format!("{}@example.com", id),
        ..User::default()
    };
    user.population.id = population_id.to_string();
    user
}

#[async_trait]
impl IdentityApi for MockIdentityClient {
    async fn acquire_token(&self) -> Option<AccessToken> {
        self.record("acquire_token".to_string()).await;
        self.token.as_deref().map(AccessToken::new)
    }

    fn users_url(&self) -> String {
        USERS_URL.to_string()
    }

    async fn list_populations(&self, token: &AccessToken) -> Result<Vec<Population>> {
        self.record("list_populations".to_string()).await;
        self.check_token(token)?;
        if let Some(ref message) = self.populations_error {
            return Err(ApiError::Network(message.clone()).into());
        }
        Ok(self.populations.clone())
    }

    async fn fetch_users_page(&self, token: &AccessToken, url: &str) -> Result<LinkedPage<User>> {
        self.record(format!("fetch_users_page {}", url)).await;
        self.check_token(token)?;
        if self.failing_page.as_deref() == Some(url) {
            return Err(ApiError::InvalidResponse("Failed to parse response".to_string()).into());
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(url.to_string()).into())
    }

    async fn delete_user(&self, token: &AccessToken, user_id: &str) -> Result<()> {
        self.record(format!("delete_user {}", user_id)).await;
        self.check_token(token)?;
        if self.failing_deletes.contains(user_id) {
            return Err(ApiError::ServerError("delete failed".to_string()).into());
        }
        Ok(())
    }
}
