//! Connect & sync task
//!
//! Obtains a token, loads the population lookup, then walks the users
//! collection page by page.

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;

use super::{ProgressReporter, Task, TaskKind};
use crate::client::{IdentityApi, PopulationLookup, User, collect_linked_pages};
use crate::error::{ApiError, Result};

/// Snapshot produced by a successful sync
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult {
    /// Every user across all pages, in page order
    pub users: Vec<User>,
    /// Population ID → name
    pub populations: PopulationLookup,
    pub user_count: usize,
    pub population_count: usize,
}

/// Fetch all users and populations of one environment
pub struct FetchTask<C> {
    client: C,
}

impl<C: IdentityApi + 'static> FetchTask<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: IdentityApi + 'static> Task for FetchTask<C> {
    type Output = FetchResult;

    fn kind(&self) -> TaskKind {
        TaskKind::Fetch
    }

    async fn run(self, _progress: ProgressReporter<FetchResult>) -> Result<FetchResult> {
        let client = &self.client;
        let token = client.acquire_token().await.ok_or(ApiError::AuthFailed)?;

        let populations: PopulationLookup = client
            .list_populations(&token)
            .await?
            .into_iter()
            .collect();
        debug!("Loaded {} populations", populations.len());

        let token = &token;
        let users = collect_linked_pages(client.users_url(), move |url| async move {
            client.fetch_users_page(token, &url).await
        })
        .await?;

        info!(
            "Synced {} users across {} populations",
            users.len(),
            populations.len()
        );

        Ok(FetchResult {
            user_count: users.len(),
            population_count: populations.len(),
            users,
            populations,
        })
    }
}
