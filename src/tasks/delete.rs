//! Bulk user deletion task

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;

use super::{ProgressReporter, Task, TaskKind};
use crate::client::IdentityApi;
use crate::error::{ApiError, Result};

/// Outcome of a bulk delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    /// Deletions the API accepted
    pub deleted: usize,
    /// Deletions attempted
    pub total: usize,
}

impl DeleteResult {
    pub fn failed(&self) -> usize {
        self.total - self.deleted
    }
}

/// Delete a list of users, one request at a time, in input order.
///
/// Individual failures are not reported; they only show up as
/// `deleted < total` in the result.
pub struct BulkDeleteTask<C> {
    client: C,
    user_ids: Vec<String>,
}

impl<C: IdentityApi + 'static> BulkDeleteTask<C> {
    pub fn new(client: C, user_ids: Vec<String>) -> Self {
        Self { client, user_ids }
    }
}

#[async_trait]
impl<C: IdentityApi + 'static> Task for BulkDeleteTask<C> {
    type Output = DeleteResult;

    fn kind(&self) -> TaskKind {
        TaskKind::Delete
    }

    async fn run(self, progress: ProgressReporter<DeleteResult>) -> Result<DeleteResult> {
        let total = self.user_ids.len();
        if total == 0 {
            return Ok(DeleteResult { deleted: 0, total });
        }

        // No token means every request would be rejected; stop before sending any.
        let token = self
            .client
            .acquire_token()
            .await
            .ok_or(ApiError::AuthFailed)?;

        let mut deleted = 0;
        for (i, user_id) in self.user_ids.iter().enumerate() {
            match self.client.delete_user(&token, user_id).await {
                Ok(()) => deleted += 1,
                Err(e) => debug!("Delete of user {} failed: {}", user_id, e),
            }
            progress.report(i + 1, total);
        }

        info!("Deleted {} of {} users", deleted, total);
        Ok(DeleteResult { deleted, total })
    }
}
