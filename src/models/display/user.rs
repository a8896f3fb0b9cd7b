//! User display models

use std::fmt;

use serde::Serialize;
use tabled::Tabled;

use crate::client::{PopulationLookup, User};
use crate::tasks::FetchResult;

/// User table row, with the population resolved to its name.
#[derive(Debug, Clone, PartialEq, Tabled, Serialize)]
pub struct UserRow {
    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "FIRST")]
    pub first: String,

    #[tabled(rename = "LAST")]
    pub last: String,

    /// Population name, or the raw population ID if unknown
    #[tabled(rename = "POPULATION")]
    pub population: String,

    #[tabled(rename = "ID")]
    pub id: String,
}

impl UserRow {
    pub fn new(user: &User, populations: &PopulationLookup) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first: user.name.given.clone(),
            last: user.name.family.clone(),
            population: populations.resolve(&user.population.id).to_string(),
            id: user.id.clone(),
        }
    }

    /// Rows for every user of a sync result, in sync order
    pub fn from_result(result: &FetchResult) -> Vec<Self> {
        result
            .users
            .iter()
            .map(|user| Self::new(user, &result.populations))
            .collect()
    }
}

/// Counts shown after a sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub users: usize,
    pub populations: usize,
}

impl From<&FetchResult> for SyncStats {
    fn from(result: &FetchResult) -> Self {
        Self {
            users: result.user_count,
            populations: result.population_count,
        }
    }
}

impl fmt::Display for SyncStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Users: {} | Populations: {}",
            self.users, self.populations
        )
    }
}
