//! User models

use serde::{Deserialize, Serialize};

/// PingOne user record as embedded in `GET /users` pages.
///
/// Every attribute is optional on the wire; missing ones decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    #[serde(default)]
    pub id: String,

    /// Login name
    #[serde(default)]
    pub username: String,

    /// Primary email address
    #[serde(default)]
    pub email: String,

    /// Structured name
    #[serde(default)]
    pub name: UserName,

    /// Population the user belongs to
    #[serde(default)]
    pub population: PopulationRef,
}

/// Structured user name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserName {
    /// Given (first) name
    #[serde(default)]
    pub given: String,

    /// Family (last) name
    #[serde(default)]
    pub family: String,
}

/// Reference to the user's population
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationRef {
    /// Population ID
    #[serde(default)]
    pub id: String,
}
