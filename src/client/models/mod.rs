//! PingOne API data models
//!
//! Wire types returned by the PingOne Platform API plus the credential
//! types used to reach it. Models are organized by resource type.

mod auth;
mod collection;
mod population;
mod user;

pub use auth::{AccessToken, Credentials};
pub(crate) use auth::TokenResponse;
pub use collection::{Collection, PopulationsEmbedded, UsersEmbedded};
pub use population::{Population, PopulationLookup};
pub use user::{PopulationRef, User, UserName};
