//! HAL collection envelopes
//!
//! PingOne list endpoints wrap resources as
//! `{ "_embedded": { "<resource>": [...] }, "_links": { "next": { "href": ... } } }`.
//! Missing envelope parts decode as empty rather than failing.

use serde::Deserialize;

use super::{Population, User};

/// A single page of a HAL collection
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Collection<T> {
    /// Embedded resources
    #[serde(rename = "_embedded", default)]
    pub embedded: T,

    /// Navigation links
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl<T> Collection<T> {
    /// URL of the next page, if the server supplied a non-empty one
    pub fn next_href(&self) -> Option<&str> {
        self.links
            .next
            .as_ref()
            .and_then(|link| link.href.as_deref())
            .filter(|href| !href.is_empty())
    }
}

/// `_links` object
#[derive(Debug, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<Link>,
}

/// A single HAL link
#[derive(Debug, Default, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub href: Option<String>,
}

/// `_embedded` of `GET /users`
#[derive(Debug, Default, Deserialize)]
pub struct UsersEmbedded {
    #[serde(default)]
    pub users: Vec<User>,
}

/// `_embedded` of `GET /populations`.
///
/// Entries are kept as raw JSON so one malformed population does not
/// fail the whole listing.
#[derive(Debug, Default, Deserialize)]
pub struct PopulationsEmbedded {
    #[serde(default)]
    pub populations: Vec<serde_json::Value>,
}

impl PopulationsEmbedded {
    /// Well-formed populations; entries without a string `id` and `name` are dropped.
    pub fn into_populations(self) -> Vec<Population> {
        self.populations
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }
}
