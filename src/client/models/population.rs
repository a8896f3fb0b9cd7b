//! Population models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A population: a named grouping of users within an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    /// Population ID
    pub id: String,

    /// Display name
    pub name: String,
}

/// Population ID → name lookup, rebuilt on every sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulationLookup(HashMap<String, String>);

impl PopulationLookup {
    /// Resolve a population ID to its name, falling back to the raw ID.
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.0.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Population> for PopulationLookup {
    fn from_iter<I: IntoIterator<Item = Population>>(iter: I) -> Self {
        Self(iter.into_iter().map(|p| (p.id, p.name)).collect())
    }
}
