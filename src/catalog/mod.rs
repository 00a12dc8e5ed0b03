//! Static example catalog, loaded from a configuration table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse example catalog: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse example catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Editorial difficulty label attached to some examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A pre-authored bundle of source text the user can load and modify.
///
/// Immutable once loaded; the editor copies its content into a draft and
/// never writes back. The category set has churned over time, so it stays a
/// free-form tag rather than a closed enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub circuit: String,
    pub interface: String,
    pub test: String,
    /// Runtime input data, for examples whose test reads an input file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Override for the default `circuit.ml` filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_filename: Option<String>,
    /// Override for the default `circuit.mli` filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_filename: Option<String>,
}

/// Map from opaque example key to example content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    examples: BTreeMap<String, Example>,
}

impl Catalog {
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn get(&self, key: &str) -> Option<&Example> {
        self.examples.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.examples.keys().map(String::as_str)
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Example)> {
        self.examples
            .iter()
            .filter(move |(_, e)| e.category == category)
            .map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
