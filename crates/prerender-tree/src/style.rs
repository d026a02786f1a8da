//! Style identifier lookup.
//!
//! A style map is the flat JSON object a CSS-module build emits next to a
//! stylesheet: logical style names mapped to the generated class or id. The
//! map is passed explicitly to template instantiation; the serializer never
//! sees it.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::error::Category;

use crate::TreeError;

/// Mapping from logical style names to emitted identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    entries: HashMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style map from a JSON object whose values are all strings.
    ///
    /// Goes through the same `Deserialize` impl the WASM binding uses, so both
    /// report the same message for the same bad input.
    pub fn from_json(source: &str) -> Result<Self, TreeError> {
        serde_json::from_str(source).map_err(|e| match e.classify() {
            Category::Data => TreeError::InvalidStyleMap {
                message: e.to_string(),
            },
            _ => TreeError::Json(e),
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, id: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), id.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StyleMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
