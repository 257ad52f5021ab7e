//! Data types for Orbit API responses.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Account details returned by the `info` endpoint.
///
/// The service does not document a fixed shape, so the object is kept as-is.
pub type AccountInfo = Map<String, Value>;

/// Response from the concept tagging endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaggingResult {
    /// Recognized entities keyed by their identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: HashMap<String, EntityDescriptor>,
    /// Text span annotations, passed through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: Vec<Value>,
    /// Words left on the account's quota after this call.
    #[serde(default, deserialize_with = "null_as_default")]
    pub remaining_words: i64,
}

impl TaggingResult {
    /// Entities ordered by descending relevance.
    #[must_use]
    pub fn ranked_entities(&self) -> Vec<(&str, &EntityDescriptor)> {
        let mut ranked: Vec<_> = self
            .entities
            .iter()
            .map(|(id, entity)| (id.as_str(), entity))
            .collect();
        ranked.sort_by(|a, b| b.1.relevance.total_cmp(&a.1.relevance));
        ranked
    }
}

/// A concept recognized in the tagged text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntityDescriptor {
    /// Image URL
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    /// Human-readable label
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    /// Reference link (e.g. an encyclopedia page)
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    /// Relevance score as reported by the service
    #[serde(deserialize_with = "null_as_default")]
    pub relevance: f64,
    /// Thumbnail URL
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
    /// Entity type tag (e.g. "PERSON")
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}

/// Decode `null` as the type's zero value, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
