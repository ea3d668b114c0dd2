use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// A media type entry under `content`, e.g. `application/json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// Pick the content entry a generated wrapper will send or decode:
/// `application/json`, then any `+json` type, then the first declared.
pub fn preferred_content<'a, V>(
    content: &'a indexmap::IndexMap<String, V>,
) -> Option<(&'a String, &'a V)> {
    content
        .get_key_value("application/json")
        .or_else(|| content.iter().find(|(ct, _)| ct.ends_with("+json")))
        .or_else(|| content.first())
}
