use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An oEmbed response, kept exactly as the provider sent it.
///
/// Only JSON objects qualify. The accessors below read the fields defined by the
/// oEmbed spec; anything provider-specific is still reachable through [`OembedData::get`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OembedData(Map<String, Value>);

impl OembedData {
    /// Returns `None` unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// The `type` field: `photo`, `video`, `link` or `rich`.
    pub fn kind(&self) -> Option<&str> {
        self.str_field("type")
    }

    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn author_name(&self) -> Option<&str> {
        self.str_field("author_name")
    }

    pub fn author_url(&self) -> Option<&str> {
        self.str_field("author_url")
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.str_field("provider_name")
    }

    pub fn provider_url(&self) -> Option<&str> {
        self.str_field("provider_url")
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.str_field("thumbnail_url")
    }

    pub fn html(&self) -> Option<&str> {
        self.str_field("html")
    }

    pub fn width(&self) -> Option<u64> {
        self.dimension("width")
    }

    pub fn height(&self) -> Option<u64> {
        self.dimension("height")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    // some providers send dimensions as strings
    fn dimension(&self, key: &str) -> Option<u64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
