//! Server-managed metadata envelope attached to every resource.
//!
//! `Sys` is an open key/value bag: the server may add attributes the client
//! does not know about, and they round-trip untouched. Typed accessors cover
//! the attributes the client relies on.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::link::LinkType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sys(Map<String, Value>);

impl Sys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn id(&self) -> Option<&str> {
        self.str_value("id")
    }

    /// The `type` attribute, e.g. `Entry`, `ContentType` or `Array`.
    pub fn resource_type(&self) -> Option<&str> {
        self.str_value("type")
    }

    /// Current version. Numbers written as floats by older servers are
    /// accepted when they are integral.
    pub fn version(&self) -> Option<u64> {
        self.0.get("version").and_then(integral)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.str_value("createdAt")
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.str_value("updatedAt")
    }

    pub fn space_id(&self) -> Option<&str> {
        self.link_id("space")
    }

    pub fn content_type_id(&self) -> Option<&str> {
        self.link_id("contentType")
    }

    /// Id of a nested link such as `createdBy` or `space`.
    pub fn link_id(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.get("sys")?.get("id")?.as_str()
    }

    pub fn is_published(&self) -> bool {
        self.0.get("publishedVersion").is_some_and(|v| !v.is_null())
    }

    pub fn is_archived(&self) -> bool {
        self.0.get("archivedVersion").is_some_and(|v| !v.is_null())
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.0.insert("id".to_string(), Value::String(id.into()));
    }

    pub(crate) fn set_version(&mut self, version: u64) {
        self.0.insert("version".to_string(), Value::from(version));
    }

    pub(crate) fn set_space_id(&mut self, space_id: impl Into<String>) {
        self.0
            .insert("space".to_string(), link_object(&LinkType::Space, &space_id.into()));
    }

    fn str_value(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Sys {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub(crate) fn link_object(link_type: &LinkType, id: &str) -> Value {
    json!({ "sys": { "type": "Link", "linkType": link_type.as_str(), "id": id } })
}

fn integral(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}
