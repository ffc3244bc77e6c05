//! Link references between resources.
//!
//! A link stands in for a full resource on the wire:
//! `{"sys": {"type": "Link", "linkType": "Entry", "id": "..."}}`.
//! Links hold the target's id rather than the target itself, so entries
//! that reference each other never own one another.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entry::Entry;
use super::sys::link_object;
use crate::error::{CmaError, CmaResult};

/// Kind of resource a link points at. Unknown kinds are kept in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LinkType {
    Entry,
    Asset,
    Space,
    User,
    ContentType,
    Other(String),
}

impl LinkType {
    pub fn as_str(&self) -> &str {
        match self {
            LinkType::Entry => "Entry",
            LinkType::Asset => "Asset",
            LinkType::Space => "Space",
            LinkType::User => "User",
            LinkType::ContentType => "ContentType",
            LinkType::Other(raw) => raw,
        }
    }
}

impl From<&str> for LinkType {
    fn from(raw: &str) -> Self {
        match raw {
            "Entry" => LinkType::Entry,
            "Asset" => LinkType::Asset,
            "Space" => LinkType::Space,
            "User" => LinkType::User,
            "ContentType" => LinkType::ContentType,
            other => LinkType::Other(other.to_string()),
        }
    }
}

impl From<String> for LinkType {
    fn from(raw: String) -> Self {
        LinkType::from(raw.as_str())
    }
}

impl From<LinkType> for String {
    fn from(link_type: LinkType) -> Self {
        match link_type {
            LinkType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// A reference to another resource. `id` is `None` when the link was taken
/// from a draft entry; such a link cannot be serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub link_type: LinkType,
    pub id: Option<String>,
}

impl Link {
    pub fn new(link_type: LinkType, id: impl Into<String>) -> Self {
        Self {
            link_type,
            id: Some(id.into()),
        }
    }

    pub fn entry(id: impl Into<String>) -> Self {
        Self::new(LinkType::Entry, id)
    }

    pub fn asset(id: impl Into<String>) -> Self {
        Self::new(LinkType::Asset, id)
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// Recognise a link object in a response body.
    pub fn from_json(value: &Value) -> Option<Self> {
        let sys = value.as_object()?.get("sys")?;
        if sys.get("type")?.as_str()? != "Link" {
            return None;
        }
        let link_type = LinkType::from(sys.get("linkType")?.as_str()?);
        let id = sys.get("id")?.as_str()?;
        Some(Self::new(link_type, id))
    }

    pub fn to_json(&self) -> CmaResult<Value> {
        match &self.id {
            Some(id) => Ok(link_object(&self.link_type, id)),
            None => Err(CmaError::DraftLink),
        }
    }
}

impl From<&Entry> for Link {
    fn from(entry: &Entry) -> Self {
        Self {
            link_type: LinkType::Entry,
            id: entry.id().map(str::to_string),
        }
    }
}
