//! Paged collection responses.

use serde::Deserialize;
use serde_json::Value;

use super::sys::Sys;

/// One page of a `fetch_all` result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CmaArray<T> {
    #[serde(default)]
    pub sys: Sys,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub includes: Option<Value>,
}

impl<T> CmaArray<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
