//! Spaces.

use serde::{Deserialize, Serialize};

use super::sys::Sys;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    #[serde(default, skip_serializing)]
    sys: Sys,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

impl Space {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn sys(&self) -> &Sys {
        &self.sys
    }

    pub fn id(&self) -> Option<&str> {
        self.sys.id()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn body_is_name_only() {
        let space = Space::new("Blog");
        assert_eq!(serde_json::to_value(&space).unwrap(), json!({ "name": "Blog" }));
    }

    #[test]
    fn reads_id_from_sys() {
        let space: Space = serde_json::from_value(json!({
            "sys": { "id": "spaceid", "type": "Space", "version": 1 },
            "name": "Blog"
        }))
        .unwrap();
        assert_eq!(space.id(), Some("spaceid"));
        assert_eq!(space.name.as_deref(), Some("Blog"));
    }
}
