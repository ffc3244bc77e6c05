//! Editor appearance of a content type: which widget edits which field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::sys::Sys;

/// Editor widget. Widgets this client does not know are kept in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetId {
    SingleLine,
    Dropdown,
    Markdown,
    EntryLinksEditor,
    Other(String),
}

impl WidgetId {
    pub fn as_str(&self) -> &str {
        match self {
            WidgetId::SingleLine => "singleLine",
            WidgetId::Dropdown => "dropdown",
            WidgetId::Markdown => "markdown",
            WidgetId::EntryLinksEditor => "entryLinksEditor",
            WidgetId::Other(raw) => raw,
        }
    }
}

impl From<String> for WidgetId {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "singleLine" => WidgetId::SingleLine,
            "dropdown" => WidgetId::Dropdown,
            "markdown" => WidgetId::Markdown,
            "entryLinksEditor" => WidgetId::EntryLinksEditor,
            _ => WidgetId::Other(raw),
        }
    }
}

impl From<WidgetId> for String {
    fn from(widget_id: WidgetId) -> Self {
        match widget_id {
            WidgetId::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<WidgetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_params: Option<Map<String, Value>>,
}

/// The default editor interface of a content type. Updating requires
/// `title`, `content_type_id`, a space id and a version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    #[serde(default, skip_serializing)]
    sys: Sys,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type_id: Option<String>,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl Appearance {
    pub fn with_space_id(mut self, space_id: impl Into<String>) -> Self {
        self.sys.set_space_id(space_id);
        self
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.sys.set_version(version);
        self
    }

    pub fn sys(&self) -> &Sys {
        &self.sys
    }

    pub fn version(&self) -> Option<u64> {
        self.sys.version()
    }

    pub fn widget_for(&self, field_id: &str) -> Option<&Widget> {
        self.widgets
            .iter()
            .find(|widget| widget.field_id.as_deref() == Some(field_id) || widget.id.as_deref() == Some(field_id))
    }
}
