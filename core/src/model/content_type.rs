//! Content types and their field definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::link::LinkType;
use super::sys::Sys;
use super::Resource;
use crate::error::{CmaError, CmaResult};

/// Field types understood by the management API. Types this client does not
/// know are kept verbatim in `Other`, so a newer schema still decodes and is
/// sent back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Symbol,
    Text,
    Integer,
    Number,
    Date,
    Boolean,
    Link,
    Array,
    Object,
    Location,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Symbol => "Symbol",
            FieldType::Text => "Text",
            FieldType::Integer => "Integer",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Boolean => "Boolean",
            FieldType::Link => "Link",
            FieldType::Array => "Array",
            FieldType::Object => "Object",
            FieldType::Location => "Location",
            FieldType::Other(raw) => raw,
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Symbol" => FieldType::Symbol,
            "Text" => FieldType::Text,
            "Integer" => FieldType::Integer,
            "Number" => FieldType::Number,
            "Date" => FieldType::Date,
            "Boolean" => FieldType::Boolean,
            "Link" => FieldType::Link,
            "Array" => FieldType::Array,
            "Object" => FieldType::Object,
            "Location" => FieldType::Location,
            _ => FieldType::Other(raw),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Item descriptor of an `Array` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayItems {
    #[serde(rename = "type")]
    pub item_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<Vec<Value>>,
}

impl ArrayItems {
    pub fn of(item_type: FieldType) -> Self {
        Self {
            item_type,
            link_type: None,
            validations: None,
        }
    }

    pub fn links(link_type: LinkType) -> Self {
        Self {
            item_type: FieldType::Link,
            link_type: Some(link_type),
            validations: None,
        }
    }
}

/// A field definition. `validations` are opaque constraint objects passed
/// through unmodified. `required`, `disabled` and `localized` are omitted
/// from the wire when false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub localized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ArrayItems>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<Vec<Value>>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Field {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            required: false,
            disabled: false,
            localized: false,
            link_type: None,
            items: None,
            validations: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn localized(mut self, localized: bool) -> Self {
        self.localized = localized;
        self
    }

    pub fn link_type(mut self, link_type: LinkType) -> Self {
        self.link_type = Some(link_type);
        self
    }

    pub fn items(mut self, items: ArrayItems) -> Self {
        self.items = Some(items);
        self
    }

    pub fn validations(mut self, validations: Vec<Value>) -> Self {
        self.validations = Some(validations);
        self
    }
}

/// Schema for entries of one type. Field ids are unique within a content
/// type; `add_field` enforces this, responses are taken as the server sent
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    #[serde(default, skip_serializing)]
    sys: Sys,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
}

impl ContentType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.sys.set_id(id);
        self
    }

    pub fn with_space_id(mut self, space_id: impl Into<String>) -> Self {
        self.sys.set_space_id(space_id);
        self
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.sys.set_version(version);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_display_field(mut self, field_id: impl Into<String>) -> Self {
        self.display_field = Some(field_id.into());
        self
    }

    /// Append a field definition, rejecting an id that is already present.
    pub fn add_field(&mut self, field: Field) -> CmaResult<&mut Self> {
        if self.field(&field.id).is_some() {
            return Err(CmaError::DuplicateField(field.id));
        }
        self.fields.push(field);
        Ok(self)
    }

    pub fn with_field(mut self, field: Field) -> CmaResult<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn sys(&self) -> &Sys {
        &self.sys
    }

    pub fn id(&self) -> Option<&str> {
        self.sys.id()
    }

    pub fn version(&self) -> Option<u64> {
        self.sys.version()
    }

    pub fn is_published(&self) -> bool {
        self.sys.is_published()
    }
}

impl Resource for ContentType {
    const COLLECTION: &'static str = "content_types";

    fn sys(&self) -> &Sys {
        &self.sys
    }

    fn to_body(&self) -> CmaResult<Value> {
        serde_json::to_value(self).map_err(|e| CmaError::Serialization(e.to_string()))
    }
}
