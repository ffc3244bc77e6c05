//! Entries and their localized field store.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Value};

use super::field_value::FieldValue;
use super::sys::Sys;
use super::Resource;
use crate::error::CmaResult;
use crate::links;

/// Values of one field keyed by locale code.
pub type LocaleMap = IndexMap<String, FieldValue>;

/// Field id to locale map, in the order each field id was first set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Fields(IndexMap<String, LocaleMap>);

impl Fields {
    /// Insert or replace the value for `(field_id, locale)`. Replacing keeps
    /// the field's original position.
    pub fn set(&mut self, field_id: impl Into<String>, locale: impl Into<String>, value: FieldValue) {
        self.0
            .entry(field_id.into())
            .or_default()
            .insert(locale.into(), value);
    }

    pub fn get(&self, field_id: &str, locale: &str) -> Option<&FieldValue> {
        self.0.get(field_id)?.get(locale)
    }

    pub fn field(&self, field_id: &str) -> Option<&LocaleMap> {
        self.0.get(field_id)
    }

    /// Drop a single locale. The field goes away with its last locale so no
    /// field is ever left with an empty locale map.
    pub fn remove(&mut self, field_id: &str, locale: &str) -> Option<FieldValue> {
        let locales = self.0.get_mut(field_id)?;
        let removed = locales.shift_remove(locale);
        if locales.is_empty() {
            self.0.shift_remove(field_id);
        }
        removed
    }

    pub fn remove_field(&mut self, field_id: &str) -> Option<LocaleMap> {
        self.0.shift_remove(field_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleMap)> {
        self.0.iter().map(|(id, locales)| (id.as_str(), locales))
    }
}

/// A content record.
///
/// An entry without an id is a draft: it can be created, but other entries
/// cannot link to it until the server (or the caller) assigns one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Entry {
    #[serde(default)]
    sys: Sys,
    #[serde(default)]
    fields: Fields,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
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

    pub fn with_field(
        mut self,
        field_id: impl Into<String>,
        value: impl Into<FieldValue>,
        locale: impl Into<String>,
    ) -> Self {
        self.set_field(field_id, value, locale);
        self
    }

    pub fn set_field(
        &mut self,
        field_id: impl Into<String>,
        value: impl Into<FieldValue>,
        locale: impl Into<String>,
    ) -> &mut Self {
        self.fields.set(field_id, locale, value.into());
        self
    }

    pub fn get_field(&self, field_id: &str, locale: &str) -> Option<&FieldValue> {
        self.fields.get(field_id, locale)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
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

    pub fn space_id(&self) -> Option<&str> {
        self.sys.space_id()
    }

    pub fn content_type_id(&self) -> Option<&str> {
        self.sys.content_type_id()
    }

    pub fn is_published(&self) -> bool {
        self.sys.is_published()
    }

    pub fn is_archived(&self) -> bool {
        self.sys.is_archived()
    }
}

impl Resource for Entry {
    const COLLECTION: &'static str = "entries";

    fn sys(&self) -> &Sys {
        &self.sys
    }

    fn to_body(&self) -> CmaResult<Value> {
        Ok(json!({ "fields": links::resolve_fields(&self.fields)? }))
    }
}
