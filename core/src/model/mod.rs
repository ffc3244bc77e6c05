//! Domain model for the management API.
//!
//! # Design
//! Every resource carries a `Sys` envelope that only the server fills in;
//! request bodies never include it. `Resource` is implemented by the types
//! that live in a per-space collection and share the create/update/publish
//! lifecycle.

mod appearance;
mod array;
mod content_type;
mod entry;
mod field_value;
mod link;
mod space;
mod sys;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CmaResult;

pub use appearance::{Appearance, Widget, WidgetId};
pub use array::CmaArray;
pub use content_type::{ArrayItems, ContentType, Field, FieldType};
pub use entry::{Entry, Fields, LocaleMap};
pub use field_value::FieldValue;
pub use link::{Link, LinkType};
pub use space::Space;
pub use sys::Sys;

/// A resource stored under `/spaces/{space}/{COLLECTION}`.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Path segment of the collection, e.g. `entries`.
    const COLLECTION: &'static str;

    fn sys(&self) -> &Sys;

    /// Request body for create and update. Never includes `sys`.
    fn to_body(&self) -> CmaResult<Value>;
}
