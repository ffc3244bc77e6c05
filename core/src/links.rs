//! Serializes localized field values into the wire shape.
//!
//! Scalars pass through, sequences are resolved element by element, and
//! links become `{"sys": {"type": "Link", ...}}` objects. Links only ever
//! carry an id, so entries that reference each other resolve independently
//! and there is nothing to recurse into.

use serde_json::{Map, Value};

use crate::error::CmaResult;
use crate::model::{FieldValue, Fields};

/// Resolve a single value. Fails with `CmaError::DraftLink` if the value,
/// or any element of it, links to an entry that has no id.
pub fn resolve_value(value: &FieldValue) -> CmaResult<Value> {
    match value {
        FieldValue::Scalar(scalar) => Ok(scalar.clone()),
        FieldValue::Sequence(items) => items
            .iter()
            .map(resolve_value)
            .collect::<CmaResult<Vec<_>>>()
            .map(Value::Array),
        FieldValue::Link(link) => link.to_json(),
    }
}

/// Resolve every field/locale pair, keeping field and locale order.
pub fn resolve_fields(fields: &Fields) -> CmaResult<Value> {
    let mut out = Map::new();
    for (field_id, locales) in fields.iter() {
        let mut resolved = Map::new();
        for (locale, value) in locales {
            resolved.insert(locale.clone(), resolve_value(value)?);
        }
        out.insert(field_id.to_string(), Value::Object(resolved));
    }
    Ok(Value::Object(out))
}
