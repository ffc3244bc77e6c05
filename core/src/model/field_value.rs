//! Values held in an entry's localized fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::entry::Entry;
use super::link::Link;

/// A single localized field value.
///
/// Responses are classified by shape: arrays become `Sequence`, link objects
/// become `Link`, everything else (strings, numbers, booleans, null and
/// plain objects such as locations) stays a `Scalar`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Sequence(Vec<FieldValue>),
    Link(Link),
}

impl FieldValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                FieldValue::Sequence(items.into_iter().map(FieldValue::from_json).collect())
            }
            Value::Object(_) => match Link::from_json(&value) {
                Some(link) => FieldValue::Link(link),
                None => FieldValue::Scalar(value),
            },
            scalar => FieldValue::Scalar(scalar),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => value.as_str(),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            FieldValue::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FieldValue::from_json)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::from_json(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(Value::String(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Scalar(Value::Bool(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Scalar(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Scalar(Value::from(value))
    }
}

impl From<Link> for FieldValue {
    fn from(link: Link) -> Self {
        FieldValue::Link(link)
    }
}

/// Links to the entry by its current id. The entry is not retained.
impl From<&Entry> for FieldValue {
    fn from(entry: &Entry) -> Self {
        FieldValue::Link(Link::from(entry))
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classifies_response_values() {
        let value: FieldValue = serde_json::from_value(json!([
            "tag",
            { "sys": { "type": "Link", "linkType": "Entry", "id": "e1" } },
            { "lat": 52.5, "lon": 13.4 }
        ]))
        .unwrap();

        let items = value.as_sequence().unwrap();
        assert_eq!(items[0].as_str(), Some("tag"));
        assert_eq!(items[1].as_link(), Some(&Link::entry("e1")));
        assert_eq!(items[2].as_scalar(), Some(&json!({ "lat": 52.5, "lon": 13.4 })));
    }

    #[test]
    fn entry_converts_to_link_by_id() {
        let target = Entry::new().with_id("bar");
        assert_eq!(FieldValue::from(&target), FieldValue::Link(Link::entry("bar")));
    }

    #[test]
    fn vectors_of_entries_become_sequences_of_links() {
        let a = Entry::new().with_id("a");
        let b = Entry::new().with_id("b");
        let value = FieldValue::from(vec![&a, &b]);
        assert_eq!(
            value,
            FieldValue::Sequence(vec![Link::entry("a").into(), Link::entry("b").into()])
        );
    }
}
