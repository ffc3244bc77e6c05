//! Process-wide JSON codec.
//!
//! Every request body is encoded and every response body decoded through the
//! single `Codec` returned by `shared()`. It is built on first use and never
//! reconfigured afterwards.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CmaError, CmaResult};
use crate::http::MEDIA_TYPE;

#[derive(Debug)]
pub struct Codec {
    media_type: &'static str,
}

static SHARED: OnceLock<Codec> = OnceLock::new();

/// The shared codec instance.
pub fn shared() -> &'static Codec {
    SHARED.get_or_init(|| Codec {
        media_type: MEDIA_TYPE,
    })
}

impl Codec {
    /// Value of the `Content-Type` header for encoded bodies.
    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn encode(&self, body: &Value) -> CmaResult<String> {
        serde_json::to_string(body).map_err(|e| CmaError::Serialization(e.to_string()))
    }

    pub fn decode<T: DeserializeOwned>(&self, body: &str) -> CmaResult<T> {
        serde_json::from_str(body).map_err(|e| CmaError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;

    #[test]
    fn shared_instance_is_retained() {
        assert!(std::ptr::eq(shared(), shared()));
    }

    #[test]
    fn decode_failures_are_deserialization_errors() {
        let err = shared().decode::<Entry>("{\"sys\": 3").unwrap_err();
        assert!(matches!(err, CmaError::Deserialization(_)));
    }

    #[test]
    fn wrong_shape_is_rejected_not_defaulted() {
        let err = shared().decode::<Entry>(r#"{"fields": []}"#).unwrap_err();
        assert!(matches!(err, CmaError::Deserialization(_)));
    }
}
