use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A place resolved by the geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "country")]
    pub country_code: String,
}

impl LocationRecord {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            country_code: country_code.into(),
        }
    }

    /// Maps a by-name response: the first element of a non-empty array.
    pub fn from_direct_payload(payload: Value) -> Option<Self> {
        match payload {
            Value::Array(items) => items.into_iter().next().and_then(Self::from_value),
            other => {
                tracing::debug!("Expected a JSON array from direct lookup, got: {}", other);
                None
            }
        }
    }

    /// Maps a by-zip response: a single object carrying `name`.
    /// Error objects such as `{"cod":"404","message":"not found"}` yield `None`.
    pub fn from_zip_payload(payload: Value) -> Option<Self> {
        match payload {
            Value::Object(ref obj) if obj.contains_key("name") => Self::from_value(payload),
            other => {
                tracing::debug!("Zip lookup returned no location: {}", other);
                None
            }
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Location payload could not be mapped: {}", e);
                None
            }
        }
    }
}

impl fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.name, self.latitude, self.longitude, self.country_code
        )
    }
}
