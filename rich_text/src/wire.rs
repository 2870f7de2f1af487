//! Map codec for the run wire shape
//!
//! ```text
//! { "text": [ { "style": "bold", "string": "Hello" }, ... ] }
//! ```
//!
//! A missing `"text"` key means the field has no run content. A present key
//! whose entries have the wrong shape is a decode error.

use crate::{StyledText, TextError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Transport-neutral key/value map exchanged with drivers
pub type DataMap = Map<String, Value>;

/// Key holding the run array
pub const TEXT_KEY: &str = "text";

/// Encodes a value whose serde form is an object
///
/// Anything else encodes as the empty map.
pub fn to_data_map<T: Serialize>(value: &T) -> DataMap {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => DataMap::new(),
    }
}

/// Decodes `map` through `T`'s serde form
pub fn from_data_map<T: DeserializeOwned>(map: &DataMap) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(map.clone()))
}

impl StyledText {
    /// Encodes the runs as `{"text": [...]}`
    pub fn to_map(&self) -> DataMap {
        to_data_map(self)
    }

    /// Decodes `{"text": [...]}`; `Ok(None)` when the key is absent
    pub fn from_map(map: &DataMap) -> Result<Option<Self>, TextError> {
        if !map.contains_key(TEXT_KEY) {
            return Ok(None);
        }
        from_data_map(map)
            .map(Some)
            .map_err(|err| TextError::Decode(err.to_string()))
    }
}
