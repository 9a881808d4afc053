use serde::{Serialize, de::DeserializeOwned};

use crate::errors::{Result, ReviewError};

/// Turns the raw object of an admission request into a typed object and
/// back.
///
/// Reviewers get their codec at construction time and never change it, so a
/// single reviewer can be shared by concurrent requests.
pub trait ObjectCodec: Send + Sync {
    fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T>;

    fn encode<T: Serialize>(&self, object: &T) -> Result<serde_json::Value>;
}

/// The `serde_json` codec, matching the encoding the API server uses for
/// admission webhooks.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl ObjectCodec for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T> {
        serde_json::from_slice(raw).map_err(ReviewError::Decode)
    }

    fn encode<T: Serialize>(&self, object: &T) -> Result<serde_json::Value> {
        serde_json::to_value(object).map_err(ReviewError::Encode)
    }
}
