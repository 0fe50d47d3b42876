// JSON snapshot codec
//
// The whole map is written as one JSON object. serde_json only accepts map
// keys that serialize as strings or integers; any other key type is
// reported as an encode error.

use crate::Codec;
use persistmap_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Encodes the map as a single JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Compact output, one line
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output, handy when the file is read by people
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Whether this codec writes indented JSON
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl<K, V> Codec<K, V> for JsonCodec
where
    K: Serialize + DeserializeOwned + Eq + Hash + Send + Sync,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, entries: &HashMap<K, V>) -> Result<Vec<u8>> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(entries)
        } else {
            serde_json::to_vec(entries)
        };
        encoded.map_err(|e| Error::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<HashMap<K, V>> {
        serde_json::from_slice(bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}
