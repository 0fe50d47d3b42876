// Binary snapshot codec built on bincode
//
// Unlike JSON, any serde key type is accepted. Entry order in the output
// follows HashMap iteration order, so two encodings of equal maps may differ
// byte-wise while decoding to the same map.

use crate::Codec;
use persistmap_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Encodes the map with bincode's default (fixed-int, little-endian) layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl BincodeCodec {
    /// Codec with bincode's default options
    pub fn new() -> Self {
        Self
    }
}

impl<K, V> Codec<K, V> for BincodeCodec
where
    K: Serialize + DeserializeOwned + Eq + Hash + Send + Sync,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn encode(&self, entries: &HashMap<K, V>) -> Result<Vec<u8>> {
        bincode::serialize(entries).map_err(|e| Error::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<HashMap<K, V>> {
        bincode::deserialize(bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}
