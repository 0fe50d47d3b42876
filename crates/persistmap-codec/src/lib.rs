//! # persistmap Codecs
//!
//! Snapshot codecs turn the whole in-memory map into bytes and back.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of persistmap.**
//!
//! Users should depend on the main `persistmap` crate instead, which
//! re-exports the codecs below.
//!
//! ---
//!
//! Every codec encodes a complete snapshot. There is no delta or append
//! format: the bytes produced by [`Codec::encode`] replace the backing file
//! wholesale.
//!
//! - [`JsonCodec`]: a single JSON object, key to value (the default)
//! - [`BincodeCodec`]: compact binary encoding
//! - [`Checksummed`]: wraps another codec with a magic/version header and a
//!   CRC32 trailer so torn or foreign files are rejected at open

use persistmap_core::Result;
use std::collections::HashMap;

pub mod binary;
pub mod checksum;
pub mod json;

pub use binary::BincodeCodec;
pub use checksum::Checksummed;
pub use json::JsonCodec;

/// Converts a full key-value snapshot to bytes and back.
///
/// Both directions must be total: malformed input is reported as
/// [`persistmap_core::Error::Decode`], unserializable state as
/// [`persistmap_core::Error::Encode`], never as a panic.
///
/// Implementations must satisfy `decode(encode(m)) == m`.
pub trait Codec<K, V>: Send + Sync {
    /// Short identifier used in log output
    fn name(&self) -> &'static str;

    /// Encode the entire map
    fn encode(&self, entries: &HashMap<K, V>) -> Result<Vec<u8>>;

    /// Decode a complete snapshot
    fn decode(&self, bytes: &[u8]) -> Result<HashMap<K, V>>;
}

impl<K, V, C> Codec<K, V> for Box<C>
where
    C: Codec<K, V> + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn encode(&self, entries: &HashMap<K, V>) -> Result<Vec<u8>> {
        (**self).encode(entries)
    }

    fn decode(&self, bytes: &[u8]) -> Result<HashMap<K, V>> {
        (**self).decode(bytes)
    }
}
