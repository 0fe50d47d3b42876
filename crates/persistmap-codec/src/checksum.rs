// Checksummed snapshot framing
//
// Layout (little-endian):
// [magic: u32] [version: u16] [reserved: u16] [payload length: u64]
// [payload bytes] [crc32(payload): u32]
//
// The payload is whatever the wrapped codec produces. A file that does not
// start with the magic, declares an unknown version, has the wrong length or
// fails the CRC is rejected as a decode error.

use crate::Codec;
use crc32fast::Hasher;
use persistmap_core::format_version::{
    magic, snapshot_version, SNAPSHOT_FORMAT_VERSION, SNAPSHOT_HEADER_LEN, SNAPSHOT_TRAILER_LEN,
};
use persistmap_core::{Error, Result};
use std::collections::HashMap;

/// Wraps another codec with a versioned header and a CRC32 trailer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checksummed<C> {
    inner: C,
}

impl<C> Checksummed<C> {
    /// Frame the output of `inner`
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The wrapped codec
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn crc(payload: &[u8]) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(payload);
        hasher.finalize()
    }

    fn frame(payload: &[u8]) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(SNAPSHOT_HEADER_LEN + payload.len() + SNAPSHOT_TRAILER_LEN);
        out.extend_from_slice(&magic::SNAPSHOT.to_le_bytes());
        out.extend_from_slice(&SNAPSHOT_FORMAT_VERSION.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(&Self::crc(payload).to_le_bytes());
        out
    }

    fn unframe(bytes: &[u8]) -> Result<&[u8]> {
        if bytes.len() < SNAPSHOT_HEADER_LEN + SNAPSHOT_TRAILER_LEN {
            return Err(Error::Decode(format!(
                "Snapshot too short: {} bytes",
                bytes.len()
            )));
        }

        let found_magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if found_magic != magic::SNAPSHOT {
            return Err(Error::Decode(format!(
                "Bad snapshot magic: {:#010x}",
                found_magic
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if !snapshot_version().can_read(version) {
            return Err(Error::Decode(format!(
                "Unsupported snapshot version: {}",
                version
            )));
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&bytes[8..SNAPSHOT_HEADER_LEN]);
        let declared = u64::from_le_bytes(len_bytes);
        let actual = bytes.len() - SNAPSHOT_HEADER_LEN - SNAPSHOT_TRAILER_LEN;
        if declared != actual as u64 {
            return Err(Error::Decode(format!(
                "Snapshot length mismatch: header says {}, file holds {}",
                declared, actual
            )));
        }

        let payload = &bytes[SNAPSHOT_HEADER_LEN..SNAPSHOT_HEADER_LEN + actual];
        let trailer = &bytes[SNAPSHOT_HEADER_LEN + actual..];
        let stored_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let computed_crc = Self::crc(payload);
        if stored_crc != computed_crc {
            return Err(Error::Decode(format!(
                "Snapshot checksum mismatch: expected {:#010x}, got {:#010x}",
                stored_crc, computed_crc
            )));
        }

        Ok(payload)
    }
}

impl<K, V, C> Codec<K, V> for Checksummed<C>
where
    C: Codec<K, V>,
{
    fn name(&self) -> &'static str {
        "checksummed"
    }

    fn encode(&self, entries: &HashMap<K, V>) -> Result<Vec<u8>> {
        let payload = self.inner.encode(entries)?;
        Ok(Self::frame(&payload))
    }

    fn decode(&self, bytes: &[u8]) -> Result<HashMap<K, V>> {
        let payload = Self::unframe(bytes)?;
        self.inner.decode(payload)
    }
}
