//! File format versions for persistmap.
//!
//! Only the checksummed framing carries a header; plain codecs write bare
//! payloads and have no version of their own.

/// Checksummed snapshot format version
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;

/// Magic numbers for file validation
pub mod magic {
    /// Snapshot magic: "PMAP" read as little-endian bytes
    pub const SNAPSHOT: u32 = 0x5041_4D50;
}

/// Size of the checksummed snapshot header in bytes:
/// magic (4) + version (2) + reserved (2) + payload length (8).
pub const SNAPSHOT_HEADER_LEN: usize = 16;

/// Size of the trailing CRC32 in bytes.
pub const SNAPSHOT_TRAILER_LEN: usize = 4;

/// Version compatibility information
pub struct FormatVersion {
    /// Current version of this format
    pub current: u16,
    /// Minimum supported version for reading
    pub min_read: u16,
}

impl FormatVersion {
    /// Check if a version can be read
    pub fn can_read(&self, version: u16) -> bool {
        version >= self.min_read && version <= self.current
    }
}

/// Snapshot format version info
pub fn snapshot_version() -> FormatVersion {
    FormatVersion {
        current: SNAPSHOT_FORMAT_VERSION,
        min_read: 1,
    }
}
