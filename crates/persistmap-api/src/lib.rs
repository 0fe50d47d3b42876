//! # persistmap
//!
//! A thread-safe, in-memory key-value map backed by a single file.
//!
//! Every mutation re-encodes the whole map and atomically replaces the
//! backing file before returning, so the file always holds one complete
//! snapshot and a fresh process picks up exactly what the last successful
//! write left behind.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use persistmap::{JsonCodec, PersistentMap};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let map: PersistentMap<String, u32> = PersistentMap::open("./scores.json", JsonCodec::new())?;
//!
//!     map.set("alice".to_string(), 10)?;
//!     map.set("bob".to_string(), 7)?;
//!
//!     if let Some(score) = map.try_get("alice") {
//!         println!("alice: {}", score);
//!     }
//!
//!     map.remove("bob")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Codecs
//!
//! ```rust,no_run
//! use persistmap::{BincodeCodec, Checksummed, MapConfig, PersistentMap, SyncMode};
//!
//! // Binary snapshots framed with magic, version and CRC32
//! let map: PersistentMap<u64, Vec<u8>> = PersistentMap::open_with_config(
//!     "./blobs.bin",
//!     Checksummed::new(BincodeCodec::new()),
//!     MapConfig::new().with_sync_mode(SyncMode::Data),
//! )?;
//! map.set(1, b"payload".to_vec())?;
//! # Ok::<(), persistmap::Error>(())
//! ```
//!
//! ## Failure model
//!
//! If persisting fails (`Error::Io` or `Error::Encode`) the in-memory change
//! is kept and the file still holds the previous snapshot.
//! [`PersistentMap::is_diverged`] reports this state and
//! [`PersistentMap::sync`] retries the write.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod logging;
pub mod map;
mod persist;

// Re-export core types
pub use persistmap_core::{Error, Result};

// Codecs
pub use persistmap_codec::{BincodeCodec, Checksummed, Codec, JsonCodec};

pub use config::{MapConfig, SyncMode};
pub use map::PersistentMap;

// Version information
/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
