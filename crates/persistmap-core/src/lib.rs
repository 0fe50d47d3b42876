//! # persistmap Core
//!
//! Error types and on-disk format constants shared by the persistmap crates.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! Users should depend on the main `persistmap` crate instead, which
//! re-exports everything needed from here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod format_version;

pub use error::{Error, Result};
