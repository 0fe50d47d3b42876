// Common test utilities for persistmap integration tests

use persistmap::{Codec, JsonCodec, PersistentMap};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture owning a temporary directory and a backing path inside it
pub struct MapTestFixture {
    #[allow(dead_code)]
    pub temp_dir: TempDir,
    pub map_path: PathBuf,
}

impl MapTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let map_path = temp_dir.path().join("map.json");

        Self { temp_dir, map_path }
    }

    /// Open a string map over the fixture path with the JSON codec
    #[allow(dead_code)]
    pub fn open(&self) -> PersistentMap<String, String> {
        PersistentMap::open(&self.map_path, JsonCodec::new()).expect("Failed to open map")
    }

    /// Decode the backing file directly, bypassing any open map
    #[allow(dead_code)]
    pub fn read_file(&self) -> HashMap<String, String> {
        let bytes = fs::read(&self.map_path).expect("Failed to read backing file");
        JsonCodec::new()
            .decode(&bytes)
            .expect("Backing file does not decode")
    }

    /// Names of every file in the fixture directory, sorted
    #[allow(dead_code)]
    pub fn list_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.temp_dir.path())
            .expect("Failed to read temp directory")
            .filter_map(|entry| {
                entry
                    .ok()
                    .and_then(|e| e.file_name().to_str().map(String::from))
            })
            .collect();
        names.sort();
        names
    }
}

impl Default for MapTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for building owned string pairs
#[allow(dead_code)]
pub fn s(value: &str) -> String {
    value.to_string()
}

