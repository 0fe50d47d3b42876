//! The persistent map.

use crate::config::MapConfig;
use crate::persist;
use parking_lot::RwLock;
use persistmap_codec::Codec;
use persistmap_core::{Error, Result};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// A thread-safe key-value map whose every mutation rewrites a backing file.
///
/// One read-write lock guards the entries, the codec and the file. Readers
/// share the lock; a mutation holds it exclusively while it updates the
/// entries, encodes the whole map and atomically replaces the backing file.
/// When a mutating call returns `Ok`, the file decodes to exactly the map
/// that was in memory when the lock was released.
///
/// Cloning is cheap and yields another handle to the same map, file and
/// lock.
///
/// # Examples
///
/// ```rust,no_run
/// use persistmap::{JsonCodec, PersistentMap};
///
/// let map: PersistentMap<String, String> = PersistentMap::open("./map.json", JsonCodec::new())?;
/// map.set("greeting".to_string(), "hello".to_string())?;
///
/// // Data persists across restarts
/// drop(map);
/// let map: PersistentMap<String, String> = PersistentMap::open("./map.json", JsonCodec::new())?;
/// assert_eq!(map.get("greeting")?, "hello");
/// # Ok::<(), persistmap::Error>(())
/// ```
pub struct PersistentMap<K, V> {
    inner: Arc<MapInner<K, V>>,
}

struct MapInner<K, V> {
    path: PathBuf,
    config: MapConfig,
    state: RwLock<MapState<K, V>>,
}

struct MapState<K, V> {
    entries: HashMap<K, V>,
    codec: Box<dyn Codec<K, V>>,
    // Set when the last persist failed and memory is ahead of disk
    diverged: bool,
}

impl<K, V> Clone for PersistentMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> fmt::Debug for PersistentMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentMap")
            .field("path", &self.inner.path)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl<K, V> PersistentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Opens the map backed by `path` with the default configuration.
    ///
    /// If the file exists its contents are decoded immediately; if it does
    /// not, the map starts empty and no file is written until the first
    /// mutation.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] if `path` is empty
    /// * [`Error::Decode`] if the existing file cannot be decoded
    /// * [`Error::Io`] if the existing file cannot be read
    pub fn open<P, C>(path: P, codec: C) -> Result<Self>
    where
        P: AsRef<Path>,
        C: Codec<K, V> + 'static,
    {
        Self::open_with_config(path, codec, MapConfig::default())
    }

    /// Opens the map backed by `path` with custom configuration.
    pub fn open_with_config<P, C>(path: P, codec: C, config: MapConfig) -> Result<Self>
    where
        P: AsRef<Path>,
        C: Codec<K, V> + 'static,
    {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument(
                "Backing path must not be empty".to_string(),
            ));
        }
        // Rejects paths such as "/" or ".." up front instead of at first write
        persist::temp_prefix(&path)?;

        if config.create_dirs {
            std::fs::create_dir_all(persist::parent_dir(&path))?;
        }

        let entries = match std::fs::read(&path) {
            Ok(bytes) => codec.decode(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(Error::Io(e)),
        };

        debug!(
            path = %path.display(),
            entries = entries.len(),
            codec = codec.name(),
            "opened persistent map"
        );

        Ok(Self {
            inner: Arc::new(MapInner {
                path,
                config,
                state: RwLock::new(MapState {
                    entries,
                    codec: Box::new(codec),
                    diverged: false,
                }),
            }),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Configuration the map was opened with.
    pub fn config(&self) -> &MapConfig {
        &self.inner.config
    }

    /// Name of the codec currently used for snapshots.
    pub fn codec_name(&self) -> &'static str {
        self.inner.state.read().codec.name()
    }

    /// Replaces the codec.
    ///
    /// Takes the exclusive lock, so it never overlaps an encode. The file is
    /// not rewritten; the next mutation (or [`sync`](Self::sync)) writes it
    /// with the new codec.
    pub fn set_codec<C>(&self, codec: C)
    where
        C: Codec<K, V> + 'static,
    {
        let mut state = self.inner.state.write();
        debug!(from = state.codec.name(), to = codec.name(), "codec replaced");
        state.codec = Box::new(codec);
    }

    // ---- reads ----

    /// Returns a copy of the value for `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent. Use
    /// [`try_get`](Self::try_get) when absence is expected.
    pub fn get<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.try_get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a copy of the value for `key`, or `None` if absent.
    pub fn try_get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.state.read().entries.get(key).cloned()
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.state.read().entries.contains_key(key)
    }

    /// Returns `true` if `key` is present and maps to a value equal to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        self.inner
            .state
            .read()
            .entries
            .get(key)
            .is_some_and(|existing| existing == value)
    }

    /// Snapshot of all keys.
    pub fn keys(&self) -> Vec<K> {
        self.inner.state.read().entries.keys().cloned().collect()
    }

    /// Snapshot of all values.
    pub fn values(&self) -> Vec<V> {
        self.inner.state.read().entries.values().cloned().collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.state.read().entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.state.read().entries.is_empty()
    }

    /// Iterates over a snapshot of the entries.
    ///
    /// The snapshot is copied under the read lock before this returns, so
    /// the iterator never observes a concurrent mutation. Call again for a
    /// fresh snapshot.
    pub fn iter(&self) -> std::vec::IntoIter<(K, V)> {
        let snapshot: Vec<(K, V)> = {
            let state = self.inner.state.read();
            state
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        };
        snapshot.into_iter()
    }

    /// Copy of the whole map.
    pub fn snapshot(&self) -> HashMap<K, V> {
        self.inner.state.read().entries.clone()
    }

    /// Returns `true` if the last persist failed, leaving memory ahead of
    /// the backing file. Cleared by the next successful persist.
    pub fn is_diverged(&self) -> bool {
        self.inner.state.read().diverged
    }

    // ---- writes ----

    /// Inserts or overwrites `key`, then persists the map.
    ///
    /// # Errors
    ///
    /// [`Error::Encode`] or [`Error::Io`] if the snapshot could not be
    /// written. The in-memory change is kept either way; see
    /// [`sync`](Self::sync).
    pub fn set(&self, key: K, value: V) -> Result<()> {
        let mut state = self.inner.state.write();
        state.entries.insert(key, value);
        self.persist(&mut state, "set")
    }

    /// Same as [`set`](Self::set): insert or overwrite, no "already exists"
    /// failure.
    pub fn add(&self, key: K, value: V) -> Result<()> {
        self.set(key, value)
    }

    /// Removes `key`. Returns `false` (and writes nothing) if it was absent.
    pub fn remove<Q>(&self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.inner.state.write();
        if state.entries.remove(key).is_none() {
            return Ok(false);
        }
        self.persist(&mut state, "remove")?;
        Ok(true)
    }

    /// Removes `key` only if its current value equals `expected`.
    pub fn remove_if<Q>(&self, key: &Q, expected: &V) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        let mut state = self.inner.state.write();
        match state.entries.get(key) {
            Some(existing) if existing == expected => {}
            _ => return Ok(false),
        }
        state.entries.remove(key);
        self.persist(&mut state, "remove_if")?;
        Ok(true)
    }

    /// Removes every entry and persists an empty snapshot.
    pub fn clear(&self) -> Result<()> {
        let mut state = self.inner.state.write();
        state.entries.clear();
        self.persist(&mut state, "clear")
    }

    /// Rewrites the backing file from the current in-memory state.
    ///
    /// Mutations already persist themselves; this is the retry path after
    /// one of them failed with [`Error::Io`] or [`Error::Encode`].
    pub fn sync(&self) -> Result<()> {
        let mut state = self.inner.state.write();
        self.persist(&mut state, "sync")
    }

    // Runs with the exclusive lock held.
    fn persist(&self, state: &mut MapState<K, V>, op: &'static str) -> Result<()> {
        let started = Instant::now();
        let result = state
            .codec
            .encode(&state.entries)
            .and_then(|bytes| {
                persist::atomic_replace(&self.inner.path, &bytes, self.inner.config.sync_mode)
                    .map(|()| bytes.len())
            });

        match result {
            Ok(bytes) => {
                state.diverged = false;
                debug!(
                    op,
                    path = %self.inner.path.display(),
                    entries = state.entries.len(),
                    bytes,
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "snapshot persisted"
                );
                Ok(())
            }
            Err(e) => {
                state.diverged = true;
                warn!(
                    op,
                    path = %self.inner.path.display(),
                    error = %e,
                    "snapshot not persisted; in-memory map is ahead of the backing file"
                );
                Err(e)
            }
        }
    }
}

impl<K, V> IntoIterator for &PersistentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
