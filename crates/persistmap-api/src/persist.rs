// Atomic snapshot replacement
//
// A snapshot is written to a temporary file created next to the backing
// file (same directory, hence same filesystem), forced to disk, then renamed
// over the backing path. The backing path therefore always names either the
// previous complete snapshot or the new one.

use crate::config::SyncMode;
use persistmap_core::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix shared by all in-flight snapshot files
pub(crate) const TEMP_SUFFIX: &str = ".tmp";

/// Directory holding `path`; a bare file name lives in the current directory.
pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Prefix of the temporary files created for `path`: `.<file name>.`
pub(crate) fn temp_prefix(path: &Path) -> Result<String> {
    let name = path.file_name().ok_or_else(|| {
        Error::InvalidArgument(format!("Backing path has no file name: {:?}", path))
    })?;
    Ok(format!(".{}.", name.to_string_lossy()))
}

/// Replace the file at `path` with `bytes`, atomically.
///
/// On error the temporary file is removed and `path` is untouched.
pub(crate) fn atomic_replace(path: &Path, bytes: &[u8], sync_mode: SyncMode) -> Result<()> {
    let dir = parent_dir(path);

    let mut tmp: NamedTempFile = tempfile::Builder::new()
        .prefix(&temp_prefix(path)?)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(&dir)?;

    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    // Temp files are created 0600; the replacement keeps the backing file's mode.
    match std::fs::metadata(path) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    // Dropping the error's NamedTempFile deletes the temporary file.
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    if sync_mode == SyncMode::Full {
        sync_dir(&dir)?;
    }

    Ok(())
}

/// Make a rename inside `dir` durable.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    std::fs::File::open(dir)?.sync_all()?;
    Ok(())
}

// Directory handles cannot be fsynced portably elsewhere; the rename is
// still atomic, only its durability across power loss is weaker.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}
