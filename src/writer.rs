// Output Writer
//
// Writes emitted units to disk. Writers of the same file are serialized through a
// process-wide lock table keyed on the canonical path, so `out/f.py` and
// `out/sub/../f.py` share one lock. Content is hashed first so an unchanged unit is
// never rewritten, and new content lands through a temporary sibling plus rename.

use crate::error::{ExtractError, Result};
use crate::utils::paths::temp_sibling;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-path write locks (canonical path -> mutex); idle entries are removed
type LockTable = DashMap<PathBuf, Arc<Mutex<()>>>;

static PATH_LOCKS: Lazy<LockTable> = Lazy::new(DashMap::new);

/// What a write did to the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Target already held byte-identical content
    Unchanged,
}

fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    PATH_LOCKS
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Drop the table entry once no other writer holds or waits on it
fn release_lock(path: &Path, lock: Arc<Mutex<()>>) {
    drop(lock);
    PATH_LOCKS.remove_if(path, |_, entry| Arc::strong_count(entry) == 1);
}

/// Create the parent directory and resolve it to its canonical form
fn resolve_target(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        ExtractError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "output path has no file name"),
        )
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|e| ExtractError::io(parent, e))?;
    let parent = fs::canonicalize(parent).map_err(|e| ExtractError::io(parent, e))?;
    Ok(parent.join(file_name))
}

/// Write `content` to `path`, creating parent directories as needed
pub fn write_output(path: &Path, content: &str, skip_unchanged: bool) -> Result<WriteOutcome> {
    let target = resolve_target(path)?;

    let lock = lock_for(&target);
    let outcome = {
        let _guard = lock.lock();
        write_locked(&target, content, skip_unchanged)
    };
    release_lock(&target, lock);
    outcome
}

fn write_locked(path: &Path, content: &str, skip_unchanged: bool) -> Result<WriteOutcome> {
    if skip_unchanged {
        if let Ok(existing) = fs::read(path) {
            if blake3::hash(&existing) == blake3::hash(content.as_bytes()) {
                debug!("Output unchanged, skipping write: {:?}", path);
                return Ok(WriteOutcome::Unchanged);
            }
        }
    }

    let temp = temp_sibling(path);
    fs::write(&temp, content).map_err(|e| ExtractError::io(&temp, e))?;
    if let Err(e) = fs::rename(&temp, path) {
        if let Err(cleanup) = fs::remove_file(&temp) {
            warn!("Failed to remove temporary file {:?}: {}", temp, cleanup);
        }
        return Err(ExtractError::io(path, e));
    }

    Ok(WriteOutcome::Written)
}
