// Output Path Conventions
//
// One emitted unit per entry: `<output_dir>/<entry>.<extension>`. Writes go through
// a hidden temporary sibling that is renamed over the target.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Output file for an entry function
///
/// # Examples
/// ```
/// use faas_extract::utils::paths::output_path;
/// use std::path::Path;
///
/// let path = output_path(Path::new("build"), "read_item", "py");
/// assert_eq!(path, Path::new("build/read_item.py"));
/// ```
pub fn output_path(output_dir: &Path, entry: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", entry, extension))
}

/// Temporary sibling used for an atomic write of `target`
///
/// Lives in the same directory so the final rename never crosses filesystems.
/// The process id and a per-call counter make every temporary name unique.
pub fn temp_sibling(target: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    target.with_file_name(format!(
        ".{}.{}.{}.tmp",
        file_name,
        std::process::id(),
        counter
    ))
}
