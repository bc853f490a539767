use crate::invoice::RenameTarget;
use std::fs;
use std::path::{Path, PathBuf};

/// True when anything, including a dangling symlink, occupies `path`.
pub fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// First free path for `base_name.extension` inside `dir`.
///
/// Tries the bare name, then `_1`, `_2`, ... and restarts from `_1` on every
/// call. The check and the later rename are not atomic.
pub fn find_unique_name(dir: &Path, base_name: &str, extension: &str) -> PathBuf {
    find_unique_name_with(dir, &RenameTarget::new(base_name, extension), is_occupied)
}

/// Same probe as [`find_unique_name`] with a caller-supplied occupancy check.
pub fn find_unique_name_with<F>(dir: &Path, target: &RenameTarget, is_taken: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    let candidate = target.path_in(dir, None);
    if !is_taken(&candidate) {
        return candidate;
    }

    let mut count = 1u64;
    loop {
        let candidate = target.path_in(dir, Some(count));
        if !is_taken(&candidate) {
            return candidate;
        }
        count += 1;
    }
}
