use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Check that `folder` exists and is a directory before any work starts.
pub fn validate_folder(folder: &Path) -> Result<(), String> {
    let metadata = fs::metadata(folder)
        .map_err(|error| format!("folder '{}' is not accessible: {error}", folder.display()))?;
    if !metadata.is_dir() {
        return Err(format!("'{}' is not a directory", folder.display()));
    }
    Ok(())
}

/// Snapshot of the invoice files directly inside `folder`, sorted by name.
///
/// Taken once before renaming so files renamed during the run are never
/// revisited. Subdirectories are not descended into.
pub fn list_invoice_files(folder: &Path, extension: &str) -> Result<Vec<PathBuf>, String> {
    validate_folder(folder)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(folder)
        .map_err(|error| format!("failed reading directory '{}': {error}", folder.display()))?
    {
        let entry = entry.map_err(|error| {
            format!(
                "failed reading directory entry in '{}': {error}",
                folder.display()
            )
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if has_extension(&path, extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Case-insensitive extension comparison; `extension` has no leading dot.
///
/// A dotfile named only `.xml` has no extension and is not an invoice.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|actual| actual.eq_ignore_ascii_case(extension))
}
