use crate::invoice::{Decision, InvoiceRecord, RenameTarget, decide};
use crate::rename::report::{BatchSummary, FileReport, PairedReport};
use crate::rename::scan::list_invoice_files;
use crate::rename::unique::{find_unique_name_with, is_occupied};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions and mode for one renaming pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOptions {
    /// Extension identifying invoice description files, without the dot.
    pub invoice_extension: String,
    /// Extension of the rendered file sharing the invoice's base name.
    pub paired_extension: String,
    pub dry_run: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        RenameOptions {
            invoice_extension: "xml".to_owned(),
            paired_extension: "pdf".to_owned(),
            dry_run: false,
        }
    }
}

/// Rename every invoice in `folder` that names `tracked_name`.
///
/// Fails only when `folder` itself cannot be listed. Every per-file problem
/// lands in the returned summary and the pass carries on.
pub fn rename_all(
    folder: &Path,
    tracked_name: &str,
    options: &RenameOptions,
) -> Result<BatchSummary, String> {
    rename_all_with(folder, tracked_name, options, |_, _, _| {})
}

/// [`rename_all`] with a callback run after each file as
/// `(report, processed, total)`.
pub fn rename_all_with<F>(
    folder: &Path,
    tracked_name: &str,
    options: &RenameOptions,
    mut on_file: F,
) -> Result<BatchSummary, String>
where
    F: FnMut(&FileReport, usize, usize),
{
    let files = list_invoice_files(folder, &options.invoice_extension)?;
    let total = files.len();
    let mut renamer = FolderRenamer::new(folder, options.dry_run);
    let mut reports = Vec::with_capacity(total);

    for (index, path) in files.iter().enumerate() {
        let report = process_file(&mut renamer, path, tracked_name, options);
        on_file(&report, index + 1, total);
        reports.push(report);
    }

    Ok(BatchSummary {
        folder: folder.to_path_buf(),
        tracked_name: tracked_name.to_owned(),
        dry_run: options.dry_run,
        reports,
    })
}

fn process_file(
    renamer: &mut FolderRenamer<'_>,
    path: &Path,
    tracked_name: &str,
    options: &RenameOptions,
) -> FileReport {
    let record = match InvoiceRecord::open(path, &options.paired_extension) {
        Ok(record) => record,
        Err(error) => return FileReport::parse_failed(path, error),
    };

    let (counterparty, base_name) = match decide(&record, tracked_name) {
        Decision::NotMatched => return FileReport::not_matched(path, tracked_name),
        Decision::Skip(reason) => return FileReport::skipped(path, reason),
        Decision::Rename {
            counterparty,
            base_name,
        } => (counterparty, base_name),
    };

    let target = renamer.unique_target(&RenameTarget::for_path(&base_name, path));
    if let Err(error) = renamer.rename(path, &target) {
        return FileReport::rename_failed(path, counterparty, error);
    }

    let paired = rename_paired(renamer, &record.paired_path, &base_name);
    FileReport::renamed(path, &target, counterparty, paired, renamer.dry_run)
}

fn rename_paired(renamer: &mut FolderRenamer<'_>, paired: &Path, base_name: &str) -> PairedReport {
    if !renamer.holds_file(paired) {
        return PairedReport::missing(paired);
    }

    let target = renamer.unique_target(&RenameTarget::for_path(base_name, paired));
    match renamer.rename(paired, &target) {
        Ok(()) => PairedReport::moved(paired, &target, renamer.dry_run),
        Err(error) => PairedReport::failed(paired, error),
    }
}

/// Applies renames inside one folder, or simulates them on a dry run.
///
/// A dry run records planned targets and vacated sources so later collision
/// probes see the folder as it would look after the earlier renames.
struct FolderRenamer<'a> {
    folder: &'a Path,
    dry_run: bool,
    planned: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl<'a> FolderRenamer<'a> {
    fn new(folder: &'a Path, dry_run: bool) -> Self {
        FolderRenamer {
            folder,
            dry_run,
            planned: HashSet::new(),
            vacated: HashSet::new(),
        }
    }

    fn is_taken(&self, path: &Path) -> bool {
        self.planned.contains(path) || (!self.vacated.contains(path) && is_occupied(path))
    }

    fn holds_file(&self, path: &Path) -> bool {
        if self.planned.contains(path) {
            return true;
        }
        !self.vacated.contains(path) && path.is_file()
    }

    fn unique_target(&self, target: &RenameTarget) -> PathBuf {
        find_unique_name_with(self.folder, target, |candidate| self.is_taken(candidate))
    }

    fn rename(&mut self, from: &Path, to: &Path) -> Result<(), String> {
        if !self.dry_run {
            fs::rename(from, to).map_err(|error| {
                format!(
                    "failed to rename '{}' to '{}': {error}",
                    from.display(),
                    to.display()
                )
            })?;
        }
        self.vacated.insert(from.to_path_buf());
        self.vacated.remove(to);
        self.planned.insert(to.to_path_buf());
        self.planned.remove(from);
        Ok(())
    }
}
