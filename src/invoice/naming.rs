use std::path::{Path, PathBuf};

/// Prefix placed before the invoice total in every new file name.
pub const AMOUNT_PREFIX: char = '$';

/// Keep at most the first two whitespace-delimited words of a name.
pub fn first_two_words(name: &str) -> String {
    name.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// Build `$<total>_<first two words of counterparty>`.
pub fn target_base_name(total_amount: &str, counterparty: &str) -> String {
    sanitize_base_name(&format!(
        "{AMOUNT_PREFIX}{total_amount}_{}",
        first_two_words(counterparty)
    ))
}

/// Replace characters that would move the renamed file out of its folder.
pub fn sanitize_base_name(base_name: &str) -> String {
    base_name
        .chars()
        .map(|character| match character {
            '/' | '\\' | '\0' => '-',
            other => other,
        })
        .collect()
}

/// New name for one file: shared base name plus that file's own extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget {
    pub base_name: String,
    pub extension: String,
}

impl RenameTarget {
    pub fn new(base_name: impl Into<String>, extension: impl Into<String>) -> Self {
        RenameTarget {
            base_name: base_name.into(),
            extension: extension.into(),
        }
    }

    /// Target for `path`, keeping its extension exactly as spelled on disk.
    pub fn for_path(base_name: &str, path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|extension| extension.to_string_lossy().into_owned())
            .unwrap_or_default();
        RenameTarget::new(base_name, extension)
    }

    /// File name with an optional `_N` collision suffix.
    pub fn file_name(&self, suffix: Option<u64>) -> String {
        let stem = match suffix {
            Some(count) => format!("{}_{count}", self.base_name),
            None => self.base_name.clone(),
        };
        if self.extension.is_empty() {
            stem
        } else {
            format!("{stem}.{}", self.extension)
        }
    }

    pub fn path_in(&self, dir: &Path, suffix: Option<u64>) -> PathBuf {
        dir.join(self.file_name(suffix))
    }
}
