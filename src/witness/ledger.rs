use crate::witness::record::WitnessRecord;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LEDGER_ENV: &str = "INVOICE_RENAMER_WITNESS";

/// Append a witness record to the ledger file, creating parent folders.
pub fn append(ledger_path: &Path, record: &WitnessRecord) -> Result<(), String> {
    if let Some(parent) = ledger_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|error| {
            format!(
                "failed to create witness directory '{}': {error}",
                parent.display()
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ledger_path)
        .map_err(|error| {
            format!(
                "failed to open witness ledger '{}': {error}",
                ledger_path.display()
            )
        })?;

    let line = record.to_jsonl()?;
    file.write_all(line.as_bytes()).map_err(|error| {
        format!(
            "failed to append witness record to '{}': {error}",
            ledger_path.display()
        )
    })?;
    file.flush().map_err(|error| {
        format!(
            "failed to flush witness ledger '{}': {error}",
            ledger_path.display()
        )
    })
}

/// Ledger path from `$INVOICE_RENAMER_WITNESS`.
///
/// `None` when the variable is unset or blank: the ledger is opt-in, and a
/// default run writes nothing outside the invoice folder.
pub fn ledger_path() -> Option<PathBuf> {
    ledger_path_from_env(|key| std::env::var(key).ok())
}

fn ledger_path_from_env<F>(get_env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(LEDGER_ENV)
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::{append, ledger_path_from_env};
    use crate::witness::record::WitnessRecord;
    use crate::witness::record::tests::sample_draft;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn ledger_path_comes_from_env() {
        let path = ledger_path_from_env(|key| match key {
            "INVOICE_RENAMER_WITNESS" => Some("/tmp/custom-witness.jsonl".to_owned()),
            "HOME" => Some("/tmp/home".to_owned()),
            _ => None,
        });

        assert_eq!(path, Some(PathBuf::from("/tmp/custom-witness.jsonl")));
    }

    #[test]
    fn ledger_is_disabled_without_env_even_with_home() {
        let blank = ledger_path_from_env(|key| match key {
            "INVOICE_RENAMER_WITNESS" => Some("   ".to_owned()),
            "HOME" => Some("/tmp/home".to_owned()),
            _ => None,
        });
        assert_eq!(blank, None);

        let unset = ledger_path_from_env(|key| (key == "HOME").then(|| "/tmp/home".to_owned()));
        assert_eq!(unset, None);
    }

    #[test]
    fn append_creates_parent_dirs_and_writes_jsonl() {
        let tempdir = tempfile::tempdir().expect("create temp dir");
        let ledger = tempdir.path().join("nested").join("witness.jsonl");
        let record = WitnessRecord::new(sample_draft()).expect("build record");

        append(&ledger, &record).expect("append first record");
        append(&ledger, &record).expect("append second record");

        let content = fs::read_to_string(&ledger).expect("read witness ledger");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).expect("parse JSONL line");
            assert_eq!(value["tool"], "invoice-renamer");
        }
    }
}
