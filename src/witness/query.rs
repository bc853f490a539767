use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Field filters for `witness query`; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub folder: Option<String>,
    pub outcome: Option<String>,
}

impl QueryFilter {
    pub fn matches(&self, record: &Value) -> bool {
        field_matches(record, "folder", self.folder.as_deref(), false)
            && field_matches(record, "outcome", self.outcome.as_deref(), true)
    }
}

fn field_matches(record: &Value, field: &str, wanted: Option<&str>, ignore_case: bool) -> bool {
    let Some(wanted) = wanted else {
        return true;
    };
    record
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|actual| {
            if ignore_case {
                actual.eq_ignore_ascii_case(wanted)
            } else {
                actual == wanted
            }
        })
}

/// Witness records passing `filter`, oldest first.
pub fn query(ledger_path: &Path, filter: &QueryFilter) -> Result<Vec<Value>, String> {
    Ok(read_records(ledger_path)?
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect())
}

pub fn last(ledger_path: &Path) -> Result<Option<Value>, String> {
    Ok(read_records(ledger_path)?.pop())
}

pub fn count(ledger_path: &Path) -> Result<u64, String> {
    Ok(read_records(ledger_path)?.len() as u64)
}

/// A missing ledger reads as empty; blank lines are ignored.
fn read_records(ledger_path: &Path) -> Result<Vec<Value>, String> {
    let file = match File::open(ledger_path) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => {
            return Err(format!(
                "failed to open witness ledger '{}': {error}",
                ledger_path.display()
            ));
        }
    };

    let mut records = Vec::new();
    for (line_index, line_result) in BufReader::new(file).lines().enumerate() {
        let line_number = line_index + 1;
        let line = line_result.map_err(|error| {
            format!(
                "failed to read witness ledger '{}' at line {line_number}: {error}",
                ledger_path.display()
            )
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str::<Value>(&line).map_err(|error| {
            format!(
                "invalid witness JSON at '{}' line {line_number}: {error}",
                ledger_path.display()
            )
        })?;
        records.push(value);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{QueryFilter, count, last, query};
    use serde_json::json;
    use std::fs;

    fn write_ledger(lines: &[serde_json::Value]) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().expect("create ledger");
        let content: String = lines.iter().map(|line| format!("{line}\n\n")).collect();
        fs::write(file.path(), content).expect("write ledger");
        file
    }

    #[test]
    fn missing_ledger_reads_as_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("absent.jsonl");

        assert_eq!(count(&path).expect("count"), 0);
        assert!(last(&path).expect("last").is_none());
    }

    #[test]
    fn filters_by_folder_and_outcome() {
        let ledger = write_ledger(&[
            json!({ "folder": "/a", "outcome": "CLEAN" }),
            json!({ "folder": "/b", "outcome": "PARTIAL" }),
            json!({ "folder": "/a", "outcome": "PARTIAL" }),
        ]);

        let all = query(ledger.path(), &QueryFilter::default()).expect("query all");
        assert_eq!(all.len(), 3);

        let folder_a = QueryFilter {
            folder: Some("/a".to_owned()),
            outcome: None,
        };
        assert_eq!(query(ledger.path(), &folder_a).expect("query /a").len(), 2);

        let partial_a = QueryFilter {
            folder: Some("/a".to_owned()),
            outcome: Some("partial".to_owned()),
        };
        let records = query(ledger.path(), &partial_a).expect("query partial /a");
        assert_eq!(records, vec![json!({ "folder": "/a", "outcome": "PARTIAL" })]);
    }

    #[test]
    fn last_returns_newest_record() {
        let ledger = write_ledger(&[json!({ "n": 1 }), json!({ "n": 2 })]);
        assert_eq!(last(ledger.path()).expect("last"), Some(json!({ "n": 2 })));
        assert_eq!(count(ledger.path()).expect("count"), 2);
    }

    #[test]
    fn invalid_line_reports_line_number() {
        let file = tempfile::NamedTempFile::new().expect("create ledger");
        fs::write(file.path(), "{\"n\":1}\nnot json\n").expect("write ledger");

        let error = count(file.path()).expect_err("invalid json");
        assert!(error.contains("line 2"));
    }
}
