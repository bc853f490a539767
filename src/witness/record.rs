use crate::rename::RunCounts;
use blake3::Hasher;
use serde::Serialize;

const TOOL: &str = "invoice-renamer";

/// Summary of one applied run, appended to the witness ledger.
///
/// Records counts only; individual old and new file names are not kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WitnessRecord {
    pub id: String,
    pub tool: String,
    pub version: String,
    pub folder: String,
    pub tracked_name: String,
    pub invoice_extension: String,
    pub paired_extension: String,
    pub counts: RunCounts,
    pub outcome: String,
    pub exit_code: u8,
    pub output_hash: String,
    pub ts: String,
}

/// Inputs for [`WitnessRecord::new`].
#[derive(Debug, Clone)]
pub struct WitnessDraft {
    pub version: String,
    pub folder: String,
    pub tracked_name: String,
    pub invoice_extension: String,
    pub paired_extension: String,
    pub counts: RunCounts,
    pub outcome: String,
    pub exit_code: u8,
    pub output_hash: String,
    pub ts: String,
}

#[derive(Serialize)]
struct WitnessIdPayload<'a> {
    tool: &'a str,
    version: &'a str,
    folder: &'a str,
    tracked_name: &'a str,
    invoice_extension: &'a str,
    paired_extension: &'a str,
    counts: &'a RunCounts,
    outcome: &'a str,
    exit_code: u8,
    output_hash: &'a str,
    ts: &'a str,
}

impl WitnessRecord {
    pub fn new(draft: WitnessDraft) -> Result<Self, String> {
        let payload = WitnessIdPayload {
            tool: TOOL,
            version: &draft.version,
            folder: &draft.folder,
            tracked_name: &draft.tracked_name,
            invoice_extension: &draft.invoice_extension,
            paired_extension: &draft.paired_extension,
            counts: &draft.counts,
            outcome: &draft.outcome,
            exit_code: draft.exit_code,
            output_hash: &draft.output_hash,
            ts: &draft.ts,
        };
        let encoded = serde_json::to_vec(&payload)
            .map_err(|error| format!("failed to encode witness record ID payload: {error}"))?;
        let mut hasher = Hasher::new();
        hasher.update(&encoded);
        let id = format!("blake3:{}", hasher.finalize().to_hex());

        Ok(WitnessRecord {
            id,
            tool: TOOL.to_owned(),
            version: draft.version,
            folder: draft.folder,
            tracked_name: draft.tracked_name,
            invoice_extension: draft.invoice_extension,
            paired_extension: draft.paired_extension,
            counts: draft.counts,
            outcome: draft.outcome,
            exit_code: draft.exit_code,
            output_hash: draft.output_hash,
            ts: draft.ts,
        })
    }

    pub fn to_jsonl(&self) -> Result<String, String> {
        let json = serde_json::to_string(self)
            .map_err(|error| format!("failed to serialize witness record: {error}"))?;
        Ok(format!("{json}\n"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{WitnessDraft, WitnessRecord};
    use crate::rename::RunCounts;

    pub(crate) fn sample_draft() -> WitnessDraft {
        WitnessDraft {
            version: "0.1.0".to_owned(),
            folder: "/data/facturas".to_owned(),
            tracked_name: "ME".to_owned(),
            invoice_extension: "xml".to_owned(),
            paired_extension: "pdf".to_owned(),
            counts: RunCounts {
                scanned: 3,
                renamed: 2,
                paired_renamed: 1,
                not_matched: 1,
                skipped: 0,
                failed: 0,
            },
            outcome: "CLEAN".to_owned(),
            exit_code: 0,
            output_hash: "blake3:output".to_owned(),
            ts: "2026-10-17T10:00:00Z".to_owned(),
        }
    }

    #[test]
    fn builds_record_with_blake3_id() {
        let record = WitnessRecord::new(sample_draft()).expect("build record");
        assert!(record.id.starts_with("blake3:"));
        assert!(record.id.len() > "blake3:".len());
        assert_eq!(record.tool, "invoice-renamer");
    }

    #[test]
    fn id_is_deterministic_and_content_sensitive() {
        let first = WitnessRecord::new(sample_draft()).expect("first");
        let second = WitnessRecord::new(sample_draft()).expect("second");
        assert_eq!(first.id, second.id);

        let mut changed = sample_draft();
        changed.counts.renamed = 1;
        let third = WitnessRecord::new(changed).expect("third");
        assert_ne!(first.id, third.id);
    }

    #[test]
    fn serializes_to_jsonl_with_counts() {
        let line = WitnessRecord::new(sample_draft())
            .expect("build record")
            .to_jsonl()
            .expect("serialize");
        assert!(line.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(line.trim_end()).expect("parse");
        assert_eq!(value["folder"], "/data/facturas");
        assert_eq!(value["tracked_name"], "ME");
        assert_eq!(value["counts"]["renamed"], 2);
        assert_eq!(value["counts"]["paired_renamed"], 1);
        assert_eq!(value["outcome"], "CLEAN");
        assert_eq!(value["exit_code"], 0);
        assert_eq!(value["ts"], "2026-10-17T10:00:00Z");
    }
}
