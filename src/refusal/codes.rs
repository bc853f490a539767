use serde::Serialize;
use serde_json::Value;

/// Envelope version tag shared by refusals and the describe surface.
pub const REFUSAL_VERSION: &str = "invoice-renamer.v0";

/// Pipeline-level refusal codes; each aborts the run before any rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefusalCode {
    /// Root folder missing, not a directory, or unreadable.
    #[serde(rename = "E_BAD_FOLDER")]
    BadFolder,
    /// Tracked name empty after trimming.
    #[serde(rename = "E_EMPTY_NAME")]
    EmptyName,
    /// Unusable arguments or console input.
    #[serde(rename = "E_BAD_INPUT")]
    BadInput,
}

/// Refusal envelope emitted to stdout on exit 2.
#[derive(Debug, Serialize)]
pub struct RefusalEnvelope {
    pub version: String,
    pub outcome: String,
    pub refusal: RefusalBody,
}

#[derive(Debug, Serialize)]
pub struct RefusalBody {
    pub code: RefusalCode,
    pub message: String,
    pub detail: Value,
    pub next_command: Option<String>,
}

pub fn build_envelope(
    code: RefusalCode,
    message: impl Into<String>,
    detail: Value,
    next_command: Option<String>,
) -> RefusalEnvelope {
    RefusalEnvelope {
        version: REFUSAL_VERSION.to_owned(),
        outcome: "REFUSAL".to_owned(),
        refusal: RefusalBody {
            code,
            message: message.into(),
            detail,
            next_command,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{RefusalCode, build_envelope};
    use serde_json::json;

    #[test]
    fn serializes_envelope_shape() {
        let envelope = build_envelope(
            RefusalCode::BadFolder,
            "Folder cannot be scanned",
            json!({ "folder": "/missing", "error": "not found" }),
            Some("invoice-renamer <FOLDER> --name <NAME>".to_owned()),
        );

        assert_eq!(
            serde_json::to_value(&envelope).expect("serialize envelope"),
            json!({
                "version": "invoice-renamer.v0",
                "outcome": "REFUSAL",
                "refusal": {
                    "code": "E_BAD_FOLDER",
                    "message": "Folder cannot be scanned",
                    "detail": { "folder": "/missing", "error": "not found" },
                    "next_command": "invoice-renamer <FOLDER> --name <NAME>"
                }
            })
        );
    }

    #[test]
    fn serializes_missing_next_command_as_null() {
        let envelope = build_envelope(RefusalCode::EmptyName, "empty", json!({}), None);
        let value = serde_json::to_value(&envelope).expect("serialize envelope");

        assert_eq!(value["refusal"]["code"], "E_EMPTY_NAME");
        assert!(value["refusal"]["next_command"].is_null());
    }
}
