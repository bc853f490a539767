pub mod decision;
pub mod encoding;
pub mod extract;
pub mod naming;

pub use decision::{Decision, SkipReason, decide};
pub use encoding::decode_xml;
pub use extract::{InvoiceFields, extract_fields};
pub use naming::{RenameTarget, first_two_words, sanitize_base_name, target_base_name};
use std::fs;
use std::path::{Path, PathBuf};

/// Parties and total read from one invoice description file.
///
/// Built fresh for each file on every run and never persisted. Every
/// extracted attribute is optional; the decision step defines what happens
/// when one is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub source_path: PathBuf,
    /// Same base name as the source with the paired extension. May not exist.
    pub paired_path: PathBuf,
    pub issuer_name: Option<String>,
    pub recipient_name: Option<String>,
    /// Literal attribute text, kept unparsed to preserve its formatting.
    pub total_amount: Option<String>,
}

impl InvoiceRecord {
    /// Read and parse an invoice file, pairing it with `<stem>.<paired_extension>`.
    pub fn open(path: &Path, paired_extension: &str) -> Result<Self, String> {
        let bytes = fs::read(path)
            .map_err(|error| format!("failed to read file '{}': {error}", path.display()))?;
        let text = decode_xml(&bytes)
            .map_err(|error| format!("failed to decode '{}': {error}", path.display()))?;
        let fields = extract_fields(&text)
            .map_err(|error| format!("failed to parse '{}': {error}", path.display()))?;

        Ok(Self::from_fields(path, paired_extension, fields))
    }

    pub fn from_fields(path: &Path, paired_extension: &str, fields: InvoiceFields) -> Self {
        InvoiceRecord {
            source_path: path.to_path_buf(),
            paired_path: path.with_extension(paired_extension),
            issuer_name: fields.issuer_name,
            recipient_name: fields.recipient_name,
            total_amount: fields.total_amount,
        }
    }

    /// True when `tracked_name` is the issuer or the recipient.
    pub fn mentions(&self, tracked_name: &str) -> bool {
        self.issuer_name.as_deref() == Some(tracked_name)
            || self.recipient_name.as_deref() == Some(tracked_name)
    }
}
