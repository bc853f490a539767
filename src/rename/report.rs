use crate::cli::exit::Outcome;
use crate::invoice::SkipReason;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Per-file warning codes, also used on stderr warning events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningCode {
    /// Invoice file unreadable or not well-formed XML.
    #[serde(rename = "W_PARSE_ERROR")]
    ParseError,
    /// Tracked name matched but the other party has no name.
    #[serde(rename = "W_NO_COUNTERPARTY")]
    NoCounterparty,
    /// Tracked name matched but the voucher has no total.
    #[serde(rename = "W_MISSING_TOTAL")]
    MissingTotal,
    #[serde(rename = "W_RENAME_FAILED")]
    RenameFailed,
    #[serde(rename = "W_PAIRED_RENAME_FAILED")]
    PairedRenameFailed,
    /// Tracked name never matched across the whole folder.
    #[serde(rename = "W_NO_MATCH")]
    NoMatch,
}

impl WarningCode {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningCode::ParseError => "W_PARSE_ERROR",
            WarningCode::NoCounterparty => "W_NO_COUNTERPARTY",
            WarningCode::MissingTotal => "W_MISSING_TOTAL",
            WarningCode::RenameFailed => "W_RENAME_FAILED",
            WarningCode::PairedRenameFailed => "W_PAIRED_RENAME_FAILED",
            WarningCode::NoMatch => "W_NO_MATCH",
        }
    }
}

impl From<SkipReason> for WarningCode {
    fn from(reason: SkipReason) -> Self {
        match reason {
            SkipReason::NoCounterpartyName => WarningCode::NoCounterparty,
            SkipReason::MissingTotal => WarningCode::MissingTotal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Renamed,
    /// Dry run: the rename was computed but not applied.
    Planned,
    NotMatched,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairedStatus {
    Renamed,
    Planned,
    Missing,
    Failed,
}

/// Outcome for the paired rendered file of a renamed invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairedReport {
    pub status: PairedStatus,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One JSONL output record per discovered invoice file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    /// Tracked name found as issuer or recipient.
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired: Option<PairedReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<WarningCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileReport {
    fn new(path: &Path, status: FileStatus, matched: bool) -> Self {
        FileReport {
            path: path.display().to_string(),
            status,
            matched,
            counterparty: None,
            target: None,
            paired: None,
            code: None,
            message: None,
        }
    }

    pub fn not_matched(path: &Path, tracked_name: &str) -> Self {
        let mut report = FileReport::new(path, FileStatus::NotMatched, false);
        report.message = Some(format!("'{tracked_name}' not found in this file"));
        report
    }

    pub fn parse_failed(path: &Path, error: String) -> Self {
        let mut report = FileReport::new(path, FileStatus::Failed, false);
        report.code = Some(WarningCode::ParseError);
        report.message = Some(error);
        report
    }

    pub fn skipped(path: &Path, reason: SkipReason) -> Self {
        let mut report = FileReport::new(path, FileStatus::Skipped, true);
        report.code = Some(reason.into());
        report.message = Some(match reason {
            SkipReason::NoCounterpartyName => "no usable counterparty 'Nombre' in this file".to_owned(),
            SkipReason::MissingTotal => "no usable 'Total' on the voucher element".to_owned(),
        });
        report
    }

    pub fn rename_failed(path: &Path, counterparty: String, error: String) -> Self {
        let mut report = FileReport::new(path, FileStatus::Failed, true);
        report.counterparty = Some(counterparty);
        report.code = Some(WarningCode::RenameFailed);
        report.message = Some(error);
        report
    }

    pub fn renamed(
        path: &Path,
        target: &Path,
        counterparty: String,
        paired: PairedReport,
        dry_run: bool,
    ) -> Self {
        let status = if dry_run {
            FileStatus::Planned
        } else {
            FileStatus::Renamed
        };
        let mut report = FileReport::new(path, status, true);
        report.counterparty = Some(counterparty);
        report.target = Some(target.display().to_string());
        if paired.status == PairedStatus::Failed {
            report.code = Some(WarningCode::PairedRenameFailed);
            report.message.clone_from(&paired.message);
        }
        report.paired = Some(paired);
        report
    }

    /// Warnings are reported on stderr and make the run partial.
    pub fn is_warning(&self) -> bool {
        self.code.is_some()
    }
}

impl PairedReport {
    pub fn missing(path: &Path) -> Self {
        PairedReport {
            status: PairedStatus::Missing,
            path: path.display().to_string(),
            target: None,
            message: Some("no paired file found".to_owned()),
        }
    }

    pub fn moved(path: &Path, target: &Path, dry_run: bool) -> Self {
        PairedReport {
            status: if dry_run {
                PairedStatus::Planned
            } else {
                PairedStatus::Renamed
            },
            path: path.display().to_string(),
            target: Some(target.display().to_string()),
            message: None,
        }
    }

    pub fn failed(path: &Path, error: String) -> Self {
        PairedReport {
            status: PairedStatus::Failed,
            path: path.display().to_string(),
            target: None,
            message: Some(error),
        }
    }
}

/// Per-status totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub scanned: u64,
    pub renamed: u64,
    pub paired_renamed: u64,
    pub not_matched: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Everything one pass over a folder produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub folder: PathBuf,
    pub tracked_name: String,
    pub dry_run: bool,
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    /// True when the tracked name appeared in at least one file.
    pub fn matched_any(&self) -> bool {
        self.reports.iter().any(|report| report.matched)
    }

    pub fn counts(&self) -> RunCounts {
        let mut counts = RunCounts::default();
        for report in &self.reports {
            counts.scanned += 1;
            match report.status {
                FileStatus::Renamed | FileStatus::Planned => counts.renamed += 1,
                FileStatus::NotMatched => counts.not_matched += 1,
                FileStatus::Skipped => counts.skipped += 1,
                FileStatus::Failed => counts.failed += 1,
            }
            if report.paired.as_ref().is_some_and(|paired| {
                matches!(paired.status, PairedStatus::Renamed | PairedStatus::Planned)
            }) {
                counts.paired_renamed += 1;
            }
        }
        counts
    }

    pub fn outcome(&self) -> Outcome {
        if !self.matched_any() || self.reports.iter().any(FileReport::is_warning) {
            Outcome::Partial
        } else {
            Outcome::Clean
        }
    }
}
