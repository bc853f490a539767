use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;

const TOOL: &str = "invoice-renamer";

/// Structured progress event emitted to stderr.
#[derive(Debug, Serialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool: String,
    pub processed: u64,
    pub total: Option<u64>,
    pub percent: Option<f64>,
    pub elapsed_ms: u64,
}

/// Structured warning emitted to stderr for skipped or failed files.
#[derive(Debug, Serialize)]
pub struct WarningEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

/// Builds progress events for one run, measuring from construction.
#[derive(Debug)]
pub struct ProgressTracker {
    started: Instant,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        ProgressTracker {
            started: Instant::now(),
        }
    }

    pub fn event(&self, processed: usize, total: usize) -> ProgressEvent {
        progress_event(
            processed,
            total,
            u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
        )
    }

    pub fn report(&self, processed: usize, total: usize) {
        report_progress(&self.event(processed, total));
    }
}

fn progress_event(processed: usize, total: usize, elapsed_ms: u64) -> ProgressEvent {
    let percent = (total > 0).then(|| {
        let ratio = processed as f64 / total as f64;
        (ratio * 1000.0).round() / 10.0
    });
    ProgressEvent {
        event_type: "progress".to_owned(),
        tool: TOOL.to_owned(),
        processed: processed as u64,
        total: Some(total as u64),
        percent,
        elapsed_ms,
    }
}

/// Report progress to stderr as JSONL.
pub fn report_progress(event: &ProgressEvent) {
    let mut stderr = io::stderr().lock();
    let _ = write_event_line(&mut stderr, event);
}

/// Report a warning to stderr as JSONL with an optional warning code.
pub fn report_warning_code(path: &str, code: Option<&str>, message: &str) {
    let mut stderr = io::stderr().lock();
    let _ = write_event_line(&mut stderr, &warning_event(path, code, message));
}

fn warning_event(path: &str, code: Option<&str>, message: &str) -> WarningEvent {
    WarningEvent {
        event_type: "warning".to_owned(),
        tool: TOOL.to_owned(),
        path: path.to_owned(),
        code: code.map(str::to_owned),
        message: message.to_owned(),
    }
}

fn write_event_line<T: Serialize>(out: &mut dyn Write, event: &T) -> Result<(), String> {
    serde_json::to_writer(&mut *out, event)
        .map_err(|error| format!("failed to serialize progress event: {error}"))?;
    out.write_all(b"\n")
        .map_err(|error| format!("failed to write progress event newline: {error}"))?;
    out.flush()
        .map_err(|error| format!("failed to flush progress event output: {error}"))?;
    Ok(())
}
