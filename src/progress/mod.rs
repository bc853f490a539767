pub mod reporter;

pub use reporter::{ProgressTracker, report_warning_code};
