pub mod batch;
pub mod report;
pub mod scan;
pub mod unique;

pub use batch::{RenameOptions, rename_all, rename_all_with};
pub use report::{
    BatchSummary, FileReport, FileStatus, PairedReport, PairedStatus, RunCounts, WarningCode,
};
pub use unique::find_unique_name;
