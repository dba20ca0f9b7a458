//! Commit relevance detection: classifier, project scanner and run
//! coordinator.

pub mod classify;
pub mod run;
pub mod scan;

pub use classify::{classify, CandidateCommit};
pub use run::{normalize_keywords, run, ScanSettings};
pub use scan::{
    format_commit_date, format_commit_date_in, scan_checkout, scan_project, ScanWindow,
};
