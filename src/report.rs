//! Run summary: row counts and written files, as text or JSON.

mod format;
mod types;

pub use format::{format_section_heading, format_summary_text};
pub use types::{PackageSummary, RootSummary, TableCount};
