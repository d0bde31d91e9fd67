//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target or print
//! them as JSON.

mod check;
mod clean;
mod generate;
mod list;
mod output;
mod preset;

pub use check::{CheckReport, ConnectionSummary};
pub use clean::CleanReport;
pub use generate::{GenerateReport, GenerationResult, PreviewEntry, PreviewResult, WrittenResult};
pub use list::{ConnectionInfo, ListReport, TableListing};
pub use output::emit;
pub use preset::{PresetChange, PresetReport};
