//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod catalog;
mod options;
mod output;
mod presets;
mod transpile;

pub use catalog::{CatalogReport, EngineEntry, SkeletonEntry};
pub use options::OptionsReport;
pub use output::{Report, TerminalOutput};
pub use presets::PresetsReport;
pub use transpile::{FailedFile, PreviewFile, TranspileReport, TranspiledFile};
