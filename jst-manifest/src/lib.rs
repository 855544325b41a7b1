//! Options, presets and project layout for the jinjasql transpiler.
//!
//! - [`Options`] is the parsed `jst.toml` file (or its defaults).
//! - [`Mode`] selects the output skeleton family.
//! - [`PresetStore`] holds the debug placeholder overrides from `jst.presets.json`.
//! - [`Project`] resolves directories, discovers templates and derives output paths.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod mode;
mod options;
mod presets;
mod project;

pub use error::{Error, Result, SourceContext};
pub use mode::Mode;
pub use options::{JstToml, OPTIONS_FILE, Options, ProjectOptions, SessionOptions};
pub use presets::{PRESETS_FILE, PresetMap, PresetStore, PresetValue};
pub use project::Project;
