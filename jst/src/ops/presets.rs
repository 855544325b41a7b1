//! Presets operation - create a sample presets file.

use eyre::{Context, Result};
use jinjasql_core::{File, WriteResult};
use jinjasql_manifest::{PresetStore, Project};

use crate::reports::PresetsReport;

/// Write the sample `jst.presets.json`, leaving an existing file untouched.
pub fn presets(project: &Project) -> Result<PresetsReport> {
    let path = project.presets_path();
    let result = File::if_missing(&path, PresetStore::sample().to_json_string())
        .write()
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

    Ok(PresetsReport {
        path,
        created: result == WriteResult::Written,
    })
}
