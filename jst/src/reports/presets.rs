//! Presets command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data for the presets command.
#[derive(Debug)]
pub struct PresetsReport {
    /// Path of the presets file.
    pub path: PathBuf,
    /// Whether the sample was written (false when a file already existed).
    pub created: bool,
}

impl Report for PresetsReport {
    fn render(&self, out: &mut dyn Output) {
        let path = self.path.display().to_string();
        if self.created {
            out.section("Created");
            out.added_item(&path);
            out.newline();
            out.preformatted(
                "Keys are template paths relative to the templates directory, with forward slashes.",
            );
        } else {
            out.warning(&format!("{} already exists, left unchanged", path));
        }
    }
}
