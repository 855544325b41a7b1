//! Options command report data structures.

use std::path::PathBuf;

use jinjasql_manifest::Options;

use super::output::{Output, Report};

/// Report data for the options command.
#[derive(Debug)]
pub struct OptionsReport {
    /// Path of jst.toml.
    pub path: PathBuf,
    /// Whether the file was written by this run.
    pub saved: bool,
    /// Whether the file exists on disk.
    pub exists: bool,
    /// The effective options.
    pub options: Options,
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

impl Report for OptionsReport {
    fn render(&self, out: &mut dyn Output) {
        let path = self.path.display().to_string();
        if self.saved {
            out.key_value("Saved", &path);
        } else if self.exists {
            out.key_value("Options", &path);
        } else {
            out.key_value("Options", &format!("{} (not created yet, using defaults)", path));
        }
        out.newline();

        let project = &self.options.project;
        out.section("project");
        out.key_value_indented("templates_dir", &project.templates_dir.display().to_string());
        out.key_value_indented("transpiled_dir", &project.transpiled_dir.display().to_string());
        out.key_value_indented("debug_dir", &project.debug_dir.display().to_string());
        out.key_value_indented("engine", &project.engine);
        out.key_value_indented("skip_prefixes", &project.skip_prefixes.join(", "));
        if !project.catalogs.is_empty() {
            let catalogs: Vec<String> = project
                .catalogs
                .iter()
                .map(|path| path.display().to_string())
                .collect();
            out.key_value_indented("catalogs", &catalogs.join(", "));
        }

        out.section("session");
        out.key_value_indented("ansi_nulls", on_off(self.options.session.ansi_nulls));
        out.key_value_indented("quoted_id", on_off(self.options.session.quoted_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_render_defaults() {
        let report = OptionsReport {
            path: PathBuf::from("jst.toml"),
            saved: false,
            exists: false,
            options: Options::default(),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "Options: jst.toml (not created yet, using defaults)",
                "",
                "project:",
                "  templates_dir: templates",
                "  transpiled_dir: transpiled",
                "  debug_dir: debug",
                "  engine: mssql",
                "  skip_prefixes: ext, part",
                "session:",
                "  ansi_nulls: on",
                "  quoted_id: on",
            ]
        );
    }
}
