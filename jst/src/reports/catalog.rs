//! Catalog command report data structures.

use super::output::{Output, Report};

/// Report data listing the format catalog.
#[derive(Debug)]
pub struct CatalogReport {
    /// Engine `jst/...` paths resolve to.
    pub default_engine: String,
    pub engines: Vec<EngineEntry>,
}

/// An engine and its skeletons.
#[derive(Debug)]
pub struct EngineEntry {
    pub name: String,
    pub description: Option<String>,
    /// Session flags the engine has statements for.
    pub session_flags: Vec<String>,
    pub skeletons: Vec<SkeletonEntry>,
}

/// A skeleton with its block signature.
#[derive(Debug)]
pub struct SkeletonEntry {
    pub kind: String,
    pub mode: String,
    pub description: Option<String>,
    /// Required blocks.
    pub required: Vec<String>,
    /// Optional blocks.
    pub optional: Vec<String>,
}

impl SkeletonEntry {
    /// `<required> [optional]` block list.
    pub fn signature(&self) -> String {
        self.required
            .iter()
            .map(|name| format!("<{}>", name))
            .chain(self.optional.iter().map(|name| format!("[{}]", name)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Report for CatalogReport {
    fn render(&self, out: &mut dyn Output) {
        for (index, engine) in self.engines.iter().enumerate() {
            if index > 0 {
                out.newline();
            }

            let heading = if engine.name == self.default_engine {
                format!("{} (default, jst/)", engine.name)
            } else {
                engine.name.clone()
            };
            out.section(&heading);
            if let Some(description) = &engine.description {
                out.key_value_indented("description", description);
            }
            if !engine.session_flags.is_empty() {
                out.key_value_indented("session", &engine.session_flags.join(", "));
            }

            for skeleton in &engine.skeletons {
                let mut line = format!(
                    "{}/{}.sql.jinja ({}) {}",
                    engine.name,
                    skeleton.kind,
                    skeleton.mode,
                    skeleton.signature()
                );
                if let Some(description) = &skeleton.description {
                    line.push_str(&format!(" - {}", description));
                }
                out.list_item(&line);
            }
        }

        if !self
            .engines
            .iter()
            .any(|engine| engine.name == self.default_engine)
        {
            out.warning(&format!(
                "default engine '{}' has no skeletons",
                self.default_engine
            ));
        }
    }
}
