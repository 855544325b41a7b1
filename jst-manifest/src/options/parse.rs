//! Options parsing and validation.

use std::str::FromStr;

use super::{OPTIONS_FILE, Options};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Options {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_options(s, OPTIONS_FILE)
    }
}

impl Options {
    /// Parse options with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_options(content, filename)
    }

    /// Serialize the options back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|source| Box::new(Error::Serialize { source }))
    }
}

/// Parse options from content with the given filename for error reporting.
pub fn parse_options(content: &str, filename: &str) -> Result<Options> {
    let source_ctx = SourceContext::new(content, filename);
    let options: Options = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_options(&options, &source_ctx)?;
    Ok(options)
}

/// Validate the options after parsing.
fn validate_options(options: &Options, ctx: &SourceContext) -> Result<()> {
    let project = &options.project;

    if project.templates_dir.as_os_str().is_empty() {
        return Err(ctx.validation_error_at_key("templates_dir cannot be empty", "templates_dir"));
    }

    // Project runs clear the output directory before writing to it
    for (key, dir) in [
        ("transpiled_dir", &project.transpiled_dir),
        ("debug_dir", &project.debug_dir),
    ] {
        if dir.as_os_str().is_empty() {
            return Err(ctx.validation_error_at_key(format!("{} cannot be empty", key), key));
        }
        if dir == &project.templates_dir {
            return Err(ctx.validation_error_at_key(
                format!("{} must differ from templates_dir", key),
                key,
            ));
        }
    }

    if project.engine.trim().is_empty() {
        return Err(ctx.validation_error_at_key("engine cannot be empty", "engine"));
    }

    if project.skip_prefixes.iter().any(|p| p.is_empty()) {
        return Err(ctx.validation_error_at_key(
            "skip prefixes cannot be empty (an empty prefix skips every file)",
            "skip_prefixes",
        ));
    }

    Ok(())
}
