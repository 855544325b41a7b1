//! Output modes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The output mode a template is transpiled in.
///
/// `Create`, `Replace` and `Debug` each select their own skeleton family in
/// the format catalog. `None` bypasses the catalog and emits the rendered
/// template unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Object creation scripts
    Create,
    /// Create-or-alter scripts
    Replace,
    /// Interactively runnable scripts with placeholder parameter values
    Debug,
    /// Plain rendering, no skeleton
    None,
}

impl Mode {
    /// All modes, in declaration order.
    pub const ALL: [Mode; 4] = [Mode::Create, Mode::Replace, Mode::Debug, Mode::None];

    /// Returns the mode identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Create => "create",
            Mode::Replace => "replace",
            Mode::Debug => "debug",
            Mode::None => "none",
        }
    }

    /// Capitalized label exposed to templates as `out_format`.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Create => "Create",
            Mode::Replace => "Replace",
            Mode::Debug => "Debug",
            Mode::None => "None",
        }
    }

    /// Whether this mode composes rendered blocks into a skeleton.
    pub fn uses_skeletons(&self) -> bool {
        !matches!(self, Mode::None)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Mode::Create),
            "replace" | "alter" => Ok(Mode::Replace),
            "debug" => Ok(Mode::Debug),
            "none" => Ok(Mode::None),
            _ => Err(format!(
                "unknown mode '{}', expected 'create', 'replace', 'debug' or 'none'",
                s
            )),
        }
    }
}
