use std::path::PathBuf;

use jinjasql_manifest::Mode;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::catalog::SkeletonKey;

/// Result type for transpilation (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("no {mode} skeleton registered for '{engine}/{kind}'")]
    #[diagnostic(
        code(jst::unknown_skeleton),
        help("run `jst catalog` to list the registered skeletons")
    )]
    UnknownSkeleton {
        engine: String,
        kind: String,
        mode: Mode,
    },

    #[error("template composes into both '{first}' and '{second}'")]
    #[diagnostic(
        code(jst::conflicting_skeletons),
        help("a template and the templates it includes may extend a single skeleton")
    )]
    ConflictingSkeletons {
        first: SkeletonKey,
        second: SkeletonKey,
    },

    #[error("unknown engine '{engine}'")]
    #[diagnostic(code(jst::unknown_engine), help("registered engines: {known}"))]
    UnknownEngine { engine: String, known: String },

    #[error("required block '{block}' is missing for skeleton '{skeleton}'")]
    #[diagnostic(
        code(jst::missing_block),
        help("define it with {{% block {block} %}}...{{% endblock %}}")
    )]
    MissingBlock { block: String, skeleton: SkeletonKey },

    #[error("no placeholder rule for type '{data_type}' of '{name}'")]
    #[diagnostic(
        code(jst::unsupported_type),
        help("add a preset for '{name}' to jst.presets.json or give it a default value")
    )]
    UnsupportedType { name: String, data_type: String },

    #[error("block '{block}' is defined more than once in '{template}'")]
    #[diagnostic(code(jst::duplicate_block))]
    DuplicateBlock { block: String, template: String },

    #[error("failed to render '{template}'")]
    #[diagnostic(code(jst::render_error))]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("invalid skeleton '{skeleton}': {message}")]
    #[diagnostic(code(jst::invalid_skeleton))]
    InvalidSkeleton {
        skeleton: SkeletonKey,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(jst::invalid_catalog))]
    InvalidCatalog {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("failed to read catalog '{path}'")]
    #[diagnostic(code(jst::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the error comes from an unregistered (engine, kind, mode)
    /// combination rather than from the template itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownSkeleton { .. }
                | Error::ConflictingSkeletons { .. }
                | Error::UnknownEngine { .. }
        )
    }
}
