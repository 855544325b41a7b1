//! TOML catalog files.
//!
//! ```toml
//! [engine]
//! name = "mssql"
//! session = { ansi_nulls = "SET ANSI_NULLS ON\nGO\n\n" }
//!
//! [[skeletons]]
//! kind = "view"
//! mode = "create"
//! blocks = { name = { required = true }, logic = { required = true } }
//! document = '''
//! CREATE VIEW {% block name %}{% endblock %}
//! AS
//! {% block logic %}{% endblock %}
//! GO
//! '''
//! ```

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use jinjasql_manifest::Mode;
use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use super::{BlockDecl, Catalog, EngineInfo, Skeleton, SkeletonKey};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    engine: EngineSection,
    #[serde(default)]
    skeletons: Vec<SkeletonSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineSection {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    session: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SkeletonSection {
    kind: String,
    mode: Mode,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    blocks: IndexMap<String, BlockDecl>,
    document: String,
}

/// Catalog source with its name, for error reporting.
struct CatalogSource<'a> {
    src: &'a str,
    filename: &'a str,
}

impl CatalogSource<'_> {
    fn error(&self, message: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::InvalidCatalog {
            src: NamedSource::new(self.filename, self.src.to_string()),
            span,
            message: message.into(),
        })
    }

    /// Span of the `index`-th `[[skeletons]]` header.
    fn skeleton_span(&self, index: usize) -> Option<SourceSpan> {
        const HEADER: &str = "[[skeletons]]";
        self.src
            .match_indices(HEADER)
            .nth(index)
            .map(|(offset, _)| SourceSpan::from((offset, HEADER.len())))
    }
}

pub(super) fn parse_catalog(src: &str, filename: &str) -> Result<Catalog> {
    let source = CatalogSource { src, filename };
    let file: CatalogFile = toml::from_str(src).map_err(|e| {
        let span = e.span().map(SourceSpan::from);
        source.error(e.message().to_string(), span)
    })?;

    let engine = file.engine.name.trim();
    if engine.is_empty() {
        return Err(source.error("engine name cannot be empty", None));
    }

    let mut catalog = Catalog::new();
    catalog.register_engine(EngineInfo {
        name: engine.to_string(),
        description: file.engine.description,
        session: file.engine.session,
    });

    let mut seen = HashSet::new();
    for (index, section) in file.skeletons.into_iter().enumerate() {
        let span = source.skeleton_span(index);
        let key = SkeletonKey::new(engine, section.kind.trim(), section.mode);

        if key.kind.is_empty() {
            return Err(source.error("skeleton kind cannot be empty", span));
        }
        if !seen.insert(key.clone()) {
            return Err(source.error(format!("skeleton '{key}' is declared twice"), span));
        }

        let skeleton = match Skeleton::new(key, section.document, section.blocks) {
            Ok(skeleton) => skeleton,
            Err(err) => {
                return Err(match *err {
                    Error::InvalidSkeleton { skeleton, message } => {
                        source.error(format!("skeleton '{skeleton}': {message}"), span)
                    }
                    other => Box::new(other),
                });
            }
        };
        let skeleton = match section.description {
            Some(description) => skeleton.with_description(description),
            None => skeleton,
        };
        catalog.register(skeleton);
    }

    Ok(catalog)
}
