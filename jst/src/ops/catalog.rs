//! Catalog operation - list registered skeletons.

use jinjasql_codegen::Catalog;

use crate::reports::{CatalogReport, EngineEntry, SkeletonEntry};

/// Build the catalog listing, engines and skeletons in sorted order.
pub fn catalog(catalog: &Catalog, default_engine: &str) -> CatalogReport {
    let engines = catalog
        .engines()
        .map(|engine| EngineEntry {
            name: engine.name.clone(),
            description: engine.description.clone(),
            session_flags: engine.session.keys().cloned().collect(),
            skeletons: catalog
                .skeletons()
                .filter(|skeleton| skeleton.key().engine == engine.name)
                .map(|skeleton| SkeletonEntry {
                    kind: skeleton.key().kind.clone(),
                    mode: skeleton.key().mode.to_string(),
                    description: skeleton.description().map(str::to_string),
                    required: skeleton.required_blocks().map(str::to_string).collect(),
                    optional: skeleton.optional_blocks().map(str::to_string).collect(),
                })
                .collect(),
        })
        .collect();

    CatalogReport {
        default_engine: default_engine.to_string(),
        engines,
    }
}
