//! The format catalog: skeletons registered per (engine, kind, mode).

mod load;
mod skeleton;

use std::{collections::BTreeMap, path::Path};

use jinjasql_manifest::{Mode, SessionOptions};
pub use skeleton::{BlockDecl, Placeholders, Segment, Skeleton, SkeletonKey};

use crate::{Error, Result};

const BUILTIN_MSSQL: &str = include_str!("../../catalogs/mssql.toml");

/// An engine known to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineInfo {
    pub name: String,
    pub description: Option<String>,
    /// Session statements keyed by flag name (`ansi_nulls`, `quoted_id`)
    pub session: BTreeMap<String, String>,
}

/// Registry of output skeletons.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    engines: BTreeMap<String, EngineInfo>,
    skeletons: BTreeMap<SkeletonKey, Skeleton>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with jst.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_MSSQL, "<builtin>/mssql.toml")
    }

    /// Parse a catalog file, using `filename` in error reports.
    pub fn from_toml_str(src: &str, filename: &str) -> Result<Self> {
        load::parse_catalog(src, filename)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::from_toml_str(&src, &path.display().to_string())
    }

    /// Built-in catalog overlaid with the given catalog files.
    pub fn with_extensions<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut catalog = Self::builtin()?;
        for path in paths {
            let extension = Self::from_file(path)?;
            tracing::debug!(
                path = %path.as_ref().display(),
                skeletons = extension.skeletons.len(),
                "loaded catalog"
            );
            catalog.extend(extension);
        }
        Ok(catalog)
    }

    /// Register an engine, merging its session statements into an existing entry.
    pub fn register_engine(&mut self, engine: EngineInfo) {
        match self.engines.get_mut(&engine.name) {
            Some(existing) => {
                if engine.description.is_some() {
                    existing.description = engine.description;
                }
                existing.session.extend(engine.session);
            }
            None => {
                self.engines.insert(engine.name.clone(), engine);
            }
        }
    }

    /// Register a skeleton, replacing any skeleton with the same key.
    pub fn register(&mut self, skeleton: Skeleton) {
        let engine = &skeleton.key().engine;
        if !self.engines.contains_key(engine) {
            self.register_engine(EngineInfo {
                name: engine.clone(),
                ..EngineInfo::default()
            });
        }
        self.skeletons.insert(skeleton.key().clone(), skeleton);
    }

    /// Merge `other` into this catalog; its entries win.
    pub fn extend(&mut self, other: Catalog) {
        for engine in other.engines.into_values() {
            self.register_engine(engine);
        }
        for skeleton in other.skeletons.into_values() {
            self.register(skeleton);
        }
    }

    /// Find the skeleton for (engine, kind, mode).
    pub fn lookup(&self, engine: &str, kind: &str, mode: Mode) -> Result<&Skeleton> {
        self.get(&SkeletonKey::new(engine, kind, mode))
            .ok_or_else(|| {
                Box::new(Error::UnknownSkeleton {
                    engine: engine.to_string(),
                    kind: kind.to_string(),
                    mode,
                })
            })
    }

    pub fn get(&self, key: &SkeletonKey) -> Option<&Skeleton> {
        self.skeletons.get(key)
    }

    pub fn engine(&self, name: &str) -> Option<&EngineInfo> {
        self.engines.get(name)
    }

    /// Fail with the list of known engines when `name` is not registered.
    pub fn require_engine(&self, name: &str) -> Result<&EngineInfo> {
        self.engine(name).ok_or_else(|| {
            Box::new(Error::UnknownEngine {
                engine: name.to_string(),
                known: self.engines.keys().cloned().collect::<Vec<_>>().join(", "),
            })
        })
    }

    pub fn engines(&self) -> impl Iterator<Item = &EngineInfo> {
        self.engines.values()
    }

    /// All skeletons, sorted by engine, kind and mode.
    pub fn skeletons(&self) -> impl Iterator<Item = &Skeleton> {
        self.skeletons.values()
    }

    pub fn skeletons_for(&self, mode: Mode) -> impl Iterator<Item = &Skeleton> {
        self.skeletons.values().filter(move |s| s.key().mode == mode)
    }

    /// Session statements for the enabled flags, in flag order.
    ///
    /// Flags the engine has no statement for contribute nothing.
    pub fn preamble(&self, engine: &str, session: &SessionOptions) -> String {
        let Some(info) = self.engine(engine) else {
            return String::new();
        };
        session
            .enabled()
            .into_iter()
            .filter_map(|flag| info.session.get(flag))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn test_builtin_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.engine("mssql").is_some());
        assert!(catalog.skeletons().count() > 10);
    }

    #[test]
    fn test_builtin_table_skeletons() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.lookup("mssql", "table", Mode::Create).is_ok());
        assert!(catalog.lookup("mssql", "table", Mode::Replace).is_ok());

        let err = catalog.lookup("mssql", "table", Mode::Debug).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "no debug skeleton registered for 'mssql/table'"
        );
    }

    #[test]
    fn test_builtin_scalar_function_blocks() {
        let catalog = Catalog::builtin().unwrap();
        let skeleton = catalog
            .lookup("mssql", "scalar_function", Mode::Create)
            .unwrap();

        assert_eq!(
            skeleton.required_blocks().collect::<Vec<_>>(),
            ["name", "data_type", "logic"]
        );
        assert_eq!(skeleton.block("parameters").unwrap().default, "");
    }

    #[test]
    fn test_builtin_debug_skeletons_expand_parameters() {
        let catalog = Catalog::builtin().unwrap();
        for kind in ["procedure", "table_function"] {
            let skeleton = catalog.lookup("mssql", kind, Mode::Debug).unwrap();
            assert!(skeleton.block("parameters").unwrap().placeholders.is_some());
        }
    }

    #[test]
    fn test_preamble_follows_session() {
        let catalog = Catalog::builtin().unwrap();

        let both = catalog.preamble("mssql", &SessionOptions::default());
        assert_eq!(
            both,
            "SET ANSI_NULLS ON\nGO\n\nSET QUOTED_IDENTIFIER ON\nGO\n\n"
        );

        let none = SessionOptions {
            ansi_nulls: false,
            quoted_id: false,
        };
        assert_eq!(catalog.preamble("mssql", &none), "");
        assert_eq!(catalog.preamble("oracle", &SessionOptions::default()), "");
    }

    #[test]
    fn test_extend_overrides() {
        let mut catalog = Catalog::builtin().unwrap();
        let mut blocks = IndexMap::new();
        blocks.insert("logic".to_string(), BlockDecl::required());
        let custom = Skeleton::new(
            SkeletonKey::new("mssql", "view", Mode::Debug),
            "-- view\n{% block logic %}{% endblock %}\n",
            blocks,
        )
        .unwrap();

        let mut other = Catalog::new();
        other.register(custom);
        catalog.extend(other);

        let view = catalog.lookup("mssql", "view", Mode::Debug).unwrap();
        assert!(view.document().starts_with("-- view"));
    }

    #[test]
    fn test_register_adds_engine() {
        let mut catalog = Catalog::new();
        let skeleton = Skeleton::new(
            SkeletonKey::new("sqlite", "view", Mode::Create),
            "",
            IndexMap::new(),
        )
        .unwrap();
        catalog.register(skeleton);

        assert!(catalog.require_engine("sqlite").is_ok());
        let err = catalog.require_engine("pg").unwrap_err();
        assert!(err.is_configuration());
    }
}
