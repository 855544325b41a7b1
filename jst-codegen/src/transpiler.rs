use std::{path::PathBuf, sync::Arc};

use jinjasql_manifest::{Mode, Options, PresetMap, SessionOptions};

use crate::{
    Result,
    catalog::{Catalog, SkeletonKey},
    compose::Compositor,
    extract::extract_blocks,
    render::{RenderRequest, render},
    source::{DirSource, TemplateSource},
};

/// Per-run transpilation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: Mode,
    /// Engine that `jst/...` skeleton paths resolve to
    pub engine: String,
    pub session: SessionOptions,
}

impl Settings {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            engine: "mssql".to_string(),
            session: SessionOptions::default(),
        }
    }

    /// Settings for `mode` taken from a workspace's options.
    pub fn from_options(mode: Mode, options: &Options) -> Self {
        Self {
            mode,
            engine: options.project.engine.clone(),
            session: options.session,
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_session(mut self, session: SessionOptions) -> Self {
        self.session = session;
        self
    }
}

/// Output of a single template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transpiled {
    pub text: String,
    /// The skeleton the output was composed into, if any
    pub skeleton: Option<SkeletonKey>,
}

/// Renders templates and composes them into catalog skeletons.
pub struct Transpiler<'c> {
    catalog: &'c Catalog,
    source: Arc<dyn TemplateSource>,
    settings: Settings,
}

impl<'c> Transpiler<'c> {
    pub fn new(
        catalog: &'c Catalog,
        source: impl TemplateSource + 'static,
        settings: Settings,
    ) -> Self {
        Self {
            catalog,
            source: Arc::new(source),
            settings,
        }
    }

    /// Transpiler reading templates from `templates_dir`.
    pub fn from_dir(
        catalog: &'c Catalog,
        templates_dir: impl Into<PathBuf>,
        settings: Settings,
    ) -> Self {
        Self::new(catalog, DirSource::new(templates_dir), settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Transpile the template at `template_path` (relative to the templates root).
    ///
    /// In `None` mode, or when the template extends no skeleton, the rendered
    /// text is returned unchanged. Otherwise the rendered blocks are composed
    /// into the skeleton and the engine's session preamble is prefixed.
    pub fn transpile(
        &self,
        template_path: &str,
        presets: Option<&PresetMap>,
    ) -> Result<Transpiled> {
        let Settings {
            mode,
            engine,
            session,
        } = &self.settings;
        if mode.uses_skeletons() {
            self.catalog.require_engine(engine)?;
        }

        let rendered = render(
            self.catalog,
            Arc::clone(&self.source),
            &RenderRequest {
                template: template_path,
                mode: *mode,
                engine,
                session: *session,
                presets,
            },
        )?;

        let Some(key) = rendered.skeleton else {
            tracing::debug!(template = template_path, %mode, "no skeleton, keeping rendered text");
            return Ok(Transpiled {
                text: rendered.text,
                skeleton: None,
            });
        };

        let skeleton = self.catalog.lookup(&key.engine, &key.kind, key.mode)?;
        let blocks = extract_blocks(&rendered.text, skeleton);
        tracing::debug!(
            template = template_path,
            skeleton = %key,
            blocks = blocks.len(),
            "composing"
        );

        let body = Compositor::with_presets(presets).compose(&blocks, skeleton)?;
        let mut text = self.catalog.preamble(&key.engine, session);
        text.push_str(&body);

        Ok(Transpiled {
            text,
            skeleton: Some(key),
        })
    }
}

#[cfg(test)]
mod tests {
    use jinjasql_manifest::PresetValue;

    use super::*;
    use crate::{Error, source::MemorySource};

    const VEHICLES: &str = "{% extends \"mssql/table.sql.jinja\" %}\n\
        {% block name %}data_owner.Vehicles{% endblock %}\n\
        {% block columns %}\n    ID INT\n{%- endblock %}\n";

    fn no_session() -> SessionOptions {
        SessionOptions {
            ansi_nulls: false,
            quoted_id: false,
        }
    }

    fn transpile(source: MemorySource, name: &str, settings: Settings) -> Result<Transpiled> {
        let catalog = Catalog::builtin().unwrap();
        Transpiler::new(&catalog, source, settings).transpile(name, None)
    }

    #[test]
    fn test_vehicles_create() {
        let source = MemorySource::new().with("vehicles.sql.jinja", VEHICLES);
        let out = transpile(
            source,
            "vehicles.sql.jinja",
            Settings::new(Mode::Create).with_session(no_session()),
        )
        .unwrap();

        assert_eq!(out.text, "CREATE TABLE data_owner.Vehicles\n(\n    ID INT\n);\nGO\n");
        assert_eq!(
            out.skeleton,
            Some(SkeletonKey::new("mssql", "table", Mode::Create))
        );
    }

    #[test]
    fn test_preamble_prefixed() {
        let source = MemorySource::new().with("vehicles.sql.jinja", VEHICLES);
        let out = transpile(source, "vehicles.sql.jinja", Settings::new(Mode::Create)).unwrap();

        assert!(out.text.starts_with(
            "SET ANSI_NULLS ON\nGO\n\nSET QUOTED_IDENTIFIER ON\nGO\n\nCREATE TABLE data_owner.Vehicles"
        ));
    }

    #[test]
    fn test_alias_uses_configured_engine() {
        let source = MemorySource::new().with(
            "v.sql.jinja",
            "{% extends \"jst/view.sql.jinja\" %}{% block name %}dbo.v{% endblock %}{% block logic %}SELECT 1{% endblock %}",
        );
        let out = transpile(
            source,
            "v.sql.jinja",
            Settings::new(Mode::Replace).with_session(no_session()),
        )
        .unwrap();
        assert_eq!(out.text, "CREATE OR ALTER VIEW dbo.v\nAS\nSELECT 1\nGO\n");
    }

    #[test]
    fn test_engine_folder_partial_is_a_template() {
        let source = MemorySource::new()
            .with("mssql/common_header.sql.jinja", "/* header */")
            .with(
                "v.sql.jinja",
                "{% extends \"mssql/view.sql.jinja\" %}{% block name %}dbo.v{% endblock %}\
                 {% block logic %}{% include \"mssql/common_header.sql.jinja\" %} SELECT 1{% endblock %}",
            );
        let out = transpile(
            source,
            "v.sql.jinja",
            Settings::new(Mode::Create).with_session(no_session()),
        )
        .unwrap();
        assert_eq!(out.text, "CREATE VIEW dbo.v\nAS\n/* header */ SELECT 1\nGO\n");
        assert_eq!(
            out.skeleton,
            Some(SkeletonKey::new("mssql", "view", Mode::Create))
        );
    }

    #[test]
    fn test_none_mode_passes_through() {
        let source = MemorySource::new().with(
            "plain.sql.jinja",
            "SELECT {{ out_format }}, {{ engine }};\n",
        );
        let out = transpile(source, "plain.sql.jinja", Settings::new(Mode::None)).unwrap();
        // the final newline is trimmed like any Jinja render
        assert_eq!(out.text, "SELECT None, mssql;");
        assert_eq!(out.skeleton, None);
    }

    #[test]
    fn test_without_extends_passes_through() {
        let source = MemorySource::new().with("plain.sql.jinja", "SELECT 1;\n");
        let out = transpile(source, "plain.sql.jinja", Settings::new(Mode::Create)).unwrap();
        assert_eq!(out.text, "SELECT 1;");
    }

    #[test]
    fn test_missing_skeleton_is_configuration_error() {
        let source = MemorySource::new().with("vehicles.sql.jinja", VEHICLES);
        let err = transpile(source, "vehicles.sql.jinja", Settings::new(Mode::Debug)).unwrap_err();

        assert!(err.is_configuration());
        assert!(matches!(*err, Error::UnknownSkeleton { ref kind, .. } if kind == "table"));
    }

    #[test]
    fn test_unknown_engine() {
        let source = MemorySource::new().with("vehicles.sql.jinja", VEHICLES);
        let err = transpile(
            source,
            "vehicles.sql.jinja",
            Settings::new(Mode::Create).with_engine("oracle"),
        )
        .unwrap_err();
        assert!(matches!(*err, Error::UnknownEngine { .. }));
    }

    #[test]
    fn test_missing_required_block() {
        let source = MemorySource::new().with(
            "v.sql.jinja",
            "{% extends \"mssql/view.sql.jinja\" %}{% block name %}dbo.v{% endblock %}",
        );
        let err = transpile(source, "v.sql.jinja", Settings::new(Mode::Create)).unwrap_err();
        assert!(matches!(*err, Error::MissingBlock { ref block, .. } if block == "logic"));
    }

    #[test]
    fn test_duplicate_block() {
        let source = MemorySource::new().with(
            "v.sql.jinja",
            "{% extends \"mssql/view.sql.jinja\" %}{% block logic %}1{% endblock %}{% block logic %}2{% endblock %}",
        );
        let err = transpile(source, "v.sql.jinja", Settings::new(Mode::Create)).unwrap_err();
        assert!(matches!(
            *err,
            Error::DuplicateBlock { ref block, ref template } if block == "logic" && template == "v.sql.jinja"
        ));
    }

    #[test]
    fn test_conflicting_skeletons() {
        let source = MemorySource::new()
            .with(
                "v.sql.jinja",
                "{% extends \"mssql/view.sql.jinja\" %}{% block logic %}{% include \"part_t.sql.jinja\" %}{% endblock %}",
            )
            .with(
                "part_t.sql.jinja",
                "{% extends \"mssql/table.sql.jinja\" %}{% block name %}t{% endblock %}",
            );
        let err = transpile(source, "v.sql.jinja", Settings::new(Mode::Create)).unwrap_err();
        assert!(matches!(*err, Error::ConflictingSkeletons { .. }));
    }

    #[test]
    fn test_render_error() {
        let source = MemorySource::new().with("bad.sql.jinja", "{% if %}");
        let err = transpile(source, "bad.sql.jinja", Settings::new(Mode::None)).unwrap_err();
        assert!(matches!(*err, Error::Render { .. }));
    }

    #[test]
    fn test_context_switches_on_mode() {
        let source = MemorySource::new().with(
            "p.sql.jinja",
            "{% extends \"mssql/procedure.sql.jinja\" %}\n\
             {% block name %}dbo.GetVehicle{% endblock %}\n\
             {% block parameters %}@id INT{% endblock %}\n\
             {% block logic %}{% if out_format == \"Debug\" %}-- debug\n{% endif %}SELECT @id;{% endblock %}\n",
        );
        let out = transpile(
            source,
            "p.sql.jinja",
            Settings::new(Mode::Debug).with_session(no_session()),
        )
        .unwrap();
        assert_eq!(out.text, "DECLARE @id INT = 845655;\n\n-- debug\nSELECT @id;\n");
    }

    #[test]
    fn test_presets_reach_debug_declarations() {
        let catalog = Catalog::builtin().unwrap();
        let source = MemorySource::new().with(
            "p.sql.jinja",
            "{% extends \"mssql/procedure.sql.jinja\" %}\
             {% block parameters %}@id INT, @retired BIT{% endblock %}\
             {% block logic %}SELECT @id, @retired;{% endblock %}",
        );
        let presets: PresetMap = [("@retired".to_string(), PresetValue::Null)]
            .into_iter()
            .collect();

        let out = Transpiler::new(
            &catalog,
            source,
            Settings::new(Mode::Debug).with_session(no_session()),
        )
        .transpile("p.sql.jinja", Some(&presets))
        .unwrap();

        assert_eq!(
            out.text,
            "DECLARE @id INT = 845655;\nDECLARE @retired BIT = NULL;\n\nSELECT @id, @retired;\n"
        );
    }

    #[test]
    fn test_super_expands_default() {
        let source = MemorySource::new().with(
            "t.sql.jinja",
            "{% extends \"mssql/trigger.sql.jinja\" %}\
             {% block name %}dbo.trV{% endblock %}\
             {% block table %}dbo.V{% endblock %}\
             {% block events %}{{ super() }}{% endblock %}\
             {% block logic %}RETURN;{% endblock %}",
        );
        let out = transpile(
            source,
            "t.sql.jinja",
            Settings::new(Mode::Create).with_session(no_session()),
        )
        .unwrap();
        assert!(out.text.contains("AFTER INSERT, UPDATE, DELETE\n"));
    }
}
