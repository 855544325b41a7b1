//! Rendering templates with minijinja.
//!
//! The environment's loader answers `<engine>/<kind>.sql.jinja` with the
//! capture document of the matching skeleton, records which skeletons were
//! requested, and rejects template sources that define a block twice.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, Mutex},
};

use jinjasql_core::{normalize_template_path, strip_template_extension};
use jinjasql_manifest::{Mode, PresetMap, SessionOptions};
use minijinja::{AutoEscape, Environment, ErrorKind, Value, context};

use crate::{
    Error, Result,
    catalog::{Catalog, SkeletonKey},
    extract::capture_document,
    placeholder,
    source::TemplateSource,
};

/// Skeleton paths starting with this segment use the configured engine.
pub const ENGINE_ALIAS: &str = "jst";

#[derive(Debug, Default)]
struct LoadLog {
    skeletons: Vec<SkeletonKey>,
    duplicate: Option<(String, String)>,
}

pub(crate) struct RenderRequest<'a> {
    pub template: &'a str,
    pub mode: Mode,
    pub engine: &'a str,
    pub session: SessionOptions,
    pub presets: Option<&'a PresetMap>,
}

pub(crate) struct Rendered {
    pub text: String,
    /// The skeleton the template extends, if any
    pub skeleton: Option<SkeletonKey>,
}

pub(crate) fn render(
    catalog: &Catalog,
    source: Arc<dyn TemplateSource>,
    request: &RenderRequest<'_>,
) -> Result<Rendered> {
    let log = Arc::new(Mutex::new(LoadLog::default()));
    let mut env = environment();
    env.set_loader(loader(catalog, source, request, Arc::clone(&log)));

    let ctx = context! {
        out_format => request.mode.label(),
        engine => request.engine,
        ansi_nulls => request.session.ansi_nulls,
        quoted_id => request.session.quoted_id,
        presets => request.presets,
    };
    let result = env
        .get_template(request.template)
        .and_then(|template| template.render(ctx));

    let log = log
        .lock()
        .map(|mut log| std::mem::take(&mut *log))
        .unwrap_or_default();

    if let Some((template, block)) = log.duplicate {
        return Err(Box::new(Error::DuplicateBlock { block, template }));
    }

    let text = match result {
        Ok(text) => text,
        Err(source) => {
            if let Some(key) = log.skeletons.iter().find(|key| catalog.get(key).is_none()) {
                return Err(Box::new(Error::UnknownSkeleton {
                    engine: key.engine.clone(),
                    kind: key.kind.clone(),
                    mode: key.mode,
                }));
            }
            return Err(Box::new(Error::Render {
                template: request.template.to_string(),
                source,
            }));
        }
    };

    let mut skeleton: Option<SkeletonKey> = None;
    for key in log.skeletons {
        match &skeleton {
            None => skeleton = Some(key),
            Some(first) if *first == key => {}
            Some(first) => {
                return Err(Box::new(Error::ConflictingSkeletons {
                    first: first.clone(),
                    second: key,
                }));
            }
        }
    }

    Ok(Rendered { text, skeleton })
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("columntovalue", column_to_value);
    env
}

fn loader(
    catalog: &Catalog,
    source: Arc<dyn TemplateSource>,
    request: &RenderRequest<'_>,
    log: Arc<Mutex<LoadLog>>,
) -> impl Fn(&str) -> std::result::Result<Option<String>, minijinja::Error> + Send + Sync + 'static
{
    let mode = request.mode;
    let default_engine = request.engine.to_string();
    let engines: BTreeSet<String> = catalog.engines().map(|e| e.name.clone()).collect();
    // Kinds registered in any mode; a kind missing only in this mode is
    // still a skeleton request and reports `UnknownSkeleton`.
    let kinds: BTreeSet<(String, String)> = catalog
        .skeletons()
        .map(|skeleton| (skeleton.key().engine.clone(), skeleton.key().kind.clone()))
        .collect();
    let captures: HashMap<SkeletonKey, String> = catalog
        .skeletons_for(mode)
        .map(|skeleton| (skeleton.key().clone(), capture_document(skeleton)))
        .collect();

    move |name| {
        if mode.uses_skeletons()
            && let Some(target) = skeleton_target(name, &engines, &default_engine)
            && kinds.contains(&target)
        {
            let (engine, kind) = target;
            let key = SkeletonKey::new(engine, kind, mode);
            tracing::debug!(template = name, skeleton = %key, "capturing blocks");
            let capture = captures.get(&key).cloned();
            if let Ok(mut log) = log.lock() {
                log.skeletons.push(key);
            }
            return Ok(capture);
        }

        let text = source.load(name).map_err(|err| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("failed to read template '{name}'"),
            )
            .with_source(err)
        })?;
        if let Some(text) = &text
            && let Some(block) = crate::extract::find_duplicate_block(text)
        {
            if let Ok(mut log) = log.lock() {
                log.duplicate
                    .get_or_insert_with(|| (name.to_string(), block.clone()));
            }
            return Err(minijinja::Error::new(
                ErrorKind::SyntaxError,
                format!("block '{block}' defined twice"),
            ));
        }
        Ok(text)
    }
}

/// Split `<engine>/<kind>.sql.jinja` into engine and kind.
fn skeleton_target(
    name: &str,
    engines: &BTreeSet<String>,
    default_engine: &str,
) -> Option<(String, String)> {
    let name = normalize_template_path(name);
    let (prefix, file) = name.split_once('/')?;
    if file.contains('/') {
        return None;
    }
    let engine = if prefix == ENGINE_ALIAS {
        default_engine
    } else if engines.contains(prefix) {
        prefix
    } else {
        return None;
    };
    let kind = strip_template_extension(file);
    let kind = kind.strip_suffix(".sql").unwrap_or(kind);
    Some((engine.to_string(), kind.to_string()))
}

/// `{{ "@id INT" | columntovalue(presets) }}`
fn column_to_value(
    definition: String,
    presets: Option<Value>,
) -> std::result::Result<String, minijinja::Error> {
    let presets = presets
        .filter(|value| !value.is_none() && !value.is_undefined())
        .map(|value| serde_json::to_value(&value).and_then(serde_json::from_value::<PresetMap>))
        .transpose()
        .map_err(|err| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                "presets must map names to literal values",
            )
            .with_source(err)
        })?;

    placeholder::column_to_value(&definition, presets.as_ref())
        .map_err(|err| minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string()))
}
