//! Skeleton documents and their block declarations.

use std::{fmt, sync::LazyLock};

use indexmap::IndexMap;
use jinjasql_manifest::Mode;
use regex::Regex;
use serde::Deserialize;

use crate::{Error, Result, placeholder::ParamDef};

/// `{% block name %}...{% endblock %}`; whitespace control is matched so it can be rejected.
static BLOCK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)\{%[-+]?\s*block\s+([A-Za-z_][A-Za-z0-9_]*)\s*[-+]?%\}(.*?)\{%[-+]?\s*endblock(?:\s+[A-Za-z_][A-Za-z0-9_]*)?\s*[-+]?%\}",
    )
    .expect("block marker pattern is valid")
});

/// Identifies a skeleton in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkeletonKey {
    pub engine: String,
    pub kind: String,
    pub mode: Mode,
}

impl SkeletonKey {
    pub fn new(engine: impl Into<String>, kind: impl Into<String>, mode: Mode) -> Self {
        Self {
            engine: engine.into(),
            kind: kind.into(),
            mode,
        }
    }
}

impl fmt::Display for SkeletonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.engine, self.kind, self.mode)
    }
}

/// How a block participates in composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockDecl {
    /// Composition fails when a required block is not supplied
    #[serde(default)]
    pub required: bool,

    /// Text used when an optional block is not supplied
    #[serde(default)]
    pub default: String,

    /// Expand the supplied text parameter by parameter
    #[serde(default)]
    pub placeholders: Option<Placeholders>,
}

impl BlockDecl {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn optional(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            ..Self::default()
        }
    }

    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = Some(placeholders);
        self
    }
}

/// Per-parameter expansion of a block, used by debug skeletons to turn a
/// parameter list into variable declarations.
///
/// `each` may reference `{name}`, `{type}`, `{definition}` and `{value}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placeholders {
    pub each: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    "\n".to_string()
}

impl Placeholders {
    pub fn new(each: impl Into<String>) -> Self {
        Self {
            each: each.into(),
            separator: default_separator(),
        }
    }

    /// Format one parameter with its resolved value.
    pub fn format(&self, param: &ParamDef, value: &str) -> String {
        self.each
            .replace("{name}", &param.name)
            .replace("{type}", &param.data_type)
            .replace("{definition}", &param.definition())
            .replace("{value}", value)
    }
}

/// A piece of a parsed skeleton document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Block(String),
}

/// An output document with named insertion points.
#[derive(Debug, Clone)]
pub struct Skeleton {
    key: SkeletonKey,
    description: Option<String>,
    blocks: IndexMap<String, BlockDecl>,
    document: String,
    segments: Vec<Segment>,
}

impl Skeleton {
    /// Parse and validate a skeleton document.
    ///
    /// Markers in the document must be empty and every marker must be
    /// declared in `blocks`. Required blocks cannot carry a default.
    pub fn new(
        key: SkeletonKey,
        document: impl Into<String>,
        blocks: IndexMap<String, BlockDecl>,
    ) -> Result<Self> {
        let document = document.into();
        let invalid = |message: String| {
            Box::new(Error::InvalidSkeleton {
                skeleton: key.clone(),
                message,
            })
        };

        if !key.mode.uses_skeletons() {
            return Err(invalid(format!(
                "mode '{}' does not use skeletons",
                key.mode
            )));
        }

        let segments = parse_document(&document).map_err(invalid)?;
        for segment in &segments {
            if let Segment::Block(name) = segment
                && !blocks.contains_key(name)
            {
                return Err(invalid(format!("block '{name}' is not declared")));
            }
        }
        for (name, decl) in &blocks {
            if decl.required && !decl.default.is_empty() {
                return Err(invalid(format!(
                    "required block '{name}' cannot have a default"
                )));
            }
        }

        Ok(Self {
            key,
            description: None,
            blocks,
            document,
            segments,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn key(&self) -> &SkeletonKey {
        &self.key
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared blocks, in declaration order.
    pub fn blocks(&self) -> &IndexMap<String, BlockDecl> {
        &self.blocks
    }

    pub fn block(&self, name: &str) -> Option<&BlockDecl> {
        self.blocks.get(name)
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn required_blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(|(_, decl)| decl.required)
            .map(|(name, _)| name.as_str())
    }

    pub fn optional_blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(|(_, decl)| !decl.required)
            .map(|(name, _)| name.as_str())
    }
}

/// Split a skeleton document into literal text and block markers.
fn parse_document(document: &str) -> std::result::Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    let mut last = 0;

    for captures in BLOCK_MARKER.captures_iter(document) {
        let (Some(whole), Some(name), Some(body)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };
        if !body.as_str().trim().is_empty() {
            return Err(format!(
                "marker for block '{}' must be empty, declare its default instead",
                name.as_str()
            ));
        }
        if whole.as_str().contains(['-', '+']) {
            return Err(format!(
                "marker for block '{}' cannot use whitespace control, put the whitespace in the document instead",
                name.as_str()
            ));
        }
        if whole.start() > last {
            segments.push(Segment::Literal(document[last..whole.start()].to_string()));
        }
        segments.push(Segment::Block(name.as_str().to_string()));
        last = whole.end();
    }
    if last < document.len() {
        segments.push(Segment::Literal(document[last..].to_string()));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SkeletonKey {
        SkeletonKey::new("mssql", "view", Mode::Create)
    }

    fn blocks(decls: &[(&str, BlockDecl)]) -> IndexMap<String, BlockDecl> {
        decls
            .iter()
            .map(|(name, decl)| (name.to_string(), decl.clone()))
            .collect()
    }

    #[test]
    fn test_parse_segments() {
        let skeleton = Skeleton::new(
            key(),
            "CREATE VIEW {% block name %}{% endblock %}\nAS\n{% block logic %}{% endblock %}\nGO\n",
            blocks(&[
                ("name", BlockDecl::required()),
                ("logic", BlockDecl::required()),
            ]),
        )
        .unwrap();

        assert_eq!(
            skeleton.segments(),
            &[
                Segment::Literal("CREATE VIEW ".to_string()),
                Segment::Block("name".to_string()),
                Segment::Literal("\nAS\n".to_string()),
                Segment::Block("logic".to_string()),
                Segment::Literal("\nGO\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_endblock_with_name() {
        let skeleton = Skeleton::new(
            key(),
            "{% block name %}{% endblock name %}",
            blocks(&[("name", BlockDecl::required())]),
        )
        .unwrap();
        assert_eq!(skeleton.segments(), &[Segment::Block("name".to_string())]);
    }

    #[test]
    fn test_non_empty_marker_rejected() {
        let err = Skeleton::new(
            key(),
            "{% block name %}dbo.Thing{% endblock %}",
            blocks(&[("name", BlockDecl::required())]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be empty"));
    }

    #[test]
    fn test_whitespace_control_marker_rejected() {
        for document in [
            "AS\n{%- block logic %}{% endblock %}",
            "AS\n{% block logic %}{% endblock -%}\nGO",
        ] {
            let err = Skeleton::new(key(), document, blocks(&[("logic", BlockDecl::required())]))
                .unwrap_err();
            assert!(err.to_string().contains("whitespace control"));
        }
    }

    #[test]
    fn test_undeclared_marker_rejected() {
        let err = Skeleton::new(key(), "{% block name %}{% endblock %}", IndexMap::new())
            .unwrap_err();
        assert!(err.to_string().contains("not declared"));
    }

    #[test]
    fn test_required_with_default_rejected() {
        let decl = BlockDecl {
            required: true,
            default: "x".to_string(),
            placeholders: None,
        };
        let err = Skeleton::new(
            key(),
            "{% block name %}{% endblock %}",
            blocks(&[("name", decl)]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot have a default"));
    }

    #[test]
    fn test_none_mode_rejected() {
        let err = Skeleton::new(
            SkeletonKey::new("mssql", "view", Mode::None),
            "",
            IndexMap::new(),
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidSkeleton { .. }));
    }

    #[test]
    fn test_required_and_optional_blocks() {
        let skeleton = Skeleton::new(
            key(),
            "{% block name %}{% endblock %}{% block parameters %}{% endblock %}",
            blocks(&[
                ("name", BlockDecl::required()),
                ("parameters", BlockDecl::optional("")),
            ]),
        )
        .unwrap();
        assert_eq!(skeleton.required_blocks().collect::<Vec<_>>(), ["name"]);
        assert_eq!(skeleton.optional_blocks().collect::<Vec<_>>(), ["parameters"]);
    }

    #[test]
    fn test_placeholders_format() {
        let param = ParamDef::parse("@id INT = 5").unwrap();
        let each = Placeholders::new("DECLARE {definition} = {value}; -- {name} {type}");
        assert_eq!(
            each.format(&param, "5"),
            "DECLARE @id INT = 5; -- @id INT"
        );
    }
}
