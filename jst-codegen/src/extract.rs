//! Capturing rendered block contents.
//!
//! When a template extends a skeleton, the loader serves a capture document
//! in its place: every declared block wrapped in private-use sentinels. The
//! rendered output is then scanned for the sentinels to recover each block's
//! final text.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::catalog::Skeleton;

/// Rendered block contents by block name, in render order.
pub type BlockMap = IndexMap<String, String>;

const OPEN: &str = "\u{E000}";
const NAME_END: &str = "\u{E001}";
const CLOSE: &str = "\u{E002}";
/// Body of a block the template did not override.
const ABSENT: &str = "\u{E003}";

static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%[-+]?\s*block\s+([A-Za-z_][A-Za-z0-9_]*)").expect("block tag pattern is valid")
});

/// Comments and raw sections, whose contents are not template code.
static INERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)\{#.*?#\}|\{%[-+]?\s*raw\s*[-+]?%\}.*?\{%[-+]?\s*endraw\s*[-+]?%\}",
    )
    .expect("inert region pattern is valid")
});

/// Template served in place of a skeleton path.
pub(crate) fn capture_document(skeleton: &Skeleton) -> String {
    skeleton
        .blocks()
        .keys()
        .map(|name| {
            format!("{OPEN}{name}{NAME_END}{{% block {name} %}}{ABSENT}{{% endblock %}}{CLOSE}")
        })
        .collect()
}

/// Recover the supplied blocks from a rendered capture document.
///
/// Blocks left untouched are omitted. A block that calls `super()` gets the
/// declared default in place of the parent content.
pub(crate) fn extract_blocks(rendered: &str, skeleton: &Skeleton) -> BlockMap {
    let mut blocks = BlockMap::new();
    let mut rest = rendered;

    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(name_end) = after.find(NAME_END) else {
            break;
        };
        let name = &after[..name_end];
        let body = &after[name_end + NAME_END.len()..];
        let Some(close) = body.find(CLOSE) else {
            break;
        };
        let text = &body[..close];
        rest = &body[close + CLOSE.len()..];

        if text == ABSENT {
            continue;
        }
        let default = skeleton
            .block(name)
            .map(|decl| decl.default.as_str())
            .unwrap_or_default();
        blocks.insert(name.to_string(), text.replace(ABSENT, default));
    }

    blocks
}

/// First block name defined twice in a template source.
pub(crate) fn find_duplicate_block(source: &str) -> Option<String> {
    let code = INERT.replace_all(source, "");
    let mut seen = std::collections::HashSet::new();
    BLOCK_TAG
        .captures_iter(&code)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .find(|name| !seen.insert(*name))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use jinjasql_manifest::Mode;

    use super::*;
    use crate::catalog::{BlockDecl, SkeletonKey};

    fn skeleton() -> Skeleton {
        let blocks = [
            ("name".to_string(), BlockDecl::required()),
            ("options".to_string(), BlockDecl::optional(" WITH (DATA_COMPRESSION = PAGE)")),
        ]
        .into_iter()
        .collect();
        Skeleton::new(
            SkeletonKey::new("mssql", "table", Mode::Create),
            "{% block name %}{% endblock %}{% block options %}{% endblock %}",
            blocks,
        )
        .unwrap()
    }

    #[test]
    fn test_capture_document() {
        let document = capture_document(&skeleton());
        assert_eq!(
            document,
            "\u{E000}name\u{E001}{% block name %}\u{E003}{% endblock %}\u{E002}\
             \u{E000}options\u{E001}{% block options %}\u{E003}{% endblock %}\u{E002}"
        );
    }

    #[test]
    fn test_extract_supplied_and_absent() {
        let rendered = "\u{E000}name\u{E001}dbo.Vehicles\u{E002}\u{E000}options\u{E001}\u{E003}\u{E002}";
        let blocks = extract_blocks(rendered, &skeleton());

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks["name"], "dbo.Vehicles");
    }

    #[test]
    fn test_extract_keeps_empty_block() {
        let rendered = "\u{E000}name\u{E001}\u{E002}";
        let blocks = extract_blocks(rendered, &skeleton());
        assert_eq!(blocks["name"], "");
    }

    #[test]
    fn test_extract_super_uses_default() {
        let rendered = "\u{E000}options\u{E001}\u{E003}, FILLFACTOR = 80\u{E002}";
        let blocks = extract_blocks(rendered, &skeleton());
        assert_eq!(
            blocks["options"],
            " WITH (DATA_COMPRESSION = PAGE), FILLFACTOR = 80"
        );
    }

    #[test]
    fn test_find_duplicate_block() {
        let source = "{% block name %}a{% endblock %}\n{%- block logic %}{% endblock %}\n{% block name %}b{% endblock %}";
        assert_eq!(find_duplicate_block(source).as_deref(), Some("name"));
        assert_eq!(
            find_duplicate_block("{% block name %}{% endblock name %}"),
            None
        );
    }

    #[test]
    fn test_duplicate_scan_skips_comments_and_raw() {
        let source = "{# {% block name %} #}\n\
            {% raw %}{% block name %}{% endraw %}\n\
            {%- raw -%}{% block name %}{%- endraw %}\n\
            {% block name %}dbo.Vehicles{% endblock %}";
        assert_eq!(find_duplicate_block(source), None);
        assert_eq!(
            find_duplicate_block("{# note #}{% block a %}{% endblock %}{% block a %}{% endblock %}")
                .as_deref(),
            Some("a")
        );
    }
}
