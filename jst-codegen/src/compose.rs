//! Splicing rendered blocks into a skeleton.

use jinjasql_manifest::PresetMap;

use crate::{
    Error, Result,
    catalog::{BlockDecl, Placeholders, Segment, Skeleton},
    extract::BlockMap,
    placeholder::{self, ParamDef, split_definitions},
};

/// Fills skeleton markers with block contents.
///
/// Supplied text is inserted verbatim. Optional blocks fall back to their
/// declared default, required blocks must be supplied, and blocks the
/// skeleton does not declare are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor<'p> {
    presets: Option<&'p PresetMap>,
}

impl<'p> Compositor<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `presets` when expanding placeholder blocks.
    pub fn with_presets(presets: Option<&'p PresetMap>) -> Self {
        Self { presets }
    }

    pub fn compose(&self, blocks: &BlockMap, skeleton: &Skeleton) -> Result<String> {
        for name in skeleton.required_blocks() {
            if !blocks.contains_key(name) {
                return Err(Box::new(Error::MissingBlock {
                    block: name.to_string(),
                    skeleton: skeleton.key().clone(),
                }));
            }
        }

        let mut output = String::with_capacity(skeleton.document().len());
        for segment in skeleton.segments() {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Block(name) => {
                    let Some(decl) = skeleton.block(name) else {
                        continue;
                    };
                    output.push_str(&self.fill(decl, blocks.get(name).map(String::as_str))?);
                }
            }
        }

        Ok(output)
    }

    fn fill(&self, decl: &BlockDecl, supplied: Option<&str>) -> Result<String> {
        let text = supplied.unwrap_or(&decl.default);
        match &decl.placeholders {
            Some(placeholders) => self.expand(text, placeholders),
            None => Ok(text.to_string()),
        }
    }

    fn expand(&self, text: &str, placeholders: &Placeholders) -> Result<String> {
        let lines = split_definitions(text)
            .iter()
            .filter_map(|definition| ParamDef::parse(definition))
            .map(|param| {
                let value = placeholder::resolve(&param, self.presets)?;
                Ok(placeholders.format(&param, &value))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(lines.join(placeholders.separator.as_str()))
    }
}

/// Compose without presets.
pub fn compose(blocks: &BlockMap, skeleton: &Skeleton) -> Result<String> {
    Compositor::new().compose(blocks, skeleton)
}
