//! Debug placeholder values for parameters and columns.
//!
//! A value is taken from the template's presets first, then from the
//! default written in the definition, and finally from the type's
//! placeholder literal.

mod params;
mod sql_type;

use jinjasql_manifest::PresetMap;
pub use params::{ParamDef, split_definitions};
pub use sql_type::SqlType;

use crate::{Error, Result};

/// The value a debug script assigns to `param`.
pub fn resolve(param: &ParamDef, presets: Option<&PresetMap>) -> Result<String> {
    if let Some(preset) = presets.and_then(|p| p.get(&param.name)) {
        return Ok(preset.to_sql_literal());
    }
    if let Some(default) = &param.default {
        return Ok(default.clone());
    }
    SqlType::parse(&param.data_type)
        .map(|sql_type| sql_type.placeholder(&param.data_type))
        .ok_or_else(|| {
            Box::new(Error::UnsupportedType {
                name: param.name.clone(),
                data_type: param.data_type.clone(),
            })
        })
}

/// Resolve the value for a single definition such as `@id INT`.
pub fn column_to_value(definition: &str, presets: Option<&PresetMap>) -> Result<String> {
    let param = ParamDef::parse(definition).ok_or_else(|| {
        Box::new(Error::UnsupportedType {
            name: String::new(),
            data_type: definition.trim().to_string(),
        })
    })?;
    resolve(&param, presets)
}
