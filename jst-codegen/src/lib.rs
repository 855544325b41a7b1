//! Template-to-SQL transpilation for jinjasql.
//!
//! Templates are rendered with minijinja. A template that extends
//! `<engine>/<kind>.sql.jinja` has its blocks captured and spliced into the
//! matching skeleton of the format catalog.
//!
//! # Module Organization
//!
//! - [`catalog`] - Format catalog of skeletons per (engine, kind, mode)
//! - [`compose`] - Block compositor
//! - [`placeholder`] - Debug placeholder values for parameters
//! - [`source`] - Template sources (directories, in-memory)
//! - [`Transpiler`] - Render, extract and compose a single template

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod catalog;
pub mod compose;
mod error;
mod extract;
pub mod placeholder;
mod render;
pub mod source;
mod transpiler;

pub use catalog::{BlockDecl, Catalog, Skeleton, SkeletonKey};
pub use compose::{Compositor, compose};
pub use error::{Error, Result};
pub use extract::BlockMap;
pub use render::ENGINE_ALIAS;
pub use source::{DirSource, MemorySource, TemplateSource};
pub use transpiler::{Settings, Transpiled, Transpiler};
