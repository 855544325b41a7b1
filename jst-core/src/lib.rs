//! Core utilities and types for the jinjasql transpiler.
//!
//! This crate provides the file and path primitives shared by the
//! manifest, codegen and CLI crates.

mod file;
mod path;

// File operations
pub use file::{File, WriteResult};
// Template path utilities
pub use path::{normalize_template_path, strip_template_extension};
