//! Core operations.
//!
//! This module contains the business logic for jst commands,
//! separated from CLI argument parsing and output rendering.

pub mod catalog;
pub mod options;
pub mod presets;
pub mod transpile;

pub use catalog::catalog;
pub use options::options;
pub use presets::presets;
pub use transpile::transpile;
