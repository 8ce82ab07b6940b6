//! Configuration module for card rendering
//!
//! Provides types, discovery and loading for `cardgen.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
