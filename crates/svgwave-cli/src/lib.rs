//! svgwave CLI library.
//!
//! This crate provides the core functionality for the svgwave CLI: loading
//! curve documents, applying command-line parameter overrides, and the
//! `convert`, `validate`, and `inspect` commands.

pub mod commands;
pub mod input;
