//! High-level operations.
//!
//! This module contains the implementation of docbuild commands.

pub mod build;

pub use build::{build_docs, BuildDocsOptions};
