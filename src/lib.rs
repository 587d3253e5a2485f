//! Docbuild - a build orchestrator for versioned Sphinx documentation
//!
//! This crate provides the core library functionality for docbuild:
//! resolving where a documentation build lands on disk, assembling the
//! `make` invocation for it, and optionally wrapping that invocation to
//! run inside a Docker or Podman container with correct volume mounts
//! and environment propagation.

pub mod builder;
pub mod container;
pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::build_spec::BuildSpec;
pub use crate::core::command::{BuildCommand, ContainerCommand};
pub use crate::core::errors::BuildError;
pub use crate::ops::build::{build_docs, BuildDocsOptions};
