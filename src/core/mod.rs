//! Core data structures for docbuild.
//!
//! This module contains the foundational types used throughout docbuild:
//! - Build specs (where a build lands on disk)
//! - The structured command model (bare make vs. container-wrapped)
//! - Domain error types

pub mod build_spec;
pub mod command;
pub mod errors;

pub use build_spec::BuildSpec;
pub use command::{BuildCommand, ContainerCommand};
pub use errors::BuildError;
