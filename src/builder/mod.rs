//! Build command assembly.

pub mod assemble;
pub mod env;

pub use assemble::{assemble, BuildRequest, ContainerSettings, DEFAULT_IMAGE};
pub use env::{apply, dropdown_bindings, EnvBinding, EnvOptions};
