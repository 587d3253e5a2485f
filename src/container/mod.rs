//! Container plumbing: tool selection, path translation, and the
//! interrupt guard that kills an in-flight container on Ctrl-C.

pub mod guard;
pub mod path;
pub mod tool;

pub use guard::InterruptGuard;
pub use path::to_container_path;
pub use tool::{ContainerTool, Platform};

/// The path in the container's filesystem where the checkout holding
/// both the doc source and the build directory is mounted.
pub const CONTAINER_HOME: &str = "/home/user/mounted_home";
