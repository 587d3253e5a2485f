//! Container engine selection and mount-argument strategy.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::container::CONTAINER_HOME;
use crate::core::errors::BuildError;

/// A supported container engine CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerTool {
    Docker,
    Podman,
}

impl ContainerTool {
    /// The executable name on PATH.
    pub fn name(&self) -> &'static str {
        match self {
            ContainerTool::Docker => "docker",
            ContainerTool::Podman => "podman",
        }
    }
}

impl fmt::Display for ContainerTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "docker" => Ok(ContainerTool::Docker),
            "podman" => Ok(ContainerTool::Podman),
            _ => Err(format!(
                "unknown container tool '{}'; expected 'docker' or 'podman'",
                s
            )),
        }
    }
}

/// Host platform, as far as tool preference is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    /// Detect the platform docbuild is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// Container tools to try, in decreasing order of preference.
pub fn preferred_tools(platform: Platform) -> [ContainerTool; 2] {
    match platform {
        // Prefer Podman because Docker Desktop isn't always free
        Platform::MacOs => [ContainerTool::Podman, ContainerTool::Docker],
        // On Linux, Docker Engine (free) can be obtained without Docker
        // Desktop, and it works better
        Platform::Other => [ContainerTool::Docker, ContainerTool::Podman],
    }
}

/// Pick the first preferred tool that is installed on this system.
pub fn select_tool(platform: Platform) -> Result<ContainerTool, BuildError> {
    let candidates = preferred_tools(platform);
    candidates
        .into_iter()
        .find(|tool| which::which(tool.name()).is_ok())
        .ok_or_else(|| BuildError::NoContainerToolFound {
            candidates: candidates.iter().map(|t| t.name().to_string()).collect(),
        })
}

/// The mount option and argument binding `mount_point` to
/// [`CONTAINER_HOME`], which differ by tool and platform.
pub fn mount_arg(
    tool: ContainerTool,
    platform: Platform,
    mount_point: &Path,
) -> (String, String) {
    // Podman on Linux needs the legacy volume form with the :U suffix so
    // files created in the container are owned by the unprivileged user.
    if tool == ContainerTool::Podman && platform != Platform::MacOs {
        (
            "-v".to_string(),
            format!("{}:{}:U", mount_point.display(), CONTAINER_HOME),
        )
    } else {
        // --mount is preferred for performance reasons (at least on Mac)
        (
            "--mount".to_string(),
            format!(
                "type=bind,source={},target={}",
                mount_point.display(),
                CONTAINER_HOME
            ),
        )
    }
}
