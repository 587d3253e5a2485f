//! Structured model of the command to execute.
//!
//! A build command is either a bare `make` argv or a container `run`
//! wrapped around one. The container form keeps its run flags, image,
//! and inner make command as named sections, so that late additions
//! (like `-e KEY=VALUE` environment flags) go to the section they
//! belong to instead of being spliced in at a fixed offset from the
//! end of a flat vector.

use crate::container::tool::ContainerTool;

/// A fully assembled build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildCommand {
    /// A bare `make` invocation run directly on the host.
    Make(Vec<String>),
    /// A `make` invocation wrapped in a container run.
    Container(ContainerCommand),
}

impl BuildCommand {
    /// Flatten into the literal argument vector to execute.
    pub fn to_argv(&self) -> Vec<String> {
        match self {
            BuildCommand::Make(argv) => argv.clone(),
            BuildCommand::Container(c) => c.to_argv(),
        }
    }

    /// Render the command line for echoing before execution.
    pub fn display(&self) -> String {
        self.to_argv().join(" ")
    }
}

/// A container-wrapped make invocation, kept in sections.
///
/// `to_argv` produces
/// `[tool, "run", "--name", name, <run_flags...>, image, <inner...>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerCommand {
    /// Container engine the command runs under.
    pub tool: ContainerTool,
    /// Name for this container run; also the kill target on interrupt.
    pub name: String,
    /// Flags to the engine's `run` subcommand (after `--name <name>`).
    pub run_flags: Vec<String>,
    /// Image to run.
    pub image: String,
    /// The inner make command executed inside the container.
    pub inner: Vec<String>,
}

impl ContainerCommand {
    /// Append an `-e KEY=VALUE` environment flag to the run flags.
    ///
    /// Containers do not inherit the host environment, so settings the
    /// inner build needs must travel as engine flags.
    pub fn env_flag(&mut self, key: &str, value: &str) {
        self.run_flags.push("-e".to_string());
        self.run_flags.push(format!("{key}={value}"));
    }

    /// Flatten into the literal argument vector to execute.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = vec![
            self.tool.name().to_string(),
            "run".to_string(),
            "--name".to_string(),
            self.name.clone(),
        ];
        argv.extend(self.run_flags.iter().cloned());
        argv.push(self.image.clone());
        argv.extend(self.inner.iter().cloned());
        argv
    }
}
