//! Environment propagation for the version switcher.
//!
//! The sphinx conf.py reads a handful of environment variables to
//! render the version drop-down. On the host those are plain process
//! environment variables; a container does not inherit the host
//! environment, so there they travel as `-e KEY=VALUE` engine flags
//! appended to the run-flags section of the command.

use std::collections::HashMap;

use crate::core::command::BuildCommand;

/// How a binding reaches the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Set in the host process environment of the spawned command.
    HostEnv,
    /// Spliced into the container command as an `-e` flag.
    ContainerFlag,
}

/// One environment setting for the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    pub key: String,
    pub value: String,
}

impl EnvBinding {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        EnvBinding {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Options controlling which bindings a build gets.
#[derive(Debug, Clone, Default)]
pub struct EnvOptions {
    /// Version name shown in the drop-down menu; defaults to the
    /// resolved version.
    pub version_display_name: Option<String>,

    /// Static assets path handed to the sphinx configuration.
    pub static_path: Option<String>,

    /// Templates path handed to the sphinx configuration.
    pub templates_path: Option<String>,

    /// Whether the build carries the multi-version drop-down.
    pub multi_version: bool,

    /// URL or absolute path of the site root; required (and only
    /// applied) when `multi_version` is set.
    pub site_root: Option<String>,
}

/// The bindings for one build, in their fixed application order.
pub fn dropdown_bindings(version: &str, opts: &EnvOptions) -> Vec<EnvBinding> {
    let mut bindings = Vec::new();

    let display_name = opts
        .version_display_name
        .clone()
        .unwrap_or_else(|| version.to_string());
    bindings.push(EnvBinding::new("version_display_name", display_name));

    if let Some(static_path) = &opts.static_path {
        bindings.push(EnvBinding::new("static_path", static_path.clone()));
    }
    if let Some(templates_path) = &opts.templates_path {
        bindings.push(EnvBinding::new("templates_path", templates_path.clone()));
    }

    let dropdown = if opts.multi_version { "True" } else { "" };
    bindings.push(EnvBinding::new("version_dropdown", dropdown));

    if opts.multi_version {
        if let Some(site_root) = &opts.site_root {
            bindings.push(EnvBinding::new("pages_root", site_root.clone()));
        }
    }

    bindings
}

/// Deliver one binding, choosing the mechanism from the command form.
pub fn apply(
    command: &mut BuildCommand,
    env: &mut HashMap<String, String>,
    binding: &EnvBinding,
) {
    match command {
        BuildCommand::Make(_) => {
            env.insert(binding.key.clone(), binding.value.clone());
        }
        BuildCommand::Container(container) => {
            container.env_flag(&binding.key, &binding.value);
        }
    }
}

/// Which delivery [`apply`] will use for a command.
pub fn delivery_for(command: &BuildCommand) -> Delivery {
    match command {
        BuildCommand::Make(_) => Delivery::HostEnv,
        BuildCommand::Container(_) => Delivery::ContainerFlag,
    }
}
