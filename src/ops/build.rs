//! The end-to-end documentation build.
//!
//! One invocation builds each requested version in turn: resolve where
//! the build lands, optionally run `make clean`, then run the build
//! target. Versions build sequentially and independently; if one
//! fails, earlier versions have already completed and later ones are
//! not attempted.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rand::Rng;
use url::Url;

use crate::builder::assemble::{assemble, BuildRequest, ContainerSettings, DEFAULT_IMAGE};
use crate::builder::env::{self as build_env, EnvOptions};
use crate::container::guard::InterruptGuard;
use crate::container::tool::{self, ContainerTool, Platform};
use crate::core::build_spec;
use crate::core::command::BuildCommand;
use crate::core::errors::BuildError;
use crate::util::git;
use crate::util::process::ProcessBuilder;

/// Options for [`build_docs`].
#[derive(Debug, Clone)]
pub struct BuildDocsOptions {
    /// Explicit build directory; conflicts with `repo_root`.
    pub build_dir: Option<PathBuf>,

    /// Root of the repository holding versioned documentation builds.
    pub repo_root: Option<PathBuf>,

    /// Versions to build; empty means one build with the version
    /// inferred from the current git branch.
    pub doc_versions: Vec<String>,

    /// Version name for the drop-down menu; defaults to the version.
    pub version_display_name: Option<String>,

    /// Run `make clean` before each build.
    pub clean: bool,

    /// Build inside a container rather than with locally installed
    /// tools.
    pub use_container: bool,

    /// Container image; defaults to [`DEFAULT_IMAGE`].
    pub container_image: Option<String>,

    /// Container engine override; defaults to the first installed
    /// preferred tool.
    pub container_tool: Option<ContainerTool>,

    /// Target for the make command.
    pub build_target: String,

    /// Number of parallel make jobs.
    pub num_make_jobs: u32,

    /// Build with the multi-version drop-down switcher.
    pub multi_version: bool,

    /// URL or absolute path containing the top-level index.html;
    /// required with `multi_version`.
    pub site_root: Option<String>,

    /// Treat sphinx warnings as warnings, not errors.
    pub warnings_as_warnings: bool,

    /// Path to a conf.py (or its directory) to pass via SPHINXOPTS.
    pub conf_py_path: Option<PathBuf>,

    /// Static assets path exported to the sphinx configuration.
    pub static_path: Option<String>,

    /// Templates path exported to the sphinx configuration.
    pub templates_path: Option<String>,
}

impl Default for BuildDocsOptions {
    fn default() -> Self {
        BuildDocsOptions {
            build_dir: None,
            repo_root: None,
            doc_versions: Vec::new(),
            version_display_name: None,
            clean: false,
            use_container: false,
            container_image: None,
            container_tool: None,
            build_target: "html".to_string(),
            num_make_jobs: 4,
            multi_version: false,
            site_root: None,
            warnings_as_warnings: false,
            conf_py_path: None,
            static_path: None,
            templates_path: None,
        }
    }
}

/// Build every requested version, sequentially.
pub fn build_docs(opts: &BuildDocsOptions) -> Result<()> {
    validate_site_root(opts)?;

    let run_from_dir = env::current_dir().context("failed to determine current directory")?;

    // One container name per invocation. The clean and build sub-steps
    // reuse it; --rm guarantees the previous container has exited
    // before the name comes up again.
    let container = if opts.use_container {
        Some(prepare_container(opts, &run_from_dir)?)
    } else {
        None
    };

    let requested: Vec<Option<&str>> = if opts.doc_versions.is_empty() {
        vec![None]
    } else {
        opts.doc_versions.iter().map(|v| Some(v.as_str())).collect()
    };

    for version in requested {
        let spec = build_spec::resolve(
            opts.build_dir.as_deref(),
            opts.repo_root.as_deref(),
            version,
        )?;
        tracing::info!(
            version = %spec.version,
            build_dir = %spec.build_dir.display(),
            "building documentation"
        );

        if opts.clean {
            let clean_request = BuildRequest {
                build_dir: spec.build_dir.clone(),
                run_from_dir: run_from_dir.clone(),
                build_target: "clean".to_string(),
                version: spec.version.clone(),
                num_make_jobs: opts.num_make_jobs,
                warnings_as_warnings: false,
                conf_py_path: None,
                container: container.clone(),
            };
            run_build_command(assemble(&clean_request)?, &spec.version, opts)?;
        }

        let request = BuildRequest {
            build_dir: spec.build_dir.clone(),
            run_from_dir: run_from_dir.clone(),
            build_target: opts.build_target.clone(),
            version: spec.version.clone(),
            num_make_jobs: opts.num_make_jobs,
            warnings_as_warnings: opts.warnings_as_warnings,
            conf_py_path: opts.conf_py_path.clone(),
            container: container.clone(),
        };
        run_build_command(assemble(&request)?, &spec.version, opts)?;
    }

    Ok(())
}

/// Resolve the mount point, engine, image, and name for container runs.
fn prepare_container(
    opts: &BuildDocsOptions,
    run_from_dir: &Path,
) -> Result<ContainerSettings> {
    let mount_point = git::toplevel_dir(run_from_dir).with_context(|| {
        format!(
            "container builds must be run from inside a git checkout; {} is not in one",
            run_from_dir.display()
        )
    })?;

    let engine = match opts.container_tool {
        Some(t) => t,
        None => tool::select_tool(Platform::current())?,
    };

    let image = opts
        .container_image
        .clone()
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

    Ok(ContainerSettings {
        name: container_name(),
        image,
        tool: Some(engine),
        mount_point,
    })
}

/// Apply the environment bindings, echo the command, and run it.
fn run_build_command(
    mut command: BuildCommand,
    version: &str,
    opts: &BuildDocsOptions,
) -> Result<()> {
    let mut extra_env = HashMap::new();
    let env_opts = EnvOptions {
        version_display_name: opts.version_display_name.clone(),
        static_path: opts.static_path.clone(),
        templates_path: opts.templates_path.clone(),
        multi_version: opts.multi_version,
        site_root: opts.site_root.clone(),
    };
    for binding in build_env::dropdown_bindings(version, &env_opts) {
        build_env::apply(&mut command, &mut extra_env, &binding);
    }

    // Echo the exact command line for reproducibility.
    println!("{}", command.display());

    let _guard = match &command {
        BuildCommand::Container(c) => Some(InterruptGuard::arm(c.tool, &c.name)?),
        BuildCommand::Make(_) => None,
    };

    let argv = command.to_argv();
    let status = ProcessBuilder::new(&argv[0])
        .args(&argv[1..])
        .envs(&extra_env)
        .status()?;

    if !status.success() {
        return Err(BuildError::BuildToolFailed {
            command: command.display(),
            status: status.code().unwrap_or(1),
        }
        .into());
    }
    Ok(())
}

fn validate_site_root(opts: &BuildDocsOptions) -> Result<()> {
    if !opts.multi_version {
        return Ok(());
    }
    let Some(site_root) = &opts.site_root else {
        bail!("--site-root must be provided when --versions is enabled");
    };
    if !is_web_url(site_root) && !Path::new(site_root).is_absolute() {
        bail!("--site-root is neither a web URL nor an absolute path: '{site_root}'");
    }
    Ok(())
}

/// Whether a string is a web URL (scheme plus host).
fn is_web_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.has_host())
        .unwrap_or(false)
}

/// A container name unlikely to collide with concurrent runs.
fn container_name() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..8).map(|_| rng.random_range('a'..='z')).collect();
    format!("docbuild_{suffix}")
}
