//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use docbuild::container::ContainerTool;

/// docbuild - build versioned, optionally containerized Sphinx documentation
///
/// Wraps the make command that builds sphinx-based documentation,
/// assembling the correct invocation for builds that run inside a
/// Docker or Podman container and for versioned builds that land in
/// subdirectories named after the source branch.
#[derive(Parser)]
#[command(name = "docbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the documentation
    Build(BuildArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Full path to the directory in which the doc build should go
    #[arg(short = 'b', long)]
    pub build_dir: Option<PathBuf>,

    /// Root directory of the repository holding documentation builds
    /// (include any path elements between the true repo root and the
    /// 'versions' directory)
    #[arg(short = 'r', long)]
    pub repo_root: Option<PathBuf>,

    /// Version name(s) to build, each a directory name under the repo
    /// root; inferred from the current git branch when omitted. Not
    /// applicable with --build-dir
    #[arg(short = 'v', long = "doc-version", num_args = 1..)]
    pub doc_version: Vec<String>,

    /// Version name for display in the dropdown menu; defaults to the
    /// version being built
    #[arg(long)]
    pub version_display_name: Option<String>,

    /// Before building, run 'make clean'
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Use a container to build the documentation rather than relying
    /// on locally-installed versions of Sphinx etc. Both the current
    /// directory and the build directory must reside in the same git
    /// checkout, which is mounted into the container
    #[arg(short = 'd', long = "build-with-container", alias = "build-with-docker")]
    pub build_with_container: bool,

    /// Container image to use; implies -d
    #[arg(short = 'i', long, alias = "docker-image")]
    pub container_image: Option<String>,

    /// Container tool to use (docker or podman); defaults to the first
    /// one installed, in platform preference order
    #[arg(long)]
    pub container_tool: Option<ContainerTool>,

    /// Target for the make command [default: html]
    #[arg(short = 't', long)]
    pub build_target: Option<String>,

    /// Number of parallel jobs for the make process [default: 4]
    #[arg(long)]
    pub num_make_jobs: Option<u32>,

    /// Build multiple versions of the docs, with drop-down switcher menu
    #[arg(long)]
    pub versions: bool,

    /// URL or absolute file path that should contain the top-level
    /// index.html; required with --versions
    #[arg(long)]
    pub site_root: Option<String>,

    /// Treat sphinx warnings as warnings, not errors
    #[arg(short = 'w', long)]
    pub warnings_as_warnings: bool,

    /// Path to conf.py, or the directory containing it
    #[arg(long)]
    pub conf_py_path: Option<PathBuf>,

    /// Static assets path exported to the sphinx configuration
    #[arg(long)]
    pub static_path: Option<String>,

    /// Templates path exported to the sphinx configuration
    #[arg(long)]
    pub templates_path: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
