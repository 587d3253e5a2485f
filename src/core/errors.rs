//! Domain error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while resolving paths or assembling a build command.
///
/// All of these are fail-fast: docbuild never retries or silently
/// recovers, it reports the violated precondition and exits.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot specify both --build-dir and --{other}")]
    ConflictingArguments { other: &'static str },

    #[error("must specify either --build-dir or --repo-root")]
    MissingArguments,

    #[error(
        "problem determining version based on git branch; set --doc-version on the command line"
    )]
    VersionUndeterminable,

    #[error(
        "directory {} doesn't exist yet\n\
         If this is where you really want to build the documentation, rerun adding the\n\
         command-line argument '--doc-version {version}'",
        path.display()
    )]
    BuildDirMissing { path: PathBuf, version: String },

    #[error("--conf-py-path not found: '{}'", path.display())]
    ConfPathNotFound { path: PathBuf },

    #[error("expected an absolute path; got {}", path.display())]
    NotAbsolutePath { path: PathBuf },

    #[error("{context} somewhere in {}", mount_point.display())]
    PathNotUnderMount {
        context: String,
        mount_point: PathBuf,
    },

    #[error("no compatible container software found: {}", candidates.join(", "))]
    NoContainerToolFound { candidates: Vec<String> },

    #[error("`{command}` failed with exit status {status}")]
    BuildToolFailed { command: String, status: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
