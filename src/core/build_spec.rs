//! Resolution of the on-disk build directory.
//!
//! A build lands either in an explicitly given directory, or under
//! `<repo_root>/versions/<version>` where the version is given on the
//! command line or inferred from the current git branch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::BuildError;
use crate::util::git;

/// Subdirectory of the repo root that holds one build per version.
pub const VERSIONS_SUBDIR: &str = "versions";

/// The resolved description of one documentation build.
///
/// Immutable once created; one spec is resolved per requested version
/// per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    /// Directory the build output goes to.
    pub build_dir: PathBuf,

    /// Version label for this build, or `"None"` when the build
    /// directory was given explicitly.
    pub version: String,
}

/// Resolve the build directory from partial specification.
///
/// Exactly one of `build_dir` or `repo_root` must be given. With
/// `build_dir`, the directory is created if missing and the version
/// label is `"None"`. With `repo_root`, the build goes to
/// `repo_root/versions/<version>`; an omitted version is inferred from
/// the current git branch, in which case the leaf directory must
/// already exist (a stray branch name must not silently create a new
/// published version).
pub fn resolve(
    build_dir: Option<&Path>,
    repo_root: Option<&Path>,
    version: Option<&str>,
) -> Result<BuildSpec, BuildError> {
    resolve_with(build_dir, repo_root, version, git::current_branch)
}

/// Like [`resolve`], with the git branch lookup supplied by the caller.
pub fn resolve_with<F>(
    build_dir: Option<&Path>,
    repo_root: Option<&Path>,
    version: Option<&str>,
    branch_lookup: F,
) -> Result<BuildSpec, BuildError>
where
    F: FnOnce() -> Option<String>,
{
    if let Some(dir) = build_dir {
        if repo_root.is_some() {
            return Err(BuildError::ConflictingArguments { other: "repo-root" });
        }
        if version.is_some() {
            return Err(BuildError::ConflictingArguments {
                other: "doc-version",
            });
        }
        if !dir.is_dir() {
            fs::create_dir_all(dir)?;
        }
        return Ok(BuildSpec {
            build_dir: dir.to_path_buf(),
            version: "None".to_string(),
        });
    }

    let Some(root) = repo_root else {
        return Err(BuildError::MissingArguments);
    };

    let (version, version_explicit) = match version {
        Some(v) => (v.to_string(), true),
        None => {
            let branch = branch_lookup().ok_or(BuildError::VersionUndeterminable)?;
            (branch, false)
        }
    };

    let versions_root = root.join(VERSIONS_SUBDIR);
    if !versions_root.is_dir() {
        fs::create_dir_all(&versions_root)?;
    }

    let build_dir = versions_root.join(&version);
    if !version_explicit && !build_dir.is_dir() {
        return Err(BuildError::BuildDirMissing {
            path: build_dir,
            version,
        });
    }

    Ok(BuildSpec { build_dir, version })
}
