//! Thin git collaborators.
//!
//! docbuild only needs two facts from git: the name of the current
//! branch (to infer a documentation version) and the top level of the
//! checkout containing a path (to pick the container mount point).

use std::path::{Path, PathBuf};

/// Name of the branch HEAD points to, or `None` when not in a work
/// tree, on an unborn branch, or on a detached HEAD.
pub fn current_branch() -> Option<String> {
    branch_of(Path::new("."))
}

/// Like [`current_branch`], starting discovery from `path`.
pub fn branch_of(path: &Path) -> Option<String> {
    let repo = git2::Repository::discover(path).ok()?;
    let head = repo.head().ok()?;
    if head.is_branch() {
        head.shorthand().map(str::to_string)
    } else {
        None
    }
}

/// Top-level work tree directory of the checkout containing `path`, or
/// `None` when the path is not inside a git repository.
pub fn toplevel_dir(path: &Path) -> Option<PathBuf> {
    let repo = git2::Repository::discover(path).ok()?;
    repo.workdir().map(Path::to_path_buf)
}
