//! CLI integration tests for docbuild.
//!
//! These tests drive the full binary against a stub documentation
//! Makefile, checking command assembly, environment propagation, and
//! error reporting end to end. Container builds are exercised at the
//! unit level only; these tests stay on the host path.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the docbuild binary command.
fn docbuild() -> Command {
    Command::cargo_bin("docbuild").unwrap()
}

/// Create a doc source directory with a stub Makefile that mimics the
/// sphinx one: `html` populates BUILDDIR, `clean` removes it.
fn doc_source() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let makefile = "\
html:
\tmkdir -p $(BUILDDIR)
\tprintf 'built\\n' > $(BUILDDIR)/index.html
\tprintf '%s\\n' \"$$version_display_name\" > $(BUILDDIR)/display_name.txt

clean:
\trm -rf $(BUILDDIR)

fail:
\texit 3
";
    fs::write(tmp.path().join("Makefile"), makefile).unwrap();
    tmp
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// ============================================================================
// argument validation
// ============================================================================

#[test]
fn test_build_requires_a_location() {
    let src = doc_source();

    docbuild()
        .arg("build")
        .current_dir(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "must specify either --build-dir or --repo-root",
        ));
}

#[test]
fn test_build_dir_and_repo_root_conflict() {
    let src = doc_source();
    let out = TempDir::new().unwrap();

    docbuild()
        .args(["build", "-b"])
        .arg(out.path())
        .arg("-r")
        .arg(out.path())
        .current_dir(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot specify both --build-dir and --repo-root",
        ));
}

#[test]
fn test_versions_requires_site_root() {
    let src = doc_source();
    let out = TempDir::new().unwrap();

    docbuild()
        .args(["build", "--versions", "-b"])
        .arg(out.path())
        .current_dir(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--site-root must be provided when --versions is enabled",
        ));
}

#[test]
fn test_relative_site_root_rejected() {
    let src = doc_source();
    let out = TempDir::new().unwrap();

    docbuild()
        .args(["build", "--versions", "--site-root", "relative/path", "-b"])
        .arg(out.path())
        .current_dir(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "neither a web URL nor an absolute path",
        ));
}

#[test]
fn test_missing_conf_py_path() {
    let src = doc_source();
    let out = TempDir::new().unwrap();

    docbuild()
        .args(["build", "--conf-py-path", "/no/such/conf.py", "-b"])
        .arg(out.path())
        .current_dir(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--conf-py-path not found"));
}

#[test]
fn test_inferred_version_outside_git_repo() {
    let src = doc_source();
    let root = TempDir::new().unwrap();

    docbuild()
        .arg("build")
        .arg("-r")
        .arg(root.path())
        .current_dir(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "problem determining version based on git branch",
        ));
}

// ============================================================================
// host builds
// ============================================================================

#[test]
fn test_build_into_explicit_dir() {
    let src = doc_source();
    let out = TempDir::new().unwrap();
    let build_dir = out.path().join("docs_out");

    docbuild()
        .args(["build", "-b"])
        .arg(&build_dir)
        .current_dir(src.path())
        .assert()
        .success()
        // The exact command line is echoed before running.
        .stdout(predicate::str::contains("make SPHINXOPTS=-W --keep-going"))
        .stdout(predicate::str::contains(format!(
            "BUILDDIR={}",
            build_dir.display()
        )));

    assert_eq!(read(&build_dir.join("index.html")), "built\n");
    // Explicit build dirs carry the version label "None".
    assert_eq!(read(&build_dir.join("display_name.txt")), "None\n");
}

#[test]
fn test_build_two_explicit_versions() {
    let src = doc_source();
    let root = TempDir::new().unwrap();

    docbuild()
        .arg("build")
        .arg("-r")
        .arg(root.path())
        .args(["-v", "v1", "v2"])
        .current_dir(src.path())
        .assert()
        .success();

    for version in ["v1", "v2"] {
        let build_dir = root.path().join("versions").join(version);
        assert_eq!(read(&build_dir.join("index.html")), "built\n");
        assert_eq!(
            read(&build_dir.join("display_name.txt")),
            format!("{version}\n")
        );
    }
}

#[test]
fn test_version_display_name_override() {
    let src = doc_source();
    let root = TempDir::new().unwrap();

    docbuild()
        .arg("build")
        .arg("-r")
        .arg(root.path())
        .args(["-v", "v1", "--version-display-name", "Latest"])
        .current_dir(src.path())
        .assert()
        .success();

    let build_dir = root.path().join("versions").join("v1");
    assert_eq!(read(&build_dir.join("display_name.txt")), "Latest\n");
}

#[test]
fn test_clean_before_build() {
    let src = doc_source();
    let out = TempDir::new().unwrap();
    let build_dir = out.path().join("docs_out");

    fs::create_dir_all(&build_dir).unwrap();
    fs::write(build_dir.join("stale.html"), "old").unwrap();

    docbuild()
        .args(["build", "-c", "-b"])
        .arg(&build_dir)
        .current_dir(src.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("clean"));

    assert!(!build_dir.join("stale.html").exists());
    assert!(build_dir.join("index.html").exists());
}

#[test]
fn test_failing_target_propagates() {
    let src = doc_source();
    let out = TempDir::new().unwrap();

    docbuild()
        .args(["build", "-t", "fail", "-b"])
        .arg(out.path())
        .current_dir(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed with exit status"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn test_completions_bash() {
    docbuild()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docbuild"));
}
