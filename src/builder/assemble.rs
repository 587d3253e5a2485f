//! Assembly of the literal build command.
//!
//! Produces either a bare `make` argument vector, or the same vector
//! wrapped in a `docker`/`podman run` invocation with the working
//! directory and build directory translated into container space.

use std::path::{Path, PathBuf};

use crate::container::path::to_container_path;
use crate::container::tool::{self, ContainerTool, Platform};
use crate::core::command::{BuildCommand, ContainerCommand};
use crate::core::errors::BuildError;
use crate::util::fs::normalize_path;

/// Image used when the caller requests a container build without
/// naming an image.
pub const DEFAULT_IMAGE: &str = "ghcr.io/escomp/ctsm/ctsm-docs:v1.0.1";

/// Container parameters for a wrapped build.
#[derive(Debug, Clone)]
pub struct ContainerSettings {
    /// Temporary name for the container run; guaranteed by the caller
    /// not to collide with concurrently running containers.
    pub name: String,

    /// Image to run.
    pub image: String,

    /// Engine to use; `None` picks the first installed preferred tool.
    pub tool: Option<ContainerTool>,

    /// Host directory bind-mounted into the container. Both the
    /// run-from directory and the build directory must live under it.
    pub mount_point: PathBuf,
}

/// Everything needed to assemble one build command.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Directory the build output goes to. A relative path is taken
    /// relative to `run_from_dir`.
    pub build_dir: PathBuf,

    /// Absolute directory the build command is issued from; the
    /// directory holding the documentation Makefile.
    pub run_from_dir: PathBuf,

    /// Target for the make command (e.g. "html").
    pub build_target: String,

    /// Version label, exported to the container as `current_version`.
    pub version: String,

    /// Number of parallel make jobs.
    pub num_make_jobs: u32,

    /// When set, sphinx warnings stay warnings; by default they are
    /// fatal (`-W --keep-going`).
    pub warnings_as_warnings: bool,

    /// Optional path to a sphinx conf.py (or its directory), passed
    /// through SPHINXOPTS as `-c '<dir>'`.
    pub conf_py_path: Option<PathBuf>,

    /// Container parameters; `None` builds directly on the host.
    pub container: Option<ContainerSettings>,
}

/// Assemble the command for one build.
pub fn assemble(req: &BuildRequest) -> Result<BuildCommand, BuildError> {
    let Some(settings) = &req.container else {
        let argv = make_command(&req.build_dir.display().to_string(), req)?;
        return Ok(BuildCommand::Make(argv));
    };

    let container_workdir = to_container_path(
        &req.run_from_dir,
        &settings.mount_point,
        "docbuild must be run from",
    )?;

    let build_dir_abs = if req.build_dir.is_absolute() {
        req.build_dir.clone()
    } else {
        normalize_path(&req.run_from_dir.join(&req.build_dir))
    };
    let container_build_dir = to_container_path(
        &build_dir_abs,
        &settings.mount_point,
        "build directory must be",
    )?;

    let inner = make_command(&container_build_dir, req)?;

    let platform = Platform::current();
    let engine = match settings.tool {
        Some(t) => t,
        None => tool::select_tool(platform)?,
    };
    let (mount_option, mount_value) = tool::mount_arg(engine, platform, &settings.mount_point);

    // --user so files the container creates are owned by the invoking
    // host user rather than root.
    let (uid, gid) = current_uid_gid();

    let run_flags = vec![
        "--user".to_string(),
        format!("{uid}:{gid}"),
        mount_option,
        mount_value,
        "--workdir".to_string(),
        container_workdir,
        // -t is needed for colorful output
        "-t".to_string(),
        "--rm".to_string(),
        "-e".to_string(),
        format!("current_version={}", req.version),
    ];

    Ok(BuildCommand::Container(ContainerCommand {
        tool: engine,
        name: settings.name.clone(),
        run_flags,
        image: settings.image.clone(),
        inner,
    }))
}

/// The inner make command, as an argument vector.
fn make_command(build_dir: &str, req: &BuildRequest) -> Result<Vec<String>, BuildError> {
    let mut sphinxopts = String::from("SPHINXOPTS=");
    if !req.warnings_as_warnings {
        sphinxopts.push_str("-W --keep-going ");
    }
    if let Some(conf_path) = &req.conf_py_path {
        if !conf_path.exists() {
            return Err(BuildError::ConfPathNotFound {
                path: conf_path.clone(),
            });
        }
        let conf_dir = if conf_path.is_dir() {
            conf_path.as_path()
        } else {
            conf_path.parent().unwrap_or_else(|| Path::new(""))
        };
        sphinxopts.push_str(&format!("-c '{}' ", conf_dir.display()));
    }
    let sphinxopts = sphinxopts.trim_end().to_string();

    Ok(vec![
        "make".to_string(),
        sphinxopts,
        format!("BUILDDIR={build_dir}"),
        "-j".to_string(),
        req.num_make_jobs.to_string(),
        req.build_target.clone(),
    ])
}

#[cfg(unix)]
fn current_uid_gid() -> (u32, u32) {
    (
        nix::unistd::getuid().as_raw(),
        nix::unistd::getgid().as_raw(),
    )
}

#[cfg(not(unix))]
fn current_uid_gid() -> (u32, u32) {
    (0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn basic_request() -> BuildRequest {
        BuildRequest {
            build_dir: PathBuf::from("/path/to/foo"),
            run_from_dir: PathBuf::from("/irrelevant/path"),
            build_target: "html".to_string(),
            version: "None".to_string(),
            num_make_jobs: 4,
            warnings_as_warnings: false,
            conf_py_path: None,
            container: None,
        }
    }

    #[test]
    fn test_basic_make_command() {
        let command = assemble(&basic_request()).unwrap();
        assert_eq!(
            command.to_argv(),
            [
                "make",
                "SPHINXOPTS=-W --keep-going",
                "BUILDDIR=/path/to/foo",
                "-j",
                "4",
                "html"
            ]
        );
    }

    #[test]
    fn test_warnings_as_warnings_empties_sphinxopts() {
        let req = BuildRequest {
            warnings_as_warnings: true,
            ..basic_request()
        };
        let argv = assemble(&req).unwrap().to_argv();
        assert_eq!(argv[1], "SPHINXOPTS=");
    }

    #[test]
    fn test_conf_py_path_file_uses_containing_dir() {
        let tmp = TempDir::new().unwrap();
        let conf = tmp.path().join("conf.py");
        fs::write(&conf, "").unwrap();

        let req = BuildRequest {
            conf_py_path: Some(conf),
            ..basic_request()
        };
        let argv = assemble(&req).unwrap().to_argv();
        assert_eq!(
            argv[1],
            format!(
                "SPHINXOPTS=-W --keep-going -c '{}'",
                tmp.path().display()
            )
        );
    }

    #[test]
    fn test_conf_py_path_dir_used_as_is() {
        let tmp = TempDir::new().unwrap();
        let req = BuildRequest {
            conf_py_path: Some(tmp.path().to_path_buf()),
            ..basic_request()
        };
        let argv = assemble(&req).unwrap().to_argv();
        assert_eq!(
            argv[1],
            format!(
                "SPHINXOPTS=-W --keep-going -c '{}'",
                tmp.path().display()
            )
        );
    }

    #[test]
    fn test_nonexistent_conf_py_path() {
        let req = BuildRequest {
            conf_py_path: Some(PathBuf::from("nwirefeirourboub")),
            ..basic_request()
        };
        assert!(matches!(
            assemble(&req).unwrap_err(),
            BuildError::ConfPathNotFound { .. }
        ));
    }

    #[test]
    fn test_container_command() {
        let mount_point = PathBuf::from("/home/alice");
        let req = BuildRequest {
            build_dir: PathBuf::from("/home/alice/repo/docs/versions/main"),
            run_from_dir: PathBuf::from("/home/alice/repo/doc"),
            version: "main".to_string(),
            container: Some(ContainerSettings {
                name: "foo".to_string(),
                image: "example.org/docs:v1".to_string(),
                tool: Some(ContainerTool::Docker),
                mount_point: mount_point.clone(),
            }),
            ..basic_request()
        };

        let (uid, gid) = current_uid_gid();
        let (mount_option, mount_value) =
            tool::mount_arg(ContainerTool::Docker, Platform::current(), &mount_point);

        let argv = assemble(&req).unwrap().to_argv();
        let mut expected: Vec<String> = ["docker", "run", "--name", "foo", "--user"]
            .map(String::from)
            .to_vec();
        expected.push(format!("{uid}:{gid}"));
        expected.push(mount_option);
        expected.push(mount_value);
        expected.extend(
            [
                "--workdir",
                "/home/user/mounted_home/repo/doc",
                "-t",
                "--rm",
                "-e",
                "current_version=main",
                "example.org/docs:v1",
                "make",
                "SPHINXOPTS=-W --keep-going",
                "BUILDDIR=/home/user/mounted_home/repo/docs/versions/main",
                "-j",
                "4",
                "html",
            ]
            .map(String::from),
        );
        assert_eq!(argv, expected);
    }

    #[test]
    fn test_container_relative_build_dir() {
        let req = BuildRequest {
            build_dir: PathBuf::from("../docs/versions/main"),
            run_from_dir: PathBuf::from("/home/alice/repo/doc"),
            container: Some(ContainerSettings {
                name: "foo".to_string(),
                image: "img".to_string(),
                tool: Some(ContainerTool::Docker),
                mount_point: PathBuf::from("/home/alice"),
            }),
            ..basic_request()
        };

        let argv = assemble(&req).unwrap().to_argv();
        assert!(argv
            .iter()
            .any(|a| a == "BUILDDIR=/home/user/mounted_home/repo/docs/versions/main"));
    }

    #[test]
    fn test_container_workdir_outside_mount() {
        let req = BuildRequest {
            build_dir: PathBuf::from("/home/alice/docs"),
            run_from_dir: PathBuf::from("/srv/elsewhere"),
            container: Some(ContainerSettings {
                name: "foo".to_string(),
                image: "img".to_string(),
                tool: Some(ContainerTool::Docker),
                mount_point: PathBuf::from("/home/alice"),
            }),
            ..basic_request()
        };

        match assemble(&req).unwrap_err() {
            BuildError::PathNotUnderMount { context, .. } => {
                assert_eq!(context, "docbuild must be run from");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
