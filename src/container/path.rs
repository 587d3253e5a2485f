//! Translation of host paths into container-space paths.

use std::path::Path;

use crate::container::CONTAINER_HOME;
use crate::core::errors::BuildError;

/// Map an absolute host path to its equivalent under the container
/// mount.
///
/// `local_path` must be absolute and must live under (or be equal to)
/// `mount_point`, which is the single host directory bound to
/// [`CONTAINER_HOME`]. The result always uses forward slashes; the
/// container filesystem is POSIX-style even when the host is not.
///
/// `context` prefixes the error message when the containment check
/// fails, so each call site can say what had to be under the mount.
pub fn to_container_path(
    local_path: &Path,
    mount_point: &Path,
    context: &str,
) -> Result<String, BuildError> {
    if !local_path.is_absolute() {
        return Err(BuildError::NotAbsolutePath {
            path: local_path.to_path_buf(),
        });
    }

    let rel = local_path
        .strip_prefix(mount_point)
        .map_err(|_| BuildError::PathNotUnderMount {
            context: context.to_string(),
            mount_point: mount_point.to_path_buf(),
        })?;

    // Deliberately join with "/" rather than the native separator: the
    // result must be valid in the container's filesystem.
    let mut container_path = String::from(CONTAINER_HOME);
    for component in rel.components() {
        container_path.push('/');
        container_path.push_str(&component.as_os_str().to_string_lossy());
    }
    Ok(container_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_translates_relative_suffix() {
        let path = PathBuf::from("/home/alice/repo/doc");
        let mount = PathBuf::from("/home/alice");
        assert_eq!(
            to_container_path(&path, &mount, "must be").unwrap(),
            "/home/user/mounted_home/repo/doc"
        );
    }

    #[test]
    fn test_mount_point_itself_yields_bare_anchor() {
        let mount = PathBuf::from("/home/alice");
        assert_eq!(
            to_container_path(&mount, &mount, "must be").unwrap(),
            "/home/user/mounted_home"
        );
    }

    #[test]
    fn test_string_prefix_is_not_containment() {
        // /home/user2 starts with the string "/home/user" but is not a
        // descendant of it.
        let path = PathBuf::from("/home/user2/x");
        let mount = PathBuf::from("/home/user");
        let err = to_container_path(&path, &mount, "build directory must be").unwrap_err();
        match err {
            BuildError::PathNotUnderMount {
                context,
                mount_point,
            } => {
                assert_eq!(context, "build directory must be");
                assert_eq!(mount_point, mount);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_outside_mount_fails() {
        let path = PathBuf::from("/tmp/elsewhere");
        let mount = PathBuf::from("/home/alice");
        assert!(matches!(
            to_container_path(&path, &mount, "must be").unwrap_err(),
            BuildError::PathNotUnderMount { .. }
        ));
    }

    #[test]
    fn test_relative_path_rejected() {
        let path = PathBuf::from("relative/doc");
        let mount = PathBuf::from("/home/alice");
        assert!(matches!(
            to_container_path(&path, &mount, "must be").unwrap_err(),
            BuildError::NotAbsolutePath { .. }
        ));
    }
}
