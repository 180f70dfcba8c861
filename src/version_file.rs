//! Version file I/O
//!
//! A version file is single-line UTF-8: `major.minor.patch[-pre][+build]`
//! followed by a newline. Files are created with owner-only permissions.

use crate::domain::SemanticVersion;
use crate::error::{Result, VerbumpError};
use std::fs;
use std::path::Path;

/// Read and parse the version stored in a file
pub fn read_version(path: &Path) -> Result<SemanticVersion> {
    let contents = fs::read_to_string(path).map_err(|e| {
        VerbumpError::version(format!(
            "Cannot read version file '{}': {}",
            path.display(),
            e
        ))
    })?;
    SemanticVersion::parse(&contents)
}

/// Read the raw (trimmed) contents of a version file
pub fn read_raw(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)?;
    Ok(contents.trim().to_string())
}

/// Persist a version to a file, newline terminated
///
/// New files are created with mode 0o600; existing files keep their
/// permissions.
pub fn write_version(path: &Path, version: &SemanticVersion) -> Result<()> {
    let existed = path.exists();

    fs::write(path, format!("{}\n", version))?;

    #[cfg(unix)]
    if !existed {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    let _ = existed;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VERSION");

        let v = SemanticVersion::with_parts(1, 2, 3, "rc.1", "b5");
        write_version(&path, &v).unwrap();

        assert_eq!(read_version(&path).unwrap(), v);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1.2.3-rc.1+b5\n");
    }

    #[test]
    fn test_read_tolerates_surrounding_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VERSION");
        fs::write(&path, "  1.2.3 \n\n").unwrap();

        assert_eq!(read_version(&path).unwrap(), SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let err = read_version(Path::new("/nonexistent/VERSION")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/VERSION"));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VERSION");
        write_version(&path, &SemanticVersion::new(0, 1, 0)).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
