use std::path::{Path, PathBuf};

/// A directory tracked by its own version file in a multi-module workspace
///
/// Identity is the version-file path. The name is the containing directory's
/// base name and is NOT unique: monorepos routinely have several leaf
/// directories called `api` or `core`, so anything filtering by name must
/// treat the filter as a predicate over all modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Containing directory's base name (display / filter attribute)
    pub name: String,
    /// Absolute path to the module's version file
    pub version_file: PathBuf,
    /// Version-file path relative to the workspace root
    pub rel_path: PathBuf,
    /// Directory containing the version file
    pub dir: PathBuf,
    /// Version string as last read from the file
    pub current_version: String,
}

impl Module {
    /// Build a module record for a version file under a workspace root
    pub fn new(
        root: &Path,
        version_file: PathBuf,
        current_version: impl Into<String>,
    ) -> Self {
        let dir = version_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("root"));

        let rel_path = version_file
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| version_file.clone());

        Module {
            name,
            version_file,
            rel_path,
            dir,
            current_version: current_version.into(),
        }
    }

    /// Display label: relative path when it adds information, else the name
    pub fn label(&self) -> String {
        let rel = self.rel_path.display().to_string();
        if rel.is_empty() || rel == self.name {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, rel)
        }
    }
}
