use crate::domain::SemanticVersion;
use crate::error::{Result, VerbumpError};
use crate::plugins::{DependencyChecker, DependencyMismatch};
use std::fs;
use std::path::PathBuf;

/// Dependency checker over a list of tracked auxiliary files
///
/// A tracked file is consistent when it contains the module's current
/// version string at least once. Sync rewrites every occurrence of the old
/// version to the new one.
pub struct FileDependencyChecker {
    files: Vec<PathBuf>,
    auto_sync: bool,
}

impl FileDependencyChecker {
    pub fn new(files: Vec<PathBuf>, auto_sync: bool) -> Self {
        FileDependencyChecker { files, auto_sync }
    }
}

impl DependencyChecker for FileDependencyChecker {
    fn check(&self, current: &SemanticVersion) -> Result<Vec<DependencyMismatch>> {
        let needle = current.to_string();
        let mut mismatches = Vec::new();

        for file in &self.files {
            match fs::read_to_string(file) {
                Ok(contents) => {
                    if !contents.contains(&needle) {
                        mismatches.push(DependencyMismatch {
                            file: file.clone(),
                            detail: format!("does not contain version {}", needle),
                        });
                    }
                }
                Err(e) => mismatches.push(DependencyMismatch {
                    file: file.clone(),
                    detail: format!("cannot read: {}", e),
                }),
            }
        }

        Ok(mismatches)
    }

    fn sync(&self, previous: &SemanticVersion, next: &SemanticVersion) -> Result<Vec<PathBuf>> {
        let old = previous.to_string();
        let new = next.to_string();
        let mut touched = Vec::new();

        for file in &self.files {
            let contents = fs::read_to_string(file).map_err(|e| {
                VerbumpError::post_action(
                    "dependency sync",
                    format!("Cannot read '{}': {}", file.display(), e),
                )
            })?;

            if !contents.contains(&old) {
                continue;
            }

            let updated = contents.replace(&old, &new);
            fs::write(file, updated).map_err(|e| {
                VerbumpError::post_action(
                    "dependency sync",
                    format!("Cannot write '{}': {}", file.display(), e),
                )
            })?;
            touched.push(file.clone());
        }

        Ok(touched)
    }

    fn auto_sync(&self) -> bool {
        self.auto_sync
    }
}
