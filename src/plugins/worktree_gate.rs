use crate::error::{Result, VerbumpError};
use crate::plugins::ReleaseGate;
use std::path::Path;

/// Release gate requiring a clean git worktree
///
/// Uncommitted changes in the module's repository abort the bump before any
/// mutation happens. The repository is discovered per check so the gate
/// works for modules living in different repositories.
pub struct CleanWorktreeGate;

impl CleanWorktreeGate {
    pub fn new() -> Self {
        CleanWorktreeGate
    }
}

impl Default for CleanWorktreeGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseGate for CleanWorktreeGate {
    fn check(&self, module_dir: &Path) -> Result<()> {
        let repo = git2::Repository::discover(module_dir).map_err(|e| {
            VerbumpError::validation(
                "release gate",
                format!("'{}' is not inside a git repository: {}", module_dir.display(), e),
            )
        })?;

        let mut options = git2::StatusOptions::new();
        options.include_untracked(false);

        let statuses = repo.statuses(Some(&mut options))?;
        let dirty = statuses
            .iter()
            .filter(|entry| !entry.status().is_ignored())
            .count();

        if dirty > 0 {
            return Err(VerbumpError::validation(
                "release gate",
                format!("worktree has {} uncommitted change(s)", dirty),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn committed_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }

        fs::write(dir.path().join("file.txt"), "content\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = repo.signature().unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();

        dir
    }

    #[test]
    fn test_clean_worktree_passes() {
        let dir = committed_repo();
        assert!(CleanWorktreeGate::new().check(dir.path()).is_ok());
    }

    #[test]
    fn test_modified_file_fails_gate() {
        let dir = committed_repo();
        fs::write(dir.path().join("file.txt"), "modified\n").unwrap();

        let err = CleanWorktreeGate::new().check(dir.path()).unwrap_err();
        assert!(err.to_string().contains("uncommitted"));
    }

    #[test]
    fn test_outside_repository_fails_gate() {
        let dir = TempDir::new().unwrap();
        assert!(CleanWorktreeGate::new().check(dir.path()).is_err());
    }
}
