use crate::domain::Module;
use crate::error::Result;
use crate::version_file;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Walk a directory tree for version files and build module records
///
/// `max_depth` bounds the recursion (1 = the root directory only). Hidden
/// directories are skipped. Modules come back sorted by relative path so
/// executor input order is deterministic across runs.
pub fn discover_modules(root: &Path, file_name: &str, max_depth: usize) -> Result<Vec<Module>> {
    let mut modules = Vec::new();

    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry.file_name(), entry.depth()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() != std::ffi::OsStr::new(file_name) {
            continue;
        }

        let path = entry.path().to_path_buf();
        let current_version = version_file::read_raw(&path).unwrap_or_default();
        modules.push(Module::new(root, path, current_version));
    }

    modules.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    debug!(count = modules.len(), root = %root.display(), "discovered modules");
    Ok(modules)
}

fn is_hidden(name: &std::ffi::OsStr, depth: usize) -> bool {
    // The root itself may be hidden (e.g. scanning from "."); only skip
    // hidden entries below it
    depth > 0
        && name
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_version(dir: &Path, rel: &str, version: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("{}\n", version)).unwrap();
    }

    #[test]
    fn test_discovers_nested_version_files() {
        let dir = TempDir::new().unwrap();
        write_version(dir.path(), "api/VERSION", "1.0.0");
        write_version(dir.path(), "web/VERSION", "2.0.0");
        write_version(dir.path(), "services/auth/VERSION", "0.3.0");

        let modules = discover_modules(dir.path(), "VERSION", 5).unwrap();
        assert_eq!(modules.len(), 3);

        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["api", "auth", "web"]);
        assert_eq!(modules[0].current_version, "1.0.0");
    }

    #[test]
    fn test_respects_max_depth() {
        let dir = TempDir::new().unwrap();
        write_version(dir.path(), "api/VERSION", "1.0.0");
        write_version(dir.path(), "deep/a/b/c/VERSION", "9.9.9");

        let modules = discover_modules(dir.path(), "VERSION", 2).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "api");
    }

    #[test]
    fn test_skips_hidden_directories() {
        let dir = TempDir::new().unwrap();
        write_version(dir.path(), "api/VERSION", "1.0.0");
        write_version(dir.path(), ".git/VERSION", "6.6.6");

        let modules = discover_modules(dir.path(), "VERSION", 5).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "api");
    }

    #[test]
    fn test_duplicate_leaf_names_both_found() {
        let dir = TempDir::new().unwrap();
        write_version(dir.path(), "backend/core/VERSION", "1.0.0");
        write_version(dir.path(), "frontend/core/VERSION", "2.0.0");

        let modules = discover_modules(dir.path(), "VERSION", 5).unwrap();
        assert_eq!(modules.len(), 2);
        assert!(modules.iter().all(|m| m.name == "core"));
    }

    #[test]
    fn test_custom_file_name() {
        let dir = TempDir::new().unwrap();
        write_version(dir.path(), "api/version.txt", "1.0.0");
        write_version(dir.path(), "web/VERSION", "2.0.0");

        let modules = discover_modules(dir.path(), "version.txt", 5).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "api");
    }

    #[test]
    fn test_empty_tree_finds_nothing() {
        let dir = TempDir::new().unwrap();
        let modules = discover_modules(dir.path(), "VERSION", 5).unwrap();
        assert!(modules.is_empty());
    }
}
