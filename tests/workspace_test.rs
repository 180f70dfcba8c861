// tests/workspace_test.rs
//
// Workspace classification and module discovery/selection against real
// directory trees.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use verbump::config::Config;
use verbump::domain::Module;
use verbump::error::Result;
use verbump::workspace::{
    detect_workspace, discover_modules, select_modules, DetectorArgs, ModuleFilter,
    ModuleSelector, Selection, WorkspaceKind,
};

fn write_version(dir: &Path, rel: &str, version: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("{}\n", version)).unwrap();
}

struct NeverAsked;

impl ModuleSelector for NeverAsked {
    fn select(&self, _modules: &[Module]) -> Result<Selection> {
        panic!("selector must not be consulted");
    }
}

#[test]
fn test_discovery_builds_module_records() {
    let dir = TempDir::new().unwrap();
    write_version(dir.path(), "services/api/VERSION", "1.0.0");
    write_version(dir.path(), "services/web/VERSION", "2.1.0");

    let modules = discover_modules(dir.path(), "VERSION", 5).unwrap();
    assert_eq!(modules.len(), 2);

    assert_eq!(modules[0].name, "api");
    assert_eq!(modules[0].current_version, "1.0.0");
    assert!(modules[0].version_file.ends_with("services/api/VERSION"));
    assert!(modules[0].rel_path.starts_with("services"));
}

#[test]
fn test_duplicate_leaf_names_filter_returns_both() {
    let dir = TempDir::new().unwrap();
    write_version(dir.path(), "backend/core/VERSION", "1.0.0");
    write_version(dir.path(), "frontend/core/VERSION", "2.0.0");
    write_version(dir.path(), "api/VERSION", "3.0.0");

    let modules = discover_modules(dir.path(), "VERSION", 5).unwrap();
    let selected = select_modules(
        modules,
        &ModuleFilter::Name("core".to_string()),
        &NeverAsked,
        false,
    )
    .unwrap();

    assert_eq!(selected.len(), 2);
    let versions: Vec<&str> = selected
        .iter()
        .map(|m| m.current_version.as_str())
        .collect();
    assert_eq!(versions, vec!["1.0.0", "2.0.0"]);
}

#[test]
fn test_filter_matching_nothing_is_error() {
    let dir = TempDir::new().unwrap();
    write_version(dir.path(), "api/VERSION", "1.0.0");

    let modules = discover_modules(dir.path(), "VERSION", 5).unwrap();
    let result = select_modules(
        modules,
        &ModuleFilter::Pattern("no-such-*".to_string()),
        &NeverAsked,
        false,
    );

    assert!(result.is_err());
}

#[test]
fn test_detection_precedence_override_beats_discovery() {
    let dir = TempDir::new().unwrap();
    write_version(dir.path(), "a/VERSION", "1.0.0");
    write_version(dir.path(), "b/VERSION", "1.0.0");

    let args = DetectorArgs {
        path_override: Some(dir.path().join("a/VERSION")),
        ..Default::default()
    };
    let kind = detect_workspace(dir.path(), &Config::default(), &args).unwrap();

    assert!(matches!(kind, WorkspaceKind::SingleModule(_)));
}

#[test]
fn test_detection_by_discovery_count() {
    let dir = TempDir::new().unwrap();
    let config = Config::default();
    let args = DetectorArgs::default();

    // Zero
    let kind = detect_workspace(dir.path(), &config, &args).unwrap();
    assert!(matches!(kind, WorkspaceKind::NoModules(_)));

    // One
    write_version(dir.path(), "api/VERSION", "1.0.0");
    let kind = detect_workspace(dir.path(), &config, &args).unwrap();
    assert!(matches!(kind, WorkspaceKind::SingleModule(_)));

    // Many
    write_version(dir.path(), "web/VERSION", "2.0.0");
    let kind = detect_workspace(dir.path(), &config, &args).unwrap();
    assert!(matches!(kind, WorkspaceKind::MultiModule(m) if m.len() == 2));
}

#[test]
fn test_named_selector_forces_multi_mode() {
    let dir = TempDir::new().unwrap();
    write_version(dir.path(), "api/VERSION", "1.0.0");

    let args = DetectorArgs {
        module: Some("api".to_string()),
        ..Default::default()
    };
    let kind = detect_workspace(dir.path(), &Config::default(), &args).unwrap();

    // Even a single module stays in multi mode under an explicit selector
    assert!(matches!(kind, WorkspaceKind::MultiModule(m) if m.len() == 1));
}

#[test]
fn test_glob_selection_over_discovered_tree() {
    let dir = TempDir::new().unwrap();
    write_version(dir.path(), "services/api/VERSION", "1.0.0");
    write_version(dir.path(), "services/web/VERSION", "1.0.0");
    write_version(dir.path(), "tools/cli/VERSION", "1.0.0");

    let modules = discover_modules(dir.path(), "VERSION", 5).unwrap();
    let selected = select_modules(
        modules,
        &ModuleFilter::Pattern("**/services/**".to_string()),
        &NeverAsked,
        false,
    )
    .unwrap();

    assert_eq!(selected.len(), 2);
    assert!(selected.iter().all(|m| m.dir.starts_with(dir.path().join("services"))));
}
