//! Workspace detection and module discovery/selection
//!
//! Decides whether an invocation targets one version file or a discovered
//! set of them, and narrows the discovered set to the modules the user
//! asked for.

pub mod discovery;
pub mod selection;

pub use discovery::discover_modules;
pub use selection::{filter_from_names, select_modules, ModuleFilter, ModuleSelector, Selection};

use crate::config::Config;
use crate::domain::Module;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Terminal classification of an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceKind {
    /// Operate on exactly this version file
    SingleModule(PathBuf),
    /// Operate on the discovered module set
    MultiModule(Vec<Module>),
    /// Discovery found nothing; the default path may not exist yet
    NoModules(PathBuf),
}

/// Execution mode, set once and authoritative
///
/// Fields of [ExecutionContext] belonging to the other mode may be
/// incidentally populated; consumers must key on the mode alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    SingleModule,
    MultiModule,
}

/// Everything the executor needs to know about what it is operating on
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub mode: ExecutionMode,
    /// Single-module target path (single mode)
    pub path: Option<PathBuf>,
    /// Ordered module list (multi mode)
    pub modules: Vec<Module>,
    /// Filter that produced the module list, for reporting
    pub filter: ModuleFilter,
}

impl ExecutionContext {
    pub fn single(path: PathBuf) -> Self {
        ExecutionContext {
            mode: ExecutionMode::SingleModule,
            path: Some(path),
            modules: Vec::new(),
            filter: ModuleFilter::All,
        }
    }

    pub fn multi(modules: Vec<Module>, filter: ModuleFilter) -> Self {
        ExecutionContext {
            mode: ExecutionMode::MultiModule,
            path: None,
            modules,
            filter,
        }
    }
}

/// Inputs steering workspace classification, usually straight from flags
#[derive(Debug, Clone, Default)]
pub struct DetectorArgs {
    /// Explicit version-file path; always wins over discovery
    pub path_override: Option<PathBuf>,
    /// Explicit "operate on every module" flag
    pub select_all: bool,
    /// Module name or comma-separated list
    pub module: Option<String>,
    /// Glob pattern
    pub pattern: Option<String>,
}

impl DetectorArgs {
    fn wants_multi(&self) -> bool {
        self.select_all || self.module.is_some() || self.pattern.is_some()
    }
}

/// Classify an invocation into single-module or multi-module operation
///
/// Precedence: an explicit path (flag or non-default config path) always
/// wins and pins single-module mode. Explicit multi-module selectors force
/// discovery. Otherwise the discovery result decides by count.
pub fn detect_workspace(root: &Path, config: &Config, args: &DetectorArgs) -> Result<WorkspaceKind> {
    if let Some(path) = &args.path_override {
        debug!(path = %path.display(), "explicit path override");
        return Ok(WorkspaceKind::SingleModule(path.clone()));
    }

    if config.version.is_overridden() {
        let path = root.join(&config.version.file);
        debug!(path = %path.display(), "configured version file");
        return Ok(WorkspaceKind::SingleModule(path));
    }

    let default_path = root.join(&config.version.file);

    if args.wants_multi() {
        let modules = discover_modules(root, &config.version.file, config.discovery.max_depth)?;
        return Ok(WorkspaceKind::MultiModule(modules));
    }

    if !config.discovery.enabled {
        return Ok(WorkspaceKind::SingleModule(default_path));
    }

    let modules = discover_modules(root, &config.version.file, config.discovery.max_depth)?;
    match modules.len() {
        0 => Ok(WorkspaceKind::NoModules(default_path)),
        1 => Ok(WorkspaceKind::SingleModule(
            modules.into_iter().next().unwrap().version_file,
        )),
        _ => Ok(WorkspaceKind::MultiModule(modules)),
    }
}
