use crate::domain::Module;
use crate::error::{Result, VerbumpError};
use globset::Glob;
use tracing::debug;

/// How the discovered module list is narrowed before execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleFilter {
    /// Keep everything
    All,
    /// All modules whose name matches exactly (names are not unique)
    Name(String),
    /// All modules whose name appears in the comma-separated list
    Names(Vec<String>),
    /// Glob matched against directory, name, or full path
    Pattern(String),
    /// Defer to the interactive selector
    Interactive,
}

/// What an interactive selector answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Indexes into the module list handed to the selector
    Subset(Vec<usize>),
    Cancelled,
}

/// Collaborator that asks the user which modules to operate on
///
/// Implemented by the interactive UI; tests supply scripted answers.
pub trait ModuleSelector {
    fn select(&self, modules: &[Module]) -> Result<Selection>;
}

/// Narrow a module list by a filter
///
/// Name and pattern filters are predicates: every matching module is
/// returned, and a filter that matches nothing is an error rather than an
/// empty result. The interactive path falls back to the full list when
/// `interactive` is false (CI, piped stdin, or an explicit all flag).
pub fn select_modules(
    modules: Vec<Module>,
    filter: &ModuleFilter,
    selector: &dyn ModuleSelector,
    interactive: bool,
) -> Result<Vec<Module>> {
    match filter {
        ModuleFilter::All => Ok(modules),

        ModuleFilter::Name(name) => {
            let matched: Vec<Module> = modules
                .into_iter()
                .filter(|m| &m.name == name)
                .collect();
            if matched.is_empty() {
                return Err(VerbumpError::selection(format!(
                    "no module named '{}'",
                    name
                )));
            }
            debug!(name = %name, count = matched.len(), "selected modules by name");
            Ok(matched)
        }

        ModuleFilter::Names(names) => {
            let matched: Vec<Module> = modules
                .into_iter()
                .filter(|m| names.iter().any(|n| n == &m.name))
                .collect();
            if matched.is_empty() {
                return Err(VerbumpError::selection(format!(
                    "no module matching any of: {}",
                    names.join(", ")
                )));
            }
            Ok(matched)
        }

        ModuleFilter::Pattern(pattern) => {
            let matcher = Glob::new(pattern)
                .map_err(|e| {
                    VerbumpError::selection(format!("invalid pattern '{}': {}", pattern, e))
                })?
                .compile_matcher();

            // First match wins per module: directory, then name, then path
            let matched: Vec<Module> = modules
                .into_iter()
                .filter(|m| {
                    matcher.is_match(&m.dir)
                        || matcher.is_match(&m.name)
                        || matcher.is_match(&m.version_file)
                })
                .collect();
            if matched.is_empty() {
                return Err(VerbumpError::selection(format!(
                    "pattern '{}' matched no modules",
                    pattern
                )));
            }
            Ok(matched)
        }

        ModuleFilter::Interactive => {
            if !interactive {
                return Ok(modules);
            }
            match selector.select(&modules)? {
                Selection::All => Ok(modules),
                Selection::Subset(indexes) => {
                    let picked: Vec<Module> = indexes
                        .into_iter()
                        .filter_map(|i| modules.get(i).cloned())
                        .collect();
                    if picked.is_empty() {
                        return Err(VerbumpError::selection("empty selection"));
                    }
                    Ok(picked)
                }
                Selection::Cancelled => {
                    Err(VerbumpError::selection("selection cancelled"))
                }
            }
        }
    }
}

/// Parse a comma-separated module list into a filter
pub fn filter_from_names(raw: &str) -> ModuleFilter {
    let names: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if names.len() == 1 {
        ModuleFilter::Name(names.into_iter().next().unwrap())
    } else {
        ModuleFilter::Names(names)
    }
}
