//! Pre-release hooks
//!
//! An ordered list of externally defined shell commands run before any
//! version mutation. The first failure aborts the whole operation; hooks
//! can be globally skipped.

pub mod executor;

pub use executor::HookExecutor;

use std::collections::HashMap;
use std::time::Duration;

/// Default timeout applied when the caller supplies no deadline
pub const DEFAULT_HOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Context information passed to a hook command
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Module name the bump applies to
    pub module: String,
    /// Version before the bump
    pub previous_version: String,
    /// Version the bump will produce
    pub new_version: String,
    /// Bump kind label (patch, minor, major, ...)
    pub bump_label: String,
}

impl HookContext {
    /// Convert context to environment variables for the hook command
    ///
    /// Maps context fields to VERBUMP_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert("VERBUMP_MODULE".to_string(), self.module.clone());
        env.insert(
            "VERBUMP_PREVIOUS_VERSION".to_string(),
            self.previous_version.clone(),
        );
        env.insert("VERBUMP_NEW_VERSION".to_string(), self.new_version.clone());
        env.insert("VERBUMP_BUMP_LABEL".to_string(), self.bump_label.clone());

        env
    }
}
