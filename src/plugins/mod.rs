//! Plugin capability contracts and registry
//!
//! Each plugin kind is an independent, separately enabled capability behind
//! a narrow trait. The registry holds at most one instance per kind;
//! "registered but disabled" and "never registered" both resolve to `None`
//! at the lookup site, so callers never scatter enable-checks.
//!
//! All implementors must be `Send + Sync`: the multi-module executor shares
//! the registry across concurrently running pipelines.

pub mod audit;
pub mod changelog;
pub mod deps;
pub mod git_tags;
pub mod mock;
pub mod policy;
pub mod worktree_gate;

use crate::domain::SemanticVersion;
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Manages VCS tags for released versions
pub trait TagManager: Send + Sync {
    /// Check whether a tag with this exact name exists
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create a tag at the current HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Delete a tag by name
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// List all tag names
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Most recent tag reachable from HEAD, if any
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Push a tag to a remote
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}

/// Validates that a version transition is allowed by policy
pub trait VersionValidator: Send + Sync {
    fn validate_transition(
        &self,
        previous: &SemanticVersion,
        next: &SemanticVersion,
        label: &str,
    ) -> Result<()>;
}

/// Validates that release preconditions are met
pub trait ReleaseGate: Send + Sync {
    fn check(&self, module_dir: &std::path::Path) -> Result<()>;
}

/// A tracked file whose version text disagrees with the module version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyMismatch {
    pub file: PathBuf,
    pub detail: String,
}

/// Reports and optionally fixes version mismatches across auxiliary files
pub trait DependencyChecker: Send + Sync {
    /// Compare the current version against every tracked file
    fn check(&self, current: &SemanticVersion) -> Result<Vec<DependencyMismatch>>;

    /// Rewrite tracked files to the new version; returns the files touched
    fn sync(&self, previous: &SemanticVersion, next: &SemanticVersion) -> Result<Vec<PathBuf>>;

    /// Whether sync runs automatically after a successful bump
    fn auto_sync(&self) -> bool;
}

/// Produces changelog content for a version range
pub trait ChangelogGenerator: Send + Sync {
    /// Generate entries for `(previous_tag, next]`; a missing previous tag
    /// means the whole history
    fn generate(&self, previous_tag: Option<&str>, next: &SemanticVersion) -> Result<()>;
}

/// A structured record of a completed bump
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditRecord {
    pub timestamp: String,
    pub module: String,
    pub previous_version: String,
    pub new_version: String,
    pub bump_label: String,
}

/// Appends records of completed bumps
pub trait AuditLog: Send + Sync {
    fn record(&self, record: &AuditRecord) -> Result<()>;
}

/// A registered plugin and its enablement state
struct Slot<T: ?Sized> {
    instance: Arc<T>,
    enabled: bool,
}

impl<T: ?Sized> Slot<T> {
    fn active(&self) -> Option<&T> {
        self.enabled.then(|| self.instance.as_ref())
    }
}

/// Holds zero-or-one instance per plugin capability kind
///
/// Built once before execution and shared (behind an `Arc`) by every
/// concurrently running pipeline.
#[derive(Default)]
pub struct PluginRegistry {
    tag_manager: Option<Slot<dyn TagManager>>,
    version_validator: Option<Slot<dyn VersionValidator>>,
    release_gate: Option<Slot<dyn ReleaseGate>>,
    dependency_checker: Option<Slot<dyn DependencyChecker>>,
    changelog_generator: Option<Slot<dyn ChangelogGenerator>>,
    audit_log: Option<Slot<dyn AuditLog>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag manager; `enabled: false` keeps it dormant
    pub fn set_tag_manager(&mut self, instance: Arc<dyn TagManager>, enabled: bool) {
        self.tag_manager = Some(Slot { instance, enabled });
    }

    pub fn set_version_validator(&mut self, instance: Arc<dyn VersionValidator>, enabled: bool) {
        self.version_validator = Some(Slot { instance, enabled });
    }

    pub fn set_release_gate(&mut self, instance: Arc<dyn ReleaseGate>, enabled: bool) {
        self.release_gate = Some(Slot { instance, enabled });
    }

    pub fn set_dependency_checker(&mut self, instance: Arc<dyn DependencyChecker>, enabled: bool) {
        self.dependency_checker = Some(Slot { instance, enabled });
    }

    pub fn set_changelog_generator(
        &mut self,
        instance: Arc<dyn ChangelogGenerator>,
        enabled: bool,
    ) {
        self.changelog_generator = Some(Slot { instance, enabled });
    }

    pub fn set_audit_log(&mut self, instance: Arc<dyn AuditLog>, enabled: bool) {
        self.audit_log = Some(Slot { instance, enabled });
    }

    /// Enabled tag manager, or None
    pub fn tag_manager(&self) -> Option<&dyn TagManager> {
        self.tag_manager.as_ref().and_then(Slot::active)
    }

    pub fn version_validator(&self) -> Option<&dyn VersionValidator> {
        self.version_validator.as_ref().and_then(Slot::active)
    }

    pub fn release_gate(&self) -> Option<&dyn ReleaseGate> {
        self.release_gate.as_ref().and_then(Slot::active)
    }

    pub fn dependency_checker(&self) -> Option<&dyn DependencyChecker> {
        self.dependency_checker.as_ref().and_then(Slot::active)
    }

    pub fn changelog_generator(&self) -> Option<&dyn ChangelogGenerator> {
        self.changelog_generator.as_ref().and_then(Slot::active)
    }

    pub fn audit_log(&self) -> Option<&dyn AuditLog> {
        self.audit_log.as_ref().and_then(Slot::active)
    }
}
