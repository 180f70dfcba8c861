//! The bump pipeline
//!
//! Wraps every version bump in a fixed sequence: pre-release hooks and
//! validation gates first, then the single mutating step (persisting the
//! new version), then best-effort post-bump actions. An abort anywhere
//! before persistence leaves the module byte-for-byte unchanged. After
//! persistence nothing is rolled back: a tag or changelog may already be
//! visible to other clones, so compensating transactions would lie.

use crate::domain::{Module, SemanticVersion, TagTemplate};
use crate::error::{Result, VerbumpError};
use crate::hooks::{HookContext, HookExecutor};
use crate::plugins::{
    audit, AuditLog as _, ChangelogGenerator as _, DependencyChecker as _, PluginRegistry,
    ReleaseGate as _, TagManager as _, VersionValidator as _,
};
use crate::version_file;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A post-bump action that failed after the version change was persisted
///
/// Carries the action name so every failure is attributed to its stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostActionWarning {
    pub action: String,
    pub message: String,
}

/// Outcome of a successful pipeline run
///
/// `warnings` holds post-bump action failures; they did not undo the
/// version change and do not fail the bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    pub previous_version: SemanticVersion,
    pub new_version: SemanticVersion,
    pub warnings: Vec<PostActionWarning>,
}

/// Pipeline settings that do not vary per module
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub tag_template: TagTemplate,
    /// Remote to push created tags to; empty means no push
    pub push_remote: String,
    /// Pre-release hook commands, run in order before anything else
    pub hooks: Vec<String>,
    /// Globally skip hooks
    pub skip_hooks: bool,
    /// Report the would-be transition without mutating anything
    pub dry_run: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            tag_template: TagTemplate::new("v{version}"),
            push_remote: String::new(),
            hooks: Vec::new(),
            skip_hooks: false,
            dry_run: false,
        }
    }
}

/// Runs the fixed bump sequence for one module
pub struct BumpPipeline {
    registry: Arc<PluginRegistry>,
    hook_executor: HookExecutor,
    options: PipelineOptions,
}

impl BumpPipeline {
    pub fn new(
        registry: Arc<PluginRegistry>,
        hook_executor: HookExecutor,
        options: PipelineOptions,
    ) -> Self {
        BumpPipeline {
            registry,
            hook_executor,
            options,
        }
    }

    /// Run the pipeline: hooks, gates, persist, post-bump actions
    ///
    /// `previous` is the version currently stored in the module's version
    /// file; `next` is the version the bump should produce; `label` names
    /// the bump kind for policy checks and records.
    pub async fn run(
        &self,
        module: &Module,
        previous: &SemanticVersion,
        next: &SemanticVersion,
        label: &str,
    ) -> Result<BumpOutcome> {
        debug!(module = %module.name, %previous, %next, label, "starting bump");

        // Hooks precede every gate: nothing may mutate before they pass
        if !self.options.skip_hooks && !self.options.hooks.is_empty() {
            let context = HookContext {
                module: module.name.clone(),
                previous_version: previous.to_string(),
                new_version: next.to_string(),
                bump_label: label.to_string(),
            };
            self.hook_executor
                .execute_all(&self.options.hooks, &module.dir, &context)
                .await?;
        }

        self.run_gates(module, previous, next, label)?;

        if self.options.dry_run {
            info!(module = %module.name, "dry run: would bump {} -> {}", previous, next);
            return Ok(BumpOutcome {
                previous_version: previous.clone(),
                new_version: next.clone(),
                warnings: Vec::new(),
            });
        }

        // Point of no return: failures past this line are reported but the
        // version change stands
        version_file::write_version(&module.version_file, next)?;
        info!(module = %module.name, "persisted version {}", next);

        let warnings = self.run_post_actions(module, previous, next, label);

        Ok(BumpOutcome {
            previous_version: previous.clone(),
            new_version: next.clone(),
            warnings,
        })
    }

    /// Pre-bump validation gates, short-circuiting on the first failure
    fn run_gates(
        &self,
        module: &Module,
        previous: &SemanticVersion,
        next: &SemanticVersion,
        label: &str,
    ) -> Result<()> {
        if let Some(gate) = self.registry.release_gate() {
            gate.check(&module.dir)?;
        }

        if let Some(validator) = self.registry.version_validator() {
            validator.validate_transition(previous, next, label)?;
        }

        if let Some(checker) = self.registry.dependency_checker() {
            let mismatches = checker.check(previous)?;
            if !mismatches.is_empty() {
                let listing = mismatches
                    .iter()
                    .map(|m| format!("{}: {}", m.file.display(), m.detail))
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(VerbumpError::validation(
                    "dependency consistency",
                    listing,
                ));
            }
        }

        if let Some(tags) = self.registry.tag_manager() {
            let tag_name = self.options.tag_template.format(next);
            if tags.tag_exists(&tag_name)? {
                return Err(VerbumpError::validation(
                    "tag availability",
                    format!("tag '{}' already exists", tag_name),
                ));
            }
        }

        Ok(())
    }

    /// Post-bump actions in fixed order; each failure is collected, none
    /// aborts the remaining actions
    fn run_post_actions(
        &self,
        module: &Module,
        previous: &SemanticVersion,
        next: &SemanticVersion,
        label: &str,
    ) -> Vec<PostActionWarning> {
        let mut warnings = Vec::new();
        let mut record_failure = |action: &str, err: VerbumpError| {
            warn!(module = %module.name, action, "post-bump action failed: {}", err);
            warnings.push(PostActionWarning {
                action: action.to_string(),
                message: err.to_string(),
            });
        };

        if let Some(checker) = self.registry.dependency_checker() {
            if checker.auto_sync() {
                match checker.sync(previous, next) {
                    Ok(files) => debug!(module = %module.name, count = files.len(), "synced dependency files"),
                    Err(e) => record_failure("dependency sync", e),
                }
            }
        }

        if let Some(changelog) = self.registry.changelog_generator() {
            let previous_tag = self
                .registry
                .tag_manager()
                .and_then(|tags| tags.latest_tag().ok())
                .flatten();
            if let Err(e) = changelog.generate(previous_tag.as_deref(), next) {
                record_failure("changelog", e);
            }
        }

        if let Some(log) = self.registry.audit_log() {
            let record = audit::record_now(
                &module.name,
                &previous.to_string(),
                &next.to_string(),
                label,
            );
            if let Err(e) = log.record(&record) {
                record_failure("audit log", e);
            }
        }

        if let Some(tags) = self.registry.tag_manager() {
            let tag_name = self.options.tag_template.format(next);
            match tags.create_tag(&tag_name) {
                Ok(()) => {
                    info!(module = %module.name, tag = %tag_name, "created tag");
                    if !self.options.push_remote.is_empty() {
                        if let Err(e) = tags.push_tag(&self.options.push_remote, &tag_name) {
                            record_failure("tag push", e);
                        }
                    }
                }
                Err(e) => record_failure("tag create", e),
            }
        }

        warnings
    }
}
