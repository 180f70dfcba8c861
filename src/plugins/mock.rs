//! Mock plugin implementations for testing without git or the filesystem

use crate::domain::SemanticVersion;
use crate::error::{Result, VerbumpError};
use crate::plugins::{
    AuditLog, AuditRecord, ChangelogGenerator, DependencyChecker, DependencyMismatch, ReleaseGate,
    TagManager, VersionValidator,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mock tag manager backed by an in-memory tag set
pub struct MockTagManager {
    tags: Mutex<Vec<String>>,
    fail_create: bool,
}

impl MockTagManager {
    pub fn new() -> Self {
        MockTagManager {
            tags: Mutex::new(Vec::new()),
            fail_create: false,
        }
    }

    /// Pre-populate an existing tag
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.tags.lock().unwrap().push(name.into());
        self
    }

    /// Make create_tag fail (post-action failure scenarios)
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Tags created so far
    pub fn created(&self) -> Vec<String> {
        self.tags.lock().unwrap().clone()
    }
}

impl Default for MockTagManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TagManager for MockTagManager {
    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.lock().unwrap().iter().any(|t| t == name))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.fail_create {
            return Err(VerbumpError::tag("mock create failure"));
        }
        self.tags.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.tags.lock().unwrap().retain(|t| t != name);
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.lock().unwrap().clone())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.tags.lock().unwrap().last().cloned())
    }

    fn push_tag(&self, _remote: &str, _name: &str) -> Result<()> {
        Ok(())
    }
}

/// Mock validator that accepts or rejects every transition
pub struct MockValidator {
    reject_with: Option<String>,
}

impl MockValidator {
    pub fn accepting() -> Self {
        MockValidator { reject_with: None }
    }

    pub fn rejecting(message: impl Into<String>) -> Self {
        MockValidator {
            reject_with: Some(message.into()),
        }
    }
}

impl VersionValidator for MockValidator {
    fn validate_transition(
        &self,
        _previous: &SemanticVersion,
        _next: &SemanticVersion,
        _label: &str,
    ) -> Result<()> {
        match &self.reject_with {
            Some(msg) => Err(VerbumpError::validation("version policy", msg.clone())),
            None => Ok(()),
        }
    }
}

/// Mock release gate that passes or fails unconditionally
pub struct MockGate {
    fail_with: Option<String>,
}

impl MockGate {
    pub fn open() -> Self {
        MockGate { fail_with: None }
    }

    pub fn closed(message: impl Into<String>) -> Self {
        MockGate {
            fail_with: Some(message.into()),
        }
    }
}

impl ReleaseGate for MockGate {
    fn check(&self, _module_dir: &Path) -> Result<()> {
        match &self.fail_with {
            Some(msg) => Err(VerbumpError::validation("release gate", msg.clone())),
            None => Ok(()),
        }
    }
}

/// Mock dependency checker with scripted mismatches
pub struct MockDependencyChecker {
    mismatches: Vec<DependencyMismatch>,
    auto_sync: bool,
    synced: Mutex<Vec<PathBuf>>,
}

impl MockDependencyChecker {
    pub fn clean() -> Self {
        MockDependencyChecker {
            mismatches: Vec::new(),
            auto_sync: false,
            synced: Mutex::new(Vec::new()),
        }
    }

    pub fn with_mismatch(mut self, file: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        self.mismatches.push(DependencyMismatch {
            file: file.into(),
            detail: detail.into(),
        });
        self
    }

    pub fn auto_syncing(mut self) -> Self {
        self.auto_sync = true;
        self
    }

    /// Files "synced" so far
    pub fn synced(&self) -> Vec<PathBuf> {
        self.synced.lock().unwrap().clone()
    }
}

impl DependencyChecker for MockDependencyChecker {
    fn check(&self, _current: &SemanticVersion) -> Result<Vec<DependencyMismatch>> {
        Ok(self.mismatches.clone())
    }

    fn sync(&self, _previous: &SemanticVersion, _next: &SemanticVersion) -> Result<Vec<PathBuf>> {
        let files: Vec<PathBuf> = vec![PathBuf::from("mock-dep-file")];
        self.synced.lock().unwrap().extend(files.clone());
        Ok(files)
    }

    fn auto_sync(&self) -> bool {
        self.auto_sync
    }
}

/// Mock changelog generator recording requested ranges
pub struct MockChangelog {
    generated: Mutex<Vec<(Option<String>, String)>>,
    fail: bool,
}

impl MockChangelog {
    pub fn new() -> Self {
        MockChangelog {
            generated: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        MockChangelog {
            generated: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn generated(&self) -> Vec<(Option<String>, String)> {
        self.generated.lock().unwrap().clone()
    }
}

impl Default for MockChangelog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogGenerator for MockChangelog {
    fn generate(&self, previous_tag: Option<&str>, next: &SemanticVersion) -> Result<()> {
        if self.fail {
            return Err(VerbumpError::post_action("changelog", "mock failure"));
        }
        self.generated
            .lock()
            .unwrap()
            .push((previous_tag.map(String::from), next.to_string()));
        Ok(())
    }
}

/// Mock audit log collecting records in memory
pub struct MockAuditLog {
    records: Mutex<Vec<AuditRecord>>,
    fail: bool,
}

impl MockAuditLog {
    pub fn new() -> Self {
        MockAuditLog {
            records: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        MockAuditLog {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MockAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLog for MockAuditLog {
    fn record(&self, record: &AuditRecord) -> Result<()> {
        if self.fail {
            return Err(VerbumpError::post_action("audit log", "mock failure"));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
