use crate::error::{Result, VerbumpError};
use crate::plugins::{AuditLog, AuditRecord};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log that appends one JSON object per line to a file
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileAuditLog { path: path.into() }
    }
}

impl AuditLog for FileAuditLog {
    fn record(&self, record: &AuditRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(|e| {
            VerbumpError::post_action("audit log", format!("Cannot serialize record: {}", e))
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                VerbumpError::post_action(
                    "audit log",
                    format!("Cannot open '{}': {}", self.path.display(), e),
                )
            })?;

        writeln!(file, "{}", line).map_err(|e| {
            VerbumpError::post_action(
                "audit log",
                format!("Cannot write '{}': {}", self.path.display(), e),
            )
        })?;

        Ok(())
    }
}

/// Build an audit record stamped with the current UTC time
pub fn record_now(
    module: &str,
    previous_version: &str,
    new_version: &str,
    bump_label: &str,
) -> AuditRecord {
    AuditRecord {
        timestamp: chrono::Utc::now().to_rfc3339(),
        module: module.to_string(),
        previous_version: previous_version.to_string(),
        new_version: new_version.to_string(),
        bump_label: bump_label.to_string(),
    }
}
