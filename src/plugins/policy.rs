use crate::domain::SemanticVersion;
use crate::error::{Result, VerbumpError};
use crate::plugins::VersionValidator;

/// Configurable version transition policy
///
/// Restricts which bump labels are allowed and optionally rejects
/// transitions that move the numeric version backwards.
pub struct PolicyValidator {
    allowed_labels: Vec<String>,
    forbid_downgrade: bool,
}

impl PolicyValidator {
    /// `allowed_labels` empty means every label is allowed
    pub fn new(allowed_labels: Vec<String>, forbid_downgrade: bool) -> Self {
        PolicyValidator {
            allowed_labels,
            forbid_downgrade,
        }
    }
}

fn numeric_tuple(v: &SemanticVersion) -> (u64, u64, u64) {
    (v.major, v.minor, v.patch)
}

impl VersionValidator for PolicyValidator {
    fn validate_transition(
        &self,
        previous: &SemanticVersion,
        next: &SemanticVersion,
        label: &str,
    ) -> Result<()> {
        if !self.allowed_labels.is_empty()
            && !self.allowed_labels.iter().any(|l| l == label)
        {
            return Err(VerbumpError::validation(
                "version policy",
                format!(
                    "bump label '{}' is not allowed (allowed: {})",
                    label,
                    self.allowed_labels.join(", ")
                ),
            ));
        }

        if self.forbid_downgrade && numeric_tuple(next) < numeric_tuple(previous) {
            return Err(VerbumpError::validation(
                "version policy",
                format!("downgrade {} -> {} is not allowed", previous, next),
            ));
        }

        Ok(())
    }
}
