use crate::domain::prerelease::{extract_pre_release_base, increment_pre_release};
use crate::domain::version::{BumpLabel, SemanticVersion};
use crate::error::{Result, VerbumpError};
use std::fmt;

/// A requested version transformation
///
/// Resolved against each module's current version, so the same request can
/// produce different targets across a multi-module run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpKind {
    /// Increment the patch component, producing a final version
    Patch,
    /// Increment the minor component, producing a final version
    Minor,
    /// Increment the major component, producing a final version
    Major,
    /// Heuristic bump: promote pre-releases, else patch (with the 0.9.0 case)
    Auto,
    /// Promote a pre-release to its final version
    Release,
    /// Advance the pre-release component; None derives the label from the
    /// current version, falling back to "rc"
    Pre(Option<String>),
}

impl BumpKind {
    /// Label for policy checks, audit records, and hook context
    pub fn label(&self) -> &'static str {
        match self {
            BumpKind::Patch => "patch",
            BumpKind::Minor => "minor",
            BumpKind::Major => "major",
            BumpKind::Auto => "auto",
            BumpKind::Release => "release",
            BumpKind::Pre(_) => "pre-release",
        }
    }

    /// Compute the target version for a module's current version
    pub fn plan(&self, current: &SemanticVersion) -> Result<SemanticVersion> {
        match self {
            BumpKind::Patch => Ok(current.bump(BumpLabel::Patch).as_final()),
            BumpKind::Minor => Ok(current.bump(BumpLabel::Minor).as_final()),
            BumpKind::Major => Ok(current.bump(BumpLabel::Major).as_final()),

            BumpKind::Auto => Ok(current.bump_next()),

            BumpKind::Release => {
                if !current.is_pre_release() {
                    return Err(VerbumpError::version(format!(
                        "{} is not a pre-release, nothing to promote",
                        current
                    )));
                }
                Ok(current.as_final())
            }

            BumpKind::Pre(label) => {
                let base = match label {
                    Some(base) => base.clone(),
                    None if current.is_pre_release() => {
                        extract_pre_release_base(&current.pre_release).to_string()
                    }
                    None => "rc".to_string(),
                };

                if current.is_pre_release() {
                    // Same numeric version, next pre-release iteration
                    let next_pre = increment_pre_release(&current.pre_release, &base);
                    Ok(SemanticVersion::with_parts(
                        current.major,
                        current.minor,
                        current.patch,
                        next_pre,
                        "",
                    ))
                } else {
                    // Start a new cycle on the next patch version
                    let bumped = current.bump(BumpLabel::Patch);
                    let next_pre = increment_pre_release("", &base);
                    Ok(SemanticVersion::with_parts(
                        bumped.major,
                        bumped.minor,
                        bumped.patch,
                        next_pre,
                        "",
                    ))
                }
            }
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpKind::Pre(Some(label)) => write!(f, "pre-release ({})", label),
            other => write!(f, "{}", other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> SemanticVersion {
        SemanticVersion::parse(text).unwrap()
    }

    #[test]
    fn test_label_bumps_produce_final_versions() {
        assert_eq!(BumpKind::Patch.plan(&v("1.2.3-rc.1")).unwrap(), v("1.2.4"));
        assert_eq!(BumpKind::Minor.plan(&v("1.2.3")).unwrap(), v("1.3.0"));
        assert_eq!(BumpKind::Major.plan(&v("2.5.7")).unwrap(), v("3.0.0"));
    }

    #[test]
    fn test_auto_delegates_to_bump_next() {
        assert_eq!(BumpKind::Auto.plan(&v("1.2.3-alpha.1")).unwrap(), v("1.2.3"));
        assert_eq!(BumpKind::Auto.plan(&v("0.9.0")).unwrap(), v("0.10.0"));
        assert_eq!(BumpKind::Auto.plan(&v("0.9.1")).unwrap(), v("0.9.2"));
    }

    #[test]
    fn test_release_promotes_pre_release() {
        assert_eq!(BumpKind::Release.plan(&v("1.2.3-rc.2")).unwrap(), v("1.2.3"));
    }

    #[test]
    fn test_release_on_final_version_is_error() {
        let err = BumpKind::Release.plan(&v("1.2.3")).unwrap_err();
        assert!(err.to_string().contains("not a pre-release"));
    }

    #[test]
    fn test_pre_advances_existing_cycle() {
        let kind = BumpKind::Pre(Some("rc".to_string()));
        assert_eq!(kind.plan(&v("1.2.3-rc.4")).unwrap(), v("1.2.3-rc.5"));
        assert_eq!(kind.plan(&v("1.2.3-rc-4")).unwrap(), v("1.2.3-rc-5"));
    }

    #[test]
    fn test_pre_label_switch_resets() {
        let kind = BumpKind::Pre(Some("beta".to_string()));
        assert_eq!(kind.plan(&v("1.2.3-alpha.7")).unwrap(), v("1.2.3-beta.1"));
    }

    #[test]
    fn test_pre_on_final_version_starts_cycle_on_next_patch() {
        let kind = BumpKind::Pre(Some("rc".to_string()));
        assert_eq!(kind.plan(&v("1.2.3")).unwrap(), v("1.2.4-rc.1"));
    }

    #[test]
    fn test_pre_derives_label_from_current_version() {
        let kind = BumpKind::Pre(None);
        assert_eq!(kind.plan(&v("1.2.3-beta.2")).unwrap(), v("1.2.3-beta.3"));
        assert_eq!(kind.plan(&v("1.2.3")).unwrap(), v("1.2.4-rc.1"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(BumpKind::Patch.label(), "patch");
        assert_eq!(BumpKind::Auto.label(), "auto");
        assert_eq!(BumpKind::Pre(None).label(), "pre-release");
    }
}
