use crate::error::{Result, VerbumpError};
use std::fmt;
use std::str::FromStr;

/// Longest version string accepted by [SemanticVersion::parse].
/// Guards against pathological input reaching the component parsers.
const MAX_INPUT_LEN: usize = 128;

/// Semantic version representation
///
/// Canonical string form is `major.minor.patch[-preRelease][+build]`.
/// Immutable value type: every transformation produces a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release identifier without the leading `-`; empty when absent
    pub pre_release: String,
    /// Build metadata without the leading `+`; empty when absent
    pub build: String,
}

impl SemanticVersion {
    /// Create a new final version (no pre-release, no build metadata)
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre_release: String::new(),
            build: String::new(),
        }
    }

    /// Create a version with explicit pre-release and build components
    pub fn with_parts(
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: impl Into<String>,
        build: impl Into<String>,
    ) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre_release: pre_release.into(),
            build: build.into(),
        }
    }

    /// Parse a version string (e.g., "v1.2.3-rc.1+build.5")
    ///
    /// Input is trimmed first and rejected when longer than 128 characters.
    /// A leading `v` is accepted and stripped. The remainder must match
    /// `MAJOR.MINOR.PATCH[-PRE][+BUILD]` where each numeric component is a
    /// non-negative integer and PRE/BUILD, when present, are non-empty runs
    /// of `[0-9A-Za-z.-]`.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();

        if trimmed.len() > MAX_INPUT_LEN {
            return Err(VerbumpError::version(format!(
                "Version string too long ({} characters, limit {})",
                trimmed.len(),
                MAX_INPUT_LEN
            )));
        }
        if trimmed.is_empty() {
            return Err(VerbumpError::version("Empty version string"));
        }

        let clean = trimmed.strip_prefix('v').unwrap_or(trimmed);

        // Build metadata starts at the first '+', pre-release at the first
        // '-' before it. Both may themselves contain '.' and '-'.
        let (rest, build) = match clean.split_once('+') {
            Some((head, build)) => (head, build),
            None => (clean, ""),
        };
        let (core, pre_release) = match rest.split_once('-') {
            Some((head, pre)) => (head, pre),
            None => (rest, ""),
        };

        if clean.contains('+') && build.is_empty() {
            return Err(VerbumpError::version(format!(
                "Invalid version '{}': empty build metadata",
                trimmed
            )));
        }
        if rest.contains('-') && pre_release.is_empty() {
            return Err(VerbumpError::version(format!(
                "Invalid version '{}': empty pre-release",
                trimmed
            )));
        }

        for (label, part) in [("pre-release", pre_release), ("build metadata", build)] {
            if !part.is_empty() && !is_valid_identifier(part) {
                return Err(VerbumpError::version(format!(
                    "Invalid {} '{}' in version '{}'",
                    label, part, trimmed
                )));
            }
        }

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(VerbumpError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                trimmed
            )));
        }

        let major = parse_component("major", parts[0])?;
        let minor = parse_component("minor", parts[1])?;
        let patch = parse_component("patch", parts[2])?;

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            pre_release: pre_release.to_string(),
            build: build.to_string(),
        })
    }

    /// Bump version according to the given label
    ///
    /// Pre-release and build metadata are left untouched by this primitive;
    /// callers reset them explicitly when the bump should produce a final
    /// version.
    pub fn bump(&self, label: BumpLabel) -> Self {
        match label {
            BumpLabel::Major => SemanticVersion {
                major: self.major + 1,
                minor: 0,
                patch: 0,
                pre_release: self.pre_release.clone(),
                build: self.build.clone(),
            },
            BumpLabel::Minor => SemanticVersion {
                major: self.major,
                minor: self.minor + 1,
                patch: 0,
                pre_release: self.pre_release.clone(),
                build: self.build.clone(),
            },
            BumpLabel::Patch => SemanticVersion {
                major: self.major,
                minor: self.minor,
                patch: self.patch + 1,
                pre_release: self.pre_release.clone(),
                build: self.build.clone(),
            },
        }
    }

    /// Heuristic "auto" bump
    ///
    /// A pre-release version is promoted to final by stripping the
    /// pre-release component (build metadata is the caller's business).
    /// A plain `0.9.0` widens to `0.10.0` to ease pre-1.0 projects toward
    /// 1.0; this applies to exactly `0.9.0`, not to `0.9.x` for `x > 0`.
    /// Anything else takes an ordinary patch bump.
    pub fn bump_next(&self) -> Self {
        if !self.pre_release.is_empty() {
            return SemanticVersion {
                pre_release: String::new(),
                ..self.clone()
            };
        }

        if self.major == 0 && self.minor == 9 && self.patch == 0 {
            return SemanticVersion {
                minor: 10,
                patch: 0,
                ..self.clone()
            };
        }

        self.bump(BumpLabel::Patch)
    }

    /// Produce a copy with the given pre-release component
    pub fn with_pre_release(&self, pre_release: impl Into<String>) -> Self {
        SemanticVersion {
            pre_release: pre_release.into(),
            ..self.clone()
        }
    }

    /// Produce a final copy: pre-release and build metadata cleared
    pub fn as_final(&self) -> Self {
        SemanticVersion {
            pre_release: String::new(),
            build: String::new(),
            ..self.clone()
        }
    }

    /// True when the version carries a pre-release component
    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }
}

fn parse_component(name: &str, part: &str) -> Result<u64> {
    if part.is_empty() {
        return Err(VerbumpError::version(format!(
            "Missing {} version component",
            name
        )));
    }
    part.parse::<u64>()
        .map_err(|_| VerbumpError::version(format!("Invalid {} version: {}", name, part)))
}

fn is_valid_identifier(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = VerbumpError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

/// Version bump label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLabel {
    Major,
    Minor,
    Patch,
}

impl BumpLabel {
    /// Get the label as a string
    pub fn name(&self) -> &'static str {
        match self {
            BumpLabel::Major => "major",
            BumpLabel::Minor => "minor",
            BumpLabel::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_parse_with_v_prefix() {
        let v = SemanticVersion::parse("v1.2.3").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let v = SemanticVersion::parse("  1.2.3\n").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_parse_pre_release() {
        let v = SemanticVersion::parse("1.2.3-rc.1").unwrap();
        assert_eq!(v.pre_release, "rc.1");
        assert_eq!(v.build, "");
    }

    #[test]
    fn test_parse_build_metadata() {
        let v = SemanticVersion::parse("1.2.3+build.5").unwrap();
        assert_eq!(v.pre_release, "");
        assert_eq!(v.build, "build.5");
    }

    #[test]
    fn test_parse_pre_release_and_build() {
        let v = SemanticVersion::parse("1.2.3-beta-2+exp.sha.5114f85").unwrap();
        assert_eq!(v.pre_release, "beta-2");
        assert_eq!(v.build, "exp.sha.5114f85");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(SemanticVersion::parse("1.2").is_err());
        assert!(SemanticVersion::parse("1.2.3.4").is_err());
        assert!(SemanticVersion::parse("a.b.c").is_err());
        assert!(SemanticVersion::parse("").is_err());
        assert!(SemanticVersion::parse("1.2.3-").is_err());
        assert!(SemanticVersion::parse("1.2.3+").is_err());
        assert!(SemanticVersion::parse("1.2.3-rc_1").is_err());
    }

    #[test]
    fn test_parse_rejects_oversized_input() {
        let long = format!("1.2.3-{}", "a".repeat(200));
        assert!(SemanticVersion::parse(&long).is_err());
    }

    #[test]
    fn test_round_trip_stability() {
        for text in ["1.2.3", "v0.1.0", "1.2.3-rc.1", "2.0.0-beta-2+build.9"] {
            let once = SemanticVersion::parse(text).unwrap();
            let twice = SemanticVersion::parse(&once.to_string()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_bump_major() {
        let v = SemanticVersion::new(2, 5, 7);
        assert_eq!(v.bump(BumpLabel::Major), SemanticVersion::new(3, 0, 0));
    }

    #[test]
    fn test_bump_minor() {
        let v = SemanticVersion::new(1, 2, 3);
        assert_eq!(v.bump(BumpLabel::Minor), SemanticVersion::new(1, 3, 0));
    }

    #[test]
    fn test_bump_patch() {
        let v = SemanticVersion::new(1, 2, 3);
        assert_eq!(v.bump(BumpLabel::Patch), SemanticVersion::new(1, 2, 4));
    }

    #[test]
    fn test_bump_preserves_pre_release_and_build() {
        let v = SemanticVersion::with_parts(1, 2, 3, "rc.1", "b7");
        let bumped = v.bump(BumpLabel::Patch);
        assert_eq!(bumped.pre_release, "rc.1");
        assert_eq!(bumped.build, "b7");
    }

    #[test]
    fn test_bump_next_promotes_pre_release() {
        let v = SemanticVersion::with_parts(1, 2, 3, "alpha.1", "");
        assert_eq!(v.bump_next(), SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_bump_next_zero_nine_zero() {
        let v = SemanticVersion::new(0, 9, 0);
        assert_eq!(v.bump_next(), SemanticVersion::new(0, 10, 0));
    }

    #[test]
    fn test_bump_next_zero_nine_one_is_ordinary_patch() {
        let v = SemanticVersion::new(0, 9, 1);
        assert_eq!(v.bump_next(), SemanticVersion::new(0, 9, 2));
    }

    #[test]
    fn test_bump_next_default_patch() {
        let v = SemanticVersion::new(1, 4, 9);
        assert_eq!(v.bump_next(), SemanticVersion::new(1, 4, 10));
    }

    #[test]
    fn test_bump_next_pre_release_wins_over_special_case() {
        // 0.9.0-rc.1 promotes, it does not widen the minor
        let v = SemanticVersion::with_parts(0, 9, 0, "rc.1", "");
        assert_eq!(v.bump_next(), SemanticVersion::new(0, 9, 0));
    }

    #[test]
    fn test_display_canonical_form() {
        let v = SemanticVersion::with_parts(1, 2, 3, "rc.1", "b5");
        assert_eq!(v.to_string(), "1.2.3-rc.1+b5");
        assert_eq!(SemanticVersion::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn test_as_final_clears_components() {
        let v = SemanticVersion::with_parts(1, 2, 3, "rc.1", "b5");
        assert_eq!(v.as_final(), SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_bump_label_names() {
        assert_eq!(BumpLabel::Major.name(), "major");
        assert_eq!(BumpLabel::Minor.name(), "minor");
        assert_eq!(BumpLabel::Patch.name(), "patch");
    }
}
