use crate::domain::version::SemanticVersion;
use crate::error::{Result, VerbumpError};

/// Tag naming template (e.g., "v{version}", "release-{major}.{minor}")
///
/// Supported placeholders: `{version}`, `{major}`, `{minor}`, `{patch}`,
/// and `{date}` (current date, `YYYY-MM-DD`).
#[derive(Debug, Clone)]
pub struct TagTemplate {
    pub template: String,
}

impl TagTemplate {
    /// Create a new tag template
    pub fn new(template: impl Into<String>) -> Self {
        TagTemplate {
            template: template.into(),
        }
    }

    /// Format a version according to the template
    /// Example: template="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        self.format_on(version, chrono::Local::now().date_naive())
    }

    /// Format with an explicit date (the testable core of [Self::format])
    pub fn format_on(&self, version: &SemanticVersion, date: chrono::NaiveDate) -> String {
        self.template
            .replace("{version}", &version.to_string())
            .replace("{major}", &version.major.to_string())
            .replace("{minor}", &version.minor.to_string())
            .replace("{patch}", &version.patch.to_string())
            .replace("{date}", &date.format("%Y-%m-%d").to_string())
    }

    /// Validate if a tag name matches this template
    pub fn matches(&self, tag: &str) -> Result<bool> {
        if !self.template.contains("{version}") {
            return Err(VerbumpError::tag(
                "Template must contain {version} placeholder",
            ));
        }

        // Escape everything literal, then substitute placeholder patterns
        let escaped = regex::escape(&self.template);
        let pattern = escaped
            .replace(r"\{version\}", r"\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?")
            .replace(r"\{major\}", r"\d+")
            .replace(r"\{minor\}", r"\d+")
            .replace(r"\{patch\}", r"\d+")
            .replace(r"\{date\}", r"\d{4}-\d{2}-\d{2}");

        let re = regex::Regex::new(&format!("^{}$", pattern))
            .map_err(|_| VerbumpError::tag("Invalid template"))?;
        Ok(re.is_match(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_format_version_placeholder() {
        let t = TagTemplate::new("v{version}");
        assert_eq!(t.format_on(&SemanticVersion::new(1, 2, 3), date()), "v1.2.3");
    }

    #[test]
    fn test_format_component_placeholders() {
        let t = TagTemplate::new("release-{major}.{minor}");
        assert_eq!(
            t.format_on(&SemanticVersion::new(1, 2, 3), date()),
            "release-1.2"
        );
    }

    #[test]
    fn test_format_date_placeholder() {
        let t = TagTemplate::new("v{version}-{date}");
        assert_eq!(
            t.format_on(&SemanticVersion::new(1, 0, 0), date()),
            "v1.0.0-2024-03-05"
        );
    }

    #[test]
    fn test_format_keeps_pre_release() {
        let t = TagTemplate::new("v{version}");
        let v = SemanticVersion::with_parts(1, 2, 3, "rc.1", "");
        assert_eq!(t.format_on(&v, date()), "v1.2.3-rc.1");
    }

    #[test]
    fn test_matches() {
        let t = TagTemplate::new("v{version}");
        assert!(t.matches("v1.2.3").unwrap());
        assert!(t.matches("v1.2.3-rc.1").unwrap());
        assert!(!t.matches("release-1.2.3").unwrap());
    }

    #[test]
    fn test_matches_requires_version_placeholder() {
        let t = TagTemplate::new("free-form");
        assert!(t.matches("anything").is_err());
    }
}
