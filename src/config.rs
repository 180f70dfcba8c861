use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the version file tracked per module.
pub const DEFAULT_VERSION_FILE: &str = "VERSION";

/// Represents the complete configuration for verbump.
///
/// Controls the version file location, workspace discovery, executor
/// behavior, and each optional plugin capability.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub hooks: HooksConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub dependencies: DependenciesConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub gate: GateConfig,
}

fn default_version_file() -> String {
    DEFAULT_VERSION_FILE.to_string()
}

/// Location of the version file for single-module operation.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VersionConfig {
    #[serde(default = "default_version_file")]
    pub file: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            file: default_version_file(),
        }
    }
}

impl VersionConfig {
    /// True when the configured path differs from the built-in default.
    /// A non-default path pins the invocation to single-module mode.
    pub fn is_overridden(&self) -> bool {
        self.file != DEFAULT_VERSION_FILE
    }
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    5
}

/// Configuration for workspace discovery.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DiscoveryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            enabled: true,
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_parallel() -> usize {
    4
}

/// Configuration for the multi-module executor.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExecutorConfig {
    /// Run module pipelines concurrently instead of sequentially
    #[serde(default)]
    pub parallel: bool,

    /// Upper bound on concurrently running module pipelines
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,

    /// Keep running remaining modules after one fails
    #[serde(default)]
    pub continue_on_error: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        ExecutorConfig {
            parallel: false,
            max_parallel: default_max_parallel(),
            continue_on_error: false,
        }
    }
}

fn default_tag_template() -> String {
    "v{version}".to_string()
}

/// Configuration for the tag manager plugin.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TagsConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Tag name template; supports {version}, {major}, {minor}, {patch}, {date}
    #[serde(default = "default_tag_template")]
    pub template: String,

    /// Push the created tag to this remote; empty means do not push
    #[serde(default)]
    pub push_remote: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            enabled: false,
            template: default_tag_template(),
            push_remote: String::new(),
        }
    }
}

fn default_hook_timeout() -> u64 {
    30
}

/// Configuration for pre-release hooks.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HooksConfig {
    /// Shell commands run in order before any version mutation
    #[serde(default)]
    pub pre_release: Vec<String>,

    /// Per-command timeout in seconds
    #[serde(default = "default_hook_timeout")]
    pub timeout_secs: u64,
}

impl Default for HooksConfig {
    fn default() -> Self {
        HooksConfig {
            pre_release: Vec::new(),
            timeout_secs: default_hook_timeout(),
        }
    }
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

/// Configuration for the changelog generator plugin.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChangelogConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_changelog_file")]
    pub file: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            enabled: false,
            file: default_changelog_file(),
        }
    }
}

fn default_audit_file() -> String {
    ".verbump-audit.jsonl".to_string()
}

/// Configuration for the audit log plugin.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuditConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_audit_file")]
    pub file: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            enabled: false,
            file: default_audit_file(),
        }
    }
}

/// Configuration for the dependency checker plugin.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DependenciesConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Auxiliary files expected to carry the module's version
    #[serde(default)]
    pub files: Vec<String>,

    /// Rewrite tracked files to the new version after a successful bump
    #[serde(default)]
    pub auto_sync: bool,
}

/// Configuration for the version policy validator plugin.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PolicyConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Bump labels allowed by policy; empty means all are allowed
    #[serde(default)]
    pub allowed_labels: Vec<String>,

    /// Reject transitions where the new version sorts below the old one
    #[serde(default)]
    pub forbid_downgrade: bool,
}

/// Configuration for the release gate plugin.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GateConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Require a clean git worktree before bumping
    #[serde(default = "default_true")]
    pub require_clean_worktree: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `verbump.toml` in current directory
/// 3. `verbump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./verbump.toml").exists() {
        fs::read_to_string("./verbump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path: PathBuf = config_dir.join("verbump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
