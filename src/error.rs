use thiserror::Error;

/// Unified error type for verbump operations
#[derive(Error, Debug)]
pub enum VerbumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("{gate} check failed: {message}")]
    Validation { gate: String, message: String },

    #[error("Hook failed: {0}")]
    Hook(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Post-bump action '{action}' failed: {message}")]
    PostAction { action: String, message: String },

    #[error("Module selection error: {0}")]
    Selection(String),

    #[error("{failed} module(s) failed")]
    Aggregate { failed: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in verbump
pub type Result<T> = std::result::Result<T, VerbumpError>;

impl VerbumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VerbumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        VerbumpError::Version(msg.into())
    }

    /// Create a validation failure attributed to a specific gate
    pub fn validation(gate: impl Into<String>, msg: impl Into<String>) -> Self {
        VerbumpError::Validation {
            gate: gate.into(),
            message: msg.into(),
        }
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        VerbumpError::Hook(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        VerbumpError::Tag(msg.into())
    }

    /// Create a post-bump action failure attributed to a specific action
    pub fn post_action(action: impl Into<String>, msg: impl Into<String>) -> Self {
        VerbumpError::PostAction {
            action: action.into(),
            message: msg.into(),
        }
    }

    /// Create a module selection error with context
    pub fn selection(msg: impl Into<String>) -> Self {
        VerbumpError::Selection(msg.into())
    }
}
