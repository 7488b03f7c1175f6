//! CLI error types with miette diagnostics.
//!
//! Maps core, transport, and config errors into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use junoset_config::ConfigError;
use junoset_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const INVALID_MODEL: i32 = 3;
    pub const PARSE: i32 = 4;
    pub const LOCKED: i32 = 5;
    pub const DEVICE: i32 = 6;
    pub const TIMEOUT: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Model ────────────────────────────────────────────────────────
    #[error("Model rejected: {reason}")]
    #[diagnostic(
        code(junoset::invalid_model),
        help("Nothing was sent to the device. Run: junoset fields to see every field and its conflicts.")
    )]
    InvalidModel { reason: String },

    #[error("Could not read model file {path}: {reason}")]
    #[diagnostic(
        code(junoset::model_file),
        help("Model files are YAML (.yaml/.yml), JSON (.json), or TOML (.toml), keyed by field name.")
    )]
    ModelFile { path: String, reason: String },

    #[error("Line {line_number}: {reason}")]
    #[diagnostic(
        code(junoset::parse),
        help("Offending statement: {line}\nUse --lenient to report bad lines and keep going.")
    )]
    Parse {
        line_number: usize,
        line: String,
        reason: String,
    },

    // ── Device ───────────────────────────────────────────────────────
    #[error("Configuration is locked: {message}")]
    #[diagnostic(
        code(junoset::locked),
        help("Another session holds the candidate lock. Retry once it commits or exits.")
    )]
    Locked { message: String },

    #[error("Device timed out after {seconds}s")]
    #[diagnostic(
        code(junoset::timeout),
        help("Increase timeout with --timeout or check device responsiveness.")
    )]
    Timeout { seconds: u64 },

    #[error("Device {operation} failed: {message}")]
    #[diagnostic(
        code(junoset::device),
        help("Uncommitted changes were discarded; the committed configuration is unchanged.")
    )]
    Device { operation: String, message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No device target configured")]
    #[diagnostic(
        code(junoset::no_target),
        help(
            "Pass --host or --snapshot, or create a profile with: junoset config init\n\
             Config file: {path}"
        )
    )]
    NoTarget { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(junoset::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: junoset config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(junoset::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(junoset::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(junoset::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidModel { .. } | Self::ModelFile { .. } => exit_code::INVALID_MODEL,
            Self::Parse { .. } => exit_code::PARSE,
            Self::Locked { .. } => exit_code::LOCKED,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Device { .. } => exit_code::DEVICE,
            Self::NoTarget { .. }
            | Self::ProfileNotFound { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(err) => Self::InvalidModel {
                reason: err.to_string(),
            },
            CoreError::Parse(err) => Self::Parse {
                line_number: err.line_number,
                reason: format!("'{}' is not a valid integer for '{}'", err.value, err.field),
                line: err.line,
            },
            CoreError::Transport { operation, source } => match source {
                junoset_api::Error::LockDenied { message } => Self::Locked { message },
                junoset_api::Error::Timeout { timeout_secs } => Self::Timeout {
                    seconds: timeout_secs,
                },
                other => Self::Device {
                    operation: operation.into(),
                    message: other.to_string(),
                },
            },
        }
    }
}

impl From<junoset_core::ValidationError> for CliError {
    fn from(err: junoset_core::ValidationError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<junoset_core::ParseError> for CliError {
    fn from(err: junoset_core::ParseError) -> Self {
        CoreError::from(err).into()
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(see: junoset config show)".into(),
            },
            err @ (ConfigError::NoTarget { .. } | ConfigError::AmbiguousTarget { .. }) => {
                Self::Validation {
                    field: "profile".into(),
                    reason: err.to_string(),
                }
            }
            ConfigError::Serialization(err) => Self::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {err}"),
            },
            ConfigError::Figment(err) => Self::Config(err),
            ConfigError::Io(err) => Self::Io(err),
        }
    }
}
