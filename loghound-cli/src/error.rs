//! CLI-specific error types and exit code mapping

use loghound_core::error::LoghoundError;
use loghound_pipeline::PipelineError;
use loghound_store::StoreError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Input file missing or rejected by the log sniffer.
    #[error("input error: {0}")]
    Input(String),

    /// Storage open or query failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                |
    /// |------|----------------------------------------|
    /// | 0    | Success                                |
    /// | 1    | General / command error                |
    /// | 2    | Configuration error                    |
    /// | 3    | Input not found / not a log file       |
    /// | 4    | Storage error                          |
    /// | 10   | IO error                               |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Input(_) => 3,
            Self::Storage(_) => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<LoghoundError> for CliError {
    fn from(e: LoghoundError) -> Self {
        match e {
            LoghoundError::Config(c) => Self::Config(c.to_string()),
            LoghoundError::Storage(s) => Self::Storage(s.to_string()),
            LoghoundError::Io(io) => Self::Io(io),
        }
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InputNotFound { .. } | PipelineError::NotALogFile { .. } => {
                Self::Input(e.to_string())
            }
            PipelineError::Sink(msg) => Self::Storage(msg),
            PipelineError::Io(io) => Self::Io(io),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Io(io) => Self::Io(io),
            other => Self::Storage(other.to_string()),
        }
    }
}
