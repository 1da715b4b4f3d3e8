//! Error types and exit codes for trains
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args/config)
//! - 3: Data error (unreadable or malformed route table)
//!
//! Query-level errors (bad path, bad limit, unknown command) never abort a
//! session; see [`TrainsError::is_query_error`].

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args/config (2)
    Usage = 2,
    /// Data error - route table could not be loaded (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during trains operations
#[derive(Error, Debug)]
pub enum TrainsError {
    // Route table errors (exit code 3)
    #[error("invalid route entry on line {line}: '{entry}'")]
    InvalidRouteEntry { line: usize, entry: String },

    #[error("cannot load route table {path:?}: {source}")]
    RouteTable {
        path: PathBuf,
        #[source]
        source: Box<TrainsError>,
    },

    // Query errors (exit code 2 when surfaced at process level)
    #[error("invalid trip path format: '{0}'")]
    InvalidPathFormat(String),

    #[error("unexpected trip path element: '{0}'")]
    UnsupportedHopMode(String),

    #[error("invalid search criteria format: '{0}'")]
    InvalidCriteriaFormat(String),

    #[error("search criteria for '{0}' is not supported")]
    UnsupportedCriteriaTerm(String),

    #[error("operator '{operator}' is not supported for term '{term}'")]
    UnsupportedOperator { operator: String, term: String },

    #[error("invalid value for '{term}': '{value}' (expected a non-negative integer)")]
    InvalidCriteriaValue { term: String, value: String },

    #[error("command format is not supported: '{0}'")]
    InvalidCommandFormat(String),

    #[error("command is not supported: '{0}'")]
    UnknownCommand(String),

    #[error("{0}")]
    UsageError(String),

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl TrainsError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        TrainsError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Wrap a route table parse failure with the file it came from
    pub fn route_table(path: impl Into<PathBuf>, error: TrainsError) -> Self {
        TrainsError::RouteTable {
            path: path.into(),
            source: Box::new(error),
        }
    }

    /// True for errors scoped to a single query line.
    ///
    /// The session reports these and moves on to the next line.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            TrainsError::InvalidPathFormat(_)
                | TrainsError::UnsupportedHopMode(_)
                | TrainsError::InvalidCriteriaFormat(_)
                | TrainsError::UnsupportedCriteriaTerm(_)
                | TrainsError::UnsupportedOperator { .. }
                | TrainsError::InvalidCriteriaValue { .. }
                | TrainsError::InvalidCommandFormat(_)
                | TrainsError::UnknownCommand(_)
        )
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TrainsError::InvalidRouteEntry { .. } | TrainsError::RouteTable { .. } => {
                ExitCode::Data
            }

            TrainsError::UsageError(_) | TrainsError::Toml(_) => ExitCode::Usage,
            e if e.is_query_error() => ExitCode::Usage,

            _ => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            TrainsError::InvalidRouteEntry { .. } => "invalid_route_entry",
            TrainsError::RouteTable { .. } => "route_table",
            TrainsError::InvalidPathFormat(_) => "invalid_path_format",
            TrainsError::UnsupportedHopMode(_) => "unsupported_hop_mode",
            TrainsError::InvalidCriteriaFormat(_) => "invalid_criteria_format",
            TrainsError::UnsupportedCriteriaTerm(_) => "unsupported_criteria_term",
            TrainsError::UnsupportedOperator { .. } => "unsupported_operator",
            TrainsError::InvalidCriteriaValue { .. } => "invalid_criteria_value",
            TrainsError::InvalidCommandFormat(_) => "invalid_command_format",
            TrainsError::UnknownCommand(_) => "unknown_command",
            TrainsError::UsageError(_) => "usage_error",
            TrainsError::Io(_) => "io_error",
            TrainsError::Toml(_) => "toml_error",
            TrainsError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            TrainsError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for trains operations
pub type Result<T> = std::result::Result<T, TrainsError>;
