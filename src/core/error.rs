//! Typed error handling for resolver-exec
//!
//! Every fallible operation in the crate returns [`ExecError`]. Callers that
//! only care about success or failure can treat it as an opaque error; callers
//! that need to branch can match on the variant or on [`ExecError::error_code`].
//!
//! # Example
//!
//! ```rust,ignore
//! use resolver_exec::prelude::*;
//!
//! match run_query::<Value, _>(&request, QueryOptions::new(doc, json!({}))).await {
//!     Ok(data) => println!("data: {:?}", data),
//!     Err(ExecError::Execution { errors }) => {
//!         for e in &errors {
//!             eprintln!("nested field failed: {}", e.message);
//!         }
//!     }
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

use std::fmt;

use crate::engine::FieldError;

/// Message used when a resolver-info value carries no tool bundle
pub const MISSING_TOOLS_MESSAGE: &str = "adapter invoked outside a supported execution context";

/// Message used when the tool bundle has no execution entry point
pub const MISSING_ENGINE_MESSAGE: &str = "GraphQL interface not found";

/// Message surfaced for every engine-reported execution failure
pub const EXECUTION_ERROR_MESSAGE: &str = "GraphQL execute error";

/// The error type for resolver-exec
#[derive(Debug)]
pub enum ExecError {
    /// The ambient framework did not supply the tools this adapter needs
    ///
    /// Raised by the request builder when the tool bundle is absent, and by the
    /// executor when the bundle has no execution entry point. The message tells
    /// the two stages apart.
    MissingTools { message: &'static str },

    /// The execution engine reported one or more errors
    ///
    /// Displays as the opaque "GraphQL execute error". The engine's structured
    /// errors are kept for callers that want them.
    Execution { errors: Vec<FieldError> },

    /// The document could not be parsed or contains no operation
    Parse { message: String },

    /// The document's operation cannot be executed as a single request
    UnsupportedOperation { kind: String },

    /// Variables could not be turned into an input map
    Variables { message: String },

    /// The returned data did not match the requested shape
    Decode(serde_json::Error),

    /// Invalid executor configuration
    Config { message: String },
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::MissingTools { message } => write!(f, "{}", message),
            ExecError::Execution { .. } => write!(f, "{}", EXECUTION_ERROR_MESSAGE),
            ExecError::Parse { message } => write!(f, "Failed to parse document: {}", message),
            ExecError::UnsupportedOperation { kind } => {
                write!(f, "Unsupported operation: {}", kind)
            }
            ExecError::Variables { message } => write!(f, "Invalid variables: {}", message),
            ExecError::Decode(e) => write!(f, "Failed to decode result data: {}", e),
            ExecError::Config { message } => write!(f, "Configuration error: {}", message),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl ExecError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ExecError::MissingTools { .. } => "MISSING_TOOLS",
            ExecError::Execution { .. } => "EXECUTION_ERROR",
            ExecError::Parse { .. } => "PARSE_ERROR",
            ExecError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            ExecError::Variables { .. } => "INVALID_VARIABLES",
            ExecError::Decode(_) => "DECODE_ERROR",
            ExecError::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Structured errors reported by the engine, empty for every other variant
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ExecError::Execution { errors } => errors,
            _ => &[],
        }
    }

    /// Whether this error means the adapter was used outside a resolver
    pub fn is_missing_tools(&self) -> bool {
        matches!(self, ExecError::MissingTools { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ExecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_display_is_opaque() {
        let err = ExecError::Execution {
            errors: vec![FieldError::new("column \"secret\" does not exist")],
        };
        assert_eq!(err.to_string(), "GraphQL execute error");
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.error_code(), "EXECUTION_ERROR");
    }

    #[test]
    fn test_missing_tools_messages_differ_by_stage() {
        let builder = ExecError::MissingTools {
            message: MISSING_TOOLS_MESSAGE,
        };
        let executor = ExecError::MissingTools {
            message: MISSING_ENGINE_MESSAGE,
        };
        assert_ne!(builder.to_string(), executor.to_string());
        assert!(builder.is_missing_tools());
        assert!(executor.is_missing_tools());
        assert!(builder.field_errors().is_empty());
    }

    #[test]
    fn test_decode_error_exposes_source() {
        let inner = serde_json::from_str::<u32>("\"nope\"").expect_err("should fail");
        let err = ExecError::Decode(inner);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }
}
