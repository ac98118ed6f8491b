//! The execution engine seam
//!
//! resolver-exec never executes GraphQL itself. It hands documents to an
//! [`ExecutionEngine`], which is whatever the host framework uses to run
//! operations against its schema.

#[cfg(feature = "graphql")]
pub mod graphql;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::context::CallContext;
use crate::core::document::Document;

/// Variable values passed to the engine, keyed by variable name
pub type Variables = Map<String, Value>;

/// A source location inside the executed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: usize,
    pub column: usize,
}

/// A single error reported by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,

    /// Response path of the failing field (field names and list indices)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl FieldError {
    /// Create an error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }

    /// Set the response path
    pub fn with_path(mut self, path: Vec<Value>) -> Self {
        self.path = path;
        self
    }
}

/// The envelope an engine returns: optional data alongside any errors
///
/// Partial data with errors is possible; the executor treats any error as a
/// failure of the whole call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ExecutionResult {
    /// A successful result carrying `data`
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed result with no data
    pub fn errors(errors: Vec<FieldError>) -> Self {
        Self { data: None, errors }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs a parsed document against a schema
///
/// Implementations must use `context` as the execution context of the nested
/// operation, so that it runs on the same database handle and role as the
/// resolver that issued it.
#[async_trait]
pub trait ExecutionEngine: Send + Sync + 'static {
    /// Handle to the schema operations run against
    type Schema: Send + Sync + 'static;

    /// Per-request context shared with the issuing resolver
    type Context: CallContext;

    /// Execute `document` and report data and errors
    ///
    /// Engine failures are reported inside the result, never as a panic.
    async fn execute(
        &self,
        schema: &Self::Schema,
        document: &Document,
        root_value: Option<&Value>,
        context: &Self::Context,
        variables: &Variables,
    ) -> ExecutionResult;
}
