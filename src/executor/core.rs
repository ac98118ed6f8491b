//! Core executor: forward a document to the engine and normalize the result

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

use crate::config::ExecutorConfig;
use crate::core::context::CallContext;
use crate::core::document::{Document, OperationKind};
use crate::core::error::{ExecError, MISSING_ENGINE_MESSAGE, Result};
use crate::core::logging::{DebugSink, TracingSink};
use crate::core::request::Request;
use crate::engine::{ExecutionEngine, ExecutionResult, Variables};

/// A document plus the variables to run it with
#[derive(Debug, Clone)]
pub struct ExecuteOptions<V> {
    pub node: Document,
    pub variables: V,
}

impl<V> ExecuteOptions<V> {
    pub fn new(node: Document, variables: V) -> Self {
        Self { node, variables }
    }
}

/// Runs operations through a request's engine
///
/// Holds no per-call state, so one executor can serve every resolver.
#[derive(Clone)]
pub struct Executor {
    sink: Arc<dyn DebugSink>,
    config: ExecutorConfig,
}

impl Executor {
    /// Executor logging through `tracing` under the configured namespace
    pub fn new(config: ExecutorConfig) -> Self {
        let sink = Arc::new(TracingSink::new(config.log_namespace.clone()));
        Self { sink, config }
    }

    /// Executor with an explicit debug sink
    pub fn with_sink(config: ExecutorConfig, sink: Arc<dyn DebugSink>) -> Self {
        Self { sink, config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute a document using the request's context
    ///
    /// Returns `Ok(None)` when the engine produced no data (or null data)
    /// without errors. Any engine error fails the whole call with
    /// [`ExecError::Execution`], even when partial data came back.
    pub async fn execute<E, D, V>(
        &self,
        request: &Request<E>,
        options: ExecuteOptions<V>,
    ) -> Result<Option<D>>
    where
        E: ExecutionEngine,
        D: DeserializeOwned,
        V: Serialize + Send,
    {
        self.execute_as(request, options, None).await
    }

    /// Execute with an intent label from `run_query` / `run_mutation`
    pub(crate) async fn execute_as<E, D, V>(
        &self,
        request: &Request<E>,
        options: ExecuteOptions<V>,
        intent: Option<OperationKind>,
    ) -> Result<Option<D>>
    where
        E: ExecutionEngine,
        D: DeserializeOwned,
        V: Serialize + Send,
    {
        let ExecuteOptions { node, variables } = options;

        let engine = request.engine().ok_or(ExecError::MissingTools {
            message: MISSING_ENGINE_MESSAGE,
        })?;

        let kind = node.operation_kind();
        if kind == OperationKind::Subscription {
            return Err(ExecError::UnsupportedOperation {
                kind: kind.to_string(),
            });
        }

        if let Some(intent) = intent {
            if intent != kind {
                tracing::warn!(
                    intent = %intent,
                    kind = %kind,
                    "Document operation does not match the requested intent"
                );
            }
        }

        let variables = into_variables(variables)?;

        let span = tracing::debug_span!(
            "nested_operation",
            kind = %kind,
            operation = node.operation_name().unwrap_or(""),
            field = request.resolve_info().field_name(),
            role = request.context().role().unwrap_or(""),
        );

        let result = engine
            .execute(
                request.schema(),
                &node,
                None,
                request.context().as_ref(),
                &variables,
            )
            .instrument(span)
            .await;

        self.handle_result(result)
    }

    fn handle_result<D: DeserializeOwned>(&self, result: ExecutionResult) -> Result<Option<D>> {
        if !result.errors.is_empty() {
            let serialized = if self.config.pretty_errors {
                serde_json::to_string_pretty(&result.errors)
            } else {
                serde_json::to_string(&result.errors)
            }
            .unwrap_or_else(|e| format!("<unserializable errors: {}>", e));

            self.sink
                .emit(&format!("GraphQL execute errors: {}", serialized));

            return Err(ExecError::Execution {
                errors: result.errors,
            });
        }

        match result.data {
            None | Some(Value::Null) => Ok(None),
            Some(data) => serde_json::from_value(data)
                .map(Some)
                .map_err(ExecError::Decode),
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Serialize caller variables into the engine's input map
///
/// `null` (e.g. `()` or `None`) means "no variables".
fn into_variables<V: Serialize>(variables: V) -> Result<Variables> {
    match serde_json::to_value(variables) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Variables::new()),
        Ok(other) => Err(ExecError::Variables {
            message: format!("expected an object, got {}", json_type(&other)),
        }),
        Err(e) => Err(ExecError::Variables {
            message: e.to_string(),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_variables_accepts_objects_and_null() {
        let vars = into_variables(json!({ "id": 1 })).expect("object is fine");
        assert_eq!(vars.get("id"), Some(&json!(1)));

        assert!(into_variables(()).expect("unit is null").is_empty());
        assert!(into_variables(None::<u8>).expect("none is null").is_empty());
    }

    #[test]
    fn test_into_variables_rejects_scalars() {
        let err = into_variables(json!([1, 2])).expect_err("array should fail");
        assert_eq!(err.error_code(), "INVALID_VARIABLES");
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_into_variables_from_struct() {
        #[derive(Serialize)]
        struct Input {
            user_id: u32,
        }

        let vars = into_variables(Input { user_id: 7 }).expect("struct serializes to object");
        assert_eq!(vars.get("user_id"), Some(&json!(7)));
    }
}
