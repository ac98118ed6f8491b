//! Request building: collect the resolver's tools into one value

use std::fmt;
use std::sync::Arc;

use super::error::{ExecError, MISSING_TOOLS_MESSAGE, Result};
use super::sql::SqlHelper;
use crate::engine::ExecutionEngine;

/// Helpers a framework publishes to resolvers during one field resolution
pub struct ToolBundle<E: ExecutionEngine> {
    engine: Option<Arc<E>>,
    sql: Arc<dyn SqlHelper>,
}

impl<E: ExecutionEngine> ToolBundle<E> {
    pub fn new(engine: Arc<E>, sql: Arc<dyn SqlHelper>) -> Self {
        Self {
            engine: Some(engine),
            sql,
        }
    }

    /// A bundle without an execution entry point
    ///
    /// Requests built from it fail at execution time.
    pub fn without_engine(sql: Arc<dyn SqlHelper>) -> Self {
        Self { engine: None, sql }
    }

    pub fn engine(&self) -> Option<&Arc<E>> {
        self.engine.as_ref()
    }

    pub fn sql(&self) -> &Arc<dyn SqlHelper> {
        &self.sql
    }
}

impl<E: ExecutionEngine> Clone for ToolBundle<E> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            sql: self.sql.clone(),
        }
    }
}

impl<E: ExecutionEngine> fmt::Debug for ToolBundle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolBundle")
            .field("engine", &self.engine.is_some())
            .finish_non_exhaustive()
    }
}

/// What the framework knows about the field currently being resolved
pub struct ResolveInfo<E: ExecutionEngine> {
    schema: E::Schema,
    field_name: String,
    tools: Option<ToolBundle<E>>,
}

impl<E: ExecutionEngine> ResolveInfo<E> {
    pub fn new(schema: E::Schema, field_name: impl Into<String>) -> Self {
        Self {
            schema,
            field_name: field_name.into(),
            tools: None,
        }
    }

    pub fn with_tools(mut self, tools: ToolBundle<E>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn schema(&self) -> &E::Schema {
        &self.schema
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn tools(&self) -> Option<&ToolBundle<E>> {
        self.tools.as_ref()
    }
}

impl<E: ExecutionEngine> fmt::Debug for ResolveInfo<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveInfo")
            .field("field_name", &self.field_name)
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}

/// Everything needed to issue operations from inside one resolver call
///
/// Build one per resolver invocation with [`build_request`]; it is not meant to
/// be cached or shared between requests.
pub struct Request<E: ExecutionEngine> {
    context: Arc<E::Context>,
    resolve_info: Arc<ResolveInfo<E>>,
    tools: ToolBundle<E>,
}

impl<E: ExecutionEngine> Request<E> {
    pub fn context(&self) -> &Arc<E::Context> {
        &self.context
    }

    pub fn resolve_info(&self) -> &Arc<ResolveInfo<E>> {
        &self.resolve_info
    }

    pub fn tools(&self) -> &ToolBundle<E> {
        &self.tools
    }

    /// The execution entry point, if the framework provided one
    pub fn engine(&self) -> Option<&Arc<E>> {
        self.tools.engine()
    }

    pub fn sql(&self) -> &Arc<dyn SqlHelper> {
        self.tools.sql()
    }

    /// Schema of the resolver that built this request
    pub fn schema(&self) -> &E::Schema {
        self.resolve_info.schema()
    }
}

impl<E: ExecutionEngine> fmt::Debug for Request<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("resolve_info", &self.resolve_info)
            .finish_non_exhaustive()
    }
}

/// Collect the tools published in `resolve_info` into a [`Request`]
///
/// Fails with [`ExecError::MissingTools`] when the framework published no tool
/// bundle, which means the caller is not running inside a supported resolver.
pub fn build_request<E: ExecutionEngine>(
    context: Arc<E::Context>,
    resolve_info: Arc<ResolveInfo<E>>,
) -> Result<Request<E>> {
    let tools = resolve_info
        .tools()
        .cloned()
        .ok_or(ExecError::MissingTools {
            message: MISSING_TOOLS_MESSAGE,
        })?;

    Ok(Request {
        context,
        resolve_info,
        tools,
    })
}
