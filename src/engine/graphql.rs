//! async-graphql binding
//!
//! [`AsyncGraphqlEngine`] runs nested operations through an
//! `async_graphql::Schema`. The server side publishes the schema and a
//! [`ToolBundle`] into each incoming request with [`attach_tools`]; resolvers
//! then pick them up with [`request_from_ctx`].
//!
//! ```rust,ignore
//! // server
//! let tools = ToolBundle::new(Arc::new(AsyncGraphqlEngine::new()), Arc::new(PgSql));
//! let request = attach_tools(async_graphql::Request::new(body), &schema, tools).data(session);
//! let response = schema.execute(request).await;
//!
//! // inside a resolver
//! let request = request_from_ctx::<Query, Mutation, EmptySubscription, Session>(ctx)?;
//! let data: Option<Value> = run_query(&request, QueryOptions::new(doc, vars)).await?;
//! ```

use async_graphql::{Context, ObjectType, Schema, ServerError, SubscriptionType};
use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{ExecutionEngine, ExecutionResult, FieldError, Variables};
use crate::core::context::CallContext;
use crate::core::document::Document;
use crate::core::error::{ExecError, MISSING_TOOLS_MESSAGE, Result};
use crate::core::request::{Request, ResolveInfo, ToolBundle, build_request};
use crate::core::sql::{PgSql, SqlHelper};

/// Execution engine backed by an `async_graphql::Schema`
///
/// The call context is cloned into the nested request's data, so resolvers of
/// the nested operation read the same context type (and the same database
/// handle) as the resolver that issued it. The schema and a fresh tool bundle
/// are published too, so nested resolvers can issue operations of their own.
/// Root values are not supported by async-graphql and are ignored.
pub struct AsyncGraphqlEngine<Q, M, S, C> {
    sql: Arc<dyn SqlHelper>,
    _marker: PhantomData<fn() -> (Q, M, S, C)>,
}

impl<Q, M, S, C> AsyncGraphqlEngine<Q, M, S, C> {
    /// Engine whose nested tool bundles carry the PostgreSQL helper
    pub fn new() -> Self {
        Self::with_sql(Arc::new(PgSql))
    }

    pub fn with_sql(sql: Arc<dyn SqlHelper>) -> Self {
        Self {
            sql,
            _marker: PhantomData,
        }
    }
}

impl<Q, M, S, C> Clone for AsyncGraphqlEngine<Q, M, S, C> {
    fn clone(&self) -> Self {
        Self::with_sql(self.sql.clone())
    }
}

impl<Q, M, S, C> Default for AsyncGraphqlEngine<Q, M, S, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<Q, M, S, C> ExecutionEngine for AsyncGraphqlEngine<Q, M, S, C>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
    C: CallContext + Clone,
{
    type Schema = Schema<Q, M, S>;
    type Context = C;

    async fn execute(
        &self,
        schema: &Self::Schema,
        document: &Document,
        _root_value: Option<&Value>,
        context: &Self::Context,
        variables: &Variables,
    ) -> ExecutionResult {
        let mut request = async_graphql::Request::new(document.source())
            .variables(async_graphql::Variables::from_json(Value::Object(
                variables.clone(),
            )))
            .data(context.clone())
            .data(schema.clone())
            .data(ToolBundle::new(Arc::new(self.clone()), self.sql.clone()));

        if let Some(name) = document.operation_name() {
            request = request.operation_name(name);
        }

        into_execution_result(schema.execute(request).await)
    }
}

fn into_execution_result(response: async_graphql::Response) -> ExecutionResult {
    let mut errors: Vec<FieldError> = response.errors.into_iter().map(field_error).collect();

    let data = match response.data {
        async_graphql::Value::Null => None,
        value => match value.into_json() {
            Ok(json) => Some(json),
            Err(e) => {
                errors.push(FieldError::new(format!(
                    "Failed to convert response data: {}",
                    e
                )));
                None
            }
        },
    };

    ExecutionResult { data, errors }
}

fn field_error(err: ServerError) -> FieldError {
    serde_json::to_value(&err)
        .and_then(serde_json::from_value)
        .unwrap_or_else(|_| FieldError::new(err.message.clone()))
}

/// Publish the schema and tool bundle into an incoming request
pub fn attach_tools<Q, M, S, C>(
    request: async_graphql::Request,
    schema: &Schema<Q, M, S>,
    tools: ToolBundle<AsyncGraphqlEngine<Q, M, S, C>>,
) -> async_graphql::Request
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
    C: CallContext + Clone,
{
    request.data(schema.clone()).data(tools)
}

/// Describe the field a resolver is currently resolving
///
/// The tool bundle is optional here; [`build_request`] decides whether its
/// absence is fatal. A missing schema is reported straight away.
pub fn resolve_info<Q, M, S, C>(
    ctx: &Context<'_>,
) -> Result<ResolveInfo<AsyncGraphqlEngine<Q, M, S, C>>>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
    C: CallContext + Clone,
{
    let schema = ctx
        .data_opt::<Schema<Q, M, S>>()
        .cloned()
        .ok_or(ExecError::MissingTools {
            message: MISSING_TOOLS_MESSAGE,
        })?;

    let info = ResolveInfo::new(schema, ctx.field().name());
    Ok(
        match ctx.data_opt::<ToolBundle<AsyncGraphqlEngine<Q, M, S, C>>>() {
            Some(tools) => info.with_tools(tools.clone()),
            None => info,
        },
    )
}

/// Build a [`Request`] from a resolver's context in one step
pub fn request_from_ctx<Q, M, S, C>(
    ctx: &Context<'_>,
) -> Result<Request<AsyncGraphqlEngine<Q, M, S, C>>>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
    C: CallContext + Clone,
{
    let context = ctx.data_opt::<C>().cloned().ok_or(ExecError::MissingTools {
        message: MISSING_TOOLS_MESSAGE,
    })?;
    let info = resolve_info::<Q, M, S, C>(ctx)?;
    build_request(Arc::new(context), Arc::new(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::SessionContext;
    use crate::executor::{QueryOptions, run_query};
    use async_graphql::{EmptyMutation, EmptySubscription, Object};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeDb {
        calls: AtomicUsize,
    }

    type Session = SessionContext<FakeDb>;
    type TestEngine = AsyncGraphqlEngine<QueryRoot, EmptyMutation, EmptySubscription, Session>;
    type TestSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

    struct QueryRoot;

    #[Object]
    impl QueryRoot {
        async fn role(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
            let session = ctx.data::<Session>()?;
            session.db().calls.fetch_add(1, Ordering::SeqCst);
            Ok(session.role().unwrap_or_default().to_string())
        }

        async fn greet(&self, name: String) -> String {
            format!("hello {}", name)
        }

        async fn broken(&self) -> async_graphql::Result<i32> {
            Err("kaboom".into())
        }

        async fn nested_role(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<String>> {
            let request =
                request_from_ctx::<QueryRoot, EmptyMutation, EmptySubscription, Session>(ctx)?;
            let doc = Document::parse("{ role }")?;
            let data: Option<Value> = run_query(&request, QueryOptions::new(doc, ())).await?;
            Ok(data.and_then(|d| d["role"].as_str().map(str::to_string)))
        }

        async fn nested_broken(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<i32>> {
            let request =
                request_from_ctx::<QueryRoot, EmptyMutation, EmptySubscription, Session>(ctx)?;
            let doc = Document::parse("{ broken }")?;
            let data: Option<Value> = run_query(&request, QueryOptions::new(doc, ())).await?;
            Ok(data.and_then(|d| d["broken"].as_i64()).map(|n| n as i32))
        }
    }

    fn schema() -> TestSchema {
        Schema::build(QueryRoot, EmptyMutation, EmptySubscription).finish()
    }

    fn tools() -> ToolBundle<TestEngine> {
        ToolBundle::new(Arc::new(TestEngine::new()), Arc::new(PgSql))
    }

    #[tokio::test]
    async fn test_engine_executes_with_variables() {
        let schema = schema();
        let session = Session::new(Arc::new(FakeDb::default()), "viewer");
        let doc = Document::parse("query Greet($name: String!) { greet(name: $name) }")
            .expect("should parse");
        let mut vars = Variables::new();
        vars.insert("name".to_string(), json!("ada"));

        let result = TestEngine::new()
            .execute(&schema, &doc, None, &session, &vars)
            .await;

        assert!(result.is_ok(), "unexpected errors: {:?}", result.errors);
        assert_eq!(result.data, Some(json!({ "greet": "hello ada" })));
    }

    #[tokio::test]
    async fn test_engine_reports_resolver_errors() {
        let schema = schema();
        let session = Session::new(Arc::new(FakeDb::default()), "viewer");
        let doc = Document::parse("{ broken }").expect("should parse");

        let result = TestEngine::new()
            .execute(&schema, &doc, None, &session, &Variables::new())
            .await;

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "kaboom");
        assert_eq!(result.errors[0].path, vec![json!("broken")]);
    }

    #[tokio::test]
    async fn test_nested_query_shares_the_request_context() {
        let schema = schema();
        let db = Arc::new(FakeDb::default());
        let session = Session::new(db.clone(), "admin");

        let request = attach_tools(async_graphql::Request::new("{ nestedRole }"), &schema, tools())
            .data(session);
        let response = schema.execute(request).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().expect("json data");
        assert_eq!(data, json!({ "nestedRole": "admin" }));
        assert_eq!(db.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_nested_errors_surface_as_opaque_failure() {
        let schema = schema();
        let session = Session::new(Arc::new(FakeDb::default()), "admin");

        let request =
            attach_tools(async_graphql::Request::new("{ nestedBroken }"), &schema, tools())
                .data(session);
        let response = schema.execute(request).await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "GraphQL execute error");
    }

    #[tokio::test]
    async fn test_resolver_without_tools_is_rejected() {
        let schema = schema();
        let session = Session::new(Arc::new(FakeDb::default()), "admin");

        let request = async_graphql::Request::new("{ nestedRole }")
            .data(schema.clone())
            .data(session);
        let response = schema.execute(request).await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, MISSING_TOOLS_MESSAGE);
    }
}
