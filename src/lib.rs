//! # resolver-exec
//!
//! Issue GraphQL queries and mutations from inside a resolver, against the same
//! schema and with the same request context the resolver is running with.
//!
//! Nested operations reuse the caller's context instead of opening their own,
//! so they run on the resolver's database connection, inside its transaction,
//! with its authorization role.
//!
//! ## Features
//!
//! - **Request building**: collect the tools a framework publishes to a
//!   resolver into a typed [`Request`](crate::core::Request)
//! - **Query / mutation helpers**: run a parsed document with typed variables
//!   and decode the data into your own type
//! - **Opaque failures**: any engine error fails the call with one
//!   "GraphQL execute error" plus one debug log entry
//! - **Engine seam**: bring any engine through [`ExecutionEngine`](crate::engine::ExecutionEngine);
//!   an async-graphql binding ships behind the `graphql` feature
//! - **SQL fragments**: a PostgreSQL fragment helper passed through to resolvers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resolver_exec::prelude::*;
//!
//! #[Object]
//! impl Query {
//!     async fn my_orders(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Value>> {
//!         let request = request_from_ctx::<Query, Mutation, EmptySubscription, Session>(ctx)?;
//!         let doc = Document::parse("query($role: String!) { orders(role: $role) { id } }")?;
//!
//!         Ok(run_query(&request, QueryOptions::new(doc, json!({ "role": "owner" }))).await?)
//!     }
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod executor;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CallContext, CompiledSql, DebugSink, Document, ExecError, OperationKind, PgSql,
        RecordingSink, Request, ResolveInfo, SessionContext, SqlFragment, SqlHelper, ToolBundle,
        TracingSink, build_request, init_tracing,
    };

    // === Engine ===
    pub use crate::engine::{ExecutionEngine, ExecutionResult, FieldError, Variables};
    #[cfg(feature = "graphql")]
    pub use crate::engine::graphql::{
        AsyncGraphqlEngine, attach_tools, request_from_ctx, resolve_info,
    };

    // === Executor ===
    pub use crate::executor::{
        ExecuteOptions, Executor, MutationOptions, QueryOptions, execute, run_mutation, run_query,
    };

    // === Config ===
    pub use crate::config::ExecutorConfig;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
