//! Issue queries and mutations from inside a resolver
//!
//! The free functions use a default [`Executor`] that logs through `tracing`.
//! Build an [`Executor`] directly to choose the debug sink or configuration.

mod core;
mod mutation_executor;
mod query_executor;

pub use self::core::{ExecuteOptions, Executor};
pub use mutation_executor::MutationOptions;
pub use query_executor::QueryOptions;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::error::Result;
use crate::core::request::Request;
use crate::engine::ExecutionEngine;

/// Execute a document with the default executor
pub async fn execute<E, D, V>(request: &Request<E>, options: ExecuteOptions<V>) -> Result<Option<D>>
where
    E: ExecutionEngine,
    D: DeserializeOwned,
    V: Serialize + Send,
{
    Executor::default().execute(request, options).await
}

/// Run a query with the default executor
pub async fn run_query<E, D, V>(request: &Request<E>, options: QueryOptions<V>) -> Result<Option<D>>
where
    E: ExecutionEngine,
    D: DeserializeOwned,
    V: Serialize + Send,
{
    Executor::default().run_query(request, options).await
}

/// Run a mutation with the default executor
pub async fn run_mutation<E, D, V>(
    request: &Request<E>,
    options: MutationOptions<V>,
) -> Result<Option<D>>
where
    E: ExecutionEngine,
    D: DeserializeOwned,
    V: Serialize + Send,
{
    Executor::default().run_mutation(request, options).await
}
