//! Query execution

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::core::{ExecuteOptions, Executor};
use crate::core::document::{Document, OperationKind};
use crate::core::error::Result;
use crate::core::request::Request;
use crate::engine::ExecutionEngine;

/// A query document plus its variables
#[derive(Debug, Clone)]
pub struct QueryOptions<V> {
    pub query: Document,
    pub variables: V,
}

impl<V> QueryOptions<V> {
    pub fn new(query: Document, variables: V) -> Self {
        Self { query, variables }
    }
}

impl Executor {
    /// Run a query against the schema of the request's resolver
    pub async fn run_query<E, D, V>(
        &self,
        request: &Request<E>,
        options: QueryOptions<V>,
    ) -> Result<Option<D>>
    where
        E: ExecutionEngine,
        D: DeserializeOwned,
        V: Serialize + Send,
    {
        let QueryOptions { query, variables } = options;
        self.execute_as(
            request,
            ExecuteOptions::new(query, variables),
            Some(OperationKind::Query),
        )
        .await
    }
}
