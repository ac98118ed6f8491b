//! Mutation execution

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::core::{ExecuteOptions, Executor};
use crate::core::document::{Document, OperationKind};
use crate::core::error::Result;
use crate::core::request::Request;
use crate::engine::ExecutionEngine;

/// A mutation document plus its variables
#[derive(Debug, Clone)]
pub struct MutationOptions<V> {
    pub mutation: Document,
    pub variables: V,
}

impl<V> MutationOptions<V> {
    pub fn new(mutation: Document, variables: V) -> Self {
        Self {
            mutation,
            variables,
        }
    }
}

impl Executor {
    /// Run a mutation against the schema of the request's resolver
    ///
    /// The mutation shares the resolver's context, so its writes land in the
    /// same transaction as the resolver's own.
    pub async fn run_mutation<E, D, V>(
        &self,
        request: &Request<E>,
        options: MutationOptions<V>,
    ) -> Result<Option<D>>
    where
        E: ExecutionEngine,
        D: DeserializeOwned,
        V: Serialize + Send,
    {
        let MutationOptions {
            mutation,
            variables,
        } = options;
        self.execute_as(
            request,
            ExecuteOptions::new(mutation, variables),
            Some(OperationKind::Mutation),
        )
        .await
    }
}
