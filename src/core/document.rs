//! Parsed, schema-independent GraphQL documents

use graphql_parser::query::{self, Definition, OperationDefinition};
use std::fmt;
use std::sync::Arc;

use super::error::{ExecError, Result};

/// Kind of the operation a document executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed executable document
///
/// Parse once (typically at startup) and reuse; cloning is cheap.
#[derive(Debug, Clone)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

#[derive(Debug)]
struct DocumentInner {
    source: String,
    ast: query::Document<'static, String>,
    kind: OperationKind,
    operation_name: Option<String>,
}

impl Document {
    /// Parse a document, requiring at least one operation definition
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let ast = query::parse_query::<String>(&source)
            .map_err(|e| ExecError::Parse {
                message: e.to_string(),
            })?
            .into_static();

        let operation = ast
            .definitions
            .iter()
            .find_map(|def| match def {
                Definition::Operation(op) => Some(op),
                Definition::Fragment(_) => None,
            })
            .ok_or_else(|| ExecError::Parse {
                message: "No operation found in document".to_string(),
            })?;

        let (kind, operation_name) = match operation {
            OperationDefinition::SelectionSet(_) => (OperationKind::Query, None),
            OperationDefinition::Query(q) => (OperationKind::Query, q.name.clone()),
            OperationDefinition::Mutation(m) => (OperationKind::Mutation, m.name.clone()),
            OperationDefinition::Subscription(s) => (OperationKind::Subscription, s.name.clone()),
        };

        Ok(Self {
            inner: Arc::new(DocumentInner {
                source,
                ast,
                kind,
                operation_name,
            }),
        })
    }

    /// Kind of the first operation in the document
    pub fn operation_kind(&self) -> OperationKind {
        self.inner.kind
    }

    /// Name of the first operation, if it has one
    pub fn operation_name(&self) -> Option<&str> {
        self.inner.operation_name.as_deref()
    }

    /// The text the document was parsed from
    pub fn source(&self) -> &str {
        &self.inner.source
    }

    pub fn ast(&self) -> &query::Document<'static, String> {
        &self.inner.ast
    }

    /// Whether two handles point to the same parsed document
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.source)
    }
}
