//! Per-call context shared between a resolver and the operations it issues

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Context of the in-flight request a resolver is executing within
///
/// Implemented by whatever the host puts into its GraphQL context. Callers can
/// extend it freely; the adapter only reads the role for logging.
pub trait CallContext: Send + Sync + 'static {
    /// Authorization role the request runs as, if any
    fn role(&self) -> Option<&str> {
        None
    }
}

impl CallContext for () {}

impl<T: CallContext> CallContext for Arc<T> {
    fn role(&self) -> Option<&str> {
        (**self).role()
    }
}

/// Default context: a database handle plus the session's role
///
/// `db` is shared, so every clone of a `SessionContext` talks to the same
/// connection (and therefore the same transaction).
#[derive(Debug)]
pub struct SessionContext<Db> {
    db: Arc<Db>,
    role: String,
    extensions: HashMap<String, Value>,
}

impl<Db> SessionContext<Db> {
    pub fn new(db: Arc<Db>, role: impl Into<String>) -> Self {
        Self {
            db,
            role: role.into(),
            extensions: HashMap::new(),
        }
    }

    /// Add an extra value contributed by session middleware
    pub fn with_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }

    pub fn db(&self) -> &Arc<Db> {
        &self.db
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }
}

impl<Db> Clone for SessionContext<Db> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            role: self.role.clone(),
            extensions: self.extensions.clone(),
        }
    }
}

impl<Db: Send + Sync + 'static> CallContext for SessionContext<Db> {
    fn role(&self) -> Option<&str> {
        Some(&self.role)
    }
}
