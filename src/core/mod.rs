//! Core types: contexts, documents, requests, errors and helpers

pub mod context;
pub mod document;
pub mod error;
pub mod logging;
pub mod request;
pub mod sql;

pub use context::{CallContext, SessionContext};
pub use document::{Document, OperationKind};
pub use error::{ExecError, Result};
pub use logging::{DebugSink, RecordingSink, TracingSink, init_tracing};
pub use request::{Request, ResolveInfo, ToolBundle, build_request};
pub use sql::{CompiledSql, PgSql, SqlFragment, SqlHelper};
