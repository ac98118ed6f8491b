//! SQL fragment composition
//!
//! Resolvers receive a [`SqlHelper`] through the request so they can build raw
//! SQL against the request's own database handle. The executor never looks
//! inside; it only passes the helper along.
//!
//! ```rust,ignore
//! let fragment = SqlFragment::raw("select * from ")
//!     .append(SqlFragment::identifier(["app", "users"]))
//!     .append(SqlFragment::raw(" where id = "))
//!     .append(SqlFragment::value(json!(42)));
//!
//! let compiled = request.sql().compile(&fragment);
//! assert_eq!(compiled.text, r#"select * from "app"."users" where id = $1"#);
//! ```

use serde_json::Value;

/// A composable piece of SQL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    nodes: Vec<SqlNode>,
}

#[derive(Debug, Clone, PartialEq)]
enum SqlNode {
    Raw(String),
    Identifier(Vec<String>),
    Value(Value),
}

impl SqlFragment {
    /// Trusted SQL text, emitted verbatim
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            nodes: vec![SqlNode::Raw(text.into())],
        }
    }

    /// A possibly-qualified identifier, e.g. `["schema", "table"]`
    pub fn identifier<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: vec![SqlNode::Identifier(
                parts.into_iter().map(Into::into).collect(),
            )],
        }
    }

    /// A bound parameter
    pub fn value(value: Value) -> Self {
        Self {
            nodes: vec![SqlNode::Value(value)],
        }
    }

    /// Join fragments with a raw separator
    pub fn join<I>(fragments: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = SqlFragment>,
    {
        let mut nodes = Vec::new();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 && !separator.is_empty() {
                nodes.push(SqlNode::Raw(separator.to_string()));
            }
            nodes.extend(fragment.nodes);
        }
        Self { nodes }
    }

    pub fn append(mut self, other: SqlFragment) -> Self {
        self.nodes.extend(other.nodes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// SQL text plus the values bound to its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSql {
    pub text: String,
    pub values: Vec<Value>,
}

/// Turns fragments into executable SQL for a particular database
pub trait SqlHelper: Send + Sync + 'static {
    /// Quote a single identifier
    fn escape_identifier(&self, ident: &str) -> String;

    /// Text for the placeholder of the `index`-th value (1-based)
    fn placeholder(&self, index: usize) -> String;

    fn compile(&self, fragment: &SqlFragment) -> CompiledSql {
        let mut text = String::new();
        let mut values = Vec::new();

        for node in &fragment.nodes {
            match node {
                SqlNode::Raw(raw) => text.push_str(raw),
                SqlNode::Identifier(parts) => {
                    let quoted: Vec<String> =
                        parts.iter().map(|p| self.escape_identifier(p)).collect();
                    text.push_str(&quoted.join("."));
                }
                SqlNode::Value(value) => {
                    values.push(value.clone());
                    text.push_str(&self.placeholder(values.len()));
                }
            }
        }

        CompiledSql { text, values }
    }
}

/// PostgreSQL dialect: `"ident"` quoting and `$n` placeholders
#[derive(Debug, Clone, Copy, Default)]
pub struct PgSql;

impl SqlHelper for PgSql {
    fn escape_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compile_qualified_identifier_and_values() {
        let fragment = SqlFragment::raw("select * from ")
            .append(SqlFragment::identifier(["app", "users"]))
            .append(SqlFragment::raw(" where id = "))
            .append(SqlFragment::value(json!(42)))
            .append(SqlFragment::raw(" and role = "))
            .append(SqlFragment::value(json!("admin")));

        let compiled = PgSql.compile(&fragment);
        assert_eq!(
            compiled.text,
            r#"select * from "app"."users" where id = $1 and role = $2"#
        );
        assert_eq!(compiled.values, vec![json!(42), json!("admin")]);
    }

    #[test]
    fn test_identifier_quotes_are_doubled() {
        assert_eq!(PgSql.escape_identifier(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_join_numbers_placeholders_in_order() {
        let list = SqlFragment::join(
            [json!(1), json!(2), json!(3)].into_iter().map(SqlFragment::value),
            ", ",
        );
        let fragment = SqlFragment::raw("id in (")
            .append(list)
            .append(SqlFragment::raw(")"));

        let compiled = PgSql.compile(&fragment);
        assert_eq!(compiled.text, "id in ($1, $2, $3)");
        assert_eq!(compiled.values.len(), 3);
    }

    #[test]
    fn test_empty_join() {
        let fragment = SqlFragment::join(Vec::<SqlFragment>::new(), ", ");
        assert!(fragment.is_empty());
        assert_eq!(PgSql.compile(&fragment).text, "");
    }
}
