use std::time::Duration;

use serde_json::Value as JsonValue;

use crate::types::RowValues;

/// Statement kind declared by the query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMethod {
    Select,
    Insert,
    Update,
    Delete,
    /// No specific kind; the command is inferred from the SQL text.
    Any,
}

impl QueryMethod {
    /// Upper-cased command name, or `None` for `Any`.
    #[must_use]
    pub fn command(self) -> Option<&'static str> {
        match self {
            QueryMethod::Select => Some("SELECT"),
            QueryMethod::Insert => Some("INSERT"),
            QueryMethod::Update => Some("UPDATE"),
            QueryMethod::Delete => Some("DELETE"),
            QueryMethod::Any => None,
        }
    }
}

/// Post-processing requested for a SELECT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOp {
    /// Return only the first row.
    First,
    /// Project one named field across all rows.
    Pluck(String),
}

/// One statement produced by the query builder, consumed exactly once by the client.
///
/// ```rust
/// use sql_middleware_http::prelude::*;
///
/// let q = RawQuery::select("select name from users where id = ?")
///     .bindings(vec![RowValues::Int(7)])
///     .pluck("name");
/// assert_eq!(q.method(), Some(QueryMethod::Select));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery {
    method: Option<QueryMethod>,
    sql: String,
    bindings: Vec<RowValues>,
    post_op: Option<PostOp>,
    returning: Option<Vec<String>>,
    timeout: Option<Duration>,
    cancel_on_timeout: bool,
    query_id: String,
    context: Option<JsonValue>,
}

impl RawQuery {
    /// A statement with no declared method, e.g. transaction control or DDL.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            method: None,
            sql: sql.into(),
            bindings: Vec::new(),
            post_op: None,
            returning: None,
            timeout: None,
            cancel_on_timeout: false,
            query_id: String::new(),
            context: None,
        }
    }

    #[must_use]
    pub fn with_method(method: QueryMethod, sql: impl Into<String>) -> Self {
        let mut q = Self::new(sql);
        q.method = Some(method);
        q
    }

    #[must_use]
    pub fn select(sql: impl Into<String>) -> Self {
        Self::with_method(QueryMethod::Select, sql)
    }

    #[must_use]
    pub fn insert(sql: impl Into<String>) -> Self {
        Self::with_method(QueryMethod::Insert, sql)
    }

    #[must_use]
    pub fn update(sql: impl Into<String>) -> Self {
        Self::with_method(QueryMethod::Update, sql)
    }

    #[must_use]
    pub fn delete(sql: impl Into<String>) -> Self {
        Self::with_method(QueryMethod::Delete, sql)
    }

    #[must_use]
    pub fn bindings(mut self, bindings: Vec<RowValues>) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn first(mut self) -> Self {
        self.post_op = Some(PostOp::First);
        self
    }

    #[must_use]
    pub fn pluck(mut self, field: impl Into<String>) -> Self {
        self.post_op = Some(PostOp::Pluck(field.into()));
        self
    }

    #[must_use]
    pub fn returning<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Advisory only: the client does not enforce it.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration, cancel_on_timeout: bool) -> Self {
        self.timeout = Some(timeout);
        self.cancel_on_timeout = cancel_on_timeout;
        self
    }

    #[must_use]
    pub fn query_id(mut self, query_id: impl Into<String>) -> Self {
        self.query_id = query_id.into();
        self
    }

    #[must_use]
    pub fn context(mut self, context: JsonValue) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn method(&self) -> Option<QueryMethod> {
        self.method
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn bound_values(&self) -> &[RowValues] {
        &self.bindings
    }

    #[must_use]
    pub fn post_op(&self) -> Option<&PostOp> {
        self.post_op.as_ref()
    }

    #[must_use]
    pub fn returning_fields(&self) -> Option<&[String]> {
        self.returning.as_deref()
    }

    #[must_use]
    pub fn timeout_hint(&self) -> Option<(Duration, bool)> {
        self.timeout.map(|t| (t, self.cancel_on_timeout))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.query_id
    }

    #[must_use]
    pub fn query_context(&self) -> Option<&JsonValue> {
        self.context.as_ref()
    }

    /// Command name reported for this statement: the declared method, or else the first
    /// whitespace-delimited token of the SQL, upper-cased.
    ///
    /// The fallback only holds for simple single-statement SQL; a leading comment or CTE
    /// yields whatever token comes first.
    #[must_use]
    pub fn command(&self) -> String {
        self.method
            .and_then(QueryMethod::command)
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.sql
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_uppercase()
            })
    }

    /// Same descriptor with the SQL replaced and the bindings cleared.
    pub(crate) fn into_inlined(mut self, sql: String) -> Self {
        self.sql = sql;
        self.bindings = Vec::new();
        self
    }
}
