//! Capability interfaces the interceptor works against.
//!
//! A [`StatementHandler`] is the target of a preparation event. Handlers that
//! route through bound SQL expose a [`BoundStatement`]: the statement id, the
//! SQL text (readable and replaceable), the named bound parameters, and the
//! positional binding of those parameters. The live connection is reached
//! through [`CountExecutor`].

use std::future::Future;

use crate::error::PageError;
use crate::page::PageRequest;

/// A value that can be bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Bytes(Vec<u8>),
}

/// A named statement parameter: either a bindable value or the page request.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bind(BindValue),
    Page(PageRequest),
}

macro_rules! impl_bind_from {
    ($($ty:ty => |$v:ident| $expr:expr),+ $(,)?) => {
        $(
            impl From<$ty> for BindValue {
                fn from($v: $ty) -> Self {
                    $expr
                }
            }

            impl From<$ty> for ParamValue {
                fn from(v: $ty) -> Self {
                    ParamValue::Bind(BindValue::from(v))
                }
            }
        )+
    };
}

impl_bind_from! {
    i64 => |v| BindValue::Int(v),
    i32 => |v| BindValue::Int(i64::from(v)),
    u32 => |v| BindValue::Int(i64::from(v)),
    f64 => |v| BindValue::Float(v),
    bool => |v| BindValue::Bool(v),
    String => |v| BindValue::Text(v),
    &str => |v| BindValue::Text(v.to_string()),
    Vec<u8> => |v| BindValue::Bytes(v),
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(BindValue::Null, Into::into)
    }
}

impl From<BindValue> for ParamValue {
    fn from(value: BindValue) -> Self {
        ParamValue::Bind(value)
    }
}

impl From<PageRequest> for ParamValue {
    fn from(value: PageRequest) -> Self {
        ParamValue::Page(value)
    }
}

/// Named parameters of a statement, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `name`. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first page request among the values.
    pub fn find_page(&self) -> Option<&PageRequest> {
        self.entries.iter().find_map(|(_, v)| match v {
            ParamValue::Page(page) => Some(page),
            ParamValue::Bind(_) => None,
        })
    }

    pub fn find_page_mut(&mut self) -> Option<&mut PageRequest> {
        self.entries.iter_mut().find_map(|(_, v)| match v {
            ParamValue::Page(page) => Some(page),
            ParamValue::Bind(_) => None,
        })
    }
}

/// A statement whose SQL and parameters are bound and ready to execute.
///
/// `placeholders` names, in order, the parameter bound to each `?` in `sql`.
///
/// ```ignore
/// let stmt = BoundStatement::new("user.findActivePage", "select * from users where status = ?")
///     .bind("status", "active")
///     .page(PageRequest::new(1, 20));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    id: Option<String>,
    sql: String,
    params: ParamMap,
    placeholders: Vec<String>,
}

impl BoundStatement {
    pub fn new(id: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            sql: sql.into(),
            params: ParamMap::new(),
            placeholders: Vec::new(),
        }
    }

    /// A statement without an id; never paginated.
    pub fn anonymous(sql: impl Into<String>) -> Self {
        Self {
            id: None,
            sql: sql.into(),
            params: ParamMap::new(),
            placeholders: Vec::new(),
        }
    }

    /// Add a parameter and bind it to the next `?` placeholder.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<BindValue>) -> Self {
        let name = name.into();
        self.params.insert(name.clone(), ParamValue::Bind(value.into()));
        self.placeholders.push(name);
        self
    }

    /// Bind an already added parameter to the next `?` placeholder.
    pub fn rebind(mut self, name: impl Into<String>) -> Self {
        self.placeholders.push(name.into());
        self
    }

    /// Add a parameter that is not bound to any placeholder.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Attach the page request under the `page` parameter.
    pub fn page(self, request: PageRequest) -> Self {
        self.param("page", request)
    }

    pub fn statement_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Replace the SQL text that will be executed.
    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    pub fn parameters(&self) -> &ParamMap {
        &self.params
    }

    pub fn parameters_mut(&mut self) -> &mut ParamMap {
        &mut self.params
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    pub fn page_request(&self) -> Option<&PageRequest> {
        self.params.find_page()
    }

    /// Resolve the placeholders into positional values.
    ///
    /// Any statement with the same placeholders can be bound with the result,
    /// which is how the derived count statement receives its parameters.
    pub fn bind_values(&self) -> Result<Vec<BindValue>, PageError> {
        self.placeholders
            .iter()
            .map(|name| match self.params.get(name) {
                Some(ParamValue::Bind(value)) => Ok(value.clone()),
                Some(ParamValue::Page(_)) | None => Err(PageError::UnboundParameter {
                    name: name.clone(),
                }),
            })
            .collect()
    }
}

/// The target of a statement-preparation event.
pub trait StatementHandler {
    /// The SQL text that will be executed.
    fn sql(&self) -> &str;

    /// Positional values for the placeholders in [`sql`](Self::sql).
    fn bind_values(&self) -> Result<Vec<BindValue>, PageError>;

    /// The bound statement, for handlers that route through bound SQL and
    /// parameters. Other handlers are never rewritten.
    fn bound_statement(&mut self) -> Option<&mut BoundStatement> {
        None
    }
}

impl StatementHandler for BoundStatement {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn bind_values(&self) -> Result<Vec<BindValue>, PageError> {
        BoundStatement::bind_values(self)
    }

    fn bound_statement(&mut self) -> Option<&mut BoundStatement> {
        Some(self)
    }
}

/// Plain SQL text without bound parameters, e.g. DDL or a fixed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement(pub String);

impl StatementHandler for RawStatement {
    fn sql(&self) -> &str {
        &self.0
    }

    fn bind_values(&self) -> Result<Vec<BindValue>, PageError> {
        Ok(Vec::new())
    }
}

/// The live connection, as seen by the count step.
///
/// Uses RPITIT (return-position `impl Trait` in traits), no `async-trait` needed.
pub trait CountExecutor: Send {
    /// Run `sql` with `values` bound positionally and return the first column
    /// of the first row, or `None` when no row came back.
    fn fetch_count(
        &mut self,
        sql: &str,
        values: &[BindValue],
    ) -> impl Future<Output = Result<Option<i64>, PageError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_values_follow_placeholder_order() {
        let stmt = BoundStatement::new("q", "select * from t where a = ? and b = ? or a = ?")
            .bind("a", 1i64)
            .bind("b", "x")
            .rebind("a");
        assert_eq!(
            stmt.bind_values().unwrap(),
            vec![BindValue::Int(1), BindValue::Text("x".into()), BindValue::Int(1)]
        );
    }

    #[test]
    fn test_page_cannot_be_bound_positionally() {
        let stmt = BoundStatement::new("q", "select ?")
            .page(PageRequest::new(1, 10))
            .rebind("page");
        let err = stmt.bind_values().unwrap_err();
        assert!(matches!(err, PageError::UnboundParameter { name } if name == "page"));
    }

    #[test]
    fn test_missing_placeholder_name() {
        let stmt = BoundStatement::new("q", "select ?").rebind("nope");
        assert!(stmt.bind_values().is_err());
    }

    #[test]
    fn test_find_page_first_in_insertion_order() {
        let mut params = ParamMap::new();
        params.insert("status", "active");
        params.insert("first", PageRequest::new(2, 10));
        params.insert("second", PageRequest::new(9, 99));
        assert_eq!(params.find_page(), Some(&PageRequest::new(2, 10)));

        params.find_page_mut().unwrap().total_count = Some(42);
        assert_eq!(params.find_page().unwrap().total_count, Some(42));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = ParamMap::new();
        params.insert("a", 1i64);
        params.insert("b", 2i64);
        params.insert("a", 3i64);
        let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(params.get("a"), Some(&ParamValue::Bind(BindValue::Int(3))));
    }

    #[test]
    fn test_option_binds_null() {
        assert_eq!(BindValue::from(None::<i64>), BindValue::Null);
        assert_eq!(BindValue::from(Some("v")), BindValue::Text("v".into()));
    }

    #[test]
    fn test_raw_statement_is_not_routed() {
        let mut raw = RawStatement("select 1".into());
        assert!(raw.bound_statement().is_none());
        assert!(StatementHandler::bind_values(&raw).unwrap().is_empty());
    }
}
