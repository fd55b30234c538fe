//! [`CountExecutor`] and [`RowExecutor`] for SQLx connections.

use std::future::Future;

use pagewire_core::{BindValue, CountExecutor, PageError};

/// A connection that can run the (rewritten) statement and decode its rows.
pub trait RowExecutor: CountExecutor {
    type Row: sqlx::Row;

    /// Run `sql` with `values` bound positionally and decode every row as `T`.
    fn fetch_rows<T>(
        &mut self,
        sql: &str,
        values: &[BindValue],
    ) -> impl Future<Output = Result<Vec<T>, PageError>> + Send
    where
        T: for<'r> sqlx::FromRow<'r, Self::Row> + Send + Unpin;
}

/// Borrows an SQLx connection for the duration of a paged call.
///
/// Both the executor traits and the SQLx connection types live in other
/// crates, so the impls are carried by this wrapper.
///
/// ```ignore
/// let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
/// let page: PageResult<(i64, String)> = pager
///     .fetch_page(&mut SqlxConn::new(&mut conn), &mut stmt)
///     .await?;
/// ```
#[derive(Debug)]
pub struct SqlxConn<'c, C> {
    conn: &'c mut C,
}

impl<'c, C> SqlxConn<'c, C> {
    pub fn new(conn: &'c mut C) -> Self {
        Self { conn }
    }

    /// The wrapped connection, for queries that bypass the interceptor.
    pub fn inner(&mut self) -> &mut C {
        &mut *self.conn
    }
}

/// Bind `values` onto an SQLx query in order.
macro_rules! bind_all {
    ($query:expr, $values:expr) => {{
        let mut query = $query;
        for value in $values {
            query = match value {
                BindValue::Null => query.bind(None::<String>),
                BindValue::Int(v) => query.bind(*v),
                BindValue::Float(v) => query.bind(*v),
                BindValue::Text(v) => query.bind(v.clone()),
                BindValue::Bool(v) => query.bind(*v),
                BindValue::Bytes(v) => query.bind(v.clone()),
            };
        }
        query
    }};
}

macro_rules! impl_executors {
    ($db:ty, $conn:ty) => {
        impl CountExecutor for SqlxConn<'_, $conn> {
            fn fetch_count(
                &mut self,
                sql: &str,
                values: &[BindValue],
            ) -> impl Future<Output = Result<Option<i64>, PageError>> + Send {
                async move {
                    let query = bind_all!(sqlx::query_scalar::<$db, i64>(sql), values);
                    query
                        .fetch_optional(&mut *self.conn)
                        .await
                        .map_err(crate::SqlxErrorExt::into_page_error)
                }
            }
        }

        impl RowExecutor for SqlxConn<'_, $conn> {
            type Row = <$db as sqlx::Database>::Row;

            fn fetch_rows<T>(
                &mut self,
                sql: &str,
                values: &[BindValue],
            ) -> impl Future<Output = Result<Vec<T>, PageError>> + Send
            where
                T: for<'r> sqlx::FromRow<'r, Self::Row> + Send + Unpin,
            {
                async move {
                    let query = bind_all!(sqlx::query_as::<$db, T>(sql), values);
                    query
                        .fetch_all(&mut *self.conn)
                        .await
                        .map_err(crate::SqlxErrorExt::into_page_error)
                }
            }
        }
    };
}

#[cfg(feature = "sqlite")]
impl_executors!(sqlx::Sqlite, sqlx::SqliteConnection);

#[cfg(feature = "mysql")]
impl_executors!(sqlx::MySql, sqlx::MySqlConnection);
