use pagewire_core::{
    PageError, PageResult, PaginationInterceptor, Prepared, StatementHandler,
};

use crate::executor::RowExecutor;

/// Runs statements on an SQLx connection with the pagination interceptor
/// in front of them.
///
/// # Example
///
/// ```ignore
/// let interceptor = PaginationInterceptor::default();
/// let pager = Pager::new(&interceptor);
///
/// let mut stmt = BoundStatement::new("user.findActivePage", "select id, name from users where active = ? order by id")
///     .bind("active", true)
///     .page(PageRequest::new(1, 20));
/// let page: PageResult<(i64, String)> = pager.fetch_page(&mut SqlxConn::new(&mut conn), &mut stmt).await?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pager<'a> {
    interceptor: &'a PaginationInterceptor,
}

impl<'a> Pager<'a> {
    pub fn new(interceptor: &'a PaginationInterceptor) -> Self {
        Self { interceptor }
    }

    pub fn interceptor(&self) -> &'a PaginationInterceptor {
        self.interceptor
    }

    /// Paginate `handler`, execute it on `conn` and assemble the page.
    ///
    /// The count query (when requested) and the windowed query run on the
    /// same connection, one after the other.
    ///
    /// # Errors
    ///
    /// [`PageError::NotPageable`] when the interceptor passes the statement
    /// through; nothing is executed in that case. Interceptor and driver
    /// errors are returned unchanged.
    pub async fn fetch_page<T, C, H>(
        &self,
        conn: &mut C,
        handler: &mut H,
    ) -> Result<PageResult<T>, PageError>
    where
        C: RowExecutor,
        H: StatementHandler + ?Sized,
        T: for<'r> sqlx::FromRow<'r, C::Row> + Send + Unpin,
    {
        let request = match self.interceptor.prepare(handler, conn).await? {
            Prepared::Paged(request) => request,
            Prepared::PassThrough => {
                let statement_id = handler
                    .bound_statement()
                    .and_then(|stmt| stmt.statement_id().map(str::to_string));
                return Err(PageError::NotPageable { statement_id });
            }
        };

        let values = handler.bind_values()?;
        let rows = conn.fetch_rows::<T>(handler.sql(), &values).await?;
        tracing::debug!(rows = rows.len(), page = request.page_num, "fetched page rows");

        Ok(PageResult::from_request(&request, rows))
    }

    /// Execute `handler` on `conn` after interception and return the raw rows.
    ///
    /// Statements the interceptor does not handle run unchanged. For a
    /// page-aware statement the rows are those of the window, including the
    /// probe row when no count was requested.
    pub async fn fetch_all<T, C, H>(&self, conn: &mut C, handler: &mut H) -> Result<Vec<T>, PageError>
    where
        C: RowExecutor,
        H: StatementHandler + ?Sized,
        T: for<'r> sqlx::FromRow<'r, C::Row> + Send + Unpin,
    {
        self.interceptor.prepare(handler, conn).await?;
        let values = handler.bind_values()?;
        conn.fetch_rows::<T>(handler.sql(), &values).await
    }
}
