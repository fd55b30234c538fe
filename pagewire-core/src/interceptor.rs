use regex::Regex;

use crate::config::{ConfigProperties, PagewireConfig, PaginationProperties};
use crate::count::derive_count_sql;
use crate::error::PageError;
use crate::page::PageRequest;
use crate::statement::{CountExecutor, StatementHandler};
use crate::window::RowWindow;

/// Outcome of [`PaginationInterceptor::prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// The statement was left untouched.
    PassThrough,
    /// The SQL was rewritten to fetch one page. Carries the page request as
    /// it stands after interception (with `total_count` filled when counted).
    Paged(PageRequest),
}

impl Prepared {
    pub fn page_request(&self) -> Option<&PageRequest> {
        match self {
            Prepared::Paged(request) => Some(request),
            Prepared::PassThrough => None,
        }
    }

    pub fn is_paged(&self) -> bool {
        matches!(self, Prepared::Paged(_))
    }
}

/// Rewrites page-aware statements to fetch a single page.
///
/// A statement is page-aware when its id matches the configured pattern as
/// a whole (default: ids ending in `Page`). Before execution, the
/// interceptor:
///
/// 1. finds the [`PageRequest`] among the bound parameters,
/// 2. removes every `;` from the SQL text,
/// 3. when a count is requested, runs `select count(1) from (<sql>) tmp` on
///    the same connection with the same parameters and stores the result in
///    the request,
/// 4. appends `LIMIT <offset>,<size>` to the SQL text.
///
/// The statement then executes with its already bound parameters.
///
/// # Example
///
/// ```ignore
/// let interceptor = PaginationInterceptor::default();
/// let mut stmt = BoundStatement::new("user.findPage", "select * from users order by id")
///     .page(PageRequest::new(2, 10));
/// let prepared = interceptor.prepare(&mut stmt, &mut conn).await?;
/// assert_eq!(stmt.sql(), "select * from users order by id LIMIT 10,10");
/// ```
#[derive(Debug, Clone)]
pub struct PaginationInterceptor {
    pattern: Regex,
    source: String,
}

impl PaginationInterceptor {
    /// Build an interceptor for ids matching `pattern` (whole-id match).
    pub fn new(pattern: &str) -> Result<Self, PageError> {
        Ok(Self {
            pattern: anchored(pattern)?,
            source: pattern.to_string(),
        })
    }

    /// Build from the `pagewire.pagination` config section.
    pub fn from_config<T>(config: &PagewireConfig<T>) -> Result<Self, PageError> {
        let properties = PaginationProperties::from_config(&config.raw())?;
        Self::new(&properties.pattern)
    }

    /// The pattern as configured, without anchors.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Whether a statement with this id gets paginated.
    pub fn matches(&self, statement_id: Option<&str>) -> bool {
        match statement_id {
            Some(id) if !id.is_empty() => self.pattern.is_match(id),
            _ => false,
        }
    }

    /// Rewrite `handler` in place when it is page-aware.
    ///
    /// # Errors
    ///
    /// - [`PageError::MissingPageParam`] when the id matches but no page
    ///   request is bound. Nothing is executed.
    /// - [`PageError::InvalidPageRequest`] for a zero page number or size.
    /// - Any error from the count query, unchanged.
    pub async fn prepare<H, C>(&self, handler: &mut H, conn: &mut C) -> Result<Prepared, PageError>
    where
        H: StatementHandler + ?Sized,
        C: CountExecutor + ?Sized,
    {
        let Some(stmt) = handler.bound_statement() else {
            tracing::trace!("statement handler without bound SQL, passing through");
            return Ok(Prepared::PassThrough);
        };

        if !self.matches(stmt.statement_id()) {
            tracing::trace!(statement = ?stmt.statement_id(), "statement is not page-aware");
            return Ok(Prepared::PassThrough);
        }
        let statement_id = stmt.statement_id().unwrap_or_default().to_string();

        let mut request = stmt
            .parameters()
            .find_page()
            .cloned()
            .ok_or_else(|| PageError::missing_page_param(&statement_id))?;
        if !request.is_valid() {
            return Err(PageError::InvalidPageRequest {
                page_num: request.page_num,
                page_size: request.page_size,
            });
        }

        let sql = stmt.sql().replace(';', "");

        if request.need_count {
            let count_sql = derive_count_sql(&sql);
            let values = stmt.bind_values()?;
            let count = conn.fetch_count(&count_sql, &values).await?;
            let total = count.and_then(|c| u64::try_from(c).ok()).unwrap_or(0);
            request.total_count = Some(total);
            if let Some(slot) = stmt.parameters_mut().find_page_mut() {
                slot.total_count = Some(total);
            }
        }

        let window = RowWindow::for_request(&request);
        stmt.set_sql(window.apply(&sql));

        tracing::debug!(
            statement = %statement_id,
            offset = window.offset,
            size = window.size,
            total_count = ?request.total_count,
            "paginated statement"
        );

        Ok(Prepared::Paged(request))
    }
}

/// Compile `pattern` so that it must match a whole statement id.
fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

impl Default for PaginationInterceptor {
    fn default() -> Self {
        Self::new(PaginationProperties::DEFAULT_PATTERN)
            .expect("the default pagination pattern is a valid regex")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern_is_suffix_match() {
        let interceptor = PaginationInterceptor::default();
        assert!(interceptor.matches(Some("user.findPage")));
        assert!(interceptor.matches(Some("Page")));
        assert!(!interceptor.matches(Some("user.findPageCount")));
        assert!(!interceptor.matches(Some("user.findAll")));
        assert!(!interceptor.matches(Some("")));
        assert!(!interceptor.matches(None));
    }

    #[test]
    fn test_pattern_matches_whole_id() {
        let interceptor = PaginationInterceptor::new("list.*").unwrap();
        assert!(interceptor.matches(Some("listUsers")));
        assert!(!interceptor.matches(Some("user.listUsers")));
        assert_eq!(interceptor.pattern(), "list.*");
    }

    #[test]
    fn test_default_equals_configured_default_pattern() {
        let default = PaginationInterceptor::default();
        let explicit = PaginationInterceptor::new(PaginationProperties::DEFAULT_PATTERN).unwrap();
        assert_eq!(default.pattern(), PaginationProperties::DEFAULT_PATTERN);
        for id in ["user.findPage", "findPageCount", "Page", "page"] {
            assert_eq!(default.matches(Some(id)), explicit.matches(Some(id)), "{id}");
        }
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PaginationInterceptor::new("(unclosed").unwrap_err();
        assert!(matches!(err, PageError::InvalidPattern(_)));
    }
}
