use crate::config::ConfigError;

/// Errors raised while paginating a statement.
#[derive(Debug)]
pub enum PageError {
    /// The statement id matched the page pattern but no [`PageRequest`](crate::PageRequest)
    /// was among its bound parameters.
    MissingPageParam { statement_id: String },
    /// `page_num` or `page_size` is 0.
    InvalidPageRequest { page_num: u32, page_size: u32 },
    /// A placeholder refers to a parameter that is missing or cannot be bound.
    UnboundParameter { name: String },
    /// A page was requested for a statement the interceptor does not handle.
    NotPageable { statement_id: Option<String> },
    InvalidPattern(regex::Error),
    Config(ConfigError),
    /// Failure reported by the database driver, passed through unchanged.
    Database(Box<dyn std::error::Error + Send + Sync>),
}

impl PageError {
    /// Construct a `Database` variant from any driver error.
    ///
    /// Used by backend crates (e.g. `pagewire-sqlx`) to wrap driver-specific errors.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        PageError::Database(Box::new(err))
    }

    pub fn missing_page_param(statement_id: impl Into<String>) -> Self {
        PageError::MissingPageParam {
            statement_id: statement_id.into(),
        }
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::MissingPageParam { statement_id } => {
                write!(f, "There was no page parameter in statement {statement_id}")
            }
            PageError::InvalidPageRequest {
                page_num,
                page_size,
            } => write!(
                f,
                "Invalid page request: page_num={page_num}, page_size={page_size} (both must be >= 1)"
            ),
            PageError::UnboundParameter { name } => {
                write!(f, "Parameter '{name}' cannot be bound to a placeholder")
            }
            PageError::NotPageable { statement_id } => match statement_id {
                Some(id) => write!(f, "Statement {id} is not page-aware"),
                None => write!(f, "Statement without id is not page-aware"),
            },
            PageError::InvalidPattern(err) => write!(f, "Invalid statement id pattern: {err}"),
            PageError::Config(err) => write!(f, "{err}"),
            PageError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::InvalidPattern(err) => Some(err),
            PageError::Config(err) => Some(err),
            PageError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<regex::Error> for PageError {
    fn from(err: regex::Error) -> Self {
        PageError::InvalidPattern(err)
    }
}

impl From<ConfigError> for PageError {
    fn from(err: ConfigError) -> Self {
        PageError::Config(err)
    }
}
