use pagewire_core::PageError;

/// Extension trait for converting `sqlx::Error` into `PageError`.
///
/// Due to Rust's orphan rules, we can't implement `From<sqlx::Error> for PageError`
/// in this crate. Use `.into_page_error()` (or `map_err(SqlxErrorExt::into_page_error)`).
pub trait SqlxErrorExt {
    fn into_page_error(self) -> PageError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_page_error(self) -> PageError {
        PageError::database(self)
    }
}

/// Convenience alias for results of the SQLx backend.
pub type SqlxResult<T> = Result<T, PageError>;
