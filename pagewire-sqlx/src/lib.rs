//! # pagewire-sqlx: SQLx backend for pagewire
//!
//! This crate connects [`pagewire-core`](pagewire_core) to
//! [SQLx](https://github.com/launchbadge/sqlx) connections. It implements the
//! connection capability the pagination interceptor needs (count execution
//! with positional parameter replay) and a [`Pager`] that runs the whole
//! intercept → execute → assemble flow.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SqlxConn`] | Borrowed SQLx connection implementing `CountExecutor` and `RowExecutor` |
//! | [`RowExecutor`] | Row fetching on a connection, on top of `CountExecutor` |
//! | [`Pager`] | Paginates, executes, and assembles a `PageResult<T>` |
//! | [`SqlxErrorExt`] | Extension trait to convert `sqlx::Error` → `PageError` (`.into_page_error()`) |
//! | [`SqlxResult<T>`] | Type alias for `Result<T, PageError>` |
//!
//! # Feature flags
//!
//! | Feature    | Driver |
//! |------------|--------|
//! | `sqlite`   | SQLite via `sqlx/sqlite` (default) |
//! | `mysql`    | MySQL via `sqlx/mysql` |
//!
//! Both accept the `LIMIT <offset>,<size>` window the interceptor appends.
//!
//! # Quick start
//!
//! ```ignore
//! use pagewire_sqlx::prelude::*;
//! use sqlx::Connection;
//!
//! let mut conn = sqlx::SqliteConnection::connect("sqlite::memory:").await?;
//! let interceptor = PaginationInterceptor::default();
//!
//! let mut stmt = BoundStatement::new("user.findPage", "select id, name from users order by id")
//!     .page(PageRequest::new(1, 20));
//! let page: PageResult<(i64, String)> = Pager::new(&interceptor)
//!     .fetch_page(&mut SqlxConn::new(&mut conn), &mut stmt)
//!     .await?;
//! ```

pub mod error;
pub mod executor;
pub mod pager;

pub use error::{SqlxErrorExt, SqlxResult};
pub use executor::{RowExecutor, SqlxConn};
pub use pager::Pager;

/// Re-exports of the most commonly used types from both `pagewire-core` and this crate.
pub mod prelude {
    pub use crate::{Pager, RowExecutor, SqlxConn, SqlxErrorExt};
    pub use pagewire_core::prelude::*;
}
