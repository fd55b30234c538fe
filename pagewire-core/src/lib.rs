//! # pagewire-core
//!
//! Transparent pagination for SQL statements. A page-aware statement carries
//! a [`PageRequest`] among its bound parameters; before it runs, the
//! [`PaginationInterceptor`] optionally counts the total rows with a derived
//! `select count(1)` statement, then appends a `LIMIT <offset>,<size>` window
//! to the SQL. The rows that come back are turned into a [`PageResult`].
//!
//! This crate is driver-agnostic. The live connection is reached through
//! [`CountExecutor`]; `pagewire-sqlx` implements it for SQLx connections.

pub mod config;
pub mod count;
pub mod error;
pub mod interceptor;
pub mod page;
pub mod statement;
pub mod window;

pub use config::{ConfigError, PagewireConfig, PaginationProperties};
pub use count::derive_count_sql;
pub use error::PageError;
pub use interceptor::{PaginationInterceptor, Prepared};
pub use page::{PageRequest, PageResult};
pub use statement::{
    BindValue, BoundStatement, CountExecutor, ParamMap, ParamValue, RawStatement,
    StatementHandler,
};
pub use window::RowWindow;

pub mod prelude {
    //! Re-exports of the most commonly used types.
    pub use crate::{
        BoundStatement, PageError, PageRequest, PageResult, PaginationInterceptor, Prepared,
        StatementHandler,
    };
}
