//! Pagewire: transparent `LIMIT` pagination for SQL statements.
//!
//! This facade crate re-exports the pagewire sub-crates through a single
//! dependency with feature flags. Import everything you need with:
//!
//! ```ignore
//! use pagewire::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature   | Default | Crate                       |
//! |-----------|---------|-----------------------------|
//! | `sqlx`    | **yes** | `pagewire-sqlx`             |
//! | `sqlite`  | **yes** | `pagewire-sqlx/sqlite`      |
//! | `mysql`   | no      | `pagewire-sqlx/mysql`       |
//! | `tracing` | **yes** | `tracing-subscriber` setup  |
//!
//! # Example
//!
//! ```ignore
//! use pagewire::prelude::*;
//!
//! pagewire::init_tracing();
//! let config = PagewireConfig::load("dev")?;
//! let interceptor = PaginationInterceptor::from_config(&config)?;
//!
//! let mut stmt = BoundStatement::new("order.findByBuyerPage", "select id, total from orders where buyer = ? order by id")
//!     .bind("buyer", 42i64)
//!     .page(PageRequest::without_count(1, 50));
//! let page: PageResult<(i64, f64)> = Pager::new(&interceptor)
//!     .fetch_page(&mut SqlxConn::new(&mut conn), &mut stmt)
//!     .await?;
//! ```

// Re-export everything from pagewire-core at the top level for convenience.
pub use pagewire_core::*;

#[cfg(feature = "sqlx")]
pub use pagewire_sqlx;

#[cfg(feature = "sqlx")]
pub use pagewire_sqlx::{Pager, RowExecutor, SqlxConn, SqlxErrorExt, SqlxResult};

/// Install a global `tracing_subscriber::fmt` subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info,pagewire_core=debug`
/// so rewritten statements show up. Calling it again once a subscriber is
/// installed does nothing.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pagewire_core=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub mod prelude {
    //! Re-exports of the most commonly used types.
    pub use pagewire_core::prelude::*;
    pub use pagewire_core::{BindValue, PagewireConfig, RawStatement};

    #[cfg(feature = "sqlx")]
    pub use pagewire_sqlx::{Pager, RowExecutor, SqlxConn, SqlxErrorExt};
}
