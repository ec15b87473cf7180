//! # Rollcall DB
//!
//! PostgreSQL access for the Rollcall API.
//!
//! - pool construction and embedded migrations
//! - [`store`]: the record-store seams ([`AttendanceStore`], [`RevocationStore`])
//!   and their SQLx implementation [`PgStore`]
//! - [`memory`]: an in-process store for tests (`test-utils` feature)
//!
//! # Example
//!
//! ```ignore
//! use rollcall_db::{PgStore, connect, run_migrations};
//!
//! let pool = connect(&database_url).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool.clone());
//! ```

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod store;

pub use error::StoreError;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use store::{AttendanceStore, PgStore, RevocationStore, token_digest};

pub use sqlx::PgPool;

use sqlx::postgres::PgPoolOptions;

/// Connects a PostgreSQL pool.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
