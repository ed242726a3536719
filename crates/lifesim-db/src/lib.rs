//! Data layer for the Lifesim engine (Redis-compatible cache +
//! `PostgreSQL`).
//!
//! The cache is the write-optimized home of player records and the
//! republished event entries the presentation layer reads by key.
//! `PostgreSQL` holds the durable event table that catalog stats and
//! ordinal resolution are computed from. [`LifeStore`] ties both together
//! behind the `lifesim-core` gateway and catalog contracts.
//!
//! ```text
//! Daily Tick (lifesim-core)
//!     |
//!     +-- load/save player ------> cache       (CachePool)
//!     |
//!     +-- stats / definition_at -> PostgreSQL  (EventTable)
//!     |
//!     +-- catalog reload --------> PostgreSQL rows republished
//!                                  into the cache under derived keys
//! ```
//!
//! # Modules
//!
//! - [`cache`] -- Redis-compatible JSON get/set operations
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`event_table`] -- Durable event rows, tier counts, ordinal lookup
//! - [`gateway`] -- [`LifeStore`], the production gateway implementation
//! - [`error`] -- Shared error types

pub mod cache;
pub mod error;
pub mod event_table;
pub mod gateway;
pub mod postgres;

// Re-export primary types for convenience.
pub use cache::CachePool;
pub use error::DbError;
pub use event_table::{EventRow, EventTable};
pub use gateway::{LifeStore, StoreConfig};
pub use postgres::{PostgresConfig, PostgresPool};
