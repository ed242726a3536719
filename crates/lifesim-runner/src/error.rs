//! Error types for the runner binary.

use lifesim_core::{GatewayError, TickError};
use lifesim_db::DbError;

/// Errors surfaced while wiring or driving the run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration file could not be read or parsed.
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the failure.
        message: String,
    },

    /// Data-layer setup failed (connection, migration).
    #[error("data layer error: {source}")]
    Db {
        /// The underlying data-layer error.
        #[from]
        source: DbError,
    },

    /// A player load/save or catalog operation failed.
    #[error("gateway error: {source}")]
    Gateway {
        /// The underlying gateway error.
        #[from]
        source: GatewayError,
    },

    /// A daily tick failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}
