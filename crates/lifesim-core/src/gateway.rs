//! Persistence and catalog contracts the engine depends on.
//!
//! The engine never touches a store directly: players load and save through
//! [`PersistenceGateway`], and event definitions resolve through
//! [`EventCatalog`]. Both are implemented by `lifesim-db` against the cache
//! and the durable event table, and by [`crate::memory::MemoryStore`] for
//! tests and the local runner. The engine owns no retry policy; retries,
//! if any, belong to the gateway implementation, as does per-player mutual
//! exclusion when multiple callers exist.

use lifesim_types::{EventCatalogStats, EventDefinition, EventTier, PlayerState};

/// Errors surfaced by a gateway or catalog implementation.
///
/// The variants keep the engine's failure taxonomy intact for callers:
/// not-found conditions stay distinguishable from backend I/O failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// No player record exists under the given id.
    #[error("player not found: {id}")]
    PlayerNotFound {
        /// The player id that was requested.
        id: String,
    },

    /// The catalog holds no definition at the given tier/ordinal.
    #[error("no {tier} event at ordinal {ordinal}")]
    EventNotFound {
        /// The tier that was queried.
        tier: EventTier,
        /// The ordinal within the tier's natural ordering.
        ordinal: u32,
    },

    /// An I/O failure against the backing store. Not locally recoverable;
    /// surfaced to the caller.
    #[error("store error: {message}")]
    Store {
        /// Backend-specific description of the failure.
        message: String,
    },
}

/// Abstract load/save for player records and catalog refresh operations.
///
/// A tick is atomic from the caller's perspective: the controller mutates a
/// working copy and calls [`PersistenceGateway::save_player`] exactly once
/// at the end, so a failed tick leaves the prior persisted state untouched.
#[allow(async_fn_in_trait)]
pub trait PersistenceGateway {
    /// Load the player record stored under `id`.
    async fn load_player(&self, id: &str) -> Result<PlayerState, GatewayError>;

    /// Persist the full player record under its id, replacing any prior
    /// version.
    async fn save_player(&self, state: &PlayerState) -> Result<(), GatewayError>;

    /// Recompute catalog stats from the durable definitions and republish
    /// every cached definition. Idempotent.
    async fn reload_catalog(&self) -> Result<EventCatalogStats, GatewayError>;

    /// Refresh a single cached definition in place. Does **not** recompute
    /// stats; call [`PersistenceGateway::reload_catalog`] when counts may
    /// have changed. Idempotent.
    async fn reload_catalog_entry(
        &self,
        tier: EventTier,
        event_id: i64,
    ) -> Result<(), GatewayError>;
}

/// Read access to the event catalog.
///
/// Definitions are not densely indexed: an ordinal is a position within the
/// tier's natural ordering in the backing store, not an event id. Stats and
/// `definition_at` may lag one refresh cycle behind each other, but a
/// reader must never see a count exceeding the definitions actually
/// resolvable.
#[allow(async_fn_in_trait)]
pub trait EventCatalog {
    /// Current per-tier definition counts.
    async fn stats(&self) -> Result<EventCatalogStats, GatewayError>;

    /// Resolve the definition at `ordinal` within `tier`.
    async fn definition_at(
        &self,
        tier: EventTier,
        ordinal: u32,
    ) -> Result<EventDefinition, GatewayError>;
}
