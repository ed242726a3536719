//! In-memory store implementing the gateway and catalog contracts.
//!
//! In production the player records are backed by the cache and the event
//! definitions by the durable table (`lifesim-db`); in tests and the local
//! runner the whole store is held in memory. Stats here are always computed
//! live from the definition lists, so this implementation is by
//! construction never inconsistent with `definition_at`.

use std::collections::BTreeMap;
use std::sync::RwLock;

use lifesim_types::{EventCatalogStats, EventDefinition, EventTier, PlayerState};

use crate::gateway::{EventCatalog, GatewayError, PersistenceGateway};

/// Definitions held per tier, in insertion order (the tier's natural
/// ordering for ordinal resolution).
type TierTable = BTreeMap<EventTier, Vec<EventDefinition>>;

/// An in-memory [`PersistenceGateway`] and [`EventCatalog`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RwLock<BTreeMap<String, PlayerState>>,
    events: RwLock<TierTable>,
}

/// Map a poisoned lock to a store error instead of panicking.
fn poisoned(table: &str) -> GatewayError {
    GatewayError::Store {
        message: format!("{table} lock poisoned"),
    }
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the given definitions, grouped by tier in
    /// the order given.
    pub fn with_events(definitions: Vec<EventDefinition>) -> Self {
        let store = Self::new();
        for def in definitions {
            store.insert_event(def);
        }
        store
    }

    /// Append a definition to its tier.
    ///
    /// Silently drops the definition if the event table lock is poisoned;
    /// only reachable after a panic elsewhere.
    pub fn insert_event(&self, definition: EventDefinition) {
        if let Ok(mut events) = self.events.write() {
            events.entry(definition.tier).or_default().push(definition);
        }
    }

    /// Inspect the stored record for a player, if any. Test helper.
    pub fn player(&self, id: &str) -> Option<PlayerState> {
        self.players.read().ok()?.get(id).cloned()
    }
}

impl PersistenceGateway for MemoryStore {
    async fn load_player(&self, id: &str) -> Result<PlayerState, GatewayError> {
        let players = self.players.read().map_err(|_| poisoned("player"))?;
        players
            .get(id)
            .cloned()
            .ok_or_else(|| GatewayError::PlayerNotFound { id: id.to_owned() })
    }

    async fn save_player(&self, state: &PlayerState) -> Result<(), GatewayError> {
        let mut players = self.players.write().map_err(|_| poisoned("player"))?;
        players.insert(state.id.clone(), state.clone());
        Ok(())
    }

    async fn reload_catalog(&self) -> Result<EventCatalogStats, GatewayError> {
        // Definitions are the backing store here, so a reload is just a
        // recount.
        self.stats().await
    }

    async fn reload_catalog_entry(
        &self,
        _tier: EventTier,
        _event_id: i64,
    ) -> Result<(), GatewayError> {
        // No cache layer to refresh in memory.
        Ok(())
    }
}

impl EventCatalog for MemoryStore {
    async fn stats(&self) -> Result<EventCatalogStats, GatewayError> {
        let events = self.events.read().map_err(|_| poisoned("event"))?;
        let count = |tier: EventTier| -> u32 {
            events
                .get(&tier)
                .map_or(0, |defs| u32::try_from(defs.len()).unwrap_or(u32::MAX))
        };
        Ok(EventCatalogStats {
            normal: count(EventTier::Normal),
            good_luck: count(EventTier::GoodLuck),
            bad_luck: count(EventTier::BadLuck),
        })
    }

    async fn definition_at(
        &self,
        tier: EventTier,
        ordinal: u32,
    ) -> Result<EventDefinition, GatewayError> {
        let events = self.events.read().map_err(|_| poisoned("event"))?;
        events
            .get(&tier)
            .and_then(|defs| defs.get(usize::try_from(ordinal).ok()?))
            .cloned()
            .ok_or(GatewayError::EventNotFound { tier, ordinal })
    }
}
