//! The production gateway: player records in the cache, catalog in
//! `PostgreSQL`, republished into the cache on reload.
//!
//! [`LifeStore`] implements the `lifesim-core` contracts. Catalog stats
//! are held in memory and swapped only after a full reload has finished
//! republishing, so a reader never observes a count that exceeds the
//! definitions actually resolvable. `reload_catalog_entry` refreshes one
//! cached copy in place and deliberately leaves the stats untouched.

use std::sync::RwLock;

use lifesim_core::gateway::{EventCatalog, GatewayError, PersistenceGateway};
use lifesim_types::{EventCatalogStats, EventDefinition, EventTier, PlayerState};
use serde::{Deserialize, Serialize};

use crate::cache::CachePool;
use crate::error::DbError;
use crate::event_table::EventTable;
use crate::postgres::PostgresPool;

/// Key prefixes and table names for the data layer.
///
/// These are explicit configuration rather than process-wide constants so
/// deployments can partition one cache between environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Prefix prepended to player cache keys. Default empty: the cache key
    /// is the player id itself.
    pub player_key_prefix: String,
    /// Prefix for republished event cache keys (default: `event`). The
    /// full key is `{prefix}_{tier_code}_{event_id}`.
    pub event_key_prefix: String,
    /// Name of the durable event table (default: `life_events`).
    pub event_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            player_key_prefix: String::new(),
            event_key_prefix: String::from("event"),
            event_table: String::from("life_events"),
        }
    }
}

impl StoreConfig {
    /// Cache key for a player record.
    pub fn player_key(&self, id: &str) -> String {
        format!("{}{id}", self.player_key_prefix)
    }

    /// Cache key for a republished event record.
    pub fn event_key(&self, tier: EventTier, event_id: i64) -> String {
        format!("{}_{}_{event_id}", self.event_key_prefix, tier.code())
    }
}

/// The production [`PersistenceGateway`] and [`EventCatalog`].
///
/// Call [`PersistenceGateway::reload_catalog`] once at startup: stats
/// begin at zero counts, and selection against an unloaded catalog fails
/// with empty-tier errors rather than a silent default event.
pub struct LifeStore {
    cache: CachePool,
    postgres: PostgresPool,
    keys: StoreConfig,
    stats: RwLock<EventCatalogStats>,
}

impl LifeStore {
    /// Assemble a store from connected pools and key configuration.
    pub fn new(cache: CachePool, postgres: PostgresPool, keys: StoreConfig) -> Self {
        Self {
            cache,
            postgres,
            keys,
            stats: RwLock::new(EventCatalogStats::default()),
        }
    }

    /// The active key configuration.
    pub const fn keys(&self) -> &StoreConfig {
        &self.keys
    }

    fn event_table(&self) -> EventTable<'_> {
        EventTable::new(self.postgres.pool(), &self.keys.event_table)
    }
}

/// Collapse a data-layer failure into the gateway taxonomy's store error.
fn store_error(err: &DbError) -> GatewayError {
    GatewayError::Store {
        message: err.to_string(),
    }
}

impl PersistenceGateway for LifeStore {
    async fn load_player(&self, id: &str) -> Result<PlayerState, GatewayError> {
        let key = self.keys.player_key(id);
        self.cache.get_json(&key).await.map_err(|e| match e {
            DbError::KeyNotFound(_) => GatewayError::PlayerNotFound { id: id.to_owned() },
            other => store_error(&other),
        })
    }

    async fn save_player(&self, state: &PlayerState) -> Result<(), GatewayError> {
        let key = self.keys.player_key(&state.id);
        self.cache
            .set_json(&key, state)
            .await
            .map_err(|e| store_error(&e))
    }

    async fn reload_catalog(&self) -> Result<EventCatalogStats, GatewayError> {
        let rows = self
            .event_table()
            .fetch_all()
            .await
            .map_err(|e| store_error(&e))?;

        let mut fresh = EventCatalogStats::default();
        for row in rows {
            let definition = row.into_definition().map_err(|e| store_error(&e))?;
            let key = self.keys.event_key(definition.tier, definition.event_id);
            self.cache
                .set_json(&key, &definition)
                .await
                .map_err(|e| store_error(&e))?;
            match definition.tier {
                EventTier::Normal => fresh.normal = fresh.normal.saturating_add(1),
                EventTier::GoodLuck => fresh.good_luck = fresh.good_luck.saturating_add(1),
                EventTier::BadLuck => fresh.bad_luck = fresh.bad_luck.saturating_add(1),
            }
        }

        // Swap only after every definition has been republished.
        let mut stats = self.stats.write().map_err(|_| GatewayError::Store {
            message: String::from("catalog stats lock poisoned"),
        })?;
        *stats = fresh;
        tracing::info!(
            normal = fresh.normal,
            good_luck = fresh.good_luck,
            bad_luck = fresh.bad_luck,
            "Catalog reloaded"
        );
        Ok(fresh)
    }

    async fn reload_catalog_entry(
        &self,
        tier: EventTier,
        event_id: i64,
    ) -> Result<(), GatewayError> {
        let row = self
            .event_table()
            .fetch_one(tier, event_id)
            .await
            .map_err(|e| store_error(&e))?;
        let Some(row) = row else {
            return Err(GatewayError::Store {
                message: format!("no {tier} event with id {event_id} in the durable table"),
            });
        };
        let definition = row.into_definition().map_err(|e| store_error(&e))?;
        let key = self.keys.event_key(tier, event_id);
        self.cache
            .set_json(&key, &definition)
            .await
            .map_err(|e| store_error(&e))?;
        tracing::debug!(%tier, event_id, "Catalog entry republished");
        Ok(())
    }
}

impl EventCatalog for LifeStore {
    async fn stats(&self) -> Result<EventCatalogStats, GatewayError> {
        let stats = self.stats.read().map_err(|_| GatewayError::Store {
            message: String::from("catalog stats lock poisoned"),
        })?;
        Ok(*stats)
    }

    async fn definition_at(
        &self,
        tier: EventTier,
        ordinal: u32,
    ) -> Result<EventDefinition, GatewayError> {
        let row = self
            .event_table()
            .fetch_at(tier, ordinal)
            .await
            .map_err(|e| store_error(&e))?;
        row.map_or(
            Err(GatewayError::EventNotFound { tier, ordinal }),
            |row| row.into_definition().map_err(|e| store_error(&e)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_match_wire_format() {
        let keys = StoreConfig::default();
        assert_eq!(keys.player_key("someone@example.com"), "someone@example.com");
        assert_eq!(keys.event_key(EventTier::Normal, 12), "event_0_12");
        assert_eq!(keys.event_key(EventTier::GoodLuck, 3), "event_1_3");
        assert_eq!(keys.event_key(EventTier::BadLuck, 7), "event_2_7");
    }

    #[test]
    fn configured_prefixes_apply() {
        let keys = StoreConfig {
            player_key_prefix: String::from("player:"),
            event_key_prefix: String::from("staging_event"),
            event_table: String::from("staging_life_events"),
        };
        assert_eq!(keys.player_key("a@b.c"), "player:a@b.c");
        assert_eq!(keys.event_key(EventTier::BadLuck, 1), "staging_event_2_1");
    }

    #[test]
    fn store_config_deserializes_with_defaults() {
        let cfg: Result<StoreConfig, _> =
            serde_json::from_str(r#"{"event_key_prefix": "ev"}"#);
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.event_key_prefix.as_str()),
            Some("ev")
        );
        assert_eq!(
            cfg.as_ref().map(|c| c.event_table.as_str()),
            Some("life_events")
        );
    }
}
