//! Lifesim engine binary.
//!
//! Wires the daily tick controller to a store and drives one player until
//! death or the configured day ceiling. With an `infrastructure` section
//! in `lifesim-config.yaml` the run goes against the Redis-compatible
//! cache and `PostgreSQL`; without one it runs fully in memory against
//! the built-in demo catalog.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `lifesim-config.yaml`
//! 3. Build the store (in-memory, or connect cache + `PostgreSQL` and
//!    reload the catalog)
//! 4. Resume the configured player, or initialize a fresh one
//! 5. Advance days until the player dies or the ceiling is reached
//! 6. Log the final summary

mod catalog;
mod config;
mod error;

use std::path::Path;

use lifesim_core::{
    EventCatalog, GatewayError, LifecycleController, MemoryStore, PersistenceGateway, TickError,
};
use lifesim_db::{CachePool, EventTable, LifeStore, PostgresPool};
use lifesim_types::EventTier;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::RunnerConfig;
use crate::error::RunnerError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, store setup, or the run itself
/// fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("lifesim-runner starting");

    let config = load_config()?;
    info!(
        player_id = config.player_id,
        seed = config.seed,
        max_days = config.max_days,
        live = config.infrastructure.is_some(),
        "Configuration loaded"
    );

    let rng = config.seed.map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);

    if let Some(infra) = config.infrastructure.as_ref() {
        let store = connect_store(&config, infra).await?;
        let mut controller =
            LifecycleController::with_config(store, rng, config.simulation.clone());
        run(&mut controller, &config).await?;
    } else {
        let store = MemoryStore::with_events(catalog::demo_events());
        let mut controller =
            LifecycleController::with_config(store, rng, config.simulation.clone());
        run(&mut controller, &config).await?;
    }

    info!("lifesim-runner shutdown complete");
    Ok(())
}

/// Load the runner configuration from `lifesim-config.yaml`, falling back
/// to defaults when the file is absent.
fn load_config() -> Result<RunnerConfig, RunnerError> {
    let config_path = Path::new("lifesim-config.yaml");
    if config_path.exists() {
        RunnerConfig::from_file(config_path)
    } else {
        info!("Config file not found, using defaults");
        Ok(RunnerConfig::default())
    }
}

/// Connect the live store, seed an empty durable table with the demo
/// catalog, and reload.
async fn connect_store(
    config: &RunnerConfig,
    infra: &config::InfrastructureConfig,
) -> Result<LifeStore, RunnerError> {
    let cache = CachePool::connect(&infra.cache_url).await?;
    let postgres = PostgresPool::connect_url(&infra.postgres_url).await?;
    postgres.run_migrations().await?;

    let table = EventTable::new(postgres.pool(), &config.store.event_table);
    if table.tier_counts().await?.total() == 0 {
        info!("Durable event table is empty, seeding the demo catalog");
        for event in catalog::demo_events() {
            table.upsert(&event).await?;
        }
    }

    let store = LifeStore::new(cache, postgres, config.store.clone());
    let stats = store.reload_catalog().await?;
    info!(
        normal = stats.normal,
        good_luck = stats.good_luck,
        bad_luck = stats.bad_luck,
        "Catalog ready"
    );
    Ok(store)
}

/// Resume or initialize the configured player, then advance days until
/// termination or the ceiling.
async fn run<S>(
    controller: &mut LifecycleController<S, SmallRng>,
    config: &RunnerConfig,
) -> Result<(), RunnerError>
where
    S: PersistenceGateway + EventCatalog,
{
    let id = config.player_id.as_str();
    let player = match controller.load_player(id).await {
        Ok(player) => {
            info!(player_id = id, age = player.age, "Resuming existing player");
            player
        }
        Err(GatewayError::PlayerNotFound { .. }) => controller.init_player(id).await?,
        Err(e) => return Err(e.into()),
    };
    if player.died {
        info!(player_id = id, age = player.age, "Player has already died, nothing to run");
        return Ok(());
    }

    for _ in 0..config.max_days {
        let day = match controller.advance_day(id).await {
            Ok(day) => day,
            // An empty tier means a miswired catalog; stop rather than
            // spin on failed draws.
            Err(TickError::Selection { source }) => {
                tracing::error!(error = %source, "Catalog cannot serve draws, stopping");
                return Err(TickError::Selection { source }.into());
            }
            Err(e) => return Err(e.into()),
        };

        // Luck-tier days are the interesting ones; quiet days stay at
        // debug level inside the controller.
        if day.event.tier != EventTier::Normal {
            info!(
                player_id = id,
                age = day.player.age,
                tier = %day.event.tier,
                event = %day.event.description,
                health = day.player.health,
                wealth = day.player.wealth,
                "Luck event"
            );
        }

        if day.died {
            break;
        }
    }

    let player = controller.load_player(id).await?;
    info!(
        player_id = id,
        age = player.age,
        died = player.died,
        wealth = player.wealth,
        health = player.health,
        happiness = player.happiness,
        good_lucks = player.good_lucks,
        bad_lucks = player.bad_lucks,
        milestones = player.milestones.len(),
        "Run finished"
    );
    Ok(())
}
