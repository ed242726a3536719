//! The daily tick orchestrator.
//!
//! A player is in one of two states: `Active` or `Died`, and `Died` is
//! terminal. Each tick on an active player runs through these steps:
//!
//! 1. Load the record and reject the tick if the player has died.
//! 2. Advance one day: `age + 1`, `remain_days - 1`.
//! 3. Passive regeneration and the daily ledger.
//! 4. Weighted event draw, catalog resolution, effect application.
//! 5. Termination check: health or remaining days at 0 sets `died` in the
//!    same tick -- the event that caused death is still recorded and
//!    counted.
//! 6. Persist the working copy and hand back a [`DayResult`].
//!
//! The tick mutates a working copy and saves once at the end, so a failed
//! tick leaves the prior persisted state untouched. Formatting and
//! delivery of the day result belong to the caller.

use lifesim_types::{DeathCause, EventDefinition, EventTier, Milestone, PlayerState};
use rand::Rng;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::effects;
use crate::gateway::{EventCatalog, GatewayError, PersistenceGateway};
use crate::selector::{self, SelectionError};

/// Errors that can end a tick early.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    /// Attempted tick on a terminal player. Rejected, not retried.
    #[error("player {id} has already died")]
    AlreadyDied {
        /// The player id the tick was attempted on.
        id: String,
    },

    /// The event draw failed (empty tier). Fatal for this tick.
    #[error("selection error: {source}")]
    Selection {
        /// The underlying selection error.
        #[from]
        source: SelectionError,
    },

    /// A gateway or catalog operation failed.
    #[error("gateway error: {source}")]
    Gateway {
        /// The underlying gateway error.
        #[from]
        source: GatewayError,
    },
}

/// The output of one tick: post-tick snapshot, applied event, termination
/// flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayResult {
    /// The player state after the tick was persisted.
    pub player: PlayerState,
    /// The event that was applied during the tick.
    pub event: EventDefinition,
    /// Whether this tick terminated the run.
    pub died: bool,
}

/// Orchestrates daily ticks against a store and an injected random source.
///
/// Ticks for one player are sequential: the controller assumes no two
/// concurrent invocations operate on the same player id (per-key mutual
/// exclusion, if needed, belongs to the gateway implementation).
#[derive(Debug)]
pub struct LifecycleController<S, R> {
    store: S,
    rng: R,
    config: SimConfig,
}

impl<S, R> LifecycleController<S, R>
where
    S: PersistenceGateway + EventCatalog,
    R: Rng,
{
    /// A controller with the default configuration.
    pub fn new(store: S, rng: R) -> Self {
        Self::with_config(store, rng, SimConfig::default())
    }

    /// A controller with an explicit configuration.
    pub const fn with_config(store: S, rng: R, config: SimConfig) -> Self {
        Self { store, rng, config }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration.
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Create and persist a fresh player under `id` from the configured
    /// starting attributes.
    ///
    /// Returns the newly configured record; the caller's handle is the
    /// return value, not a mutated argument.
    pub async fn init_player(&self, id: &str) -> Result<PlayerState, GatewayError> {
        let s = &self.config.starting;
        let player = PlayerState {
            id: id.to_owned(),
            age: 0,
            remain_days: s.total_days,
            total_days: s.total_days,
            wealth: s.wealth,
            salary: s.salary,
            salary_float: s.salary_float,
            expenses: s.expenses,
            expenses_float: s.expenses_float,
            health: s.health,
            health_back: s.health_back,
            happiness: s.happiness,
            happiness_back: s.happiness_back,
            lucky_value: s.lucky_value,
            bad_lucks: 0,
            good_lucks: 0,
            died: false,
            milestones: Vec::new(),
        };
        self.store.save_player(&player).await?;
        info!(player_id = id, total_days = s.total_days, "Player initialized");
        Ok(player)
    }

    /// Load a player record through the gateway.
    pub async fn load_player(&self, id: &str) -> Result<PlayerState, GatewayError> {
        self.store.load_player(id).await
    }

    /// Persist a player record through the gateway.
    pub async fn save_player(&self, state: &PlayerState) -> Result<(), GatewayError> {
        self.store.save_player(state).await
    }

    /// Advance one day for the given player.
    ///
    /// # Errors
    ///
    /// - [`TickError::AlreadyDied`] if the player is terminal.
    /// - [`TickError::Selection`] if the drawn tier has no definitions.
    /// - [`TickError::Gateway`] on load/resolve/save failures.
    ///
    /// On any error, nothing is persisted.
    pub async fn advance_day(&mut self, id: &str) -> Result<DayResult, TickError> {
        let mut player = self.store.load_player(id).await?;
        if player.died {
            return Err(TickError::AlreadyDied { id: id.to_owned() });
        }

        // One day forward. remain_days may legitimately reach exactly 0,
        // which terminates the run in the check below.
        player.age = player.age.saturating_add(1);
        player.remain_days = player.remain_days.saturating_sub(1).max(0);

        effects::apply_daily_regen(&mut player);
        effects::apply_daily_ledger(&mut player, &mut self.rng);

        let stats = self.store.stats().await?;
        let draw = selector::select_event(player.lucky_value, stats, &mut self.rng)?;
        let event = self.store.definition_at(draw.tier, draw.ordinal).await?;
        effects::apply_event(&mut player, &event);

        if let Some(milestone) = self.milestone_for(&player, &event) {
            player.milestones.push(milestone);
        }

        let died = if let Some(cause) = check_termination(&player) {
            player.died = true;
            player.milestones.push(Milestone::Died {
                age: player.age,
                cause,
            });
            info!(
                player_id = id,
                age = player.age,
                %cause,
                wealth = player.wealth,
                "Player died"
            );
            true
        } else {
            false
        };

        self.store.save_player(&player).await?;

        debug!(
            player_id = id,
            age = player.age,
            tier = %event.tier,
            event_id = event.event_id,
            health = player.health,
            wealth = player.wealth,
            died,
            "Day advanced"
        );

        Ok(DayResult {
            player,
            event,
            died,
        })
    }

    /// A milestone for luck-tier events whose wealth or health effect
    /// magnitude crosses the configured thresholds.
    fn milestone_for(&self, player: &PlayerState, event: &EventDefinition) -> Option<Milestone> {
        let outsized = event.effect_wealth.abs() >= self.config.milestone_wealth_threshold
            || event.effect_health.abs() >= self.config.milestone_health_threshold;
        if !outsized {
            return None;
        }
        match event.tier {
            EventTier::Normal => None,
            EventTier::GoodLuck => Some(Milestone::GoodFortune {
                age: player.age,
                event_id: event.event_id,
                description: event.description.clone(),
            }),
            EventTier::BadLuck => Some(Milestone::Misfortune {
                age: player.age,
                event_id: event.event_id,
                description: event.description.clone(),
            }),
        }
    }
}

/// Evaluate the terminating conditions on a post-mutation state.
///
/// Health depletion takes priority when both conditions hold in the same
/// tick.
pub const fn check_termination(player: &PlayerState) -> Option<DeathCause> {
    if player.health <= 0 {
        return Some(DeathCause::HealthDepleted);
    }
    if player.remain_days <= 0 {
        return Some(DeathCause::LifespanOver);
    }
    None
}
