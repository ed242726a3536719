//! The mutable per-account player record.
//!
//! A [`PlayerState`] is created once by the init operation, mutated exactly
//! once per simulated day by the lifecycle controller, and never physically
//! deleted -- termination is represented by the `died` flag, not removal.
//! The struct is flat so it round-trips exactly through the key-value store.

use serde::{Deserialize, Serialize};

use crate::milestone::Milestone;

/// One account's progress through the game.
///
/// All quantities are whole integer units (currency units, health points,
/// days). Percentages (`salary_float`, `expenses_float`) are whole percent
/// values; divide by 100 at the point of use.
///
/// # Invariants
///
/// - `remain_days = total_days - age`, both >= 0
/// - `health >= 0`, `happiness >= 0` (floors enforced by the effect applier)
/// - `lucky_value` stays in `[0, 100]`
/// - `bad_lucks` and `good_lucks` are monotonically non-decreasing
/// - `died` is monotonic: once `true`, never `false` again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Opaque account key (an email address in practice).
    pub id: String,

    /// Days survived so far.
    pub age: i64,
    /// Days remaining until the run ends naturally.
    pub remain_days: i64,
    /// Total days this account can live.
    pub total_days: i64,

    /// Accumulated wealth. May go negative after bad events.
    pub wealth: i64,
    /// Fixed daily income.
    pub salary: i64,
    /// Daily income fluctuation bound, in whole percent.
    pub salary_float: i64,
    /// Fixed daily outgo.
    pub expenses: i64,
    /// Daily outgo fluctuation bound, in whole percent.
    pub expenses_float: i64,

    /// Current health. Floor 0, no ceiling.
    pub health: i64,
    /// Passive daily health delta. Negative means daily decay.
    pub health_back: i64,

    /// Current happiness. Floor 0, no ceiling.
    pub happiness: i64,
    /// Passive daily happiness delta.
    pub happiness_back: i64,

    /// Luck in `[0, 100]`. Higher luck biases selection away from the
    /// bad-luck tier.
    pub lucky_value: i64,

    /// Cumulative count of bad-luck events applied.
    pub bad_lucks: i64,
    /// Cumulative count of good-luck events applied.
    pub good_lucks: i64,

    /// Terminal marker. Set when health or remaining days run out.
    pub died: bool,

    /// Fate-changing historical records, oldest first.
    pub milestones: Vec<Milestone>,
}

impl PlayerState {
    /// Whether the account is still active (not terminated).
    pub const fn is_active(&self) -> bool {
        !self.died
    }
}

#[cfg(test)]
mod tests {
    use crate::milestone::{DeathCause, Milestone};

    use super::*;

    fn sample_state() -> PlayerState {
        PlayerState {
            id: String::from("player@example.com"),
            age: 12,
            remain_days: 2908,
            total_days: 2920,
            wealth: 9500,
            salary: 333,
            salary_float: 5,
            expenses: 100,
            expenses_float: 10,
            health: 120,
            health_back: 10,
            happiness: 95,
            happiness_back: 10,
            lucky_value: 47,
            bad_lucks: 2,
            good_lucks: 1,
            died: false,
            milestones: vec![Milestone::Misfortune {
                age: 7,
                event_id: 3,
                description: String::from("Lost a wallet on the subway"),
            }],
        }
    }

    #[test]
    fn serde_round_trip_preserves_every_field() {
        let original = sample_state();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<PlayerState, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn serde_round_trip_with_death_milestone() {
        let mut state = sample_state();
        state.died = true;
        state.milestones.push(Milestone::Died {
            age: 12,
            cause: DeathCause::HealthDepleted,
        });
        let json = serde_json::to_string(&state).ok();
        let restored: Option<PlayerState> =
            json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert_eq!(restored, Some(state));
    }

    #[test]
    fn is_active_tracks_died_flag() {
        let mut state = sample_state();
        assert!(state.is_active());
        state.died = true;
        assert!(!state.is_active());
    }
}
