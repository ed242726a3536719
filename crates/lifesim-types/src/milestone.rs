//! Tagged milestone records kept on the player.
//!
//! Milestones are the closed set of fate-changing moments worth keeping in
//! the player record itself: luck-tier events with outsized effects, and the
//! terminal day. The set is deliberately closed -- downstream consumers can
//! match exhaustively instead of probing an untyped container.

use serde::{Deserialize, Serialize};

/// Why a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Health reached 0.
    HealthDepleted,
    /// The remaining-days counter reached 0.
    LifespanOver,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::HealthDepleted => write!(f, "health_depleted"),
            Self::LifespanOver => write!(f, "lifespan_over"),
        }
    }
}

/// One fate-changing record in a player's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Milestone {
    /// A good-luck event whose effects crossed the milestone threshold.
    GoodFortune {
        /// Player age (in days) when the event landed.
        age: i64,
        /// The event's identifier within the good-luck tier.
        event_id: i64,
        /// The event description at the time it was applied.
        description: String,
    },
    /// A bad-luck event whose effects crossed the milestone threshold.
    Misfortune {
        /// Player age (in days) when the event landed.
        age: i64,
        /// The event's identifier within the bad-luck tier.
        event_id: i64,
        /// The event description at the time it was applied.
        description: String,
    },
    /// The terminal day.
    Died {
        /// Final age in days.
        age: i64,
        /// Why the run ended.
        cause: DeathCause,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_serde_is_tagged() {
        let m = Milestone::Died {
            age: 88,
            cause: DeathCause::LifespanOver,
        };
        let json = serde_json::to_string(&m).unwrap_or_default();
        assert!(json.contains("\"kind\":\"died\""));
        assert!(json.contains("\"cause\":\"lifespan_over\""));
    }

    #[test]
    fn milestone_round_trip() {
        let m = Milestone::GoodFortune {
            age: 30,
            event_id: 4,
            description: String::from("Won the neighborhood lottery"),
        };
        let json = serde_json::to_string(&m).ok();
        let restored: Option<Milestone> =
            json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert_eq!(restored, Some(m));
    }

    #[test]
    fn death_cause_display() {
        assert_eq!(DeathCause::HealthDepleted.to_string(), "health_depleted");
        assert_eq!(DeathCause::LifespanOver.to_string(), "lifespan_over");
    }
}
