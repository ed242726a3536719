//! Event tiers, catalog definitions, and per-tier catalog stats.
//!
//! Event definitions are administrative data: created out-of-band, read-only
//! to the engine, and refreshed only by an explicit catalog reload. Each
//! definition carries the full set of attribute deltas it applies.

use serde::{Deserialize, Serialize};

/// The three event categories a daily draw can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTier {
    /// Everyday events with modest effects.
    Normal,
    /// Favorable events. Applying one increments `good_lucks`.
    GoodLuck,
    /// Unfavorable events. Applying one increments `bad_lucks`.
    BadLuck,
}

impl EventTier {
    /// Stable numeric code used in storage keys and the durable table.
    pub const fn code(self) -> i16 {
        match self {
            Self::Normal => 0,
            Self::GoodLuck => 1,
            Self::BadLuck => 2,
        }
    }

    /// Inverse of [`EventTier::code`]. Returns `None` for unknown codes.
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::GoodLuck),
            2 => Some(Self::BadLuck),
            _ => None,
        }
    }

    /// All tiers, in code order.
    pub const ALL: [Self; 3] = [Self::Normal, Self::GoodLuck, Self::BadLuck];
}

impl core::fmt::Display for EventTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::GoodLuck => write!(f, "good_luck"),
            Self::BadLuck => write!(f, "bad_luck"),
        }
    }
}

/// A static catalog entry describing one event and its attribute deltas.
///
/// `event_id` is unique within its tier (not globally). All effect fields
/// are additive deltas; percentage effects (`effect_salary_float`,
/// `effect_expenses_float`) are deltas to the percentage, not replacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDefinition {
    /// Identifier, unique within `tier`.
    pub event_id: i64,
    /// Which tier this event belongs to.
    pub tier: EventTier,
    /// Human-readable description, surfaced in day results.
    pub description: String,

    /// Delta to `wealth`.
    pub effect_wealth: i64,
    /// Delta to `salary`.
    pub effect_salary: i64,
    /// Delta to `salary_float` (percentage points).
    pub effect_salary_float: i64,
    /// Delta to `expenses`.
    pub effect_expenses: i64,
    /// Delta to `expenses_float` (percentage points).
    pub effect_expenses_float: i64,
    /// Delta to `health`.
    pub effect_health: i64,
    /// Delta to `health_back`.
    pub effect_health_back: i64,
    /// Delta to `happiness`.
    pub effect_happiness: i64,
    /// Delta to `happiness_back`.
    pub effect_happiness_back: i64,
    /// Delta to `lucky_value`.
    pub effect_lucky_value: i64,
}

impl EventDefinition {
    /// A definition with the given identity and all-zero effects.
    ///
    /// Handy as a starting point for tests and seed data.
    pub const fn neutral(event_id: i64, tier: EventTier, description: String) -> Self {
        Self {
            event_id,
            tier,
            description,
            effect_wealth: 0,
            effect_salary: 0,
            effect_salary_float: 0,
            effect_expenses: 0,
            effect_expenses_float: 0,
            effect_health: 0,
            effect_health_back: 0,
            effect_happiness: 0,
            effect_happiness_back: 0,
            effect_lucky_value: 0,
        }
    }
}

/// Per-tier definition counts, recomputed on demand from the backing store.
///
/// Invariant: `total() = normal + good_luck + bad_luck`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCatalogStats {
    /// Number of normal-tier definitions.
    pub normal: u32,
    /// Number of good-luck definitions.
    pub good_luck: u32,
    /// Number of bad-luck definitions.
    pub bad_luck: u32,
}

impl EventCatalogStats {
    /// Total definition count across all tiers.
    pub const fn total(self) -> u32 {
        self.normal
            .saturating_add(self.good_luck)
            .saturating_add(self.bad_luck)
    }

    /// Definition count for one tier.
    pub const fn count_for(self, tier: EventTier) -> u32 {
        match tier {
            EventTier::Normal => self.normal,
            EventTier::GoodLuck => self.good_luck,
            EventTier::BadLuck => self.bad_luck,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_codes_round_trip() {
        for tier in EventTier::ALL {
            assert_eq!(EventTier::from_code(tier.code()), Some(tier));
        }
    }

    #[test]
    fn unknown_tier_code_is_none() {
        assert_eq!(EventTier::from_code(3), None);
        assert_eq!(EventTier::from_code(-1), None);
    }

    #[test]
    fn tier_display_matches_storage_names() {
        assert_eq!(EventTier::Normal.to_string(), "normal");
        assert_eq!(EventTier::GoodLuck.to_string(), "good_luck");
        assert_eq!(EventTier::BadLuck.to_string(), "bad_luck");
    }

    #[test]
    fn stats_total_is_sum_of_tiers() {
        let stats = EventCatalogStats {
            normal: 12,
            good_luck: 4,
            bad_luck: 7,
        };
        assert_eq!(stats.total(), 23);
        assert_eq!(stats.count_for(EventTier::Normal), 12);
        assert_eq!(stats.count_for(EventTier::GoodLuck), 4);
        assert_eq!(stats.count_for(EventTier::BadLuck), 7);
    }

    #[test]
    fn neutral_definition_has_zero_effects() {
        let def = EventDefinition::neutral(1, EventTier::Normal, String::from("nothing"));
        assert_eq!(def.effect_wealth, 0);
        assert_eq!(def.effect_lucky_value, 0);
        assert_eq!(def.tier, EventTier::Normal);
    }

    #[test]
    fn definition_serde_round_trip() {
        let def = EventDefinition {
            event_id: 9,
            tier: EventTier::BadLuck,
            description: String::from("Caught in a rainstorm without an umbrella"),
            effect_wealth: -50,
            effect_salary: 0,
            effect_salary_float: 0,
            effect_expenses: 10,
            effect_expenses_float: 0,
            effect_health: -5,
            effect_health_back: 0,
            effect_happiness: -10,
            effect_happiness_back: 0,
            effect_lucky_value: -1,
        };
        let json = serde_json::to_string(&def).ok();
        let restored: Option<EventDefinition> =
            json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert_eq!(restored, Some(def));
    }
}
