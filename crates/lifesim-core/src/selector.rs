//! Two-stage weighted event draw.
//!
//! Stage one picks a tier from the player's luck value: a uniform roll in
//! `[0, 100)` lands in the bad-luck tier with probability
//! `(100 - luck) / 100`, and the favorable remainder is split evenly
//! between the normal and good-luck tiers. Higher luck therefore means bad
//! events happen less often, and good and normal events more often, in
//! equal measure.
//!
//! Stage two picks a uniform ordinal within the chosen tier's definition
//! count. An empty tier is an error, never a silent default: callers either
//! propagate the failure or retry after catalog maintenance.
//!
//! Both stages draw from an injected [`Rng`] so tier distributions are
//! reproducible with a seeded generator.

use lifesim_types::{EventCatalogStats, EventTier};
use rand::Rng;

/// The luck scale: luck values and tier rolls live in `[0, LUCK_SCALE)`.
const LUCK_SCALE: i64 = 100;

/// Errors from the selection stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The catalog has zero definitions registered for the drawn tier.
    /// Fatal for the current tick; recoverable by catalog maintenance.
    #[error("no events registered for tier {tier}")]
    EmptyTier {
        /// The tier whose count was zero.
        tier: EventTier,
    },
}

/// Outcome of the two-stage draw: a tier and an ordinal within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDraw {
    /// The drawn tier.
    pub tier: EventTier,
    /// Position within the tier's natural ordering, in `[0, count)`.
    pub ordinal: u32,
}

/// Stage one: pick a tier for the given luck value.
///
/// `lucky_value` outside `[0, 100]` is clamped first (the effect applier
/// keeps it in range, but the draw stays total either way). With `r`
/// uniform in `[0, 100)`:
///
/// - `r >= luck` -- bad luck, so `P(BadLuck) = (100 - luck) / 100`;
/// - otherwise the favorable range `[0, luck)` splits evenly, lower half
///   normal, upper half good luck.
pub fn select_tier(lucky_value: i64, rng: &mut impl Rng) -> EventTier {
    let luck = lucky_value.clamp(0, LUCK_SCALE);
    let roll: i64 = rng.random_range(0..LUCK_SCALE);

    if roll >= luck {
        return EventTier::BadLuck;
    }
    let half = luck.checked_div(2).unwrap_or(0);
    if roll < half {
        EventTier::Normal
    } else {
        EventTier::GoodLuck
    }
}

/// Run both stages: pick a tier, then a uniform ordinal within it.
///
/// # Errors
///
/// Returns [`SelectionError::EmptyTier`] when the drawn tier has no
/// definitions registered.
pub fn select_event(
    lucky_value: i64,
    stats: EventCatalogStats,
    rng: &mut impl Rng,
) -> Result<EventDraw, SelectionError> {
    let tier = select_tier(lucky_value, rng);
    let count = stats.count_for(tier);
    if count == 0 {
        return Err(SelectionError::EmptyTier { tier });
    }
    let ordinal = rng.random_range(0..count);
    Ok(EventDraw { tier, ordinal })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    const DRAWS: u32 = 10_000;

    /// Count tier outcomes over `DRAWS` seeded draws.
    fn tier_counts(lucky_value: i64, seed: u64) -> (u32, u32, u32) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut normal = 0_u32;
        let mut good = 0_u32;
        let mut bad = 0_u32;
        for _ in 0..DRAWS {
            match select_tier(lucky_value, &mut rng) {
                EventTier::Normal => normal = normal.saturating_add(1),
                EventTier::GoodLuck => good = good.saturating_add(1),
                EventTier::BadLuck => bad = bad.saturating_add(1),
            }
        }
        (normal, good, bad)
    }

    /// Expected count out of `DRAWS` for a probability expressed in
    /// hundredths-of-a-percent-free integer form: `numer / 100`.
    fn expected(numer: i64) -> i64 {
        // DRAWS * numer / 100
        i64::from(DRAWS)
            .saturating_mul(numer)
            .checked_div(100)
            .unwrap_or(0)
    }

    fn assert_close(observed: u32, expected: i64) {
        // 2% of all draws as tolerance, generous for 10k samples.
        let tolerance = i64::from(DRAWS).checked_div(50).unwrap_or(0);
        let diff = i64::from(observed).saturating_sub(expected).abs();
        assert!(
            diff <= tolerance,
            "observed {observed}, expected {expected} +/- {tolerance}"
        );
    }

    #[test]
    fn bad_luck_share_shrinks_with_luck() {
        for lucky_value in [0_i64, 10, 25, 50, 75, 90, 100] {
            let (normal, good, bad) = tier_counts(lucky_value, 42);
            assert_close(bad, expected(100_i64.saturating_sub(lucky_value)));
            // The favorable remainder splits evenly.
            let half = lucky_value.checked_div(2).unwrap_or(0);
            assert_close(normal, expected(half));
            assert_close(good, expected(lucky_value.saturating_sub(half)));
        }
    }

    #[test]
    fn zero_luck_is_always_bad() {
        let (normal, good, bad) = tier_counts(0, 7);
        assert_eq!(normal, 0);
        assert_eq!(good, 0);
        assert_eq!(bad, DRAWS);
    }

    #[test]
    fn full_luck_never_draws_bad() {
        let (normal, good, bad) = tier_counts(100, 7);
        assert_eq!(bad, 0);
        assert_eq!(normal.saturating_add(good), DRAWS);
    }

    #[test]
    fn out_of_range_luck_is_clamped() {
        let (_, _, bad_high) = tier_counts(250, 11);
        assert_eq!(bad_high, 0);
        let (normal_low, good_low, bad_low) = tier_counts(-30, 11);
        assert_eq!(normal_low, 0);
        assert_eq!(good_low, 0);
        assert_eq!(bad_low, DRAWS);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        assert_eq!(tier_counts(50, 1234), tier_counts(50, 1234));
    }

    #[test]
    fn empty_tier_is_an_error() {
        let stats = EventCatalogStats {
            normal: 3,
            good_luck: 3,
            bad_luck: 0,
        };
        let mut rng = SmallRng::seed_from_u64(42);
        // Luck 0 forces the bad-luck tier on every draw.
        let result = select_event(0, stats, &mut rng);
        assert_eq!(
            result,
            Err(SelectionError::EmptyTier {
                tier: EventTier::BadLuck
            })
        );
    }

    #[test]
    fn ordinals_stay_within_tier_count() {
        let stats = EventCatalogStats {
            normal: 5,
            good_luck: 2,
            bad_luck: 9,
        };
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..1000_u32 {
            let draw = select_event(50, stats, &mut rng);
            assert!(draw.is_ok());
            if let Ok(draw) = draw {
                assert!(draw.ordinal < stats.count_for(draw.tier));
            }
        }
    }

    #[test]
    fn every_ordinal_is_eventually_drawn() {
        let stats = EventCatalogStats {
            normal: 4,
            good_luck: 4,
            bad_luck: 0,
        };
        let mut rng = SmallRng::seed_from_u64(5);
        let mut seen = [false; 4];
        for _ in 0..500_u32 {
            // Luck 100 keeps every draw in the populated tiers.
            let draw = select_event(100, stats, &mut rng);
            assert!(draw.is_ok());
            if let Ok(draw) = draw {
                if draw.tier == EventTier::Normal {
                    let slot = usize::try_from(draw.ordinal).ok().and_then(|i| seen.get_mut(i));
                    if let Some(slot) = slot {
                        *slot = true;
                    }
                }
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
