//! Attribute mutation: event effects, passive regeneration, daily ledger.
//!
//! Every mutation here is additive with saturating arithmetic. Health and
//! happiness are clamped to a floor of 0 and have no ceiling; luck is
//! clamped to `[0, 100]`. The functions mutate the caller's state in
//! place -- that contract is explicit, not an accident of receiver
//! semantics.

use lifesim_types::{EventDefinition, EventTier, PlayerState};
use rand::Rng;

/// Upper clamp for `lucky_value`.
const LUCK_MAX: i64 = 100;

/// Apply one event definition's effect fields to the player.
///
/// All ten effect fields land additively, then the tier counter for the
/// matching luck tier is incremented (`Normal` increments neither).
/// Counters only ever grow.
pub fn apply_event(state: &mut PlayerState, event: &EventDefinition) {
    state.wealth = state.wealth.saturating_add(event.effect_wealth);

    state.salary = state.salary.saturating_add(event.effect_salary);
    state.salary_float = state.salary_float.saturating_add(event.effect_salary_float);
    state.expenses = state.expenses.saturating_add(event.effect_expenses);
    state.expenses_float = state
        .expenses_float
        .saturating_add(event.effect_expenses_float);

    state.health = state.health.saturating_add(event.effect_health).max(0);
    state.health_back = state.health_back.saturating_add(event.effect_health_back);

    state.happiness = state
        .happiness
        .saturating_add(event.effect_happiness)
        .max(0);
    state.happiness_back = state
        .happiness_back
        .saturating_add(event.effect_happiness_back);

    state.lucky_value = state
        .lucky_value
        .saturating_add(event.effect_lucky_value)
        .clamp(0, LUCK_MAX);

    match event.tier {
        EventTier::Normal => {}
        EventTier::GoodLuck => state.good_lucks = state.good_lucks.saturating_add(1),
        EventTier::BadLuck => state.bad_lucks = state.bad_lucks.saturating_add(1),
    }
}

/// Apply the passive daily regeneration deltas.
///
/// `health_back` and `happiness_back` may be negative (daily decay); the
/// floors still hold.
pub fn apply_daily_regen(state: &mut PlayerState) {
    state.health = state.health.saturating_add(state.health_back).max(0);
    state.happiness = state.happiness.saturating_add(state.happiness_back).max(0);
}

/// Apply the daily income and outgo, each fluctuated within its
/// percentage bound.
///
/// Income lands as `salary +/- salary * roll / 100` with `roll` uniform in
/// `[-salary_float, +salary_float]`, and outgo symmetrically from
/// `expenses` and `expenses_float`. Wealth may go negative.
pub fn apply_daily_ledger(state: &mut PlayerState, rng: &mut impl Rng) {
    let income = fluctuated(state.salary, state.salary_float, rng);
    let outgo = fluctuated(state.expenses, state.expenses_float, rng);
    state.wealth = state.wealth.saturating_add(income).saturating_sub(outgo);
}

/// Fluctuate `base` by a uniform percentage in `[-bound_pct, +bound_pct]`.
fn fluctuated(base: i64, bound_pct: i64, rng: &mut impl Rng) -> i64 {
    let bound = bound_pct.max(0);
    if bound == 0 || base == 0 {
        return base;
    }
    let roll: i64 = rng.random_range(-bound..=bound);
    let delta = base
        .saturating_mul(roll)
        .checked_div(100)
        .unwrap_or(0);
    base.saturating_add(delta)
}
