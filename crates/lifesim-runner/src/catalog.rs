//! Built-in demo event catalog.
//!
//! Used to seed the in-memory store, and to populate an empty durable
//! table on first run against live services. Event ids are unique within
//! a tier only.

use lifesim_types::{EventDefinition, EventTier};

/// A small catalog covering every tier with varied effect profiles.
pub fn demo_events() -> Vec<EventDefinition> {
    let mut events = Vec::new();

    // Normal: small, everyday swings.
    let mut quiet = EventDefinition::neutral(1, EventTier::Normal, "A quiet, uneventful day".to_string());
    quiet.effect_happiness = 1;
    events.push(quiet);

    let mut overtime = EventDefinition::neutral(2, EventTier::Normal, "Stayed late at work".to_string());
    overtime.effect_wealth = 50;
    overtime.effect_happiness = -3;
    overtime.effect_health = -2;
    events.push(overtime);

    let mut jog = EventDefinition::neutral(3, EventTier::Normal, "Went for a morning run".to_string());
    jog.effect_health = 3;
    jog.effect_happiness = 2;
    events.push(jog);

    let mut dinner = EventDefinition::neutral(4, EventTier::Normal, "Dinner out with friends".to_string());
    dinner.effect_wealth = -40;
    dinner.effect_happiness = 5;
    events.push(dinner);

    // Good luck: windfalls and breaks.
    let mut raise = EventDefinition::neutral(1, EventTier::GoodLuck, "Got a raise at work".to_string());
    raise.effect_salary = 30;
    raise.effect_happiness = 10;
    raise.effect_lucky_value = 2;
    events.push(raise);

    let mut lottery = EventDefinition::neutral(2, EventTier::GoodLuck, "Won a small lottery prize".to_string());
    lottery.effect_wealth = 2000;
    lottery.effect_happiness = 15;
    events.push(lottery);

    let mut checkup =
        EventDefinition::neutral(3, EventTier::GoodLuck, "Clean bill of health at the checkup".to_string());
    checkup.effect_health = 10;
    checkup.effect_health_back = 1;
    checkup.effect_happiness = 5;
    events.push(checkup);

    // Bad luck: setbacks.
    let mut flu = EventDefinition::neutral(1, EventTier::BadLuck, "Came down with the flu".to_string());
    flu.effect_health = -15;
    flu.effect_happiness = -5;
    flu.effect_wealth = -60;
    events.push(flu);

    let mut theft = EventDefinition::neutral(2, EventTier::BadLuck, "Wallet stolen on the bus".to_string());
    theft.effect_wealth = -300;
    theft.effect_happiness = -8;
    theft.effect_lucky_value = -2;
    events.push(theft);

    let mut rent = EventDefinition::neutral(3, EventTier::BadLuck, "Landlord raised the rent".to_string());
    rent.effect_expenses = 20;
    rent.effect_happiness = -6;
    events.push(rent);

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tier_is_populated() {
        let events = demo_events();
        for tier in EventTier::ALL {
            assert!(
                events.iter().any(|e| e.tier == tier),
                "tier {tier} has no demo events"
            );
        }
    }

    #[test]
    fn ids_are_unique_within_tier() {
        let events = demo_events();
        for tier in EventTier::ALL {
            let mut ids: Vec<i64> = events
                .iter()
                .filter(|e| e.tier == tier)
                .map(|e| e.event_id)
                .collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), before);
        }
    }
}
