//! Starting attributes and engine tunables.
//!
//! The [`SimConfig`] struct bundles every tunable so that callers (runner,
//! tests) can override defaults, and so that nothing about the baseline is
//! a process-wide constant baked into call sites. The runner deserializes
//! it from its YAML config file; `Default` is the canonical baseline.

use serde::{Deserialize, Serialize};

/// The fixed baseline a fresh player starts from.
///
/// All values are whole integer units. The defaults below are the canonical
/// initialization rule; round-trip tests assert them literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingAttributes {
    /// Total days the account can live (default: 2920, eight game-years).
    pub total_days: i64,
    /// Starting wealth (default: 10000).
    pub wealth: i64,
    /// Fixed daily income (default: 333, the starting wealth spread over a
    /// 30-day month, integer division).
    pub salary: i64,
    /// Daily income fluctuation bound in whole percent (default: 5).
    pub salary_float: i64,
    /// Fixed daily outgo (default: 100).
    pub expenses: i64,
    /// Daily outgo fluctuation bound in whole percent (default: 10).
    pub expenses_float: i64,
    /// Starting health (default: 100).
    pub health: i64,
    /// Passive daily health delta (default: 10).
    pub health_back: i64,
    /// Starting happiness (default: 100).
    pub happiness: i64,
    /// Passive daily happiness delta (default: 10).
    pub happiness_back: i64,
    /// Starting luck in `[0, 100]` (default: 50).
    pub lucky_value: i64,
}

impl Default for StartingAttributes {
    fn default() -> Self {
        Self {
            total_days: 2920,
            wealth: 10_000,
            salary: 333,
            salary_float: 5,
            expenses: 100,
            expenses_float: 10,
            health: 100,
            health_back: 10,
            happiness: 100,
            happiness_back: 10,
            lucky_value: 50,
        }
    }
}

/// Engine tunables for the lifecycle controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Baseline attributes for a freshly initialized player.
    pub starting: StartingAttributes,

    /// A luck-tier event whose wealth effect magnitude reaches this value
    /// is recorded as a milestone (default: 1000).
    pub milestone_wealth_threshold: i64,

    /// A luck-tier event whose health effect magnitude reaches this value
    /// is recorded as a milestone (default: 30).
    pub milestone_health_threshold: i64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting: StartingAttributes::default(),
            milestone_wealth_threshold: 1000,
            milestone_health_threshold: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_starting_attributes() {
        let s = StartingAttributes::default();
        assert_eq!(s.total_days, 2920);
        assert_eq!(s.wealth, 10_000);
        assert_eq!(s.salary, 333);
        assert_eq!(s.salary_float, 5);
        assert_eq!(s.expenses, 100);
        assert_eq!(s.expenses_float, 10);
        assert_eq!(s.health, 100);
        assert_eq!(s.health_back, 10);
        assert_eq!(s.happiness, 100);
        assert_eq!(s.happiness_back, 10);
        assert_eq!(s.lucky_value, 50);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: Result<SimConfig, _> =
            serde_json::from_str(r#"{"milestone_wealth_threshold": 500}"#);
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.milestone_wealth_threshold),
            Some(500)
        );
        assert_eq!(cfg.as_ref().map(|c| c.starting.total_days), Some(2920));
    }
}
