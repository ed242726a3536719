//! Operations on the durable event definition table.
//!
//! The table is the source of truth for the catalog: tier counts are
//! recomputed from it on reload, and ordinal selection resolves by offset
//! within `(tier, event_id)` order -- definitions are not assumed to be
//! densely indexed. The table name comes from the caller's store
//! configuration rather than a baked-in constant.

use lifesim_types::{EventCatalogStats, EventDefinition, EventTier};
use sqlx::PgPool;
use sqlx::Row;

use crate::error::DbError;

/// The effect and identity columns, shared by every query here.
const EVENT_COLUMNS: &str = "tier, event_id, description, effect_wealth, effect_salary, \
     effect_salary_float, effect_expenses, effect_expenses_float, effect_health, \
     effect_health_back, effect_happiness, effect_happiness_back, effect_lucky_value, \
     created_at";

/// Operations on the durable event table.
pub struct EventTable<'a> {
    pool: &'a PgPool,
    table: &'a str,
}

impl<'a> EventTable<'a> {
    /// Create an event table handle bound to a connection pool and a
    /// configured table name.
    pub const fn new(pool: &'a PgPool, table: &'a str) -> Self {
        Self { pool, table }
    }

    /// Recompute per-tier definition counts.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn tier_counts(&self) -> Result<EventCatalogStats, DbError> {
        let sql = format!(
            "SELECT tier, COUNT(*) AS cnt FROM {} GROUP BY tier",
            self.table
        );
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;

        let mut stats = EventCatalogStats::default();
        for row in &rows {
            let tier_code: i16 = row.try_get("tier")?;
            let count: i64 = row.try_get("cnt")?;
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            match EventTier::from_code(tier_code) {
                Some(EventTier::Normal) => stats.normal = count,
                Some(EventTier::GoodLuck) => stats.good_luck = count,
                Some(EventTier::BadLuck) => stats.bad_luck = count,
                // Unknown tier codes are administrative garbage; they are
                // not selectable, so they do not count.
                None => {
                    tracing::warn!(tier_code, "Ignoring rows with unknown tier code");
                }
            }
        }
        Ok(stats)
    }

    /// Fetch the definition at `ordinal` within `tier`, by offset in
    /// `event_id` order.
    ///
    /// Returns `Ok(None)` when the ordinal is past the end of the tier.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_at(
        &self,
        tier: EventTier,
        ordinal: u32,
    ) -> Result<Option<EventRow>, DbError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM {} WHERE tier = $1 ORDER BY event_id OFFSET $2 LIMIT 1",
            self.table
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(tier.code())
            .bind(i64::from(ordinal))
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch a single definition by tier and event id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_one(
        &self,
        tier: EventTier,
        event_id: i64,
    ) -> Result<Option<EventRow>, DbError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM {} WHERE tier = $1 AND event_id = $2",
            self.table
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(tier.code())
            .bind(event_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch every definition, in `(tier, event_id)` order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_all(&self) -> Result<Vec<EventRow>, DbError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM {} ORDER BY tier, event_id",
            self.table
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Insert or replace one definition. Administrative/test helper; the
    /// engine itself never writes definitions.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn upsert(&self, definition: &EventDefinition) -> Result<(), DbError> {
        let sql = format!(
            "INSERT INTO {} (tier, event_id, description, effect_wealth, effect_salary, \
             effect_salary_float, effect_expenses, effect_expenses_float, effect_health, \
             effect_health_back, effect_happiness, effect_happiness_back, effect_lucky_value) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT (tier, event_id) DO UPDATE SET \
             description = EXCLUDED.description, \
             effect_wealth = EXCLUDED.effect_wealth, \
             effect_salary = EXCLUDED.effect_salary, \
             effect_salary_float = EXCLUDED.effect_salary_float, \
             effect_expenses = EXCLUDED.effect_expenses, \
             effect_expenses_float = EXCLUDED.effect_expenses_float, \
             effect_health = EXCLUDED.effect_health, \
             effect_health_back = EXCLUDED.effect_health_back, \
             effect_happiness = EXCLUDED.effect_happiness, \
             effect_happiness_back = EXCLUDED.effect_happiness_back, \
             effect_lucky_value = EXCLUDED.effect_lucky_value",
            self.table
        );
        sqlx::query(&sql)
            .bind(definition.tier.code())
            .bind(definition.event_id)
            .bind(&definition.description)
            .bind(definition.effect_wealth)
            .bind(definition.effect_salary)
            .bind(definition.effect_salary_float)
            .bind(definition.effect_expenses)
            .bind(definition.effect_expenses_float)
            .bind(definition.effect_health)
            .bind(definition.effect_health_back)
            .bind(definition.effect_happiness)
            .bind(definition.effect_happiness_back)
            .bind(definition.effect_lucky_value)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

/// A row from the durable event table.
///
/// Uses runtime types rather than compile-time checked types to avoid
/// requiring a live database during builds.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Tier code (see [`EventTier::code`]).
    pub tier: i16,
    /// Identifier, unique within the tier.
    pub event_id: i64,
    /// Human-readable description.
    pub description: String,
    /// Delta to `wealth`.
    pub effect_wealth: i64,
    /// Delta to `salary`.
    pub effect_salary: i64,
    /// Delta to `salary_float`.
    pub effect_salary_float: i64,
    /// Delta to `expenses`.
    pub effect_expenses: i64,
    /// Delta to `expenses_float`.
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
    /// Row creation timestamp.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl EventRow {
    /// Convert the row into the shared definition type.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the stored tier code is unknown.
    pub fn into_definition(self) -> Result<EventDefinition, DbError> {
        let tier = EventTier::from_code(self.tier)
            .ok_or_else(|| DbError::Config(format!("unknown tier code {} in event table", self.tier)))?;
        Ok(EventDefinition {
            event_id: self.event_id,
            tier,
            description: self.description,
            effect_wealth: self.effect_wealth,
            effect_salary: self.effect_salary,
            effect_salary_float: self.effect_salary_float,
            effect_expenses: self.effect_expenses,
            effect_expenses_float: self.effect_expenses_float,
            effect_health: self.effect_health,
            effect_health_back: self.effect_health_back,
            effect_happiness: self.effect_happiness,
            effect_happiness_back: self.effect_happiness_back,
            effect_lucky_value: self.effect_lucky_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(tier: i16) -> EventRow {
        EventRow {
            tier,
            event_id: 12,
            description: String::from("Found a coin on the street"),
            effect_wealth: 1,
            effect_salary: 0,
            effect_salary_float: 0,
            effect_expenses: 0,
            effect_expenses_float: 0,
            effect_health: 0,
            effect_health_back: 0,
            effect_happiness: 2,
            effect_happiness_back: 0,
            effect_lucky_value: 1,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_definition() {
        let def = sample_row(EventTier::GoodLuck.code()).into_definition();
        assert!(def.is_ok());
        if let Ok(def) = def {
            assert_eq!(def.tier, EventTier::GoodLuck);
            assert_eq!(def.event_id, 12);
            assert_eq!(def.effect_wealth, 1);
            assert_eq!(def.effect_happiness, 2);
        }
    }

    #[test]
    fn unknown_tier_code_is_rejected() {
        let def = sample_row(9).into_definition();
        assert!(matches!(def, Err(DbError::Config(_))));
    }
}
