//! Shared type definitions for the Lifesim engine.
//!
//! This crate is the single source of truth for the data model shared by
//! the core engine (`lifesim-core`) and the data layer (`lifesim-db`).
//!
//! # Modules
//!
//! - [`player`] -- The mutable per-account [`PlayerState`]
//! - [`event`] -- Event tiers, catalog definitions, and catalog stats
//! - [`milestone`] -- Tagged milestone records and death causes

pub mod event;
pub mod milestone;
pub mod player;

// Re-export all public types at crate root for convenience.
pub use event::{EventCatalogStats, EventDefinition, EventTier};
pub use milestone::{DeathCause, Milestone};
pub use player::PlayerState;
