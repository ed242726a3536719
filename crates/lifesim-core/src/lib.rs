//! Lifecycle state machine and weighted event engine for Lifesim.
//!
//! One player advances one simulated day per tick: age moves forward,
//! passive regeneration and the daily ledger run, a weighted random draw
//! picks an event from the catalog, its effects land on the player, and
//! the terminating conditions are evaluated. All storage goes through the
//! [`gateway`] traits; all randomness comes in through an injected
//! [`rand::Rng`] so distributions are reproducible under test.
//!
//! # Modules
//!
//! - [`config`] -- Starting attributes and engine tunables
//! - [`gateway`] -- Persistence and catalog contracts the engine depends on
//! - [`selector`] -- Two-stage weighted tier/instance draw
//! - [`effects`] -- Attribute mutation: event effects, regeneration, ledger
//! - [`lifecycle`] -- The daily tick orchestrator and day-result type
//! - [`memory`] -- In-memory store for tests and the local runner

pub mod config;
pub mod effects;
pub mod gateway;
pub mod lifecycle;
pub mod memory;
pub mod selector;

// Re-export primary types for convenience.
pub use config::{SimConfig, StartingAttributes};
pub use gateway::{EventCatalog, GatewayError, PersistenceGateway};
pub use lifecycle::{DayResult, LifecycleController, TickError};
pub use memory::MemoryStore;
pub use selector::{EventDraw, SelectionError};
