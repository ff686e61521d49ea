//! Demographic model representation and equivalence verification.
//!
//! A [`Model`] aggregates per-population configurations, a migration-rate
//! matrix and an ordered list of demographic events. Models are immutable
//! value objects: constructed once by a catalog factory, then consumed by
//! the verifier and by the external simulation engine.

pub mod debug;
pub mod events;
pub mod model;
pub mod population;
pub mod verify;

pub use debug::DemographyDebugger;
pub use events::DemographicEvent;
pub use model::{EngineInputs, MigrationMatrix, Model, Sample};
pub use population::{Population, PopulationConfig};
