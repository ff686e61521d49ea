//! # stdpop
//!
//! A standard catalog of demographic models for population-genetics
//! coalescent simulation. The crate provides the demographic-model data
//! model (populations, migration matrices, demographic events), a
//! numerically-tolerant equivalence verifier used to QC model definitions
//! against independently authored references, and a genome/chromosome
//! registry with per-chromosome genetic-map resolution.
//!
//! The coalescent simulation engine itself is an external consumer: a
//! [`Model`] exposes its population configurations, migration matrix and
//! demographic events in the shape the engine expects (see
//! [`Model::engine_inputs`]), and [`Model::get_samples`] produces the flat
//! sample list for a simulation call.

pub mod catalog;
pub mod demography;
pub mod errors;
pub mod genome;
pub mod species;

pub use catalog::{Citation, ModelMetadata};
pub use demography::verify::{
    demographic_events_equal, models_equal, population_configurations_equal,
    verify_demographic_events_equal, verify_models_equal, verify_population_configurations_equal,
    Mismatch, Tolerance, VerifyError,
};
pub use demography::{
    DemographicEvent, MigrationMatrix, Model, Population, PopulationConfig, Sample,
};
pub use errors::{GeneticMapError, GenomeError, ModelError};
pub use genome::genetic_map::{get_genetic_map, GeneticMap, RecombinationMap};
pub use genome::{Chromosome, Genome};
