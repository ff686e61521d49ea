//! The demographic model aggregate.

use crate::catalog::ModelMetadata;
use crate::demography::debug::DemographyDebugger;
use crate::demography::events::DemographicEvent;
use crate::demography::population::{Population, PopulationConfig};
use crate::demography::verify::{self, Tolerance, VerifyError};
use crate::errors::ModelError;
use serde::Serialize;
use std::io;

/// Square matrix of per-generation migration rates. Entry `[i][j]` is the
/// rate of migration from population `i` to population `j`; the diagonal
/// is zero by convention (no self-migration).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationMatrix(Vec<Vec<f64>>);

impl MigrationMatrix {
    /// Create a matrix from rows, rejecting ragged input.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(ModelError::RaggedMigrationMatrix);
        }
        Ok(Self(rows))
    }

    /// The n-by-n zero matrix (no migration).
    pub fn zero(n: usize) -> Self {
        Self(vec![vec![0.0; n]; n])
    }

    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.0.len(), self.0.first().map_or(0, Vec::len))
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.0
    }

    /// All entries in row-major order.
    pub fn flat(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().flatten().copied()
    }
}

/// One sample descriptor for a simulation call: a population index and the
/// time (generations before present) at which the sample is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub population: usize,
    pub time: f64,
}

/// The three model fields consumed by the external simulation engine,
/// borrowed in the shape of its simulate-call signature.
#[derive(Debug, Clone, Copy)]
pub struct EngineInputs<'a> {
    pub population_configurations: &'a [PopulationConfig],
    pub migration_matrix: &'a MigrationMatrix,
    pub demographic_events: &'a [DemographicEvent],
}

/// A demographic model: population configurations, a migration matrix and
/// an ordered list of demographic events, plus catalog metadata.
///
/// Construction enforces the domain invariants that guard against silently
/// wrong simulations: the migration matrix must be square and sized to the
/// population count, every configuration must set `initial_size`, and no
/// configuration may set `sample_size`. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Model {
    metadata: ModelMetadata,
    populations: Vec<Population>,
    population_configurations: Vec<PopulationConfig>,
    migration_matrix: MigrationMatrix,
    demographic_events: Vec<DemographicEvent>,
    generation_time: Option<f64>,
}

impl Model {
    pub fn new(
        metadata: ModelMetadata,
        populations: Vec<Population>,
        population_configurations: Vec<PopulationConfig>,
        migration_matrix: MigrationMatrix,
        demographic_events: Vec<DemographicEvent>,
    ) -> Result<Self, ModelError> {
        if populations.len() != population_configurations.len() {
            return Err(ModelError::PopulationCountMismatch {
                populations: populations.len(),
                configurations: population_configurations.len(),
            });
        }
        let n = population_configurations.len();
        let (rows, cols) = migration_matrix.shape();
        if rows != n || cols != n {
            return Err(ModelError::MigrationMatrixShape {
                rows,
                cols,
                expected: n,
            });
        }
        for pc in &population_configurations {
            if pc.sample_size.is_some() {
                return Err(ModelError::SampleSizeSet);
            }
            if pc.initial_size.is_none() {
                return Err(ModelError::MissingInitialSize);
            }
        }
        Ok(Self {
            metadata,
            populations,
            population_configurations,
            migration_matrix,
            demographic_events,
            generation_time: None,
        })
    }

    pub fn with_generation_time(mut self, generation_time: f64) -> Self {
        self.generation_time = Some(generation_time);
        self
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    pub fn population_configurations(&self) -> &[PopulationConfig] {
        &self.population_configurations
    }

    pub fn migration_matrix(&self) -> &MigrationMatrix {
        &self.migration_matrix
    }

    pub fn demographic_events(&self) -> &[DemographicEvent] {
        &self.demographic_events
    }

    pub fn generation_time(&self) -> Option<f64> {
        self.generation_time
    }

    pub fn num_populations(&self) -> usize {
        self.populations.len()
    }

    pub fn num_sampling_populations(&self) -> usize {
        self.populations.iter().filter(|p| p.allow_samples()).count()
    }

    /// Borrow the three fields consumed by the simulation engine.
    pub fn engine_inputs(&self) -> EngineInputs<'_> {
        EngineInputs {
            population_configurations: &self.population_configurations,
            migration_matrix: &self.migration_matrix,
            demographic_events: &self.demographic_events,
        }
    }

    /// Translate per-population sample counts into a flat sample list.
    ///
    /// `counts[i]` is the number of samples to draw from population `i`,
    /// each stamped with that population's sampling time. Requesting a
    /// non-zero count from a non-sampling (ancestral) population is an
    /// error; a zero count is silently skipped.
    pub fn get_samples(&self, counts: &[usize]) -> Result<Vec<Sample>, ModelError> {
        if counts.len() > self.populations.len() {
            return Err(ModelError::TooManySampleCounts {
                given: counts.len(),
                populations: self.populations.len(),
            });
        }
        let mut samples = Vec::new();
        for (index, (&count, population)) in counts.iter().zip(&self.populations).enumerate() {
            match population.sampling_time() {
                Some(time) => {
                    samples.extend(std::iter::repeat(Sample { population: index, time }).take(count));
                }
                None if count > 0 => return Err(ModelError::NonSamplingPopulation(index)),
                None => {}
            }
        }
        Ok(samples)
    }

    /// Check equivalence with `other` under the given tolerances, raising
    /// a structured mismatch on the first violation.
    pub fn verify_equal(&self, other: &Model, tolerance: Tolerance) -> Result<(), VerifyError> {
        verify::verify_models_equal(self, other, tolerance)
    }

    /// Quiet form of [`Model::verify_equal`]: mismatches become `false`,
    /// authoring errors propagate unchanged.
    pub fn equals(&self, other: &Model, tolerance: Tolerance) -> Result<bool, ModelError> {
        verify::models_equal(self, other, tolerance)
    }

    /// Write a human-readable report of this model's demographic history
    /// to the given sink.
    pub fn debug<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        DemographyDebugger::new(self).print_history(out)
    }
}
