//! Numerically-tolerant equivalence verification between models.
//!
//! Each comparable structure has two entry points: a raising `verify_*`
//! function that reports the first violation as a structured mismatch, and
//! a quiet predicate defined as "verification succeeds". The predicates
//! convert only [`Mismatch`] results to `false`; authoring errors
//! ([`ModelError`]) propagate unchanged, since they indicate a bug in the
//! model definition rather than a disagreement between two models.

use crate::demography::events::{DemographicEvent, FieldValue};
use crate::demography::model::Model;
use crate::demography::population::PopulationConfig;
use crate::errors::ModelError;
use thiserror::Error;

/// Default relative tolerance (numpy allclose convention).
pub const DEFAULT_RTOL: f64 = 1e-8;
/// Default absolute tolerance (numpy allclose convention).
pub const DEFAULT_ATOL: f64 = 1e-5;

/// Absolute/relative tolerances for numeric comparison.
///
/// Two values a, b compare close iff `|a - b| <= atol + rtol * |b|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
        }
    }
}

impl Tolerance {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }

    pub fn all_close(&self, a: impl IntoIterator<Item = f64>, b: impl IntoIterator<Item = f64>) -> bool {
        a.into_iter()
            .zip(b)
            .all(|(x, y)| self.is_close(x, y))
    }
}

/// Reason two structures failed equivalence verification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Mismatch {
    #[error("Different numbers of populations")]
    PopulationCount,
    #[error("Initial sizes differ")]
    InitialSizes,
    #[error("Growth rates differ")]
    GrowthRates,
    #[error("Migration matrices different shapes")]
    MigrationMatrixShape,
    #[error("Migration matrices differ")]
    MigrationMatrix,
    #[error("Different numbers of demographic events")]
    EventCount,
    #[error("Different types of demographic events")]
    EventKinds,
    #[error("Event {key} mismatch: {left} != {right}")]
    EventField {
        key: &'static str,
        left: String,
        right: String,
    },
}

/// Failure of a `verify_*` entry point: either an authoring precondition
/// was violated, or the two structures are genuinely unequal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Invalid(#[from] ModelError),
    #[error(transparent)]
    Unequal(#[from] Mismatch),
}

fn as_predicate(result: Result<(), VerifyError>) -> Result<bool, ModelError> {
    match result {
        Ok(()) => Ok(true),
        Err(VerifyError::Unequal(_)) => Ok(false),
        Err(VerifyError::Invalid(err)) => Err(err),
    }
}

/// Verify two population-configuration lists are equal within tolerance.
///
/// Structural preconditions come first and are independent of tolerance:
/// a `sample_size` set on either side, or a missing `initial_size`, is an
/// authoring error rather than a mismatch.
pub fn verify_population_configurations_equal(
    pop_configs1: &[PopulationConfig],
    pop_configs2: &[PopulationConfig],
    tolerance: Tolerance,
) -> Result<(), VerifyError> {
    for pc in pop_configs1.iter().chain(pop_configs2) {
        if pc.sample_size.is_some() {
            return Err(ModelError::SampleSizeSet.into());
        }
        if pc.initial_size.is_none() {
            return Err(ModelError::MissingInitialSize.into());
        }
    }
    if pop_configs1.len() != pop_configs2.len() {
        return Err(Mismatch::PopulationCount.into());
    }
    let initial_sizes = |configs: &[PopulationConfig]| {
        configs
            .iter()
            .map(|pc| pc.initial_size.unwrap_or_default())
            .collect::<Vec<_>>()
    };
    if !tolerance.all_close(initial_sizes(pop_configs1), initial_sizes(pop_configs2)) {
        return Err(Mismatch::InitialSizes.into());
    }
    let growth_rates1 = pop_configs1.iter().map(|pc| pc.growth_rate);
    let growth_rates2 = pop_configs2.iter().map(|pc| pc.growth_rate);
    if !tolerance.all_close(growth_rates1, growth_rates2) {
        return Err(Mismatch::GrowthRates.into());
    }
    Ok(())
}

/// Quiet form of [`verify_population_configurations_equal`].
pub fn population_configurations_equal(
    pop_configs1: &[PopulationConfig],
    pop_configs2: &[PopulationConfig],
    tolerance: Tolerance,
) -> Result<bool, ModelError> {
    as_predicate(verify_population_configurations_equal(
        pop_configs1,
        pop_configs2,
        tolerance,
    ))
}

/// Verify two demographic-event lists are equal within tolerance.
///
/// Comparison is positional: event *i* of one list is compared with event
/// *i* of the other. Each event is lowered to its canonical field-keyed
/// mapping; key-sets must match exactly, numeric fields compare under
/// tolerance, everything else by exact equality.
pub fn verify_demographic_events_equal(
    events1: &[DemographicEvent],
    events2: &[DemographicEvent],
    num_populations: usize,
    tolerance: Tolerance,
) -> Result<(), VerifyError> {
    if events1.len() != events2.len() {
        return Err(Mismatch::EventCount.into());
    }
    for (event1, event2) in events1.iter().zip(events2) {
        let fields1 = event1.canonical_fields(num_populations);
        let fields2 = event2.canonical_fields(num_populations);
        if !fields1.keys().eq(fields2.keys()) {
            return Err(Mismatch::EventKinds.into());
        }
        for (&key, value1) in &fields1 {
            let value2 = &fields2[key];
            let close = match (value1, value2) {
                (FieldValue::Float(a), FieldValue::Float(b)) => tolerance.is_close(*a, *b),
                _ => value1 == value2,
            };
            if !close {
                return Err(Mismatch::EventField {
                    key,
                    left: value1.to_string(),
                    right: value2.to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Quiet form of [`verify_demographic_events_equal`].
pub fn demographic_events_equal(
    events1: &[DemographicEvent],
    events2: &[DemographicEvent],
    num_populations: usize,
    tolerance: Tolerance,
) -> Result<bool, ModelError> {
    as_predicate(verify_demographic_events_equal(
        events1,
        events2,
        num_populations,
        tolerance,
    ))
}

/// Verify two models are equal within tolerance.
///
/// Check order determines which mismatch is reported first: migration
/// matrix shape (exact), migration matrix values, population
/// configurations, then demographic events.
pub fn verify_models_equal(
    model1: &Model,
    model2: &Model,
    tolerance: Tolerance,
) -> Result<(), VerifyError> {
    let mm1 = model1.migration_matrix();
    let mm2 = model2.migration_matrix();
    if mm1.shape() != mm2.shape() {
        return Err(Mismatch::MigrationMatrixShape.into());
    }
    if !tolerance.all_close(mm1.flat(), mm2.flat()) {
        return Err(Mismatch::MigrationMatrix.into());
    }
    verify_population_configurations_equal(
        model1.population_configurations(),
        model2.population_configurations(),
        tolerance,
    )?;
    verify_demographic_events_equal(
        model1.demographic_events(),
        model2.demographic_events(),
        model1.population_configurations().len(),
        tolerance,
    )
}

/// Quiet form of [`verify_models_equal`].
pub fn models_equal(
    model1: &Model,
    model2: &Model,
    tolerance: Tolerance,
) -> Result<bool, ModelError> {
    as_predicate(verify_models_equal(model1, model2, tolerance))
}
