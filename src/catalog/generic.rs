//! Generic parameterized model factories.
//!
//! Pure constructors: given numeric parameters they build the population
//! configurations, migration matrix and demographic events directly, with
//! no I/O or external lookups. Malformed parameters fail fast at
//! construction rather than later at simulation or comparison time.

use crate::catalog::ModelMetadata;
use crate::demography::events::DemographicEvent;
use crate::demography::model::{MigrationMatrix, Model};
use crate::demography::population::{Population, PopulationConfig};
use crate::errors::ModelError;

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::InvalidParameter {
            name,
            value,
            constraint: "finite and positive",
        });
    }
    Ok(())
}

pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::InvalidParameter {
            name,
            value,
            constraint: "finite and non-negative",
        });
    }
    Ok(())
}

/// Piecewise constant size model: instantaneous population size change
/// over multiple epochs in a single population.
///
/// `n0` is the initial effective size; each `(t, n)` epoch gives the time
/// at which the size change takes place and the new size.
pub fn piecewise_constant_size(n0: f64, epochs: &[(f64, f64)]) -> Result<Model, ModelError> {
    require_positive("N0", n0)?;
    for &(time, size) in epochs {
        require_non_negative("t", time)?;
        require_positive("N", size)?;
    }

    let pop0 = Population::new("pop0", "Generic population");
    let events = epochs
        .iter()
        .map(|&(time, size)| DemographicEvent::PopulationParametersChange {
            time,
            population: 0,
            initial_size: Some(size),
            growth_rate: Some(0.0),
        })
        .collect();

    Model::new(
        ModelMetadata {
            id: "constant",
            name: "Piecewise constant size",
            description: "Piecewise constant size population model over multiple epochs.",
            citations: Vec::new(),
        },
        vec![pop0.clone()],
        vec![PopulationConfig::new(n0, &pop0)],
        MigrationMatrix::zero(1),
        events,
    )
}

/// Generic isolation-with-migration model.
///
/// A single ancestral population of size `na` splits into two populations
/// of constant size `n1` and `n2` at time `t` generations ago, with
/// migration rates `m12` and `m21` between the split populations.
/// Sampling is disallowed in the ancestral population (index 2).
pub fn isolation_with_migration(
    na: f64,
    n1: f64,
    n2: f64,
    t: f64,
    m12: f64,
    m21: f64,
) -> Result<Model, ModelError> {
    require_positive("NA", na)?;
    require_positive("N1", n1)?;
    require_positive("N2", n2)?;
    require_non_negative("T", t)?;
    require_non_negative("M12", m12)?;
    require_non_negative("M21", m21)?;

    let pop0 = Population::new("pop0", "Generic population");
    let pop1 = Population::new("pop1", "Generic population");
    let pop_anc = Population::ancestral("popAnc", "Generic ancestral population");

    Model::new(
        ModelMetadata {
            id: "IM",
            name: "Isolation with migration",
            description: "A generic isolation with migration model where a single \
                ancestral population splits into two populations with constant \
                sizes and reciprocal migration.",
            citations: Vec::new(),
        },
        vec![pop0.clone(), pop1.clone(), pop_anc.clone()],
        vec![
            PopulationConfig::new(n1, &pop0),
            PopulationConfig::new(n2, &pop1),
            PopulationConfig::new(na, &pop_anc),
        ],
        MigrationMatrix::new(vec![
            vec![0.0, m12, 0.0],
            vec![m21, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])?,
        vec![
            DemographicEvent::MassMigration {
                time: t,
                source: 0,
                dest: 2,
                proportion: 1.0,
            },
            DemographicEvent::MassMigration {
                time: t,
                source: 1,
                dest: 2,
                proportion: 1.0,
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piecewise_constant_size_events() {
        let model = piecewise_constant_size(1000.0, &[(500.0, 2000.0), (3000.0, 100.0)]).unwrap();
        assert_eq!(model.num_populations(), 1);
        assert_eq!(model.demographic_events().len(), 2);
        for (event, &(time, size)) in model
            .demographic_events()
            .iter()
            .zip(&[(500.0, 2000.0), (3000.0, 100.0)])
        {
            match *event {
                DemographicEvent::PopulationParametersChange {
                    time: t,
                    population,
                    initial_size,
                    growth_rate,
                } => {
                    assert_eq!(t, time);
                    assert_eq!(population, 0);
                    assert_eq!(initial_size, Some(size));
                    assert_eq!(growth_rate, Some(0.0));
                }
                ref other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn test_piecewise_constant_size_no_epochs() {
        let model = piecewise_constant_size(1000.0, &[]).unwrap();
        assert!(model.demographic_events().is_empty());
        assert_eq!(model.migration_matrix().shape(), (1, 1));
    }

    #[test]
    fn test_piecewise_constant_size_invalid_parameters() {
        assert!(piecewise_constant_size(-1.0, &[]).is_err());
        assert!(piecewise_constant_size(0.0, &[]).is_err());
        assert!(piecewise_constant_size(1000.0, &[(-5.0, 100.0)]).is_err());
        assert!(piecewise_constant_size(1000.0, &[(5.0, 0.0)]).is_err());
        assert!(piecewise_constant_size(f64::NAN, &[]).is_err());
    }

    #[test]
    fn test_isolation_with_migration_structure() {
        let model = isolation_with_migration(7300.0, 12300.0, 12300.0, 4000.0, 1e-4, 1e-4).unwrap();
        assert_eq!(model.num_populations(), 3);
        assert_eq!(model.num_sampling_populations(), 2);
        assert_eq!(model.migration_matrix().rows()[0][1], 1e-4);
        assert_eq!(model.migration_matrix().rows()[1][0], 1e-4);
        assert_eq!(model.migration_matrix().rows()[2], vec![0.0, 0.0, 0.0]);
        assert_eq!(model.demographic_events().len(), 2);
    }

    #[test]
    fn test_invalid_parameter_message_names_constraint() {
        let err = piecewise_constant_size(0.0, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter N0: 0 (must be finite and positive)"
        );
        let err = isolation_with_migration(1.0, 1.0, 1.0, -1.0, 0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("must be finite and non-negative"));
    }

    #[test]
    fn test_isolation_with_migration_invalid_parameters() {
        assert!(isolation_with_migration(0.0, 1.0, 1.0, 1.0, 0.0, 0.0).is_err());
        assert!(isolation_with_migration(1.0, 1.0, 1.0, -1.0, 0.0, 0.0).is_err());
        assert!(isolation_with_migration(1.0, 1.0, 1.0, 1.0, -1e-4, 0.0).is_err());
    }
}
