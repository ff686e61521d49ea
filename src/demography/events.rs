//! Demographic events and their canonical comparison representation.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Canonical value of one lowered event field.
///
/// Only `Float` values are compared under tolerance by the verifier;
/// everything else uses exact equality.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Int(i64),
    Kind(&'static str),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Kind(v) => write!(f, "{v}"),
        }
    }
}

/// A demographic event in a model's history.
///
/// A closed set of event kinds: each variant carries a time (generations
/// before present) and a kind-specific payload. Ordering within a model's
/// event list is significant (chronological application order).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemographicEvent {
    /// Change the size and/or growth rate of one population.
    PopulationParametersChange {
        time: f64,
        population: usize,
        initial_size: Option<f64>,
        growth_rate: Option<f64>,
    },
    /// Change one migration-matrix entry, or every entry when
    /// `matrix_index` is `None`.
    MigrationRateChange {
        time: f64,
        rate: f64,
        matrix_index: Option<(usize, usize)>,
    },
    /// Move a proportion of lineages from `source` into `dest`.
    MassMigration {
        time: f64,
        source: usize,
        dest: usize,
        proportion: f64,
    },
}

impl DemographicEvent {
    pub fn time(&self) -> f64 {
        match *self {
            DemographicEvent::PopulationParametersChange { time, .. }
            | DemographicEvent::MigrationRateChange { time, .. }
            | DemographicEvent::MassMigration { time, .. } => time,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DemographicEvent::PopulationParametersChange { .. } => "population_parameters_change",
            DemographicEvent::MigrationRateChange { .. } => "migration_rate_change",
            DemographicEvent::MassMigration { .. } => "mass_migration",
        }
    }

    /// Lower this event to its canonical field-keyed mapping, used purely
    /// for structural/numeric comparison.
    ///
    /// Optional fields are omitted when unset, so two parameter-change
    /// events that set different fields lower to different key-sets.
    /// `matrix_index` is flattened to `i * num_populations + j`, or -1
    /// when the change applies to the whole matrix.
    pub fn canonical_fields(&self, num_populations: usize) -> BTreeMap<&'static str, FieldValue> {
        let mut fields = BTreeMap::new();
        fields.insert("type", FieldValue::Kind(self.kind()));
        fields.insert("time", FieldValue::Float(self.time()));
        match *self {
            DemographicEvent::PopulationParametersChange {
                population,
                initial_size,
                growth_rate,
                ..
            } => {
                fields.insert("population_id", FieldValue::Int(population as i64));
                if let Some(size) = initial_size {
                    fields.insert("initial_size", FieldValue::Float(size));
                }
                if let Some(rate) = growth_rate {
                    fields.insert("growth_rate", FieldValue::Float(rate));
                }
            }
            DemographicEvent::MigrationRateChange { rate, matrix_index, .. } => {
                fields.insert("migration_rate", FieldValue::Float(rate));
                let flat = match matrix_index {
                    Some((i, j)) => (i * num_populations + j) as i64,
                    None => -1,
                };
                fields.insert("matrix_index", FieldValue::Int(flat));
            }
            DemographicEvent::MassMigration {
                source,
                dest,
                proportion,
                ..
            } => {
                fields.insert("source", FieldValue::Int(source as i64));
                fields.insert("dest", FieldValue::Int(dest as i64));
                fields.insert("proportion", FieldValue::Float(proportion));
            }
        }
        fields
    }
}

impl fmt::Display for DemographicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DemographicEvent::PopulationParametersChange {
                time,
                population,
                initial_size,
                growth_rate,
            } => {
                write!(f, "t={time}: population {population} parameters change")?;
                if let Some(size) = initial_size {
                    write!(f, ", initial_size={size}")?;
                }
                if let Some(rate) = growth_rate {
                    write!(f, ", growth_rate={rate}")?;
                }
                Ok(())
            }
            DemographicEvent::MigrationRateChange {
                time,
                rate,
                matrix_index,
            } => match matrix_index {
                Some((i, j)) => {
                    write!(f, "t={time}: migration rate [{i}, {j}] set to {rate}")
                }
                None => write!(f, "t={time}: all migration rates set to {rate}"),
            },
            DemographicEvent::MassMigration {
                time,
                source,
                dest,
                proportion,
            } => write!(
                f,
                "t={time}: mass migration of {proportion} of population {source} into population {dest}"
            ),
        }
    }
}
