use thiserror::Error;

/// Authoring and usage errors for demographic models.
///
/// These indicate a bug in a model/catalog definition or in caller usage.
/// They are raised immediately, never retried, and never converted to a
/// quiet `false` by the equivalence predicates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// `sample_size` is reserved for simulation-time sample specification.
    #[error("catalog models must not set the sample_size population configuration option")]
    SampleSizeSet,

    #[error("catalog models must set the initial_size for every population configuration")]
    MissingInitialSize,

    #[error("migration matrix rows have unequal lengths")]
    RaggedMigrationMatrix,

    #[error("migration matrix is {rows}x{cols}, expected {expected}x{expected}")]
    MigrationMatrixShape {
        rows: usize,
        cols: usize,
        expected: usize,
    },

    #[error("model declares {populations} populations but {configurations} population configurations")]
    PopulationCountMismatch {
        populations: usize,
        configurations: usize,
    },

    #[error("samples requested from non-sampling population {0}")]
    NonSamplingPopulation(usize),

    #[error("sample counts given for {given} populations, but the model has {populations}")]
    TooManySampleCounts { given: usize, populations: usize },

    #[error("invalid parameter {name}: {value} (must be {constraint})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },
}

/// Errors from genome chromosome lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    #[error("unknown chromosome: {0}")]
    UnknownChromosome(String),
}

/// Errors from genetic-map registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneticMapError {
    /// The (species, map-name) pair is not registered.
    #[error("no genetic map named '{name}' registered for species '{species}'")]
    UnknownMap { species: String, name: String },

    /// The chromosome id is not recognized for this species/map pairing.
    /// Distinct from the soft-fallback case handled by
    /// `Chromosome::recombination_map`, which never errors when a valid
    /// chromosome merely has no map row.
    #[error("chromosome '{chromosome}' is not part of genetic map {species}/{name}")]
    UnknownChromosome {
        species: String,
        name: String,
        chromosome: String,
    },

    #[error("invalid recombination map: {0}")]
    InvalidMap(String),
}
