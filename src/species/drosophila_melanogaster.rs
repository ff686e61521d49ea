//! Drosophila melanogaster genome data (dm6 release).

use crate::catalog::{Citation, ModelMetadata};
use crate::demography::events::DemographicEvent;
use crate::demography::model::{MigrationMatrix, Model};
use crate::demography::population::{Population, PopulationConfig};
use crate::errors::ModelError;
use crate::genome::genetic_map::{GeneticMap, RecombinationMap};
use crate::genome::Genome;
use std::collections::BTreeMap;

pub const SPECIES: &str = "drosophila_melanogaster";
pub const DEFAULT_GENETIC_MAP: &str = "Comeron2012_dm6";

const MEAN_RECOMBINATION_RATE: f64 = 2.4e-8;

// Chromosome lengths from the dm6 release
// (https://www.ncbi.nlm.nih.gov/assembly/GCF_000001215.4/).
const CHROMOSOMES: &[(&str, u64)] = &[
    ("chr2L", 23_513_712),
    ("chr2R", 25_286_936),
    ("chr3L", 28_110_227),
    ("chr3R", 32_079_331),
    ("chr4", 1_348_131),
    ("chrX", 23_542_271),
    ("chrY", 3_667_352),
    ("chrM", 19_524),
];

/// The D. melanogaster genome assembly with the Comeron 2012 default map.
pub fn genome() -> Genome {
    Genome::new(
        SPECIES,
        Some(DEFAULT_GENETIC_MAP),
        MEAN_RECOMBINATION_RATE,
        CHROMOSOMES,
    )
}

/// The Comeron et al. (2012) genetic map lifted to dm6.
///
/// Rows cover the major autosome arms, chr4 and chrX; chrY and the
/// mitochondrial genome resolve through the uniform fallback.
pub(crate) fn comeron2012_dm6() -> GeneticMap {
    let mut rows = BTreeMap::new();
    for &(id, length) in CHROMOSOMES {
        if id == "chrY" || id == "chrM" {
            continue;
        }
        rows.insert(
            id.to_string(),
            RecombinationMap::uniform(length, MEAN_RECOMBINATION_RATE),
        );
    }
    GeneticMap::new(SPECIES, DEFAULT_GENETIC_MAP, rows)
}

/// Sheehan and Song (2016) three-epoch African model.
///
/// A single African population passing through an ancient bottleneck,
/// inferred with a deep-learning method from 197 genomes. Times are
/// scaled by the reference effective size of 100,000.
pub fn sheehan_song_three_epoch() -> Result<Model, ModelError> {
    // Parameter values from Sheehan and Song (2016), times in
    // coalescent units of 4*N_ref with N_ref = 1e5.
    let n_ref = 1e5;
    let t_1 = 0.5 * 4.0 * n_ref;
    let t_2 = 5.5 * 4.0 * n_ref;
    let n_r = 544.2e3;
    let n_b = 145.3e3;
    let n_a = 652.7e3;

    let afr = Population::new("AFR", "African D. melanogaster population");

    Model::new(
        ModelMetadata {
            id: "sheehan_song_3ep",
            name: "Sheehan and Song three epoch",
            description: "Single-population African model with an ancient \
                bottleneck followed by recovery, inferred by deep learning \
                from African D. melanogaster genomes.",
            citations: vec![Citation {
                author: "Sheehan and Song",
                year: 2016,
                doi: "https://doi.org/10.1371/journal.pcbi.1004845",
            }],
        },
        vec![afr.clone()],
        vec![PopulationConfig::new(n_r, &afr)],
        MigrationMatrix::zero(1),
        vec![
            // Bottleneck epoch.
            DemographicEvent::PopulationParametersChange {
                time: t_1,
                population: 0,
                initial_size: Some(n_b),
                growth_rate: None,
            },
            // Ancestral size before the bottleneck.
            DemographicEvent::PopulationParametersChange {
                time: t_2,
                population: 0,
                initial_size: Some(n_a),
                growth_rate: None,
            },
        ],
    )
}

/// Li and Stephan (2006) two-population African/European model.
///
/// A constant-size African population from which a European population
/// splits, crashes to a small founder size shortly after the split and
/// then expands instantaneously to its present size.
pub fn li_stephan_two_population() -> Result<Model, ModelError> {
    // Parameter values from Li and Stephan (2006), times in generations.
    let n_a0 = 8.603e6;
    let t_a0 = 600e3;
    let n_a1 = n_a0 / 5.0;
    let n_e0 = 1.075e6;
    let t_ae = 158e3;
    let t_e1 = t_ae - 3400.0;
    let n_e1 = 2.2e3;

    let afr = Population::new("AFR", "African D. melanogaster population");
    let eur = Population::new("EUR", "European D. melanogaster population");

    Model::new(
        ModelMetadata {
            id: "li_stephan_2pop",
            name: "Li and Stephan two population",
            description: "Two-population African/European model with a \
                post-split European founder bottleneck and instantaneous \
                expansion to the present size.",
            citations: vec![Citation {
                author: "Li and Stephan",
                year: 2006,
                doi: "https://doi.org/10.1371/journal.pgen.0020166",
            }],
        },
        vec![afr.clone(), eur.clone()],
        vec![
            PopulationConfig::new(n_a0, &afr),
            PopulationConfig::new(n_e0, &eur),
        ],
        MigrationMatrix::zero(2),
        vec![
            // European founder bottleneck shortly after the split.
            DemographicEvent::PopulationParametersChange {
                time: t_e1,
                population: 1,
                initial_size: Some(n_e1),
                growth_rate: None,
            },
            // The European lineage merges back into the African population.
            DemographicEvent::MassMigration {
                time: t_ae,
                source: 1,
                dest: 0,
                proportion: 1.0,
            },
            // African size change in the deep past.
            DemographicEvent::PopulationParametersChange {
                time: t_a0,
                population: 0,
                initial_size: Some(n_a1),
                growth_rate: None,
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demography::verify::Tolerance;

    #[test]
    fn test_genome_attributes() {
        let genome = genome();
        assert_eq!(genome.species(), "drosophila_melanogaster");
        assert_eq!(genome.default_genetic_map(), Some("Comeron2012_dm6"));
        assert_eq!(genome.num_chromosomes(), 8);
    }

    #[test]
    fn test_map_rows_exclude_non_recombining_units() {
        let map = comeron2012_dm6();
        assert!(map.chromosome_map("chr2L").is_some());
        assert!(map.chromosome_map("chrY").is_none());
        assert!(map.chromosome_map("chrM").is_none());
    }

    #[test]
    fn test_sheehan_song_model_structure() {
        let model = sheehan_song_three_epoch().unwrap();
        assert_eq!(model.num_populations(), 1);
        assert_eq!(model.num_sampling_populations(), 1);
        assert_eq!(model.demographic_events().len(), 2);
        assert_eq!(model.migration_matrix().shape(), (1, 1));
        assert!(model.equals(&model, Tolerance::default()).unwrap());
        assert_eq!(model.metadata().citations[0].year, 2016);
    }

    #[test]
    fn test_li_stephan_model_structure() {
        let model = li_stephan_two_population().unwrap();
        assert_eq!(model.num_populations(), 2);
        assert_eq!(model.num_sampling_populations(), 2);
        assert_eq!(model.demographic_events().len(), 3);
        assert_eq!(model.migration_matrix().shape(), (2, 2));
        assert!(model.equals(&model, Tolerance::default()).unwrap());
    }
}
