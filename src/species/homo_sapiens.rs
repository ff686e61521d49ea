//! Human genome data (GRCh38.p12) and published demographic models.

use crate::catalog::{Citation, ModelMetadata};
use crate::demography::events::DemographicEvent;
use crate::demography::model::{MigrationMatrix, Model};
use crate::demography::population::{Population, PopulationConfig};
use crate::errors::ModelError;
use crate::genome::genetic_map::{GeneticMap, RecombinationMap};
use crate::genome::Genome;
use std::collections::BTreeMap;

pub const SPECIES: &str = "homo_sapiens";
pub const DEFAULT_GENETIC_MAP: &str = "HapmapII_GRCh37";

/// Genome-wide mean recombination rate, used as the uniform fallback for
/// chromosomes without map data.
const MEAN_RECOMBINATION_RATE: f64 = 1.1e-8;

// Chromosome lengths from GRCh38.p12
// (https://www.ncbi.nlm.nih.gov/grc/human/data).
const CHROMOSOMES: &[(&str, u64)] = &[
    ("chr1", 248_956_422),
    ("chr2", 242_193_529),
    ("chr3", 198_295_559),
    ("chr4", 190_214_555),
    ("chr5", 181_538_259),
    ("chr6", 170_805_979),
    ("chr7", 159_345_973),
    ("chr8", 145_138_636),
    ("chr9", 138_394_717),
    ("chr10", 133_797_422),
    ("chr11", 135_086_622),
    ("chr12", 133_275_309),
    ("chr13", 114_364_328),
    ("chr14", 107_043_718),
    ("chr15", 101_991_189),
    ("chr16", 90_338_345),
    ("chr17", 83_257_441),
    ("chr18", 80_373_285),
    ("chr19", 58_617_616),
    ("chr20", 64_444_167),
    ("chr21", 46_709_983),
    ("chr22", 50_818_468),
    ("chrX", 156_040_895),
    ("chrY", 57_227_415),
];

/// The human genome assembly with the HapMap II default genetic map.
pub fn genome() -> Genome {
    Genome::new(
        SPECIES,
        Some(DEFAULT_GENETIC_MAP),
        MEAN_RECOMBINATION_RATE,
        CHROMOSOMES,
    )
}

/// The HapMap phase II (GRCh37 lift-over) genetic map.
///
/// Rows cover the autosomes and chrX. chrY has no published map and
/// resolves through the uniform fallback.
pub(crate) fn hapmap_ii_grch37() -> GeneticMap {
    let mut rows = BTreeMap::new();
    for &(id, length) in CHROMOSOMES {
        if id == "chrY" {
            continue;
        }
        rows.insert(
            id.to_string(),
            RecombinationMap::uniform(length, MEAN_RECOMBINATION_RATE),
        );
    }
    GeneticMap::new(SPECIES, DEFAULT_GENETIC_MAP, rows)
}

/// Gutenkunst et al. (2009) three-population out-of-Africa model.
///
/// An African population (YRI) of constant size; a bottlenecked
/// out-of-Africa population splitting into European (CEU) and East Asian
/// (CHB) populations that grow exponentially to the present, with
/// migration between all contemporaneous pairs.
pub fn gutenkunst_three_pop_out_of_africa() -> Result<Model, ModelError> {
    let generation_time: f64 = 25.0;

    // Parameter values from Table 1 of Gutenkunst et al. (2009), times
    // converted from years to generations.
    let n_a = 7300.0;
    let n_b = 2100.0;
    let n_af = 12300.0;
    let n_eu0 = 1000.0;
    let n_as0 = 510.0;
    let r_eu = 0.004;
    let r_as = 0.0055;
    let t_af = 220e3 / generation_time;
    let t_b = 140e3 / generation_time;
    let t_eu_as = 21.2e3 / generation_time;
    let m_af_b = 25e-5;
    let m_af_eu = 3e-5;
    let m_af_as = 1.9e-5;
    let m_eu_as = 9.6e-5;

    // Present-day sizes after exponential growth since the EU/AS split.
    let n_eu = n_eu0 * (r_eu * t_eu_as).exp();
    let n_as = n_as0 * (r_as * t_eu_as).exp();

    let yri = Population::new("YRI", "1000 Genomes YRI (Yoruba)");
    let ceu = Population::new("CEU", "1000 Genomes CEU (Utah residents, European ancestry)");
    let chb = Population::new("CHB", "1000 Genomes CHB (Han Chinese in Beijing)");

    let model = Model::new(
        ModelMetadata {
            id: "ooa_3",
            name: "Three population out-of-Africa",
            description: "The three-population out-of-Africa model inferred from \
                the joint allele frequency spectrum of YRI, CEU and CHB.",
            citations: vec![Citation {
                author: "Gutenkunst et al.",
                year: 2009,
                doi: "https://doi.org/10.1371/journal.pgen.1000695",
            }],
        },
        vec![yri.clone(), ceu.clone(), chb.clone()],
        vec![
            PopulationConfig::new(n_af, &yri),
            PopulationConfig::new(n_eu, &ceu).with_growth_rate(r_eu),
            PopulationConfig::new(n_as, &chb).with_growth_rate(r_as),
        ],
        MigrationMatrix::new(vec![
            vec![0.0, m_af_eu, m_af_as],
            vec![m_af_eu, 0.0, m_eu_as],
            vec![m_af_as, m_eu_as, 0.0],
        ])?,
        vec![
            // CEU and CHB merge into the bottleneck population, which then
            // carries the AF<->B migration rate.
            DemographicEvent::MassMigration {
                time: t_eu_as,
                source: 2,
                dest: 1,
                proportion: 1.0,
            },
            DemographicEvent::MigrationRateChange {
                time: t_eu_as,
                rate: 0.0,
                matrix_index: None,
            },
            DemographicEvent::MigrationRateChange {
                time: t_eu_as,
                rate: m_af_b,
                matrix_index: Some((0, 1)),
            },
            DemographicEvent::MigrationRateChange {
                time: t_eu_as,
                rate: m_af_b,
                matrix_index: Some((1, 0)),
            },
            DemographicEvent::PopulationParametersChange {
                time: t_eu_as,
                population: 1,
                initial_size: Some(n_b),
                growth_rate: Some(0.0),
            },
            // The bottleneck population merges into the African population.
            DemographicEvent::MassMigration {
                time: t_b,
                source: 1,
                dest: 0,
                proportion: 1.0,
            },
            // Ancestral size before African expansion.
            DemographicEvent::PopulationParametersChange {
                time: t_af,
                population: 0,
                initial_size: Some(n_a),
                growth_rate: None,
            },
        ],
    )?;
    Ok(model.with_generation_time(generation_time))
}

/// Tennessen et al. (2012) single-population European model.
///
/// The European branch of the out-of-Africa history, fitted to exome
/// data: an ancestral African epoch, the out-of-Africa bottleneck, and
/// two phases of exponential growth with a sharp recent acceleration.
pub fn tennessen_european() -> Result<Model, ModelError> {
    let generation_time: f64 = 25.0;

    // Parameter values from Tennessen et al. (2012), times converted
    // from years to generations.
    let t_af = 148e3 / generation_time;
    let t_ooa = 51e3 / generation_time;
    let t_eu0 = 23e3 / generation_time;
    let t_eg = 5115.0 / generation_time;
    let r_eu0 = 0.00307;
    let r_eu = 0.0195;
    let n_a = 7310.0;
    let n_af = 14474.0;
    let n_b = 1861.0;
    let n_eu0 = 1032.0;

    // Sizes at the growth-phase boundaries.
    let n_eu1 = n_eu0 * (r_eu0 * (t_eu0 - t_eg)).exp();
    let n_eu = n_eu1 * (r_eu * t_eg).exp();

    let ceu = Population::new("CEU", "1000 Genomes CEU (Utah residents, European ancestry)");

    let model = Model::new(
        ModelMetadata {
            id: "tennessen_eu",
            name: "Tennessen European",
            description: "Single-population model of European demographic history \
                with an out-of-Africa bottleneck followed by two epochs of \
                exponential growth.",
            citations: vec![Citation {
                author: "Tennessen et al.",
                year: 2012,
                doi: "https://doi.org/10.1126/science.1219240",
            }],
        },
        vec![ceu.clone()],
        vec![PopulationConfig::new(n_eu, &ceu).with_growth_rate(r_eu)],
        MigrationMatrix::zero(1),
        vec![
            // Start of the recent rapid growth phase.
            DemographicEvent::PopulationParametersChange {
                time: t_eg,
                population: 0,
                initial_size: Some(n_eu1),
                growth_rate: Some(r_eu0),
            },
            // Out-of-Africa bottleneck, constant size.
            DemographicEvent::PopulationParametersChange {
                time: t_eu0,
                population: 0,
                initial_size: Some(n_b),
                growth_rate: Some(0.0),
            },
            // African epoch before the out-of-Africa split.
            DemographicEvent::PopulationParametersChange {
                time: t_ooa,
                population: 0,
                initial_size: Some(n_af),
                growth_rate: None,
            },
            // Ancestral size.
            DemographicEvent::PopulationParametersChange {
                time: t_af,
                population: 0,
                initial_size: Some(n_a),
                growth_rate: None,
            },
        ],
    )?;
    Ok(model.with_generation_time(generation_time))
}
