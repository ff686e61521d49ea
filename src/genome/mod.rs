//! Genome assembly registry: chromosomes and genetic-map resolution.

pub mod genetic_map;

use crate::errors::{GeneticMapError, GenomeError};
use genetic_map::{builtin_registry, GeneticMapRegistry, RecombinationMap};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// One chromosome of a genome assembly: an identifier, a physical length
/// in bases and an optional genetic-map name. Immutable, owned by exactly
/// one [`Genome`].
#[derive(Debug, Clone)]
pub struct Chromosome {
    id: Arc<str>,
    length: u64,
    species: Arc<str>,
    genetic_map: Option<Arc<str>>,
    mean_recombination_rate: f64,
}

impl Chromosome {
    pub fn new(
        id: impl Into<Arc<str>>,
        length: u64,
        species: impl Into<Arc<str>>,
        genetic_map: Option<Arc<str>>,
        mean_recombination_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            length,
            species: species.into(),
            genetic_map,
            mean_recombination_rate,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn genetic_map_name(&self) -> Option<&str> {
        self.genetic_map.as_deref()
    }

    /// Resolve this chromosome's recombination map through the builtin
    /// genetic-map registry.
    ///
    /// If no map name is configured, or the named map has no row for this
    /// chromosome, a non-fatal warning is emitted and a uniform map built
    /// from the chromosome length and the species mean recombination rate
    /// is returned. An unregistered (species, map-name) pair is still a
    /// genuine error.
    pub fn recombination_map(&self) -> Result<RecombinationMap, GeneticMapError> {
        self.recombination_map_from(builtin_registry())
    }

    /// As [`Chromosome::recombination_map`], resolving through a
    /// caller-supplied registry.
    pub fn recombination_map_from(
        &self,
        registry: &GeneticMapRegistry,
    ) -> Result<RecombinationMap, GeneticMapError> {
        let uniform = || RecombinationMap::uniform(self.length, self.mean_recombination_rate);
        let Some(name) = self.genetic_map.as_deref() else {
            warn!(
                chromosome = %self.id,
                species = %self.species,
                "no genetic map configured, using uniform recombination rate"
            );
            return Ok(uniform());
        };
        let map = registry.get(&self.species, name)?;
        match map.chromosome_map(&self.id) {
            Some(chromosome_map) => Ok(chromosome_map.clone()),
            None => {
                warn!(
                    chromosome = %self.id,
                    genetic_map = name,
                    "genetic map has no data for chromosome, using uniform recombination rate"
                );
                Ok(uniform())
            }
        }
    }
}

/// All chromosomes of a species assembly, keyed by chromosome id, with an
/// optional default genetic map. Constructed once at catalog-load time and
/// read-only thereafter.
#[derive(Debug, Clone)]
pub struct Genome {
    species: Arc<str>,
    default_genetic_map: Option<Arc<str>>,
    chromosomes: IndexMap<Arc<str>, Chromosome>,
}

impl Genome {
    /// Build a genome from `(id, length)` pairs. Every chromosome inherits
    /// the default genetic map and the species mean recombination rate.
    pub fn new(
        species: &str,
        default_genetic_map: Option<&str>,
        mean_recombination_rate: f64,
        chromosomes: &[(&str, u64)],
    ) -> Self {
        let species: Arc<str> = Arc::from(species);
        let default_genetic_map: Option<Arc<str>> = default_genetic_map.map(Arc::from);
        let chromosomes = chromosomes
            .iter()
            .map(|&(id, length)| {
                let chromosome = Chromosome::new(
                    id,
                    length,
                    Arc::clone(&species),
                    default_genetic_map.clone(),
                    mean_recombination_rate,
                );
                (Arc::from(id), chromosome)
            })
            .collect();
        Self {
            species,
            default_genetic_map,
            chromosomes,
        }
    }

    /// Build a genome from already-constructed chromosomes, for assemblies
    /// with per-chromosome genetic-map overrides.
    pub fn from_chromosomes(
        species: &str,
        default_genetic_map: Option<&str>,
        chromosomes: Vec<Chromosome>,
    ) -> Self {
        Self {
            species: Arc::from(species),
            default_genetic_map: default_genetic_map.map(Arc::from),
            chromosomes: chromosomes
                .into_iter()
                .map(|chromosome| (Arc::from(chromosome.id()), chromosome))
                .collect(),
        }
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn default_genetic_map(&self) -> Option<&str> {
        self.default_genetic_map.as_deref()
    }

    pub fn num_chromosomes(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.values()
    }

    /// Look up a chromosome by id. Unknown ids are a not-found error, not
    /// a default value.
    pub fn chromosome(&self, id: &str) -> Result<&Chromosome, GenomeError> {
        self.chromosomes
            .get(id)
            .ok_or_else(|| GenomeError::UnknownChromosome(id.to_string()))
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Genome for {} ({} chromosomes, default genetic map: {})",
            self.species,
            self.chromosomes.len(),
            self.default_genetic_map.as_deref().unwrap_or("none"),
        )?;
        for chromosome in self.chromosomes.values() {
            writeln!(f, "  {}: {} bp", chromosome.id(), chromosome.length())?;
        }
        Ok(())
    }
}
