//! Genetic maps and the (species, map-name) registry.
//!
//! The registry assumes already-materialized per-chromosome recombination
//! data; parsing or fetching on-disk map files is out of scope.

use crate::errors::GeneticMapError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// A piecewise-constant recombination map over physical positions.
///
/// `positions` has one more entry than `rates`: `rates[i]` applies over
/// `[positions[i], positions[i + 1])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecombinationMap {
    positions: Vec<f64>,
    rates: Vec<f64>,
}

impl RecombinationMap {
    pub fn new(positions: Vec<f64>, rates: Vec<f64>) -> Result<Self, GeneticMapError> {
        if positions.len() != rates.len() + 1 {
            return Err(GeneticMapError::InvalidMap(format!(
                "{} positions require {} rates, got {}",
                positions.len(),
                positions.len().saturating_sub(1),
                rates.len(),
            )));
        }
        if positions.first() != Some(&0.0) {
            return Err(GeneticMapError::InvalidMap(
                "positions must start at 0".to_string(),
            ));
        }
        if positions.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(GeneticMapError::InvalidMap(
                "positions must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { positions, rates })
    }

    /// A single-interval map with constant `rate` over `[0, length)`.
    pub fn uniform(length: u64, rate: f64) -> Self {
        Self {
            positions: vec![0.0, length as f64],
            rates: vec![rate],
        }
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Physical span of the map in bases.
    pub fn length(&self) -> f64 {
        *self.positions.last().unwrap_or(&0.0)
    }

    /// Length-weighted mean recombination rate.
    pub fn mean_rate(&self) -> f64 {
        let total = self.length();
        if total == 0.0 {
            return 0.0;
        }
        self.positions
            .windows(2)
            .zip(&self.rates)
            .map(|(pair, rate)| (pair[1] - pair[0]) * rate)
            .sum::<f64>()
            / total
    }
}

/// Per-chromosome recombination data for one (species, map-name) pair.
#[derive(Debug, Clone)]
pub struct GeneticMap {
    species: Arc<str>,
    name: Arc<str>,
    chromosome_maps: BTreeMap<String, RecombinationMap>,
}

impl GeneticMap {
    pub fn new(
        species: &str,
        name: &str,
        chromosome_maps: BTreeMap<String, RecombinationMap>,
    ) -> Self {
        Self {
            species: Arc::from(species),
            name: Arc::from(name),
            chromosome_maps,
        }
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chromosome_ids(&self) -> impl Iterator<Item = &str> {
        self.chromosome_maps.keys().map(String::as_str)
    }

    /// The map row for a chromosome, if this map carries one.
    pub fn chromosome_map(&self, chromosome_id: &str) -> Option<&RecombinationMap> {
        self.chromosome_maps.get(chromosome_id)
    }

    /// As [`GeneticMap::chromosome_map`], but an unrecognized chromosome
    /// id is an error. The soft no-data fallback belongs one layer up, in
    /// [`Chromosome::recombination_map`](crate::Chromosome::recombination_map).
    pub fn get_chromosome_map(
        &self,
        chromosome_id: &str,
    ) -> Result<&RecombinationMap, GeneticMapError> {
        self.chromosome_map(chromosome_id)
            .ok_or_else(|| GeneticMapError::UnknownChromosome {
                species: self.species.to_string(),
                name: self.name.to_string(),
                chromosome: chromosome_id.to_string(),
            })
    }
}

/// Registry mapping (species, map-name) pairs to genetic maps.
#[derive(Debug, Clone, Default)]
pub struct GeneticMapRegistry {
    maps: BTreeMap<(String, String), GeneticMap>,
}

impl GeneticMapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, map: GeneticMap) {
        self.maps
            .insert((map.species().to_string(), map.name().to_string()), map);
    }

    /// Look up a registered map; unregistered pairs are a lookup error.
    pub fn get(&self, species: &str, name: &str) -> Result<&GeneticMap, GeneticMapError> {
        self.maps
            .get(&(species.to_string(), name.to_string()))
            .ok_or_else(|| GeneticMapError::UnknownMap {
                species: species.to_string(),
                name: name.to_string(),
            })
    }
}

/// The registry of maps bundled with the crate, built once per process.
pub fn builtin_registry() -> &'static GeneticMapRegistry {
    static REGISTRY: OnceLock<GeneticMapRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = GeneticMapRegistry::new();
        crate::species::register_builtin_maps(&mut registry);
        registry
    })
}

/// Look up a bundled genetic map by species and name.
pub fn get_genetic_map(species: &str, name: &str) -> Result<&'static GeneticMap, GeneticMapError> {
    builtin_registry().get(species, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_map() {
        let map = RecombinationMap::uniform(1000, 1e-8);
        assert_eq!(map.positions(), &[0.0, 1000.0]);
        assert_eq!(map.rates(), &[1e-8]);
        assert_eq!(map.length(), 1000.0);
        assert_relative_eq!(map.mean_rate(), 1e-8);
    }

    #[test]
    fn test_map_validation() {
        assert!(RecombinationMap::new(vec![0.0, 100.0, 200.0], vec![1e-8, 2e-8]).is_ok());
        // Rates/positions length mismatch.
        assert!(RecombinationMap::new(vec![0.0, 100.0], vec![1e-8, 2e-8]).is_err());
        // Positions must start at zero and increase.
        assert!(RecombinationMap::new(vec![10.0, 100.0], vec![1e-8]).is_err());
        assert!(RecombinationMap::new(vec![0.0, 100.0, 50.0], vec![1e-8, 2e-8]).is_err());
    }

    #[test]
    fn test_mean_rate_weighted() {
        let map = RecombinationMap::new(vec![0.0, 100.0, 200.0], vec![1e-8, 3e-8]).unwrap();
        assert_relative_eq!(map.mean_rate(), 2e-8);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = GeneticMapRegistry::new();
        let mut rows = BTreeMap::new();
        rows.insert("chr1".to_string(), RecombinationMap::uniform(100, 1e-8));
        registry.register(GeneticMap::new("test_species", "test_map", rows));

        let map = registry.get("test_species", "test_map").unwrap();
        assert_eq!(map.name(), "test_map");
        assert!(matches!(
            registry.get("test_species", "other_map"),
            Err(GeneticMapError::UnknownMap { .. })
        ));
    }

    #[test]
    fn test_get_chromosome_map_unknown_id() {
        let mut rows = BTreeMap::new();
        rows.insert("chr1".to_string(), RecombinationMap::uniform(100, 1e-8));
        let map = GeneticMap::new("test_species", "test_map", rows);

        assert!(map.get_chromosome_map("chr1").is_ok());
        let err = map.get_chromosome_map("jibberish").unwrap_err();
        assert!(matches!(err, GeneticMapError::UnknownChromosome { .. }));
    }
}
