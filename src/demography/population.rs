//! Population metadata and per-population simulation configuration.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Metadata describing one population end-point of a demographic model.
///
/// `sampling_time` gives the time (generations before present) at which
/// samples are drawn from this population. `None` means samples may never
/// be drawn (ancestral-only populations). Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    name: Arc<str>,
    description: Arc<str>,
    sampling_time: Option<f64>,
}

impl Population {
    /// Create a population sampled at the present (time 0).
    pub fn new(name: impl Into<Arc<str>>, description: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sampling_time: Some(0.0),
        }
    }

    /// Create a population sampled at the given time before present.
    pub fn sampled_at(
        name: impl Into<Arc<str>>,
        description: impl Into<Arc<str>>,
        time: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sampling_time: Some(time),
        }
    }

    /// Create an ancestral population from which sampling is not allowed.
    pub fn ancestral(name: impl Into<Arc<str>>, description: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sampling_time: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sampling_time(&self) -> Option<f64> {
        self.sampling_time
    }

    /// True iff samples may be drawn from this population.
    pub fn allow_samples(&self) -> bool {
        self.sampling_time.is_some()
    }

    /// Canonical metadata mapping, embedded into each engine-facing
    /// population configuration so simulation output retains provenance.
    pub fn metadata(&self) -> serde_json::Value {
        json!({
            "name": self.name.as_ref(),
            "description": self.description.as_ref(),
            "sampling_time": self.sampling_time,
        })
    }
}

/// Per-population slot inside a [`Model`](crate::Model), in the shape the
/// simulation engine consumes.
///
/// `initial_size` must be set for every configuration in a catalog model;
/// `sample_size` is reserved for simulation-time sample specification and
/// must never be set by model authors. Both rules are enforced at model
/// construction and re-checked by the equivalence verifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationConfig {
    pub initial_size: Option<f64>,
    pub growth_rate: f64,
    pub sample_size: Option<u64>,
    pub metadata: serde_json::Value,
}

impl PopulationConfig {
    /// Create a configuration for `population` with the given initial size
    /// and zero growth rate.
    pub fn new(initial_size: f64, population: &Population) -> Self {
        Self {
            initial_size: Some(initial_size),
            growth_rate: 0.0,
            sample_size: None,
            metadata: population.metadata(),
        }
    }

    pub fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = growth_rate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_allow_samples() {
        let pop = Population::new("pop0", "Generic population");
        assert!(pop.allow_samples());
        assert_eq!(pop.sampling_time(), Some(0.0));

        let anc = Population::ancestral("popAnc", "Generic ancestral population");
        assert!(!anc.allow_samples());
        assert_eq!(anc.sampling_time(), None);
    }

    #[test]
    fn test_population_sampled_at() {
        let pop = Population::sampled_at("ancient", "Ancient DNA panel", 100.0);
        assert!(pop.allow_samples());
        assert_eq!(pop.sampling_time(), Some(100.0));
    }

    #[test]
    fn test_population_metadata() {
        let pop = Population::new("YRI", "Africans");
        let meta = pop.metadata();
        assert_eq!(meta["name"], "YRI");
        assert_eq!(meta["description"], "Africans");
        assert_eq!(meta["sampling_time"], 0.0);

        let anc = Population::ancestral("popAnc", "Ancestral");
        assert!(anc.metadata()["sampling_time"].is_null());
    }

    #[test]
    fn test_population_config_new() {
        let pop = Population::new("pop0", "Generic population");
        let pc = PopulationConfig::new(1000.0, &pop);
        assert_eq!(pc.initial_size, Some(1000.0));
        assert_eq!(pc.growth_rate, 0.0);
        assert_eq!(pc.sample_size, None);
        assert_eq!(pc.metadata["name"], "pop0");
    }

    #[test]
    fn test_population_config_with_growth_rate() {
        let pop = Population::new("CEU", "Europeans");
        let pc = PopulationConfig::new(1000.0, &pop).with_growth_rate(0.004);
        assert_eq!(pc.growth_rate, 0.004);
    }
}
