//! Human-readable rendering of a model's demographic history.

use crate::demography::model::Model;
use std::io::{self, Write};

/// Renders the population configurations, migration matrix and event
/// history of a model as a text report.
pub struct DemographyDebugger<'a> {
    model: &'a Model,
}

impl<'a> DemographyDebugger<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Write the full demographic history to `out`.
    pub fn print_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let metadata = self.model.metadata();
        writeln!(out, "Demographic history: {} [{}]", metadata.name, metadata.id)?;
        if let Some(generation_time) = self.model.generation_time() {
            writeln!(out, "Generation time: {generation_time}")?;
        }

        writeln!(out, "\nPopulations:")?;
        let configs = self.model.population_configurations();
        for (index, (population, config)) in
            self.model.populations().iter().zip(configs).enumerate()
        {
            let sampling = match population.sampling_time() {
                Some(time) => format!("sampled at t={time}"),
                None => "not sampled".to_string(),
            };
            writeln!(
                out,
                "  [{index}] {}: initial_size={}, growth_rate={}, {sampling}",
                population.name(),
                config.initial_size.unwrap_or_default(),
                config.growth_rate,
            )?;
        }

        writeln!(out, "\nMigration matrix:")?;
        for row in self.model.migration_matrix().rows() {
            let entries: Vec<String> = row.iter().map(|rate| format!("{rate:>10.3e}")).collect();
            writeln!(out, "  [{}]", entries.join(", "))?;
        }

        let events = self.model.demographic_events();
        if events.is_empty() {
            writeln!(out, "\nNo demographic events.")?;
        } else {
            writeln!(out, "\nDemographic events:")?;
            for event in events {
                writeln!(out, "  {event}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::generic::isolation_with_migration;

    #[test]
    fn test_print_history_mentions_populations_and_events() {
        let model = isolation_with_migration(7300.0, 12300.0, 12300.0, 4000.0, 1e-4, 1e-4).unwrap();
        let mut out = Vec::new();
        DemographyDebugger::new(&model).print_history(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Populations:"));
        assert!(text.contains("Migration matrix:"));
        assert!(text.contains("mass migration"));
        assert!(text.contains("not sampled"));
    }
}
