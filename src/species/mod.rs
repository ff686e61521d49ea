//! Bundled species data: genome assemblies, genetic maps and published
//! demographic models.

pub mod drosophila_melanogaster;
pub mod homo_sapiens;

use crate::genome::genetic_map::GeneticMapRegistry;

pub(crate) fn register_builtin_maps(registry: &mut GeneticMapRegistry) {
    registry.register(homo_sapiens::hapmap_ii_grch37());
    registry.register(drosophila_melanogaster::comeron2012_dm6());
}
