//! Catalog of demographic models.
//!
//! Published models are registered as data: a model id mapped to a
//! zero-argument construction function returning an immutable
//! [`Model`](crate::Model). Generic parameterized factories live in
//! [`generic`].

pub mod generic;

use crate::demography::model::Model;
use crate::errors::ModelError;
use thiserror::Error;

/// A literature citation for a catalog model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub author: &'static str,
    pub year: u16,
    pub doi: &'static str,
}

/// Static metadata shared by all instances of one catalog model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    /// Short, memorable unique identifier, e.g. "ooa_3".
    pub id: &'static str,
    /// Display name as used in written text.
    pub name: &'static str,
    pub description: &'static str,
    pub citations: Vec<Citation>,
}

/// Errors from catalog lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("unknown model id: {0}")]
    UnknownModel(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

type ModelFactory = fn() -> Result<Model, ModelError>;

// Registered zero-argument published models. Parameterized generic models
// are constructed directly through the factories in `generic`.
const REGISTRY: &[(&str, ModelFactory)] = &[
    (
        "ooa_3",
        crate::species::homo_sapiens::gutenkunst_three_pop_out_of_africa,
    ),
    ("tennessen_eu", crate::species::homo_sapiens::tennessen_european),
    (
        "sheehan_song_3ep",
        crate::species::drosophila_melanogaster::sheehan_song_three_epoch,
    ),
    (
        "li_stephan_2pop",
        crate::species::drosophila_melanogaster::li_stephan_two_population,
    ),
];

/// Construct a registered catalog model by id.
pub fn get_model(id: &str) -> Result<Model, CatalogError> {
    let (_, factory) = REGISTRY
        .iter()
        .find(|(registered, _)| *registered == id)
        .ok_or_else(|| CatalogError::UnknownModel(id.to_string()))?;
    Ok(factory()?)
}

/// Ids of all registered models.
pub fn model_ids() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(id, _)| *id)
}
