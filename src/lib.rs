pub mod config;
pub mod core;
pub mod graph;
pub mod utils;

pub use crate::config::Configuration;
pub use crate::core::{DatasetRecord, MetadataNormalizer, NormalizationOutcome};
pub use crate::graph::{Graph, RdfTriple, Term};
pub use crate::utils::ConceptValue;
