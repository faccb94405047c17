pub mod serialization;

pub use serialization::ConceptValue;
