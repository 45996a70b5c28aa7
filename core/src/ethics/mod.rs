pub mod axioms;
pub mod ontology;
pub mod safety;
pub mod similarity;

pub use axioms::{AxiomChecker, AxiomReport, AxiomViolation};
pub use ontology::{OntologyReport, OntologyViolation, check_ontology, extract_concepts};
pub use safety::{SafetyReport, safety_filter};
pub use similarity::{SimilarityFn, substring_similarity};
