pub mod filter;
pub mod generator;
pub mod scorer;
pub mod types;

pub use filter::adjust_hypotheses;
pub use generator::{GeneratorRequest, generate_hypotheses};
pub use scorer::{ScoringContext, evaluate_hypotheses};
pub use types::{EvaluationDetail, HypothesisCandidate};
