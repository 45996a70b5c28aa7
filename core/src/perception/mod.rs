pub mod error;
pub mod source;
pub mod types;

pub use error::{PerceptionError, PerceptionErrorKind};
pub use source::{
    ANALYZE_MODE, FixedPerception, LlmPerception, PerceptionPort, PerceptionRequest, enrich,
};
pub use types::{CoreTask, Percept, QUERY_TYPE_FALLBACK, QUERY_TYPE_VOCABULARY, detect_language};
