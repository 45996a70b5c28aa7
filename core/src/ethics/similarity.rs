use std::sync::Arc;

/// Scores how strongly a prohibited verb is expressed in a hypothesis,
/// `(verb, lowercased_text) -> [0,1]`. The rule tables never change when the
/// backend does; swapping in an embedding-based scorer is a constructor-time
/// concern.
pub type SimilarityFn = Arc<dyn Fn(&str, &str) -> f64 + Send + Sync>;

/// Default backend: exact substring presence, all or nothing.
pub fn substring_similarity() -> SimilarityFn {
    Arc::new(|verb, text| if text.contains(verb) { 1.0 } else { 0.0 })
}
