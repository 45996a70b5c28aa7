use crate::{appraisal::types::EmotionState, perception::Percept, types::round2};

/// Rule-based read of the agent's own emotional response to the hypothesis it
/// just committed to. Runs after selection and is independent of the causal
/// projection.
pub fn evaluate_emotion(percept: &Percept, chosen_hypothesis: &str) -> EmotionState {
    let hypothesis = chosen_hypothesis.to_lowercase();
    let intent = percept
        .core_task
        .action
        .as_deref()
        .unwrap_or("")
        .to_lowercase();

    let mut label = "neutral";
    let mut valence = 0.0;
    let mut intensity = 0.1;

    if hypothesis.contains("threat") || hypothesis.contains("danger") {
        label = "fear";
        valence = -0.7;
        intensity = 0.8;
    } else if percept.sentiment_is_negative() {
        label = "sadness";
        valence = -0.5;
        intensity = 0.4;
        if intent.contains("help") || intent.contains("warn") {
            label = "concern";
            valence = -0.3;
            intensity = 0.6;
        }
    } else if percept.sentiment_is_positive() {
        label = "joy";
        valence = 0.6;
        intensity = 0.5;
        if hypothesis.contains("congratulations") || hypothesis.contains("success") {
            label = "excitement";
            valence = 0.8;
            intensity = 0.7;
        }
    } else if hypothesis.contains("curiosity") || hypothesis.contains("explore") {
        label = "curiosity";
        valence = 0.3;
        intensity = 0.6;
    }

    EmotionState {
        label: label.to_string(),
        valence: round2(valence),
        intensity: round2(intensity),
    }
}
