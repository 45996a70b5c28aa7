use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::round3;

pub const NO_INPUT_PLACEHOLDER: &str = "no_discernible_input";

/// One unit of external input. Text is the primary channel; audio and vision
/// are optional transcripts from upstream capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CycleInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub vision: Option<String>,
}

impl CycleInput {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            audio: None,
            vision: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensoriumFrame {
    pub raw_fused: String,
    pub active_modalities: Vec<String>,
    pub modality_weights: BTreeMap<String, f64>,
    pub fusion_confidence: f64,
    pub detailed_inputs: BTreeMap<String, String>,
}

impl SensoriumFrame {
    pub fn has_input(&self) -> bool {
        self.raw_fused != NO_INPUT_PLACEHOLDER && !self.raw_fused.trim().is_empty()
    }
}

/// Fuses the available modalities into one frame. Text dominates; audio and
/// vision fall back in that order, tagged with their channel.
pub fn fuse(input: &CycleInput) -> SensoriumFrame {
    let text = non_empty(input.text.as_deref());
    let audio = non_empty(input.audio.as_deref());
    let vision = non_empty(input.vision.as_deref());

    let mut active = Vec::new();
    let mut detailed = BTreeMap::new();
    if let Some(text) = text {
        active.push("text".to_string());
        detailed.insert("text".to_string(), text.to_string());
    }
    if let Some(audio) = audio {
        active.push("audio".to_string());
        detailed.insert("audio".to_string(), audio.to_string());
    }
    if let Some(vision) = vision {
        active.push("vision".to_string());
        detailed.insert("vision".to_string(), vision.to_string());
    }

    if active.is_empty() {
        return SensoriumFrame {
            raw_fused: NO_INPUT_PLACEHOLDER.to_string(),
            active_modalities: Vec::new(),
            modality_weights: BTreeMap::new(),
            fusion_confidence: 0.1,
            detailed_inputs: BTreeMap::new(),
        };
    }

    let raw_fused = if let Some(text) = text {
        text.to_string()
    } else if let Some(audio) = audio {
        format!("[Audio] {audio}")
    } else {
        // vision is the only remaining active modality here
        format!("[Vision] {}", vision.unwrap_or_default())
    };

    let weight = round3(1.0 / active.len() as f64);
    let modality_weights = active
        .iter()
        .map(|modality| (modality.clone(), weight))
        .collect();
    let fusion_confidence = (0.50 + 0.10 * active.len() as f64).min(0.95);

    SensoriumFrame {
        raw_fused,
        active_modalities: active,
        modality_weights,
        fusion_confidence,
        detailed_inputs: detailed,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
