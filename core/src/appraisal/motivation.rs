use crate::{
    appraisal::types::{Goal, MotivationSignal},
    profile::TraitProfile,
    types::ContextFlags,
};

const BASELINE_LEVEL: f64 = 0.5;
const FOCUS_BOOST_THRESHOLD: f64 = 0.75;
const URGENCY_FLAG_THRESHOLD: f64 = 0.65;

const DRIVE_MAP: &[(&str, &str)] = &[
    ("analyze proximity", "exploration"),
    ("evaluate threat", "survival"),
    ("enhance process", "optimization"),
    ("establish connection", "cooperation"),
    ("evaluate ethical risk", "preservation"),
    ("analyze situation", "coherence"),
    ("maintain stability", "homeostasis"),
];

pub struct MotivationContext<'a> {
    pub goal: &'a Goal,
    pub profile: &'a TraitProfile,
    pub flags: &'a ContextFlags,
}

pub fn evaluate_motivation(ctx: MotivationContext<'_>) -> MotivationSignal {
    let drive = dominant_drive(&ctx.goal.concept);

    let mut level = BASELINE_LEVEL;
    match drive {
        "survival" => level += 0.3,
        "preservation" => level += 0.2 * ctx.profile.ethics_sensitivity,
        "exploration" => level += 0.2 * ctx.profile.adaptivity,
        "optimization" => {
            level += if ctx.profile.is_deductive() { 0.15 } else { 0.05 };
        }
        _ => {}
    }
    if ctx.flags.external_alert {
        level += 0.2;
    }
    if ctx.flags.low_success_rate {
        level -= 0.15;
    }
    if ctx.flags.internal_error {
        level -= 0.2;
    }
    let level = level.clamp(0.0, 1.0);

    MotivationSignal {
        dominant_drive: drive.to_string(),
        motivation_level: level,
        recommendations: recommendations(drive, level, ctx.profile),
    }
}

fn dominant_drive(concept: &str) -> &'static str {
    // Goal concepts use underscores; the drive table is keyed by phrases.
    let category = concept.split(':').next().unwrap_or(concept);
    let normalized = category.trim().to_lowercase().replace('_', " ");
    DRIVE_MAP
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, drive)| *drive)
        .unwrap_or("coherence")
}

fn recommendations(drive: &str, level: f64, profile: &TraitProfile) -> Vec<String> {
    let mut out = Vec::new();
    if level > FOCUS_BOOST_THRESHOLD {
        out.push("focus_boost".to_string());
    }
    if (drive == "survival" || drive == "preservation") && level > URGENCY_FLAG_THRESHOLD {
        out.push("urgency_flag".to_string());
    }
    if drive == "preservation" && profile.ethics_sensitivity > 0.7 {
        out.push("ethical_caution".to_string());
    } else if profile.ethics_sensitivity > 0.85 {
        out.push("general_ethical_vigilance".to_string());
    }
    out
}
