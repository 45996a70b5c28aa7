use crate::{
    appraisal::types::{AffectState, Goal, MotivationSignal},
    perception::Percept,
    profile::TraitProfile,
    types::{CycleContext, round2},
};

pub struct AffectRequest<'a> {
    pub percept: &'a Percept,
    pub motivation: &'a MotivationSignal,
    pub goals: &'a [Goal],
    pub profile: &'a TraitProfile,
    pub context: &'a CycleContext,
}

/// Weighted appraisal of the current cycle into a valence/arousal pair plus
/// the derived memory weight and a coarse emotional label.
pub fn assess_affect(req: AffectRequest<'_>) -> AffectState {
    let arousal = assess_arousal(&req);
    let valence = assess_valence(&req);

    let memory_weight = round2(arousal * 0.6 + valence.abs() * 0.4).min(1.0);
    let drive_tag = req.motivation.dominant_drive.clone();
    let emotional_label = label_for(arousal, valence, &drive_tag).to_string();

    AffectState {
        valence,
        arousal,
        memory_weight,
        drive_tag,
        emotional_label,
    }
}

fn assess_arousal(req: &AffectRequest<'_>) -> f64 {
    let threat = req.percept.threat_level;

    let mut goal_urgency: f64 = 0.0;
    for goal in req.goals {
        if goal.priority == crate::types::Priority::Critical || goal.urgency > 0.8 {
            goal_urgency += 0.4;
        } else if goal.priority == crate::types::Priority::High || goal.urgency > 0.5 {
            goal_urgency += 0.2;
        }
    }
    let goal_urgency = goal_urgency.min(0.8);

    let motivation_drive = req.motivation.motivation_level * 0.5;
    let risk_bias = req.profile.risk_aversion * threat;
    let novelty = req.percept.novelty * req.profile.novelty_seeking;
    // Direct threat is the strongest single arousal driver.
    let direct_threat = threat * 0.7;

    let arousal = round2(
        goal_urgency * 0.3
            + motivation_drive * 0.2
            + risk_bias * 0.2
            + novelty * 0.1
            + direct_threat * 0.2,
    );
    arousal.clamp(0.0, 1.0)
}

fn assess_valence(req: &AffectRequest<'_>) -> f64 {
    let summary = req.percept.summary.to_lowercase();

    let mut valence = 0.0;
    if !req.goals.is_empty() {
        let mut congruence = 0.0;
        for goal in req.goals {
            let concept = goal.concept.to_lowercase();
            if summary.contains("optimize") && concept.contains("efficiency") {
                congruence += 0.7;
            } else if summary.contains("threat") && concept.contains("security") {
                congruence -= 0.8;
            } else if summary.contains("communicate") && concept.contains("connection") {
                congruence += 0.5;
            }
        }
        valence += (congruence / req.goals.len() as f64) * 0.6;
    }

    let inherent = concept_valence(req.percept.core_task.action.as_deref().unwrap_or(""))
        + concept_valence(req.percept.core_task.object.as_deref().unwrap_or(""));
    valence += inherent * 0.3;

    valence += req.profile.empathy_level * req.context.distress_signal * 0.1;

    round2(valence.clamp(-1.0, 1.0))
}

/// Inherent affective value of a concept, independent of the current goal.
fn concept_valence(concept: &str) -> f64 {
    let concept = concept.to_lowercase();
    if concept.contains("harm") || concept.contains("destroy") || concept.contains("threat") {
        -0.9
    } else if concept.contains("cooperation")
        || concept.contains("optimize")
        || concept.contains("solution")
    {
        0.9
    } else if concept.contains("problem") {
        -0.5
    } else {
        0.0
    }
}

fn label_for(arousal: f64, valence: f64, drive: &str) -> &'static str {
    if arousal > 0.7 {
        if valence > 0.6 {
            if drive == "exploration" { "excitement" } else { "elation" }
        } else if valence < -0.6 {
            if drive == "survival" { "fear" } else { "distress" }
        } else if drive == "coherence" {
            "alertness"
        } else {
            "surprise"
        }
    } else if arousal < 0.3 {
        if valence > 0.5 {
            "calm_pleasure"
        } else if valence < -0.5 {
            "discontent"
        } else {
            "relaxed"
        }
    } else if valence > 0.3 {
        "interest"
    } else if valence < -0.3 {
        "concern"
    } else {
        "observational"
    }
}
