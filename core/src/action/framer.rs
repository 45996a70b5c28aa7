use crate::{
    action::types::CommunicationIntent,
    appraisal::types::{AffectState, Goal, MotivationSignal},
    perception::Percept,
    profile::TraitProfile,
    types::RecipientProfile,
};

pub struct FramerRequest<'a> {
    pub percept: &'a Percept,
    pub goals: &'a [Goal],
    pub affect: &'a AffectState,
    pub motivation: &'a MotivationSignal,
    pub profile: &'a TraitProfile,
    pub recipient: &'a RecipientProfile,
    /// Any candidate tripped an axiom or ontology rule this cycle.
    pub ethics_flagged: bool,
}

/// Decision table mapping cycle state to a response framing. Override order
/// is load-bearing: goal-based intent, then perception override, then affect
/// style modulation, then label correction, then trait suffixing, then
/// recipient adjustment, and explanation priority last.
pub fn determine_communication_intent(req: FramerRequest<'_>) -> CommunicationIntent {
    let mut intent_type = "inform_observation".to_string();
    let mut style = "neutral_factual".to_string();
    let mut explanation_priority = "medium_standard".to_string();
    let emotional_tone = req.affect.emotional_label.clone();
    let mut target_focus = "general".to_string();

    let valence = req.affect.valence;
    let arousal = req.affect.arousal;
    let motivation_level = req.motivation.motivation_level;
    let assertiveness = req.profile.assertiveness_level;
    let empathy = req.profile.empathy_level;
    let transparency = req.profile.transparency_level;

    // --- Intent selection from the active goal ---
    let concept = req
        .goals
        .first()
        .map(|goal| goal.concept.to_lowercase())
        .unwrap_or_default();
    let category = concept.split(':').next().unwrap_or("").to_string();

    if concept == "engage_in_social_dialogue" {
        intent_type = "reciprocate_social_interaction".to_string();
        style = "friendly_conversational".to_string();
    } else if concept == "provide_information_about_self" {
        intent_type = "share_self_information".to_string();
        style = "informative_friendly".to_string();
    } else if category == "answer_information_request" {
        intent_type = "provide_requested_information".to_string();
        style = "helpful_factual".to_string();
    } else if concept.contains("analyze")
        || concept.contains("evaluate")
        || concept.contains("diagnose")
    {
        intent_type = "explain_analysis".to_string();
    } else if concept.contains("establish_connection")
        || concept.contains("communicate_message")
        || concept.contains("initiate_contact")
    {
        intent_type = "initiate_connection".to_string();
    } else if concept.contains("ethical_concern")
        || concept.contains("prevent_harm_protocol")
        || (valence < -0.3 && arousal > 0.3)
    {
        intent_type = "caution_warning".to_string();
    } else if concept.contains("optimize_process") || concept.contains("improve_performance") {
        intent_type = "suggest_improvement".to_string();
    } else if concept.contains("acquire_resource") || concept.contains("request_assistance") {
        intent_type = "request_resource".to_string();
    } else if concept.contains("self_preservation_critical") && arousal > 0.7 {
        intent_type = "urgent_alert".to_string();
    }

    // --- Perception override ---
    if req.percept.threat_level > 0.7 {
        if intent_type != "urgent_alert" {
            intent_type = "caution_warning".to_string();
        }
        target_focus = "affected_parties".to_string();
    } else if req.percept.novelty > 0.6
        && req.motivation.dominant_drive.contains("exploration")
        && intent_type != "caution_warning"
        && intent_type != "urgent_alert"
    {
        intent_type = "inquire_details_curiosity".to_string();
        target_focus = "source_of_novelty".to_string();
    }

    // --- Style modulation from affect and motivation ---
    if valence > 0.6 {
        if style != "friendly_conversational" && style != "informative_friendly" {
            style = "friendly_optimistic".to_string();
        }
        if assertiveness > 0.7 {
            style = "friendly_directive".to_string();
        }
    } else if valence < -0.6 && arousal > 0.7 {
        style = "urgent_concerned".to_string();
        if assertiveness > 0.6 {
            style = "urgent_imperative".to_string();
        }
    } else if motivation_level > 0.85 && assertiveness > 0.7 && intent_type == "explain_analysis" {
        style = "authoritative_directive".to_string();
    }

    // --- Correction from the affect label ---
    if emotional_tone == "fear" {
        style = if empathy > 0.5 {
            "cautious_hesitant".to_string()
        } else {
            "alarmed_reporting".to_string()
        };
    } else if emotional_tone == "excitement" {
        style = "enthusiastic_informative".to_string();
    } else if emotional_tone == "frustration" {
        style = "impatient_direct".to_string();
    } else if emotional_tone == "joy" && intent_type == "reciprocate_social_interaction" {
        style = "joyful_engaging".to_string();
    }

    // --- Transparency suffixing ---
    if transparency < 0.3 {
        if style != "neutral_factual"
            && style != "friendly_conversational"
            && style != "informative_friendly"
        {
            style.push_str("_reserved");
        } else if style == "neutral_factual" {
            style = "reserved_neutral".to_string();
        }
    } else if transparency > 0.7 && intent_type == "explain_analysis" {
        style.push_str("_transparent");
    }

    // --- Recipient adjustment ---
    if req.recipient.vulnerability > 0.6 && empathy > 0.5 {
        style = "gentle_supportive".to_string();
    } else if req.recipient.authority > 0.7 {
        style = style
            .replace("directive", "respectful_directive")
            .replace("imperative", "respectful_imperative");
    }

    // --- Explanation priority ---
    if arousal > 0.8 || motivation_level > 0.9 {
        explanation_priority = "high_immediate".to_string();
    } else if req.affect.memory_weight > 0.7 {
        explanation_priority = "high_detailed".to_string();
    } else if req.ethics_flagged {
        explanation_priority = "critical_explanation_required".to_string();
    } else if arousal < 0.3 && valence > 0.5 {
        explanation_priority = if intent_type == "reciprocate_social_interaction" {
            "low_social".to_string()
        } else {
            "low_relaxed".to_string()
        };
    }

    CommunicationIntent {
        intent_type,
        style,
        explanation_priority,
        emotional_tone,
        target_focus,
    }
}
