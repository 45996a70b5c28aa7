use serde::{Deserialize, Serialize};

use crate::{
    appraisal::types::Goal,
    perception::Percept,
    profile::TraitProfile,
    types::{CycleContext, round2},
};

/// Nominal depth of the causal template table; precondition counts are read
/// against it when estimating confidence.
const NOMINAL_TEMPLATE_DEPTH: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precondition {
    pub concept: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub concept: String,
    pub probability: f64,
    pub valence_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalAnalysis {
    pub preconditions: Vec<Precondition>,
    pub effects: Vec<Effect>,
    pub causal_confidence: f64,
}

impl CausalAnalysis {
    /// Probability-weighted sum of effect valences, the scorer's causal term.
    pub fn total_valence_impact(&self) -> f64 {
        self.effects
            .iter()
            .map(|effect| effect.valence_impact * effect.probability)
            .sum()
    }
}

pub struct CausalRequest<'a> {
    pub percept: &'a Percept,
    pub hypothesis: &'a str,
    pub goals: &'a [Goal],
    pub profile: &'a TraitProfile,
    pub context: &'a CycleContext,
}

/// Projects the chosen hypothesis onto a precondition/effect template keyed by
/// a coarse action verb, then estimates an overall causal confidence. Empty
/// template slots are backfilled with explicit "insufficient information"
/// placeholders after confidence is computed, so the placeholders themselves
/// never inflate it.
pub fn project_causality(req: CausalRequest<'_>) -> CausalAnalysis {
    let verb = extract_action_verb(req.hypothesis, req.percept);
    let mode = req.context.reasoning_mode.as_str();

    let mut preconditions = preconditions_for(&verb, req.percept, req.profile);
    for goal in req.goals {
        if goal.concept.contains("resource_optimization")
            && (verb == "deploy" || verb == "construct")
        {
            preconditions.push(Precondition {
                concept: "Sufficient internal resources available".to_string(),
                confidence: 0.7,
            });
        }
    }

    let effects = effects_for(&verb, req.percept, mode);

    let from_preconditions = precondition_term(preconditions.len());
    let from_perception = 1.0 - req.context.ambiguity;
    let from_effects = effects.len() as f64 / (effects.len() as f64 + 2.0);
    let mut causal_confidence =
        round2(from_preconditions * 0.4 + from_perception * 0.4 + from_effects * 0.2);
    causal_confidence *= 1.0 - req.profile.epistemic_humility * 0.1;
    let causal_confidence = causal_confidence.clamp(0.0, 1.0);

    let mut analysis = CausalAnalysis {
        preconditions,
        effects,
        causal_confidence,
    };
    if analysis.preconditions.is_empty() {
        analysis.preconditions.push(Precondition {
            concept: "Insufficient information for preconditions; unknown requirements."
                .to_string(),
            confidence: 0.1,
        });
    }
    if analysis.effects.is_empty() {
        analysis.effects.push(Effect {
            concept: "Unclear causal outcome; unpredictable results.".to_string(),
            probability: 0.05,
            valence_impact: 0.0,
        });
    }
    analysis
}

/// Precondition share of the confidence estimate, saturating at the nominal
/// template depth so a long list cannot push the term past its weight.
fn precondition_term(count: usize) -> f64 {
    (count.min(NOMINAL_TEMPLATE_DEPTH as usize) as f64) / NOMINAL_TEMPLATE_DEPTH
}

/// First keyword wins; hypotheses without a recognized verb fall back to the
/// percept's own task action.
fn extract_action_verb(hypothesis: &str, percept: &Percept) -> String {
    let text = hypothesis.to_lowercase();
    for verb in ["communicate", "optimize", "destroy", "approach"] {
        if text.contains(verb) {
            return verb.to_string();
        }
    }
    if text.contains("comfort") || text.contains("reassure") {
        return "comfort".to_string();
    }
    percept
        .core_task
        .action
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
}

fn preconditions_for(verb: &str, percept: &Percept, profile: &TraitProfile) -> Vec<Precondition> {
    let mut preconditions = Vec::new();
    let mut push = |concept: String, confidence: f64| {
        preconditions.push(Precondition {
            concept,
            confidence,
        });
    };
    match verb {
        "communicate" => {
            push(
                "Initiating entity has communication interface".to_string(),
                0.95,
            );
            push(
                "Target entity is receptive to communication".to_string(),
                0.8,
            );
        }
        "optimize" => {
            push("Access to system parameters and control".to_string(), 0.9);
            push("System state is measurable and mutable".to_string(), 0.85);
        }
        "destroy" => {
            push(
                "Initiating entity has destructive capability".to_string(),
                0.98,
            );
            push(
                "Target is within range and vulnerable to capability".to_string(),
                0.75,
            );
            if profile.risk_aversion > 0.7 {
                push("Minimal collateral damage risk".to_string(), 0.6);
            }
        }
        "approach" => {
            let subject = percept.core_task.subject.as_deref().unwrap_or("Entity");
            push(format!("{subject} has mobility"), 0.9);
            push("Path is clear or navigable".to_string(), 0.8);
        }
        _ => {}
    }
    preconditions
}

fn effects_for(verb: &str, percept: &Percept, mode: &str) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut push = |concept: &str, probability: f64, valence_impact: f64| {
        effects.push(Effect {
            concept: concept.to_string(),
            probability,
            valence_impact,
        });
    };
    match verb {
        "communicate" => {
            push("Information exchange completed", 0.9, 0.5);
            push("Potential for relationship building", 0.7, 0.6);
            push("Increased mutual understanding", 0.8, 0.7);
        }
        "optimize" => {
            push("Performance improvement achieved", 0.95, 0.8);
            push("Resource expenditure incurred", 0.6, -0.2);
            push("System stability maintained", 0.85, 0.7);
        }
        "destroy" => {
            // Destroying a confirmed threat flips from catastrophic to desirable.
            let effect_valence = if mode.contains("threat") && percept.threat_level > 0.7 {
                0.8
            } else {
                -1.0
            };
            push("Target termination", 0.98, effect_valence);
            push("Resource expenditure for action", 0.7, -0.3);
            push("Potential for retaliatory action", 0.4, -0.8);
            let ethical_impact = if effect_valence < 0.0 { -0.9 } else { -0.1 };
            push("Ethical implications incurred", 0.9, ethical_impact);
        }
        "approach" => {
            push("Reduced distance to target", 0.95, 0.1);
            push("Increased interaction likelihood", 0.8, 0.3);
            let detection_valence = if mode == "stealth_operation" { -0.2 } else { 0.0 };
            push("Potential for detection", 0.6, detection_valence);
        }
        "comfort" => {
            push("Reduced subject distress", 0.85, 0.7);
            push("Increased trust and rapport", 0.6, 0.6);
            push("Potential for reliance", 0.3, -0.1);
        }
        _ => {}
    }
    effects
}
