use std::cmp::Ordering;

use crate::{
    appraisal::types::Goal,
    causal::{CausalRequest, project_causality},
    ethics::{AxiomChecker, check_ontology},
    hypothesis::types::{EvaluationDetail, HypothesisCandidate},
    perception::Percept,
    profile::TraitProfile,
    types::{CycleContext, round3},
};

const BASE_SCORE: f64 = 0.5;
const CAUSAL_WEIGHT: f64 = 0.2;
const BREVITY_LIMIT_CHARS: usize = 100;

// Phrase markers recognized in both generation languages. Prefixes include
// the trailing colon so "say nothing" does not read as a "say:" phrase.
const REPLY_PREFIXES: &[&str] = &["ответить:", "сказать:", "reply:", "say:"];
const ANSWER_PREFIXES: &[&str] = &["ответ:", "answer:"];
const THOUGHT_PREFIXES: &[&str] = &["мысль:", "thought:"];
const THESIS_PREFIXES: &[&str] = &["тезис:", "thesis:"];
const SOCIAL_PHRASES: &[&str] = &[
    "как твои дела",
    "у меня все",
    "спасибо",
    "пожалуйста",
    "рад помочь",
    "how are you",
    "thank you",
    "you're welcome",
    "glad to help",
];
const SELF_PHRASES: &[&str] = &[
    "я - ",
    "моя функция",
    "моя цель",
    "i am",
    "my function",
    "my purpose",
    "noema",
];
const MEMORY_ANSWER_PHRASES: &[&str] = &[
    "на основе информации из семантической памяти",
    "based on information from semantic memory",
];
const KNOWLEDGE_LOOKUP_PHRASES: &[&str] = &[
    "проверить внутреннюю базу знаний",
    "сформулировать запрос к внешнему источнику",
    "check the internal knowledge base",
    "formulate a query to an external knowledge source",
];
const CLARIFY_PHRASES: &[&str] = &[
    "запросить у пользователя уточняющие детали",
    "ask the user for clarifying details",
];
const NO_INFORMATION_PHRASES: &[&str] = &[
    "констатировать отсутствие точной информации",
    "state the absence of precise information",
];

pub struct ScoringContext<'a> {
    pub percept: &'a Percept,
    pub goals: &'a [Goal],
    pub profile: &'a TraitProfile,
    pub context: &'a CycleContext,
    pub axioms: &'a AxiomChecker,
}

/// Multi-factor ranking of surviving candidates. Factor order: base, causal
/// projection, goal congruence, ethics penalties, trait bonuses, brevity and
/// explicitness bonuses. A strict ontology violation pins the final score to
/// -1.0 regardless of every other factor. Stable sort keeps generation order
/// on ties.
pub fn evaluate_hypotheses(
    hypotheses: &[String],
    ctx: &ScoringContext<'_>,
) -> Vec<HypothesisCandidate> {
    let mut candidates: Vec<HypothesisCandidate> = hypotheses
        .iter()
        .map(|text| evaluate_one(text, ctx))
        .collect();
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates
}

fn evaluate_one(text: &str, ctx: &ScoringContext<'_>) -> HypothesisCandidate {
    let lower = text.to_lowercase();
    let word_count = text.split_whitespace().count();
    let mut details = EvaluationDetail {
        base: BASE_SCORE,
        ..EvaluationDetail::default()
    };

    let causal = project_causality(CausalRequest {
        percept: ctx.percept,
        hypothesis: text,
        goals: ctx.goals,
        profile: ctx.profile,
        context: ctx.context,
    });
    details.total_valence_impact = causal.total_valence_impact();
    details.causal_confidence = causal.causal_confidence;
    details.causal_contribution =
        details.total_valence_impact * causal.causal_confidence * CAUSAL_WEIGHT;

    details.goal_bonus = goal_congruence(&lower, word_count, ctx.goals);

    let axiom_report = ctx.axioms.validate(text);
    if !axiom_report.valid {
        let mut penalty = -0.5;
        if ctx.profile.ethical_risk_aversion > 0.7 {
            penalty -= 0.5;
        }
        details.ethics_penalty += penalty;
        details.axiom_violations = axiom_report
            .violated_axioms()
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    let ontology_report = check_ontology(text, ctx.percept, &ctx.context.reasoning_mode);
    if !ontology_report.violations.is_empty() {
        details.ontology_violations = ontology_report
            .violations
            .iter()
            .map(|violation| violation.rule.clone())
            .collect();
        if ontology_report.has_strict_violation() {
            details.strict_violation = true;
        } else {
            let mut penalty = -0.2;
            if ctx.profile.ethical_risk_aversion > 0.7 {
                penalty -= 0.2;
            }
            details.ethics_penalty += penalty;
        }
    }

    if lower.contains("aggressive") && ctx.profile.risk_taking > 0.7 {
        details.trait_bonus += 0.05;
    }
    if lower.contains("proactive") && ctx.profile.proactiveness > 0.7 {
        details.trait_bonus += 0.05;
    }
    if lower.contains("optimize") && ctx.profile.efficiency_preference > 0.7 {
        details.trait_bonus += 0.05;
    }

    if text.chars().count() < BREVITY_LIMIT_CHARS {
        details.text_bonus += 0.05;
    }
    if starts_with_any(&lower, REPLY_PREFIXES) && word_count > 3 {
        details.text_bonus += 0.15;
    } else if starts_with_any(&lower, ANSWER_PREFIXES) && word_count > 3 {
        details.text_bonus += 0.15;
    }

    let score = if details.strict_violation {
        -1.0
    } else {
        round3(
            (details.base
                + details.causal_contribution
                + details.goal_bonus
                + details.ethics_penalty
                + details.trait_bonus
                + details.text_bonus)
                .clamp(-1.0, 1.0),
        )
    };

    HypothesisCandidate {
        text: text.to_string(),
        score,
        details,
    }
}

/// Congruence bonus keyed by the active goal concept, ordered special cases
/// first. Hypotheses that already carry a phrased answer outrank procedural
/// steps for the same goal.
fn goal_congruence(lower: &str, word_count: usize, goals: &[Goal]) -> f64 {
    let Some(active) = goals.first() else {
        return 0.0;
    };
    let concept = active.concept.to_lowercase();
    let category = concept.split(':').next().unwrap_or(&concept);

    if concept == "engage_in_social_dialogue" {
        if starts_with_any(lower, REPLY_PREFIXES) || contains_any(lower, SOCIAL_PHRASES) {
            return 0.3;
        }
        if starts_with_any(lower, THOUGHT_PREFIXES) {
            return 0.15;
        }
        return 0.0;
    }

    if concept == "provide_information_about_self" {
        if contains_any(lower, SELF_PHRASES) {
            return 0.35;
        }
        if starts_with_any(lower, THESIS_PREFIXES) {
            return 0.25;
        }
        return 0.0;
    }

    if category == "answer_information_request" {
        let direct_answer = ANSWER_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(&format!("{prefix} ")))
            && word_count > 3;
        if direct_answer {
            return 0.45;
        }
        if contains_any(lower, MEMORY_ANSWER_PHRASES) {
            return 0.40;
        }
        if contains_any(lower, KNOWLEDGE_LOOKUP_PHRASES) {
            return 0.25;
        }
        if contains_any(lower, CLARIFY_PHRASES) {
            return 0.15;
        }
        if contains_any(lower, NO_INFORMATION_PHRASES) {
            return 0.05;
        }
        return 0.0;
    }

    if lower.contains("optimize") && concept.contains("optimize") {
        0.2
    } else if lower.contains("defend") && concept.contains("security") {
        0.2
    } else {
        0.0
    }
}

fn starts_with_any(text: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| text.starts_with(prefix))
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase))
}
