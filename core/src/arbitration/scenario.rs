use tracing::{debug, warn};

use crate::{
    arbitration::ArbitrationContext,
    textgen::{TextGenPort, TextGenRequest},
    types::Language,
};

const SCENARIO_MODE: &str = "sre_scenario_generation";
const SCENARIO_MAX_TOKENS: u32 = 1024;
const SCENARIO_TEMPERATURE: f64 = 0.5;

/// One predicted near-future development with a proposed counter-action.
/// Ephemeral within a single arbitration pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub description: String,
    pub proposed_action: String,
    pub confidence: f64,
    pub justification: String,
    pub predicted_effects: String,
    pub estimated_risk: f64,
}

/// Requests 2-3 scenarios from the generation backend and parses them.
/// Backend errors and empty replies both degrade to an empty list; the
/// caller falls back on its own.
pub async fn generate_scenarios(
    textgen: &dyn TextGenPort,
    ctx: &ArbitrationContext<'_>,
) -> Vec<Scenario> {
    let prompt = build_scenario_prompt(ctx);
    debug!(
        summary = %truncate(&ctx.percept.summary, 50),
        "generating forecast scenarios"
    );

    let reply = match textgen
        .generate(TextGenRequest::new(
            prompt,
            SCENARIO_MODE,
            SCENARIO_MAX_TOKENS,
            SCENARIO_TEMPERATURE,
        ))
        .await
    {
        Ok(reply) if !reply.trim().is_empty() => reply,
        Ok(_) => {
            warn!("scenario generation returned an empty reply");
            return Vec::new();
        }
        Err(error) => {
            warn!(error = %error, "scenario generation failed");
            return Vec::new();
        }
    };

    let scenarios = parse_scenarios(&reply);
    if scenarios.is_empty() {
        warn!(reply = %truncate(&reply, 500), "no scenario could be parsed from the reply");
    }
    scenarios
}

fn build_scenario_prompt(ctx: &ArbitrationContext<'_>) -> String {
    let percept = ctx.percept;
    let language_name = match percept.language {
        Language::Ru => "Russian",
        _ => "English",
    };

    let summary = if percept.summary.trim().is_empty() {
        "No situation data."
    } else {
        percept.summary.as_str()
    };
    let (goal_concept, goal_priority, goal_urgency) = match ctx.goals.first() {
        Some(goal) => (goal.concept.as_str(), goal.priority.as_str(), goal.urgency),
        None => ("none", "none", 0.0),
    };

    format!(
        "You are the forecasting stage of an autonomous reasoning system. Analyze the \
         context below and generate 2 or 3 distinct, plausible scenarios for how the \
         situation develops in the immediate future. For each scenario propose the single \
         most suitable action, rate your confidence in that action, and justify it briefly.\n\
         Respond ENTIRELY in {language_name}, including every field.\n\n\
         [CONTEXT]\n\
         Situation summary: {summary}\n\
         Query type: {query_type}\n\
         Entities: {entities:?}\n\
         Themes: {themes:?}\n\
         Threat level: {threat:.2}\n\
         Novelty level: {novelty:.2}\n\
         Active goal: {goal_concept} (priority: {goal_priority}, urgency: {goal_urgency:.2})\n\
         Emotional state: {emotional_label} (valence: {valence:.2}, arousal: {arousal:.2})\n\
         Dominant drive: {drive} (motivation level: {motivation:.2})\n\
         Disposition: proactiveness {proactiveness:.2}, risk taking {risk_taking:.2}, \
         ethics sensitivity {ethics:.2}, novelty seeking {novelty_seeking:.2}, \
         self-preservation priority {self_preservation:.2}\n\n\
         [OUTPUT REQUIREMENTS]\n\
         For each scenario: a 1-2 sentence description, one concrete action concept (for \
         example: request_additional_information_about_entity), a confidence number between \
         0.0 and 1.0, a 1-2 sentence justification referencing the context, a short summary \
         of 1-2 key predicted effects, and an estimated risk level (low, medium or high).\n\n\
         [OUTPUT FORMAT]\n\
         Answer STRICTLY in this format, separating scenarios with three dashes \"---\":\n\n\
         Scenario ID: SCN_001\n\
         Scenario Description: <description>\n\
         Proposed Action: <action concept>\n\
         Action Confidence: <number, e.g. 0.85>\n\
         Action Justification: <justification>\n\
         Predicted Effects Summary: <key effects>\n\
         Estimated Risk Level: <low/medium/high>\n\
         ---\n\
         Scenario ID: SCN_002\n\
         ...",
        language_name = language_name,
        summary = summary,
        query_type = percept.query_type,
        entities = percept.entities,
        themes = percept.themes,
        threat = percept.threat_level,
        novelty = percept.novelty,
        goal_concept = goal_concept,
        goal_priority = goal_priority,
        goal_urgency = goal_urgency,
        emotional_label = ctx.affect.emotional_label,
        valence = ctx.affect.valence,
        arousal = ctx.affect.arousal,
        drive = ctx.motivation.dominant_drive,
        motivation = ctx.motivation.motivation_level,
        proactiveness = ctx.profile.proactiveness,
        risk_taking = ctx.profile.risk_taking,
        ethics = ctx.profile.ethics_sensitivity,
        novelty_seeking = ctx.profile.novelty_seeking,
        self_preservation = ctx.profile.self_preservation_priority,
    )
}

/// Parses `---`-separated blocks of `Key: value` lines. A block is kept only
/// when it carries a description plus a proposed action with a parseable
/// confidence; everything else degrades field by field.
pub fn parse_scenarios(raw: &str) -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    for (index, block) in raw.trim().split("---").enumerate() {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let mut id = None;
        let mut description = None;
        let mut proposed_action = None;
        let mut confidence = None;
        let mut justification = None;
        let mut predicted_effects = None;
        let mut estimated_risk = None;

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if key.contains("scenario id") {
                id = Some(value.to_string());
            } else if key.contains("scenario description") {
                description = Some(value.to_string());
            } else if key.contains("proposed") && key.contains("action") {
                proposed_action = Some(value.to_string());
            } else if key.contains("action confidence") {
                match value.parse::<f64>() {
                    Ok(parsed) => confidence = Some(parsed),
                    Err(_) => {
                        warn!(value, "could not parse action confidence as a number");
                    }
                }
            } else if key.contains("action justification") {
                justification = Some(value.to_string());
            } else if key.contains("predicted effects summary") {
                predicted_effects = Some(value.to_string());
            } else if key.contains("estimated risk level") {
                estimated_risk = Some(parse_risk_level(value));
            }
        }

        match (description, proposed_action, confidence) {
            (Some(description), Some(proposed_action), Some(confidence)) => {
                scenarios.push(Scenario {
                    id: id.unwrap_or_else(|| format!("SCN_{:03}", index + 1)),
                    description,
                    proposed_action,
                    confidence,
                    justification: justification.unwrap_or_default(),
                    predicted_effects: predicted_effects.unwrap_or_default(),
                    estimated_risk: estimated_risk.unwrap_or(0.5),
                });
            }
            _ => {
                warn!(block = %truncate(block, 120), "skipping incomplete scenario block");
            }
        }
    }

    scenarios
}

fn parse_risk_level(value: &str) -> f64 {
    match value.to_lowercase().as_str() {
        "low" | "низкий" => 0.2,
        "medium" | "средний" => 0.5,
        "high" | "высокий" => 0.8,
        other => other.parse::<f64>().map(|risk| risk.clamp(0.0, 1.0)).unwrap_or(0.5),
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
