use tracing::{debug, warn};

use crate::{
    appraisal::types::Goal,
    perception::Percept,
    profile::TraitProfile,
    textgen::{TextGenPort, TextGenRequest},
    types::Language,
};

const GENERATION_MAX_TOKENS: u32 = 400;
const GENERATION_TEMPERATURE: f64 = 0.65;

/// Header-only lines the model tends to prepend despite instructions.
const HEADER_PHRASES_EN: &[&str] = &[
    "here are some hypotheses:",
    "hypotheses:",
    "possible thoughts:",
    "thought options:",
    "phrase options:",
    "key points:",
    "hypothesis:",
];
const HEADER_PHRASES_RU: &[&str] = &[
    "вот несколько гипотез:",
    "гипотезы:",
    "возможные мысли:",
    "варианты мыслей:",
    "варианты фраз:",
    "тезисы:",
    "гипотеза:",
];

pub struct GeneratorRequest<'a> {
    pub percept: &'a Percept,
    pub goals: &'a [Goal],
    pub profile: &'a TraitProfile,
    pub reasoning_mode: &'a str,
    pub memory_context: Option<&'a str>,
}

/// Asks the generation backend for candidate internal hypotheses, shaped by
/// the active goal. Never returns an empty list: backend failures and
/// over-aggressive cleanup both degrade to a single synthetic hypothesis.
pub async fn generate_hypotheses(
    textgen: &dyn TextGenPort,
    req: GeneratorRequest<'_>,
) -> Vec<String> {
    let percept = req.percept;
    let language = percept.language;
    let active_goal_concept = req
        .goals
        .first()
        .map(|goal| goal.concept.as_str())
        .unwrap_or("analyze_situation");

    let prompt = build_prompt(&req, active_goal_concept);
    let mode = format!("hyp_gen_for_{}", active_goal_concept.replace(' ', "_"));
    debug!(goal = active_goal_concept, language = language.as_str(), "generating hypotheses");

    let reply = match textgen
        .generate(TextGenRequest::new(
            prompt,
            mode,
            GENERATION_MAX_TOKENS,
            GENERATION_TEMPERATURE,
        ))
        .await
    {
        Ok(reply) if !reply.trim().is_empty() => reply,
        Ok(_) => {
            warn!("hypothesis generation returned an empty reply");
            return vec![error_fallback(percept, language)];
        }
        Err(error) => {
            warn!(error = %error, "hypothesis generation failed");
            return vec![error_fallback(percept, language)];
        }
    };

    let cleaned = clean_reply(&reply, language);
    if cleaned.is_empty() {
        warn!("all generated lines were filtered out during cleanup");
        return vec![observation_fallback(percept, language)];
    }
    cleaned
}

fn build_prompt(req: &GeneratorRequest<'_>, active_goal_concept: &str) -> String {
    let percept = req.percept;
    let language_name = language_name(percept.language);

    let summary = if percept.summary.trim().is_empty() {
        "General situation."
    } else {
        percept.summary.as_str()
    };
    let topic = if percept.summary.trim().is_empty() {
        "the user's question".to_string()
    } else {
        percept.summary.clone()
    };
    let entities = join_or(&percept.entities, "unspecified entities");
    let themes = join_or(&percept.themes, "unspecified themes");

    let goals_text = if req.goals.is_empty() {
        "No specific active goals are set.".to_string()
    } else {
        req.goals
            .iter()
            .map(|goal| {
                format!(
                    "- Concept: {}, Priority: {}, Urgency: {}",
                    goal.concept,
                    goal.priority.as_str(),
                    goal.urgency
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let memory_section = match req.memory_context.filter(|ctx| !ctx.trim().is_empty()) {
        Some(context) => format!(
            "[CONTEXT FROM PRIOR EXPERIENCE / SEMANTIC MEMORY]\n---\n{context}\n---\n\
             IMPORTANT: use this memory context while generating hypotheses when it is relevant.\n"
        ),
        None => {
            "[SEMANTIC MEMORY: no relevant information found or provided.]\n".to_string()
        }
    };

    let main_instruction = main_instruction(req, active_goal_concept, summary, &topic);

    format!(
        "You are a meaning-centered reasoning agent. Your task is to produce internal \
         hypotheses/thoughts.\n\
         IMPORTANT: every hypothesis/thought must be STRICTLY in {language_name}. Do not use \
         other languages.\n\n\
         [MAIN TASK FOR HYPOTHESIS GENERATION]\n{main_instruction}\n\n\
         [ADDITIONAL CONTEXT FOR ANALYSIS]\n\
         1. Perception context:\n\
         \x20  - Summary (in {language_name}): {summary}\n\
         \x20  - Entities (in {language_name}): {entities}\n\
         \x20  - Themes (in {language_name}): {themes}\n\
         \x20  - Threat level: {threat}\n\
         \x20  - Novelty level: {novelty}\n\n\
         2. Current goals:\n{goals_text}\n\
         {memory_section}\
         3. Agent traits:\n\
         \x20  - Proactiveness: {proactiveness}\n\
         \x20  - Risk taking: {risk_taking}\n\n\
         4. Current reasoning mode: {mode}\n\n\
         Produce the requested number of hypotheses/thoughts per the MAIN TASK. One hypothesis \
         per line. Do not use numbering or list bullets (such as \"-\").\n\
         HYPOTHESES/THOUGHTS:\n",
        threat = percept.threat_level,
        novelty = percept.novelty,
        proactiveness = req.profile.proactiveness,
        risk_taking = req.profile.risk_taking,
        mode = req.reasoning_mode,
    )
}

fn main_instruction(
    req: &GeneratorRequest<'_>,
    active_goal_concept: &str,
    summary: &str,
    topic: &str,
) -> String {
    match active_goal_concept {
        "engage_in_social_dialogue" => format!(
            "The user opened a social dialogue. Perceived message (summary): \"{summary}\".\n\
             Your current goal: '{active_goal_concept}'.\n\
             Produce 2-3 direct, fitting first-person reply thoughts or ready phrases.\n\
             They must sustain a friendly dialogue, not analyze the situation or instruct the \
             user. Give each thought/phrase on its own line, for example:\n\
             - \"Reply: Hello! I am doing fine, processing information. How are you?\"\n\
             - \"Thought: respond warmly and ask about the user's mood.\"\n\
             - \"Say: Greetings! Glad to talk. Ready to help or just chat.\""
        ),
        "provide_information_about_self" => format!(
            "The user asks the agent to describe itself (summary: \"{summary}\"). Your current \
             goal: '{active_goal_concept}'.\n\
             Produce 2-3 key theses or facts about the agent (for example \"I am an AI \
             assistant.\", \"My function is to help analyze information.\") usable in a direct \
             first-person answer. One thesis per line."
        ),
        concept if concept.starts_with("answer_information_request") => {
            let memory_guidance = match req.memory_context {
                Some(context) if context.contains("Past experience") => format!(
                    "Analyze the provided SEMANTIC MEMORY context.\n\
                     If the memory is sufficient to answer '{topic}', one hypothesis must be \
                     \"Formulate an answer based on information from semantic memory.\".\n\
                     If the memory helps but is incomplete, propose combining it with a concrete \
                     follow-up step. If it is irrelevant, propose other steps."
                ),
                _ => format!(
                    "No relevant semantic memory was found for this question.\n\
                     Propose 2-3 hypotheses/steps for answering '{topic}'."
                ),
            };
            format!(
                "The user asked an informational question (query type: {query_type}).\n\
                 Perceived request (summary): \"{topic}\".\n\
                 Your current goal: '{active_goal_concept}'.\n\
                 {memory_guidance}\n\
                 Possible hypotheses/steps may include:\n\
                 - \"Check the internal knowledge base on the topic.\"\n\
                 - \"Formulate a query to an external knowledge source about '{topic_prefix}...'.\"\n\
                 - \"Ask the user for clarifying details (name the details needed).\"\n\
                 - \"State the absence of precise information if search and knowledge did not help.\"\n\
                 One hypothesis per line.",
                query_type = req.percept.query_type,
                topic_prefix = prefix_chars(topic, 50),
            )
        }
        _ => "Analyze the provided context. Produce 3-5 diverse, relevant hypotheses: possible \
              interpretations of the situation, next logical steps, potential action plans, or \
              aspects worth deeper analysis. Each hypothesis must be a separate complete thought \
              on its own line."
            .to_string(),
    }
}

fn clean_reply(reply: &str, language: Language) -> Vec<String> {
    let headers = match language {
        Language::Ru => HEADER_PHRASES_RU,
        _ => HEADER_PHRASES_EN,
    };

    let mut cleaned = Vec::new();
    for raw_line in reply.lines() {
        let mut line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("- ") {
            line = stripped;
        }
        let line = strip_numbering(line);
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();
        // Drop a line that is just a header, possibly with trailing noise.
        let is_header = headers.iter().any(|phrase| {
            lower.starts_with(phrase) && line.chars().count() <= phrase.chars().count() + 3
        });
        if is_header {
            continue;
        }
        cleaned.push(line.to_string());
    }
    cleaned
}

fn strip_numbering(line: &str) -> &str {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(digit), Some('.')) if digit.is_ascii_digit() => {
            let rest = &line[digit.len_utf8() + 1..];
            rest.strip_prefix(' ').unwrap_or(rest).trim_start()
        }
        _ => line,
    }
}

fn error_fallback(percept: &Percept, language: Language) -> String {
    format!(
        "Fallback hypothesis ({}): analyze the situation '{}' in more detail after a hypothesis \
         generation error.",
        language.as_str(),
        prefix_chars(&percept.summary, 30)
    )
}

fn observation_fallback(percept: &Percept, language: Language) -> String {
    format!(
        "Fallback hypothesis ({}): continue careful observation of the current situation ('{}') \
         to gather additional information.",
        language.as_str(),
        prefix_chars(&percept.summary, 30)
    )
}

fn language_name(language: Language) -> &'static str {
    match language {
        Language::Ru => "Russian",
        _ => "English",
    }
}

fn join_or(items: &[String], fallback: &str) -> String {
    let joined = items
        .iter()
        .map(String::as_str)
        .filter(|item| !item.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}

fn prefix_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
