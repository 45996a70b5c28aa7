use tracing::{info, warn};

use crate::{
    kernel::chain::ReasoningChain,
    textgen::{TextGenPort, TextGenRequest},
    types::{CycleMode, Language},
};

const RESPOND_MODE: &str = "respond";
const RESPOND_MAX_TOKENS: u32 = 200;
const RESPOND_TEMPERATURE: f64 = 0.65;
const CONCLUSION_PREVIEW_CHARS: usize = 70;

/// Turns a finalized chain into a user-facing reply. With a generator the
/// reply is composed from the chain's framing; without one, fast-path chains
/// get a canned reply and everything else degrades to the deterministic
/// fallback sentence.
pub async fn compose_response(
    chain: &ReasoningChain,
    textgen: Option<&dyn TextGenPort>,
) -> String {
    let chosen = chain.chosen_text().unwrap_or("my conclusions are undetermined");

    let Some(textgen) = textgen else {
        return if chain.mode == CycleMode::FastPath {
            canned_fast_reply(chain)
        } else {
            fallback_reply(chosen)
        };
    };

    let prompt = reply_prompt(chain, chosen);
    let (intent_type, style) = framing_of(chain);
    info!(intent = %intent_type, style = %style, "composing user-facing reply");

    match textgen
        .generate(TextGenRequest::new(
            prompt,
            RESPOND_MODE,
            RESPOND_MAX_TOKENS,
            RESPOND_TEMPERATURE,
        ))
        .await
    {
        Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
        Ok(_) => {
            warn!("reply generation returned an empty reply");
            fallback_reply(chosen)
        }
        Err(error) => {
            warn!(error = %error, "reply generation failed");
            fallback_reply(chosen)
        }
    }
}

fn reply_prompt(chain: &ReasoningChain, chosen: &str) -> String {
    let language_instruction = match chain.percept.as_ref().map(|percept| percept.language) {
        Some(Language::Ru) => "Respond in Russian.",
        _ => "Respond in English.",
    };
    let (intent_type, style) = framing_of(chain);
    let emotional_label = chain
        .affect
        .as_ref()
        .map(|affect| affect.emotional_label.as_str())
        .unwrap_or("neutral");
    let summary = chain
        .percept
        .as_ref()
        .map(|percept| percept.summary.as_str())
        .filter(|summary| !summary.trim().is_empty())
        .unwrap_or("No data to present.");
    let goal_concept = chain
        .active_goal()
        .map(|goal| goal.concept.as_str())
        .unwrap_or("analysis of the current situation");

    format!(
        "You are the voice of an autonomous reasoning agent. Formulate a natural, useful \
         reply to the user. {language_instruction}\n\
         Act strictly within the communication parameters below.\n\n\
         Internal context:\n\
         - Situation reading: \"{summary}\"\n\
         - Active goal: \"{goal_concept}\"\n\
         - Chosen conclusion: \"{chosen}\"\n\
         - Emotional state: \"{emotional_label}\"\n\n\
         Communication parameters:\n\
         - Intent type: \"{intent_type}\"\n\
         - Speech style: \"{style}\"\n\n\
         Intent-specific guidance:\n\
         - For \"explain_analysis\" or \"suggest_improvement\": state the essence of the \
           analysis or suggestion concisely, leaning on the chosen conclusion.\n\
         - For \"caution_warning\" or \"urgent_alert\": be clear and precise about the \
           cause for concern.\n\
         - For \"initiate_connection\": be friendly and open the dialogue.\n\
         - For \"inquire_details_curiosity\": ask a polite clarifying question.\n\
         - For \"inform_observation\": simply state the fact or observation.\n\
         - For anything else: follow the general style and goal.\n\n\
         Write the reply in first person, usually 1-3 sentences. Do not use prefixes like \
         \"Reply:\" or \"Conclusion:\"; give only the reply itself.",
    )
}

fn framing_of(chain: &ReasoningChain) -> (&str, &str) {
    chain
        .communication
        .as_ref()
        .map(|intent| (intent.intent_type.as_str(), intent.style.as_str()))
        .unwrap_or(("inform_observation", "neutral_factual"))
}

fn canned_fast_reply(chain: &ReasoningChain) -> String {
    let subtype = chain
        .percept
        .as_ref()
        .and_then(|percept| percept.subtype());
    match subtype {
        Some("greeting_social") => "Hello! Glad to hear from you. How can I help?".to_string(),
        Some("feedback") => "Thank you for the feedback, I have taken it into account.".to_string(),
        Some("closing") => "Goodbye! Feel free to come back anytime.".to_string(),
        _ => fallback_reply(chain.chosen_text().unwrap_or("my conclusions are undetermined")),
    }
}

fn fallback_reply(chosen: &str) -> String {
    let preview: String = chosen.chars().take(CONCLUSION_PREVIEW_CHARS).collect();
    format!(
        "[Internal conclusion: \"{preview}...\"] I am currently having difficulty formulating \
         a full reply."
    )
}
