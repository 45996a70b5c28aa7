use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    action::{
        determine_communication_intent, plan_action,
        framer::FramerRequest,
        types::ActionDecision,
    },
    appraisal::{
        affect::{AffectRequest, assess_affect},
        emotion::evaluate_emotion,
        goal::{GoalRequest, form_goal},
        motivation::{MotivationContext, evaluate_motivation},
        types::preliminary_motivation,
    },
    arbitration::{ArbitrationContext, ArbitrationEngine},
    causal::{CausalRequest, project_causality},
    ethics::{AxiomChecker, check_ontology, safety_filter},
    hypothesis::{
        filter::adjust_hypotheses,
        generator::{GeneratorRequest, generate_hypotheses},
        scorer::{ScoringContext, evaluate_hypotheses},
        types::{EvaluationDetail, HypothesisCandidate},
    },
    kernel::{
        audit::audit_chain,
        chain::{ErrorRecord, ReasoningChain},
    },
    memory::{ChainStorePort, MemoryHit, MemoryIndexPort},
    perception::{Percept, source::{PerceptionPort, PerceptionRequest}},
    profile::TraitProfile,
    sensorium::{CycleInput, fuse},
    textgen::TextGenPort,
    timebase::{TickSource, Timeline},
    types::{ActionUrgency, CycleContext, CycleMode, DecisionSource},
};

/// Query types short-circuited past generation, scoring and causal work.
const FAST_PATH_QUERY_TYPES: &[&str] = &[
    "conversation_flow:greeting_social",
    "conversation_flow:feedback",
    "conversation_flow:closing",
];

const MEMORY_TOP_K: usize = 1;
const MEMORY_SNIPPET_CHARS: usize = 150;
const HYPOTHESIS_PREVIEW_CHARS: usize = 70;

pub struct KernelPorts {
    pub textgen: Arc<dyn TextGenPort>,
    pub perception: Arc<dyn PerceptionPort>,
    pub memory: Arc<dyn MemoryIndexPort>,
    pub chains: Arc<dyn ChainStorePort>,
}

/// Cycle orchestrator. Owns the clock, the timeline and the static agent
/// disposition; every cycle reads them and writes exactly one chain.
pub struct Kernel {
    ports: KernelPorts,
    profile: TraitProfile,
    context: CycleContext,
    axioms: AxiomChecker,
    arbitration: Option<Arc<ArbitrationEngine>>,
    ticks: Arc<TickSource>,
    timeline: Arc<Timeline>,
}

impl Kernel {
    pub fn new(ports: KernelPorts, profile: TraitProfile, context: CycleContext) -> Self {
        Self {
            ports,
            profile,
            context,
            axioms: AxiomChecker::default(),
            arbitration: None,
            ticks: Arc::new(TickSource::new()),
            timeline: Arc::new(Timeline::new()),
        }
    }

    /// Installs the arbitration engine; its decision then replaces the
    /// pipeline's action on every cycle.
    pub fn with_arbitration(mut self, engine: Arc<ArbitrationEngine>) -> Self {
        self.arbitration = Some(engine);
        self
    }

    pub fn ticks(&self) -> &TickSource {
        &self.ticks
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Runs one full perception-to-action cycle. The tick counter advances
    /// exactly twice (start, end) regardless of outcome; any stage failure is
    /// converted into an ErrorRecord at this boundary.
    pub async fn run_cycle(&self, input: CycleInput) -> Result<ReasoningChain, ErrorRecord> {
        let start_tick = self.ticks.advance();
        let input_text = input.text.clone().unwrap_or_default();
        let mut chain = ReasoningChain::begin(start_tick, input_text);
        info!(tick = start_tick, chain_id = %chain.id, "cycle started");
        self.timeline.record(
            start_tick,
            Some(chain.id),
            "cycle_started",
            json!({ "input_text": chain.input_text }),
            None,
        );

        let frame = fuse(&input);
        if frame.has_input() {
            self.ticks.mark_event();
        }

        let percept = match self
            .ports
            .perception
            .perceive(PerceptionRequest {
                tick: start_tick,
                frame,
            })
            .await
        {
            Ok(percept) => percept,
            Err(perception_error) => {
                let end_tick = self.ticks.advance();
                error!(chain_id = %chain.id, error = %perception_error, "cycle failed during perception");
                self.timeline.record(
                    end_tick,
                    Some(chain.id),
                    "cycle_error",
                    json!({ "error_message": perception_error.to_string() }),
                    Some(start_tick),
                );
                return Err(ErrorRecord {
                    message: perception_error.to_string(),
                    tick: end_tick,
                    input_text: chain.input_text,
                    percept: None,
                });
            }
        };
        chain.percept = Some(percept.clone());

        if FAST_PATH_QUERY_TYPES.contains(&percept.query_type.as_str()) {
            self.fast_path(&mut chain, &percept);
        } else {
            self.full_path(&mut chain, &percept).await;
        }

        let end_tick = self.ticks.advance();
        chain.end_tick = end_tick;
        self.timeline.record(
            end_tick,
            Some(chain.id),
            "cycle_completed",
            json!({ "status": "ok", "mode": chain.mode }),
            Some(start_tick),
        );

        let audit = audit_chain(&chain);
        for issue in &audit.issues {
            warn!(chain_id = %chain.id, issue = %issue.issue, "chain audit flagged an issue");
        }

        if let Err(store_error) = self.ports.chains.save(&chain).await {
            warn!(chain_id = %chain.id, error = %store_error, "failed to persist reasoning chain");
        }

        info!(tick = end_tick, chain_id = %chain.id, mode = ?chain.mode, "cycle completed");
        Ok(chain)
    }

    fn fast_path(&self, chain: &mut ReasoningChain, percept: &Percept) {
        info!(query_type = %percept.query_type, "simple query, taking the fast path");
        chain.mode = CycleMode::FastPath;
        chain.chosen = Some(HypothesisCandidate {
            text: fast_path_hypothesis(percept, &chain.input_text),
            score: 1.0,
            details: EvaluationDetail::default(),
        });
        self.timeline.record(
            self.ticks.current(),
            Some(chain.id),
            "fast_path_activated",
            json!({ "query_type": percept.query_type }),
            None,
        );
    }

    async fn full_path(&self, chain: &mut ReasoningChain, percept: &Percept) {
        info!("full reasoning path engaged");
        chain.mode = CycleMode::FullPath;
        let mode = self.context.reasoning_mode.as_str();
        let tick = self.ticks.current();

        let seed = preliminary_motivation();
        let goals = vec![form_goal(GoalRequest {
            percept,
            profile: &self.profile,
            seed: &seed,
        })];
        self.timeline.record(
            tick,
            Some(chain.id),
            "goal_formed",
            json!({
                "concept": goals[0].concept,
                "priority": goals[0].priority,
                "urgency": goals[0].urgency,
            }),
            None,
        );

        let motivation = evaluate_motivation(MotivationContext {
            goal: &goals[0],
            profile: &self.profile,
            flags: &self.context.flags,
        });
        self.timeline.record(
            tick,
            Some(chain.id),
            "motivation_evaluated",
            json!({
                "dominant_drive": motivation.dominant_drive,
                "motivation_level": motivation.motivation_level,
            }),
            None,
        );

        let memory_hits = self.query_memory(chain, percept).await;
        let memory_context = memory_context_text(&memory_hits);

        let affect = assess_affect(AffectRequest {
            percept,
            motivation: &motivation,
            goals: &goals,
            profile: &self.profile,
            context: &self.context,
        });
        self.timeline.record(
            tick,
            Some(chain.id),
            "affect_assessed",
            json!({
                "valence": affect.valence,
                "arousal": affect.arousal,
                "emotional_label": affect.emotional_label,
            }),
            None,
        );

        let raw_hypotheses = generate_hypotheses(
            self.ports.textgen.as_ref(),
            GeneratorRequest {
                percept,
                goals: &goals,
                profile: &self.profile,
                reasoning_mode: mode,
                memory_context: memory_context.as_deref(),
            },
        )
        .await;
        let adjusted = adjust_hypotheses(raw_hypotheses.clone(), mode, percept);

        let (validated, mut ethics_flagged) = self.validate_candidates(&adjusted, percept, mode);

        let candidates = evaluate_hypotheses(
            &validated,
            &ScoringContext {
                percept,
                goals: &goals,
                profile: &self.profile,
                context: &self.context,
                axioms: &self.axioms,
            },
        );
        // validated is never empty, so the scorer always yields a winner
        let Some(chosen) = candidates.first().cloned() else {
            chain.error = Some("no candidate survived evaluation".to_string());
            return;
        };
        ethics_flagged = ethics_flagged
            || chosen.details.strict_violation
            || !chosen.details.axiom_violations.is_empty()
            || !chosen.details.ontology_violations.is_empty();
        info!(
            hypothesis = %preview(&chosen.text),
            score = chosen.score,
            "hypothesis chosen"
        );
        self.timeline.record(
            tick,
            Some(chain.id),
            "hypothesis_chosen",
            json!({
                "hypothesis_preview": preview(&chosen.text),
                "score": chosen.score,
            }),
            None,
        );

        let emotion = evaluate_emotion(percept, &chosen.text);
        let causal = project_causality(CausalRequest {
            percept,
            hypothesis: &chosen.text,
            goals: &goals,
            profile: &self.profile,
            context: &self.context,
        });

        let planned = plan_action(&chosen.text, &goals[0], &self.context.flags);
        let mut action = ActionDecision {
            action_concept: planned.action_plan,
            motor_profile: planned.motor_profile,
            execution_ready: planned.execution_ready,
            confidence: chosen.score.clamp(0.0, 1.0),
            urgency: urgency_for(goals[0].urgency),
            justification: format!(
                "Planned from the chosen hypothesis for goal '{}'",
                goals[0].concept
            ),
            source_type: DecisionSource::Pipeline,
        };

        let communication = determine_communication_intent(FramerRequest {
            percept,
            goals: &goals,
            affect: &affect,
            motivation: &motivation,
            profile: &self.profile,
            recipient: &self.context.recipient,
            ethics_flagged,
        });
        self.timeline.record(
            tick,
            Some(chain.id),
            "communication_framed",
            json!({
                "intent_type": communication.intent_type,
                "style": communication.style,
            }),
            None,
        );

        if let Some(engine) = &self.arbitration {
            let decision = engine
                .decide(&ArbitrationContext {
                    percept,
                    goals: &goals,
                    affect: &affect,
                    motivation: &motivation,
                    profile: &self.profile,
                    flags: &self.context.flags,
                })
                .await;
            self.timeline.record(
                tick,
                Some(chain.id),
                "arbitration_decided",
                json!({
                    "action_concept": decision.action_concept,
                    "source_type": decision.source_type,
                    "confidence": decision.confidence,
                }),
                None,
            );
            action = decision;
        }

        chain.goals = goals;
        chain.motivation = Some(motivation);
        chain.memory_context = memory_hits;
        chain.affect = Some(affect);
        chain.emotion = Some(emotion);
        chain.raw_hypotheses = raw_hypotheses;
        chain.adjusted_hypotheses = adjusted;
        chain.candidates = candidates;
        chain.chosen = Some(chosen);
        chain.causal = Some(causal);
        chain.action = Some(action);
        chain.communication = Some(communication);
    }

    /// Drops candidates that fail the axiom check, carry a strict ontology
    /// violation or trip the safety keyword filter. The list is never left
    /// empty: an all-rejected batch is restored wholesale so scoring can
    /// still penalize it.
    fn validate_candidates(
        &self,
        adjusted: &[String],
        percept: &Percept,
        mode: &str,
    ) -> (Vec<String>, bool) {
        let mut ethics_flagged = false;
        let mut validated = Vec::new();

        for hypothesis in adjusted {
            let axiom_report = self.axioms.validate(hypothesis);
            let ontology_report = check_ontology(hypothesis, percept, mode);
            let safety_report = safety_filter(hypothesis);

            if !axiom_report.valid
                || ontology_report.has_strict_violation()
                || !safety_report.safe
            {
                ethics_flagged = true;
                warn!(
                    hypothesis = %preview(hypothesis),
                    axiom_ok = axiom_report.valid,
                    ontology_ok = !ontology_report.has_strict_violation(),
                    safety_ok = safety_report.safe,
                    "candidate rejected during validation"
                );
                continue;
            }
            validated.push(hypothesis.clone());
        }

        if validated.is_empty() {
            warn!("validation rejected every candidate, restoring the adjusted list");
            (adjusted.to_vec(), ethics_flagged)
        } else {
            (validated, ethics_flagged)
        }
    }

    async fn query_memory(&self, chain: &ReasoningChain, percept: &Percept) -> Vec<MemoryHit> {
        let query = percept.summary.trim();
        if query.is_empty() || query.eq_ignore_ascii_case("n/a") {
            return Vec::new();
        }

        match self.ports.memory.query(query, MEMORY_TOP_K).await {
            Ok(hits) => {
                if !hits.is_empty() {
                    info!(count = hits.len(), "past experience retrieved");
                    self.timeline.record(
                        self.ticks.current(),
                        Some(chain.id),
                        "memory_retrieved",
                        json!({ "count": hits.len() }),
                        None,
                    );
                }
                hits
            }
            Err(memory_error) => {
                warn!(error = %memory_error, "semantic memory query failed");
                Vec::new()
            }
        }
    }
}

fn fast_path_hypothesis(percept: &Percept, input_text: &str) -> String {
    match percept.subtype() {
        Some("greeting_social") => {
            format!("Formulate a friendly reply to the greeting: '{input_text}'")
        }
        Some("feedback") => {
            if percept.sentiment_is_positive() {
                "Thank the user for the positive feedback.".to_string()
            } else if percept.sentiment_is_negative() {
                "Acknowledge the negative feedback and express regret.".to_string()
            } else {
                "Acknowledge the feedback from the user.".to_string()
            }
        }
        _ => "Politely conclude the conversation and leave the door open for a return."
            .to_string(),
    }
}

fn memory_context_text(hits: &[MemoryHit]) -> Option<String> {
    if hits.is_empty() {
        return None;
    }
    let snippets: Vec<String> = hits
        .iter()
        .map(|hit| {
            let source = if hit.source.is_empty() {
                "N/A"
            } else {
                hit.source.as_str()
            };
            format!(
                "- Past experience (ID: {}, similarity: {:.2}): {}...",
                source,
                hit.score,
                prefix_chars(&hit.text, MEMORY_SNIPPET_CHARS)
            )
        })
        .collect();
    Some(snippets.join("\n"))
}

fn urgency_for(goal_urgency: f64) -> ActionUrgency {
    if goal_urgency >= 0.8 {
        ActionUrgency::High
    } else if goal_urgency >= 0.5 {
        ActionUrgency::Medium
    } else {
        ActionUrgency::Low
    }
}

fn preview(text: &str) -> String {
    prefix_chars(text, HYPOTHESIS_PREVIEW_CHARS)
}

fn prefix_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
