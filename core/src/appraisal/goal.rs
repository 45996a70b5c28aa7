use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    appraisal::types::{Goal, MotivationSignal},
    perception::Percept,
    profile::TraitProfile,
    types::Priority,
};

pub struct GoalRequest<'a> {
    pub percept: &'a Percept,
    pub profile: &'a TraitProfile,
    pub seed: &'a MotivationSignal,
}

/// Maps the percept onto exactly one active goal. Priority starts from the
/// percept urgency label, gets escalated (never lowered) by complexity, then
/// floored by the matched query-type rule.
pub fn form_goal(req: GoalRequest<'_>) -> Goal {
    let percept = req.percept;
    let (priority, urgency) = base_priority(&percept.urgency);
    let (priority, urgency) = escalate_for_complexity(priority, urgency, &percept.complexity);

    let rule = concept_rule(percept);
    let priority = priority.max(rule.floor);

    let mut details = serde_json::json!({
        "summary": percept.summary,
        "complexity": percept.complexity,
        "seed_drive": req.seed.dominant_drive,
    });
    if let (Some(map), serde_json::Value::Object(extra)) = (details.as_object_mut(), rule.details)
    {
        map.extend(extra);
    }

    Goal {
        id: new_goal_id(),
        concept: rule.concept,
        priority,
        urgency,
        source: rule.source,
        details,
    }
}

fn base_priority(urgency: &str) -> (Priority, f64) {
    let urgency = urgency.trim().to_lowercase();
    if urgency == "высокая" || urgency == "high" {
        (Priority::Critical, 0.9)
    } else if urgency == "средняя" || urgency == "medium" {
        (Priority::High, 0.7)
    } else {
        (Priority::Low, 0.3)
    }
}

/// Complexity raises priority and puts a floor under urgency, but never
/// touches a goal that is already critical.
fn escalate_for_complexity(priority: Priority, urgency: f64, complexity: &str) -> (Priority, f64) {
    let complexity = complexity.trim().to_lowercase();
    if (complexity == "high" || complexity == "высокая") && priority != Priority::Critical {
        (Priority::High, urgency.max(0.7))
    } else if (complexity == "medium" || complexity == "средняя")
        && priority != Priority::Critical
        && priority != Priority::High
    {
        (Priority::Medium, urgency.max(0.5))
    } else {
        (priority, urgency)
    }
}

struct ConceptRule {
    concept: String,
    floor: Priority,
    source: String,
    details: serde_json::Value,
}

fn concept_rule(percept: &Percept) -> ConceptRule {
    let subtype = percept.subtype().unwrap_or("general");
    let object = percept
        .core_task
        .object
        .as_deref()
        .filter(|object| !object.trim().is_empty())
        .unwrap_or(&percept.summary);
    match percept.category() {
        "problem_solving" => {
            let action = percept
                .core_task
                .action
                .as_deref()
                .filter(|action| !action.trim().is_empty())
                .unwrap_or("generic");
            ConceptRule {
                concept: format!("solve_problem:{action}"),
                floor: Priority::High,
                source: "user_problem_solving_request".to_string(),
                details: serde_json::json!({ "task_description": object }),
            }
        }
        "information_request" => ConceptRule {
            concept: format!("answer_information_request:{subtype}"),
            floor: Priority::Medium,
            source: "user_information_request".to_string(),
            details: serde_json::json!({ "topic": object }),
        },
        "instruction_command" => ConceptRule {
            concept: format!("execute_command:{subtype}"),
            floor: Priority::High,
            source: "user_instruction_command".to_string(),
            details: serde_json::json!({ "command_details": object }),
        },
        "conversation_flow" => {
            let (concept, floor) = match subtype {
                "greeting_social" => ("engage_in_social_dialogue", Priority::Medium),
                "feedback" => ("acknowledge_and_process_feedback", Priority::Medium),
                "closing" => ("conclude_conversation", Priority::Low),
                _ => ("clarify_and_adjust_understanding", Priority::High),
            };
            ConceptRule {
                concept: concept.to_string(),
                floor,
                source: format!("user_{subtype}"),
                details: serde_json::json!({}),
            }
        }
        "ai_self_inquiry" => ConceptRule {
            concept: "provide_information_about_self".to_string(),
            floor: Priority::Medium,
            source: "user_self_inquiry".to_string(),
            details: serde_json::json!({}),
        },
        _ => ConceptRule {
            concept: "analyze_situation".to_string(),
            floor: Priority::Low,
            source: "default_observation".to_string(),
            details: serde_json::json!({}),
        },
    }
}

// g_{unix_ts}_{8 hex chars}: sortable by creation time, unique per process.
fn new_goal_id() -> String {
    let stamp = OffsetDateTime::now_utc().unix_timestamp();
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
    format!("g_{stamp}_{suffix}")
}
