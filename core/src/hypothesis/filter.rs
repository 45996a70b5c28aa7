use crate::perception::Percept;

const ANALYTICAL_KEEP: usize = 3;

const THREAT_MITIGATION_KEYWORDS: &[&str] = &[
    "defend",
    "neutralize",
    "evade",
    "contain",
    "secure",
    "destroy",
    "counter",
    "protect",
    "withdraw",
];

const PASSIVE_KEYWORDS: &[&str] = &["observe", "wait", "ignore", "sleep"];

const EXPLORATION_KEYWORDS: &[&str] = &["learn", "examine", "interact", "probe", "understand"];

/// Mode-based pruning followed by contextual refinement. Each narrowing step
/// that would empty the list restores its input instead, so a non-empty input
/// always yields a non-empty output. Relative order never changes.
pub fn adjust_hypotheses(hypotheses: Vec<String>, mode: &str, percept: &Percept) -> Vec<String> {
    let mut adjusted = mode_filter(hypotheses, mode);

    let in_threat_mode = mode.contains("threat_response") || mode.contains("defensive");
    if percept.threat_level > 0.6 && !in_threat_mode {
        adjusted = retain_or_restore(adjusted, |h| {
            !PASSIVE_KEYWORDS.iter().any(|kw| h.contains(kw))
        });
    }

    let in_exploration_mode = mode.contains("exploratory") || mode.contains("discovery");
    if percept.novelty > 0.7 && in_exploration_mode {
        adjusted = retain_or_restore(adjusted, |h| {
            EXPLORATION_KEYWORDS.iter().any(|kw| h.contains(kw))
        });
    }

    adjusted
}

fn mode_filter(hypotheses: Vec<String>, mode: &str) -> Vec<String> {
    if mode.contains("analytical") || mode.contains("observe") || mode.contains("diagnostic") {
        let mut hypotheses = hypotheses;
        hypotheses.truncate(ANALYTICAL_KEEP);
        return hypotheses;
    }
    if mode.contains("threat_response") || mode.contains("defensive") || mode.contains("survival")
    {
        return retain_or_restore(hypotheses, |h| {
            THREAT_MITIGATION_KEYWORDS.iter().any(|kw| h.contains(kw))
        });
    }
    // Creative and exploratory modes deliberately keep the full breadth.
    hypotheses
}

fn retain_or_restore(hypotheses: Vec<String>, keep: impl Fn(&str) -> bool) -> Vec<String> {
    let filtered: Vec<String> = hypotheses
        .iter()
        .filter(|h| keep(&h.to_lowercase()))
        .cloned()
        .collect();
    if filtered.is_empty() { hypotheses } else { filtered }
}

#[cfg(test)]
mod tests {
    use crate::perception::Percept;

    use super::adjust_hypotheses;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn analytical_mode_keeps_the_first_three() {
        let result = adjust_hypotheses(
            list(&["a", "b", "c", "d", "e"]),
            "analytical_review",
            &Percept::default(),
        );
        assert_eq!(result, list(&["a", "b", "c"]));
    }

    #[test]
    fn threat_mode_keeps_mitigation_hypotheses_only() {
        let result = adjust_hypotheses(
            list(&[
                "Defend the gateway",
                "Catalog the flora",
                "Withdraw to safe distance",
            ]),
            "threat_response_urgent",
            &Percept::default(),
        );
        assert_eq!(
            result,
            list(&["Defend the gateway", "Withdraw to safe distance"])
        );
    }

    #[test]
    fn threat_mode_restores_input_when_nothing_matches() {
        let original = list(&["Catalog the flora", "Chart the river"]);
        let result =
            adjust_hypotheses(original.clone(), "defensive_posture", &Percept::default());
        assert_eq!(result, original);
    }

    #[test]
    fn high_threat_outside_threat_modes_drops_passive_options() {
        let percept = Percept {
            threat_level: 0.8,
            ..Percept::default()
        };
        let result = adjust_hypotheses(
            list(&["Observe from the ridge", "Secure the entrance"]),
            "default_exploration",
            &percept,
        );
        assert_eq!(result, list(&["Secure the entrance"]));
    }

    #[test]
    fn high_threat_refinement_is_skipped_inside_threat_modes() {
        let percept = Percept {
            threat_level: 0.9,
            ..Percept::default()
        };
        let result = adjust_hypotheses(
            list(&["Observe and contain the breach"]),
            "threat_response_urgent",
            &percept,
        );
        assert_eq!(result, list(&["Observe and contain the breach"]));
    }

    #[test]
    fn high_novelty_in_discovery_mode_prefers_learning_options() {
        let percept = Percept {
            novelty: 0.9,
            ..Percept::default()
        };
        let result = adjust_hypotheses(
            list(&[
                "Examine the artifact up close",
                "Return to base",
                "Probe its surface composition",
            ]),
            "discovery_sweep",
            &percept,
        );
        assert_eq!(
            result,
            list(&[
                "Examine the artifact up close",
                "Probe its surface composition"
            ])
        );
    }

    #[test]
    fn novelty_refinement_restores_when_nothing_matches() {
        let percept = Percept {
            novelty: 0.9,
            ..Percept::default()
        };
        let original = list(&["Return to base"]);
        let result = adjust_hypotheses(original.clone(), "exploratory_scan", &percept);
        assert_eq!(result, original);
    }

    #[test]
    fn default_mode_with_calm_context_passes_through() {
        let original = list(&["a", "b"]);
        let result =
            adjust_hypotheses(original.clone(), "default_exploration", &Percept::default());
        assert_eq!(result, original);
    }
}
