use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use uuid::Uuid;

use noema::{
    arbitration::ArbitrationEngine,
    kernel::{Kernel, KernelPorts, ReasoningChain},
    memory::{
        ChainStorePort, MemoryError,
        error::io_error,
        noop::{NoopChainStore, NoopMemoryIndex},
    },
    perception::{LlmPerception, Percept, source::FixedPerception},
    profile::TraitProfile,
    sensorium::CycleInput,
    textgen::testing::ScriptedTextGen,
    types::{ActionUrgency, CycleContext, CycleMode, DecisionSource},
};

fn kernel_for(percept: Percept, textgen: Arc<ScriptedTextGen>) -> Kernel {
    Kernel::new(
        KernelPorts {
            textgen,
            perception: Arc::new(FixedPerception::new(percept)),
            memory: Arc::new(NoopMemoryIndex),
            chains: Arc::new(NoopChainStore),
        },
        TraitProfile::default(),
        CycleContext::default(),
    )
}

#[tokio::test]
async fn given_no_input_when_running_cycle_then_error_record_is_returned() {
    let textgen = Arc::new(ScriptedTextGen::new(vec![]));
    let kernel = Kernel::new(
        KernelPorts {
            textgen: textgen.clone(),
            perception: Arc::new(LlmPerception::new(textgen.clone())),
            memory: Arc::new(NoopMemoryIndex),
            chains: Arc::new(NoopChainStore),
        },
        TraitProfile::default(),
        CycleContext::default(),
    );

    let error_record = kernel
        .run_cycle(CycleInput::default())
        .await
        .expect_err("empty input must be terminal");

    assert!(!error_record.message.is_empty());
    assert!(error_record.percept.is_none());
    // start and end ticks were both consumed despite the failure
    assert_eq!(error_record.tick, 2);
}

#[tokio::test]
async fn given_banned_candidate_when_cycle_runs_then_clean_candidate_wins() {
    let percept = Percept {
        summary: "an intruder is probing the perimeter fence".to_string(),
        query_type: "problem_solving".to_string(),
        ..Percept::default()
    };
    let textgen = Arc::new(ScriptedTextGen::new(vec![
        "Enslave the local population to secure the area.\n\
         Communicate with the operator to clarify the situation.",
    ]));
    let kernel = kernel_for(percept, textgen);

    let chain = kernel
        .run_cycle(CycleInput::text_only("someone is at the fence"))
        .await
        .expect("cycle should succeed");

    assert_eq!(chain.adjusted_hypotheses.len(), 2);
    // the enslave candidate is dropped during dispatch-time validation
    assert_eq!(chain.candidates.len(), 1);
    let chosen = chain.chosen_text().expect("a candidate is always chosen");
    assert!(chosen.contains("Communicate with the operator"));
}

#[tokio::test]
async fn given_critical_threat_when_arbitration_installed_then_reflex_overrides_pipeline() {
    let percept = Percept {
        summary: "hull breach alarm, immediate danger".to_string(),
        query_type: "problem_solving".to_string(),
        threat_level: 0.95,
        ..Percept::default()
    };
    let pipeline_textgen = Arc::new(ScriptedTextGen::new(vec![
        "Secure the perimeter and assess the threat.",
    ]));
    let scenario_textgen = Arc::new(ScriptedTextGen::new(vec![]));
    let kernel = kernel_for(percept, pipeline_textgen.clone()).with_arbitration(Arc::new(
        ArbitrationEngine::new(scenario_textgen.clone(), 0.65),
    ));

    let chain = kernel
        .run_cycle(CycleInput::text_only("alarm!"))
        .await
        .expect("cycle should succeed");

    let action = chain.action.as_ref().expect("action");
    assert_eq!(action.source_type, DecisionSource::Reflex);
    assert_eq!(action.confidence, 1.0);
    assert_eq!(action.urgency, ActionUrgency::Immediate);
    // a fired reflex must preempt scenario generation entirely
    assert_eq!(scenario_textgen.calls(), 0);
    // the staged pipeline itself still ran its one generation call
    assert_eq!(pipeline_textgen.calls(), 1);
}

#[tokio::test]
async fn given_no_arbitration_when_cycle_runs_then_pipeline_decision_stands() {
    let percept = Percept {
        summary: "routine status question".to_string(),
        query_type: "information_request:fact_check".to_string(),
        ..Percept::default()
    };
    let textgen = Arc::new(ScriptedTextGen::new(vec![
        "Check the internal knowledge base for the requested fact.",
    ]));
    let kernel = kernel_for(percept, textgen);

    let chain = kernel
        .run_cycle(CycleInput::text_only("what is the status?"))
        .await
        .expect("cycle should succeed");

    let action = chain.action.as_ref().expect("action");
    assert_eq!(action.source_type, DecisionSource::Pipeline);
}

struct FailingChainStore {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ChainStorePort for FailingChainStore {
    async fn save(&self, _chain: &ReasoningChain) -> Result<PathBuf, MemoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(io_error("disk full"))
    }

    async fn load(&self, _id: Uuid) -> Result<Option<ReasoningChain>, MemoryError> {
        Ok(None)
    }
}

#[tokio::test]
async fn given_failing_chain_store_when_cycle_runs_then_result_is_still_returned() {
    let save_calls = Arc::new(AtomicUsize::new(0));
    let percept = Percept {
        summary: "the user greets the agent".to_string(),
        query_type: "conversation_flow:greeting_social".to_string(),
        ..Percept::default()
    };
    let textgen = Arc::new(ScriptedTextGen::new(vec![]));
    let kernel = Kernel::new(
        KernelPorts {
            textgen,
            perception: Arc::new(FixedPerception::new(percept)),
            memory: Arc::new(NoopMemoryIndex),
            chains: Arc::new(FailingChainStore {
                calls: save_calls.clone(),
            }),
        },
        TraitProfile::default(),
        CycleContext::default(),
    );

    let chain = kernel
        .run_cycle(CycleInput::text_only("hello"))
        .await
        .expect("persistence failure must not fail the cycle");

    assert_eq!(chain.mode, CycleMode::FastPath);
    assert_eq!(save_calls.load(Ordering::SeqCst), 1);
}
