//! noema — a single-agent cognitive-cycle orchestrator.
//!
//! One unit of external input goes in, one immutable [`kernel::ReasoningChain`]
//! comes out, produced by a fixed sequence of interpretive stages. A second,
//! independent decision path ([`arbitration`]) arbitrates between predictive
//! scenario reasoning and hard-coded safety reflexes.

pub mod action;
pub mod appraisal;
pub mod arbitration;
pub mod causal;
pub mod cli;
pub mod config;
pub mod ethics;
pub mod hypothesis;
pub mod kernel;
pub mod logging;
pub mod memory;
pub mod perception;
pub mod profile;
pub mod sensorium;
pub mod textgen;
pub mod timebase;
pub mod types;
