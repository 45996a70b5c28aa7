//! Turning a chosen hypothesis into an executable action and a framed
//! communication stance.

pub mod framer;
pub mod planner;
pub mod types;

pub use framer::{FramerRequest, determine_communication_intent};
pub use planner::plan_action;
pub use types::{
    ACTION_HOLD_POSITION, ActionDecision, CommunicationIntent, MOTOR_PROFILE_NONE, PlannedAction,
};
