pub mod affect;
pub mod emotion;
pub mod goal;
pub mod motivation;
pub mod types;

pub use affect::{AffectRequest, assess_affect};
pub use emotion::evaluate_emotion;
pub use goal::{GoalRequest, form_goal};
pub use motivation::{MotivationContext, evaluate_motivation};
pub use types::{AffectState, EmotionState, Goal, MotivationSignal, preliminary_motivation};
