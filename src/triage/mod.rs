//! Swipe-based triage of catch-up items.
//!
//! Split into a pure gesture classifier ([`gesture`]), a pure decision
//! reducer ([`reducer`]), and the async adapter that persists decisions
//! ([`session`]).

pub mod gesture;
pub mod reducer;
pub mod session;

pub use gesture::{classify, Swipe, SwipeThresholds, Vector2};
pub use reducer::{reduce, Action, CatStep, CommitEffect, Decision, Phase, TriageState};
pub use session::TriageSession;
