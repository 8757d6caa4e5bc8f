//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - How a game starts
//! - How actions modify state
//! - Win/loss conditions
//!
//! The session layer calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{EndReason, GameOutcome, RulesEngine, VictoryGrade};
