//! Rules engine trait for game implementations.
//!
//! `RulesEngine` is the whole surface a host framework sees:
//! - Legal actions and chance outcomes for a state
//! - How actions move the state forward
//! - Termination and returns
//!
//! `games::durak::DurakGame` is the implementation.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
