//! Two-player Durak with an optional transfer variant.
//!
//! One engine serves both rulesets; `Ruleset::enable_transfer` adds the
//! `Transfer` action (id 39) and nothing else changes.
//!
//! ```
//! use durak_engine::games::durak::DurakGame;
//! use durak_engine::rules::RulesEngine;
//!
//! let game = DurakGame::builder().seed(3).build().unwrap();
//! let mut state = game.new_initial_state();
//! while !game.is_terminal(&state) {
//!     let action = game.legal_actions(&state)[0];
//!     game.apply_action(&mut state, action).unwrap();
//! }
//! assert_eq!(game.returns(&state).as_array().iter().sum::<f64>(), 0.0);
//! ```

pub mod dealer;
pub mod legal;
pub mod resolution;
pub mod scoring;
mod game;

pub use game::{DurakGame, DurakGameBuilder, MAX_GAME_LENGTH};
