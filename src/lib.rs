//! # durak-engine
//!
//! Rule engine for two-player Durak, with an optional transfer variant,
//! built for random rollouts, tree search and learned policies.
//!
//! ## Design Principles
//!
//! 1. **One Engine, Two Rulesets**: `Ruleset::enable_transfer` switches the
//!    transfer move on. Everything else is shared.
//!
//! 2. **Explicit Chance Nodes**: dealing and the trump reveal are forced
//!    single-outcome chance steps, so search code that expects stochastic
//!    nodes can walk them.
//!
//! 3. **Rejected, Not Ignored**: an action outside the legal set returns
//!    `DurakError::InvalidAction` and leaves the state untouched.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: hands, discard and history use `im-rs`,
//!   so cloning a state for lookahead is O(1).
//!
//! - **Owned Randomness**: the deck shuffle uses a seeded `GameRng` owned by
//!   the game. There is no global RNG.
//!
//! ## Modules
//!
//! - `core`: Cards, players, actions, RNG, configuration, state, snapshots
//! - `zones`: Deck and table
//! - `rules`: `RulesEngine` trait, the boundary a host framework drives
//! - `games`: The Durak implementation

pub mod core;
pub mod zones;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Card, Rank, Suit,
    PlayerId, PlayerPair, Turn,
    GameRng,
    DeckSource, DurakConfig, Ruleset,
    Action, ActionRecord,
    DurakError, Result,
    GameState, Phase, StateSnapshot,
};

pub use crate::zones::{Deck, Table, TableEntry};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::games::durak::{DurakGame, DurakGameBuilder};
