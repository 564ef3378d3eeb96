//! Core engine types: cards, players, actions, RNG, configuration, state.
//!
//! Everything here is game data. The rules that move a state forward live
//! in `games::durak`.

pub mod card;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;
pub mod snapshot;

pub use card::{Card, Rank, Suit, NUM_CARDS, NUM_RANKS, NUM_SUITS};
pub use player::{PlayerId, PlayerPair, Turn, NUM_PLAYERS};
pub use rng::GameRng;
pub use config::{DeckSource, DurakConfig, Ruleset};
pub use action::{
    Action, ActionRecord, FINISH_ATTACK_ID, FINISH_DEFENSE_ID, TAKE_CARDS_ID, TRANSFER_ID,
};
pub use error::{DurakError, Result};
pub use state::{GameState, Phase, HAND_SIZE, INITIAL_DEAL};
pub use snapshot::StateSnapshot;
