//! Rules engine trait: the boundary a host framework drives.
//!
//! A host (random rollouts, tree search, a learned policy) only needs:
//! - who acts next and what they may do
//! - the forced outcome at a chance step
//! - applying an action, with illegal ones rejected
//! - termination and per-seat returns

use crate::core::action::Action;
use crate::core::error::{DurakError, Result};
use crate::core::player::{PlayerId, PlayerPair, Turn};
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner; the other seat is the durak.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }

    /// +1 for the winner, −1 for the loser.
    #[must_use]
    pub fn returns(&self) -> PlayerPair<f64> {
        PlayerPair::new(|p| if self.is_winner(p) { 1.0 } else { -1.0 })
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: sorted by id; the chance outcome(s) at a chance node;
///   empty once terminal
/// - `apply_action`: must be deterministic and must leave the state
///   untouched when it returns an error
/// - `result`: `None` while the game continues
pub trait RulesEngine {
    /// Create the state at the start of dealing.
    fn new_initial_state(&self) -> GameState;

    /// Outcomes of the current chance node with their probabilities.
    ///
    /// Empty when a player (or nobody) is to move.
    fn chance_outcomes(&self, state: &GameState) -> Vec<(Action, f64)>;

    /// Legal actions for whoever acts next.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Apply one action (chance outcome or player move).
    fn apply_action(&self, state: &mut GameState, action: Action) -> Result<()>;

    /// Final result, or `None` if the game continues.
    fn result(&self, state: &GameState) -> Option<GameResult>;

    /// Per-seat returns; zero for both seats until the game ends.
    fn returns(&self, state: &GameState) -> PlayerPair<f64>;

    /// Size of the action id space.
    fn num_distinct_actions(&self) -> usize;

    // === Convenience Methods ===

    /// Who acts next.
    fn current_turn(&self, state: &GameState) -> Turn {
        state.current_turn()
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        self.result(state).is_some()
    }

    /// Legal action ids, sorted.
    fn legal_action_ids(&self, state: &GameState) -> Vec<u8> {
        self.legal_actions(state).into_iter().map(Action::id).collect()
    }

    /// Apply an action given by raw id.
    fn apply_action_id(&self, state: &mut GameState, id: u32) -> Result<()> {
        let action = u8::try_from(id)
            .ok()
            .and_then(Action::from_id)
            .ok_or(DurakError::UnknownActionId { id })?;
        self.apply_action(state, action)
    }

    /// Step back one action. Not supported: search must clone instead.
    fn undo_action(&self, _state: &mut GameState, _action: Action) -> Result<()> {
        Err(DurakError::UnsupportedOperation {
            operation: "undo_action",
        })
    }

    /// Human-readable action name.
    fn action_to_string(&self, id: u32) -> String {
        Action::describe_id(id)
    }
}
