//! Termination check and returns.

use tracing::debug;

use crate::core::{GameState, Phase, PlayerId, PlayerPair};
use crate::rules::GameResult;

use super::resolution::refill_hands;

/// Runs after every applied action, chance steps included.
///
/// The game ends as soon as the deck is exhausted and either hand is empty,
/// which can happen in the middle of a round. Both hands empty with cards
/// left in the deck triggers a refill.
pub(crate) fn check_terminal(state: &mut GameState) {
    let [empty0, empty1] = PlayerId::ALL.map(|p| state.hand(p).is_empty());

    if state.deck.is_exhausted() && (empty0 || empty1) {
        state.phase = Phase::Terminal;
        debug!(attacker = %state.attacker, moves = state.history.len(), "game over");
    } else if empty0 && empty1 && state.phase != Phase::Dealing {
        refill_hands(state);
    }
}

/// Outcome of a terminal state, `None` otherwise.
///
/// The seat left holding cards is the durak. If both seats emptied their
/// hands the current attacker wins.
#[must_use]
pub fn result(state: &GameState) -> Option<GameResult> {
    if !state.is_terminal() {
        return None;
    }
    let winner = match PlayerId::ALL.map(|p| state.hand(p).is_empty()) {
        [true, false] => PlayerId::FIRST,
        [false, true] => PlayerId::SECOND,
        [true, true] => state.attacker,
        [false, false] => unreachable!("terminal state with both hands holding cards"),
    };
    Some(GameResult::Winner(winner))
}

/// +1 / −1 at a terminal state, zero for both seats before that.
#[must_use]
pub fn returns(state: &GameState) -> PlayerPair<f64> {
    result(state).map_or_else(PlayerPair::default, |r| r.returns())
}
