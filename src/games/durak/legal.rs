//! Legal action generation.
//!
//! ## Attack / Additional (attacker to move)
//!
//! - Empty table: any hand card.
//! - Otherwise: hand cards whose rank is already on the table, while the
//!   table has room (fewer than six entries, and fewer uncovered entries
//!   than the defender has cards).
//! - `FinishAttack` once the table is non-empty, except directly after a
//!   `Transfer`.
//!
//! ## Defense (defender to move)
//!
//! - Nothing uncovered: `FinishDefense` only.
//! - Otherwise: cards that beat the earliest uncovered attack, `TakeCards`,
//!   and with transfers enabled `Transfer` when the attack is untouched.
//!
//! Results are sorted by action id, which puts card plays before the extras.

use crate::core::{Action, Card, GameState, Phase, Ruleset};
use crate::zones::MAX_TABLE_ENTRIES;

use super::dealer;

/// Legal actions for whoever acts next, sorted by id.
#[must_use]
pub fn legal_actions(state: &GameState, ruleset: Ruleset) -> Vec<Action> {
    match state.phase {
        Phase::Dealing => dealer::forced_outcome(state).map(Action::Card).into_iter().collect(),
        Phase::Attack | Phase::Additional => attack_actions(state),
        Phase::Defense => defense_actions(state, ruleset),
        Phase::Terminal => Vec::new(),
    }
}

fn attack_actions(state: &GameState) -> Vec<Action> {
    let hand = state.hand(state.attacker);
    let table = &state.table;

    let mut actions: Vec<Action> = if table.is_empty() {
        hand.iter().copied().map(Action::Card).collect()
    } else if can_add_attack(state) {
        hand.iter()
            .copied()
            .filter(|c| table.contains_rank(c.rank()))
            .map(Action::Card)
            .collect()
    } else {
        Vec::new()
    };
    actions.sort_unstable();

    if !table.is_empty() && state.last_action != Some(Action::Transfer) {
        actions.push(Action::FinishAttack);
    }
    actions
}

fn defense_actions(state: &GameState, ruleset: Ruleset) -> Vec<Action> {
    let Some(attack) = state.table.next_to_cover() else {
        return vec![Action::FinishDefense];
    };

    let mut actions: Vec<Action> = state
        .hand(state.defender)
        .iter()
        .copied()
        .filter(|&c| covers(state, c, attack))
        .map(Action::Card)
        .collect();
    actions.sort_unstable();

    actions.push(Action::TakeCards);
    if ruleset.enable_transfer && can_transfer(state) {
        actions.push(Action::Transfer);
    }
    actions
}

/// Whether `defense` beats `attack` under the revealed trump.
#[must_use]
pub fn covers(state: &GameState, defense: Card, attack: Card) -> bool {
    state
        .trump_suit()
        .is_some_and(|trump| defense.beats(attack, trump))
}

/// Whether the attacker may add another card to a non-empty table.
#[must_use]
pub fn can_add_attack(state: &GameState) -> bool {
    state.table.len() < MAX_TABLE_ENTRIES
        && state.table.uncovered_count() < state.hand(state.defender).len()
}

/// Whether the defender may redirect the attack.
///
/// The attack must be untouched and matched by a defender card, and the
/// redirected attack plus one more card must fit against the current
/// attacker's hand.
#[must_use]
pub fn can_transfer(state: &GameState) -> bool {
    let table = &state.table;
    !table.is_empty()
        && !table.any_covered()
        && table.len() < MAX_TABLE_ENTRIES
        && table.len() < state.hand(state.attacker).len()
        && state
            .hand(state.defender)
            .iter()
            .any(|c| table.attack_contains_rank(c.rank()))
}
