//! Resolution: applying one action to a state.
//!
//! | Action | Effect |
//! |---|---|
//! | chance card | deal the next card, or reveal trump after the twelfth |
//! | attacker card | new uncovered entry, phase `Attack` |
//! | defender card | covers the earliest uncovered entry; `Additional` once all are covered |
//! | `FinishAttack` | phase `Defense` |
//! | `TakeCards` | defender picks up the table, refill, attacker keeps the role |
//! | `FinishDefense` | table to discard, roles swap, refill (takes instead if anything is uncovered) |
//! | `Transfer` | roles swap, phase `Additional`, table unchanged |
//!
//! Every action is checked against the legal set first, so a rejected action
//! leaves the state exactly as it was.

use tracing::{debug, trace, warn};

use crate::core::{Action, Card, DurakError, GameState, Phase, Result, Ruleset, HAND_SIZE};

use super::{dealer, legal, scoring};

/// Apply `action`, then run the termination check.
pub fn apply_action(state: &mut GameState, ruleset: Ruleset, action: Action) -> Result<()> {
    if !legal::legal_actions(state, ruleset).contains(&action) {
        warn!(action = %action, phase = %state.phase, "rejected illegal action");
        return Err(DurakError::InvalidAction {
            action,
            phase: state.phase,
        });
    }

    let turn = state.current_turn();
    match action {
        Action::Card(_) if state.phase == Phase::Dealing => dealer::deal_next(state),
        Action::Card(card) if state.phase == Phase::Defense => cover(state, card),
        Action::Card(card) => play_attack(state, card),
        Action::FinishAttack => state.phase = Phase::Defense,
        Action::TakeCards => take_cards(state),
        Action::FinishDefense => finish_defense(state),
        Action::Transfer => transfer(state),
    }
    state.record(turn, action);
    trace!(action = %action, phase = %state.phase, "applied action");

    scoring::check_terminal(state);
    Ok(())
}

fn play_attack(state: &mut GameState, card: Card) {
    let attacker = state.attacker;
    state.remove_from_hand(attacker, card);
    state.table.push_attack(card);
    state.phase = Phase::Attack;
}

fn cover(state: &mut GameState, card: Card) {
    let defender = state.defender;
    state.remove_from_hand(defender, card);
    state.table.cover_earliest(card);
    if state.table.all_covered() {
        state.phase = Phase::Additional;
    }
}

fn take_cards(state: &mut GameState) {
    let defender = state.defender;
    let cards = state.table.clear();
    debug!(defender = %defender, taken = cards.len(), "defender takes the table");

    state.hands[defender].extend(cards);
    state.round_starter = state.attacker;
    state.phase = Phase::Attack;
    refill_hands(state);
}

fn finish_defense(state: &mut GameState) {
    if !state.table.all_covered() {
        take_cards(state);
        return;
    }

    let cards = state.table.clear();
    state.discard.extend(cards);
    state.swap_roles();
    debug!(attacker = %state.attacker, "defense held, roles swap");

    state.round_starter = state.attacker;
    state.phase = Phase::Attack;
    refill_hands(state);
}

fn transfer(state: &mut GameState) {
    state.swap_roles();
    state.round_starter = state.attacker;
    state.phase = Phase::Additional;
    debug!(attacker = %state.attacker, entries = state.table.len(), "attack transferred");
}

/// Top both hands up to six cards, one card per seat per pass, attacker
/// first, until both are full or the deck runs out.
pub(crate) fn refill_hands(state: &mut GameState) {
    let order = [state.attacker, state.defender];
    while !state.deck.is_exhausted() && order.iter().any(|&p| state.hand(p).len() < HAND_SIZE) {
        for &player in &order {
            if state.hand(player).len() < HAND_SIZE {
                state.draw_to(player);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, PlayerPair};
    use crate::zones::Deck;

    fn card(id: u8) -> Card {
        Card::from_id(id).unwrap()
    }

    fn ids(cards: &im::Vector<Card>) -> Vec<u8> {
        cards.iter().map(|c| c.id()).collect()
    }

    /// Identity deck drawn up to `deck_pos`, with the given hands. Cards
    /// below the cursor not in a hand go to the discard pile so that every
    /// card stays accounted for.
    fn play_state(deck_pos: usize, hand0: &[u8], hand1: &[u8]) -> GameState {
        let order: Vec<Card> = Card::all().collect();
        let mut state = GameState::new(Deck::with_position(&order, deck_pos).unwrap());
        state.hands = PlayerPair::from_array([
            hand0.iter().map(|&id| card(id)).collect(),
            hand1.iter().map(|&id| card(id)).collect(),
        ]);
        state.discard = (0..deck_pos as u8)
            .filter(|id| !hand0.contains(id) && !hand1.contains(id))
            .map(card)
            .collect();
        state.trump = Some(card(35));
        state.cards_dealt = 12;
        state.phase = Phase::Attack;
        state
    }

    #[test]
    fn test_illegal_action_leaves_state() {
        let mut state = play_state(30, &[0, 1], &[2, 3]);
        let before = state.clone();

        let err = apply_action(&mut state, Ruleset::classic(), Action::TakeCards).unwrap_err();
        assert_eq!(
            err,
            DurakError::InvalidAction {
                action: Action::TakeCards,
                phase: Phase::Attack
            }
        );
        assert_eq!(state, before);

        // A card the attacker does not hold.
        assert!(apply_action(&mut state, Ruleset::classic(), Action::Card(card(2))).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_attack_cover_finish() {
        let mut state = play_state(30, &[0, 9, 4], &[1, 10, 5]);
        let rules = Ruleset::classic();

        apply_action(&mut state, rules, Action::Card(card(0))).unwrap();
        assert_eq!(state.phase(), Phase::Attack);
        apply_action(&mut state, rules, Action::FinishAttack).unwrap();
        assert_eq!(state.phase(), Phase::Defense);
        apply_action(&mut state, rules, Action::Card(card(1))).unwrap();
        assert_eq!(state.phase(), Phase::Additional);
        assert!(state.table().all_covered());

        apply_action(&mut state, rules, Action::FinishAttack).unwrap();
        apply_action(&mut state, rules, Action::FinishDefense).unwrap();

        // Roles swapped, table discarded, both hands refilled from 30..36.
        assert_eq!(state.attacker(), PlayerId::SECOND);
        assert_eq!(state.round_starter(), PlayerId::SECOND);
        assert_eq!(state.phase(), Phase::Attack);
        assert!(state.table().is_empty());
        assert!(state.discard().contains(&card(0)) && state.discard().contains(&card(1)));
        assert_eq!(ids(state.hand(PlayerId::SECOND)), vec![10, 5, 30, 32, 34]);
        assert_eq!(ids(state.hand(PlayerId::FIRST)), vec![9, 4, 31, 33, 35]);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_take_cards_keeps_attacker() {
        let mut state = play_state(34, &[0, 9], &[18, 19]);
        let rules = Ruleset::classic();

        apply_action(&mut state, rules, Action::Card(card(0))).unwrap();
        apply_action(&mut state, rules, Action::FinishAttack).unwrap();
        apply_action(&mut state, rules, Action::TakeCards).unwrap();

        assert_eq!(state.attacker(), PlayerId::FIRST);
        assert_eq!(state.phase(), Phase::Attack);
        assert!(state.table().is_empty());
        // Attacker draws first; the last two deck cards split one each.
        assert_eq!(ids(state.hand(PlayerId::FIRST)), vec![9, 34]);
        assert_eq!(ids(state.hand(PlayerId::SECOND)), vec![18, 19, 0, 35]);
        assert!(state.deck().is_exhausted());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_refill_stops_at_six() {
        let mut state = play_state(20, &[0, 1, 2, 3, 4], &[5]);
        refill_hands(&mut state);
        assert_eq!(ids(state.hand(PlayerId::FIRST)), vec![0, 1, 2, 3, 4, 20]);
        assert_eq!(ids(state.hand(PlayerId::SECOND)), vec![5, 21, 22, 23, 24, 25]);
        assert_eq!(state.deck().position(), 26);
    }

    #[test]
    fn test_transfer_swaps_roles() {
        let mut state = play_state(30, &[0, 1, 2], &[9, 20]);
        let rules = Ruleset::with_transfers();

        apply_action(&mut state, rules, Action::Card(card(0))).unwrap();
        apply_action(&mut state, rules, Action::FinishAttack).unwrap();
        apply_action(&mut state, rules, Action::Transfer).unwrap();

        assert_eq!(state.attacker(), PlayerId::SECOND);
        assert_eq!(state.defender(), PlayerId::FIRST);
        assert_eq!(state.phase(), Phase::Additional);
        assert_eq!(state.table().entries()[0].attack, card(0));
        assert_eq!(state.last_action(), Some(Action::Transfer));
        assert!(apply_action(&mut state, rules, Action::FinishAttack).is_err());
    }
}
