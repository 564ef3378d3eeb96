//! Dealer: forced chance steps, trump reveal and the first attacker.
//!
//! Dealing is twelve single-outcome chance steps, one card each to seat
//! `cards_dealt % 2`, followed by a thirteenth step revealing the bottom deck
//! card as trump. The revealed card stays in the deck and is drawn last.

use im::Vector;
use tracing::{debug, trace};

use crate::core::{Action, Card, GameState, Phase, PlayerId, PlayerPair, Rank, Suit, INITIAL_DEAL};

/// The one card the current chance step must produce, if this is a chance node.
#[must_use]
pub fn forced_outcome(state: &GameState) -> Option<Card> {
    if state.phase != Phase::Dealing {
        return None;
    }
    if state.cards_dealt() < INITIAL_DEAL {
        state.deck.peek()
    } else {
        Some(state.deck.bottom())
    }
}

/// Chance outcomes with their probabilities. Always zero or one entry.
#[must_use]
pub fn chance_outcomes(state: &GameState) -> Vec<(Action, f64)> {
    forced_outcome(state)
        .map(|card| (Action::Card(card), 1.0))
        .into_iter()
        .collect()
}

/// Apply a chance step. The caller has already checked it is the forced one.
pub(crate) fn deal_next(state: &mut GameState) {
    if state.cards_dealt() < INITIAL_DEAL {
        let seat = PlayerId::ALL[state.cards_dealt() % 2];
        if let Some(card) = state.draw_to(seat) {
            trace!(seat = %seat, card = %card, "dealt");
        }
        state.cards_dealt += 1;
    } else {
        reveal_trump(state);
    }
}

fn reveal_trump(state: &mut GameState) {
    let trump = state.deck.bottom();
    let attacker = first_attacker(&state.hands, trump.suit());

    state.trump = Some(trump);
    state.attacker = attacker;
    state.defender = attacker.opponent();
    state.round_starter = attacker;
    state.phase = Phase::Attack;

    debug!(trump = %trump, attacker = %attacker, "trump revealed");
}

/// Seat holding the lowest trump.
///
/// Seat 0 is scanned before seat 1, each in hand order, and only a strictly
/// lower rank replaces the current minimum. Seat 0 attacks when nobody holds
/// a trump.
#[must_use]
pub fn first_attacker(hands: &PlayerPair<Vector<Card>>, trump: Suit) -> PlayerId {
    let mut lowest: Option<(Rank, PlayerId)> = None;
    for (player, hand) in hands.iter() {
        for card in hand.iter().filter(|c| c.suit() == trump) {
            if lowest.map_or(true, |(rank, _)| card.rank() < rank) {
                lowest = Some((card.rank(), player));
            }
        }
    }
    lowest.map_or(PlayerId::FIRST, |(_, player)| player)
}
