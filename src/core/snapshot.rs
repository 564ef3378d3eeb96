//! Complete, serializable field set of a `GameState`.
//!
//! `GameState::snapshot` captures every field; `GameState::from_snapshot`
//! rebuilds the state after checking that the snapshot describes a state the
//! rules could have reached (cards conserved, roles distinct, phase and trump
//! consistent). `to_bytes`/`from_bytes` use bincode.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::action::{Action, ActionRecord};
use super::card::{Card, Suit};
use super::error::{DurakError, Result};
use super::player::{PlayerId, PlayerPair};
use super::state::{GameState, Phase, INITIAL_DEAL};
use crate::zones::{Deck, Table, TableEntry};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Full deck permutation, drawn cards included.
    pub deck: Vec<Card>,
    /// Deck cursor.
    pub deck_pos: usize,
    /// Hands of seat 0 and seat 1, in arrival order.
    pub hands: [Vec<Card>; 2],
    /// Table entries in play order.
    pub table: Vec<TableEntry>,
    pub discard: Vec<Card>,
    pub trump_suit: Option<Suit>,
    pub trump_card: Option<Card>,
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub phase: Phase,
    pub cards_dealt: usize,
    pub round_starter: PlayerId,
    pub last_action: Option<Action>,
    pub history: Vec<ActionRecord>,
    pub terminal: bool,
}

impl StateSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DurakError::corrupt(e.to_string()))
    }

    /// Decode bytes produced by `to_bytes`. The result is not yet validated.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| DurakError::corrupt(e.to_string()))
    }
}

impl GameState {
    /// Capture every field of this state.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            deck: self.deck.order().to_vec(),
            deck_pos: self.deck.position(),
            hands: [
                self.hands[PlayerId::FIRST].iter().copied().collect(),
                self.hands[PlayerId::SECOND].iter().copied().collect(),
            ],
            table: self.table.entries().to_vec(),
            discard: self.discard.iter().copied().collect(),
            trump_suit: self.trump_suit(),
            trump_card: self.trump,
            attacker: self.attacker,
            defender: self.defender,
            phase: self.phase,
            cards_dealt: self.cards_dealt(),
            round_starter: self.round_starter,
            last_action: self.last_action,
            history: self.history.iter().copied().collect(),
            terminal: self.is_terminal(),
        }
    }

    /// Rebuild a state from a snapshot, rejecting inconsistent ones.
    pub fn from_snapshot(snapshot: &StateSnapshot) -> Result<Self> {
        let state = Self::assemble(snapshot)?;
        if let Err(err) = validate(&state, snapshot) {
            warn!(error = %err, "rejected state snapshot");
            return Err(err);
        }
        Ok(state)
    }

    fn assemble(snapshot: &StateSnapshot) -> Result<Self> {
        let deck = Deck::with_position(&snapshot.deck, snapshot.deck_pos)?;
        let cards_dealt = u8::try_from(snapshot.cards_dealt)
            .ok()
            .filter(|&n| n as usize <= INITIAL_DEAL)
            .ok_or_else(|| DurakError::corrupt(format!("{} cards dealt", snapshot.cards_dealt)))?;
        let [hand0, hand1] = &snapshot.hands;

        Ok(Self {
            deck,
            hands: PlayerPair::from_array([
                hand0.iter().copied().collect(),
                hand1.iter().copied().collect(),
            ]),
            table: Table::from_entries(&snapshot.table),
            discard: snapshot.discard.iter().copied().collect(),
            attacker: snapshot.attacker,
            defender: snapshot.defender,
            phase: snapshot.phase,
            trump: snapshot.trump_card,
            cards_dealt,
            round_starter: snapshot.round_starter,
            last_action: snapshot.last_action,
            history: snapshot.history.iter().copied().collect(),
        })
    }
}

fn validate(state: &GameState, snapshot: &StateSnapshot) -> Result<()> {
    state.check_invariants()?;

    if snapshot.terminal != state.is_terminal() {
        return Err(DurakError::corrupt("terminal flag disagrees with phase"));
    }
    if snapshot.trump_suit != snapshot.trump_card.map(Card::suit) {
        return Err(DurakError::corrupt("trump suit disagrees with trump card"));
    }
    if let Some(trump) = state.trump {
        if trump != state.deck.bottom() {
            return Err(DurakError::corrupt(format!("trump {trump} is not the bottom deck card")));
        }
    }

    if state.phase == Phase::Dealing {
        if state.trump.is_some() {
            return Err(DurakError::corrupt("trump revealed while dealing"));
        }
        if state.deck.position() != state.cards_dealt() {
            return Err(DurakError::corrupt("deck cursor disagrees with cards dealt"));
        }
        if !state.table.is_empty() || !state.discard.is_empty() {
            return Err(DurakError::corrupt("cards in play while dealing"));
        }
    } else {
        if state.trump.is_none() {
            return Err(DurakError::corrupt("trump not revealed after dealing"));
        }
        if state.cards_dealt() != INITIAL_DEAL {
            return Err(DurakError::corrupt("play started before the deal finished"));
        }
    }

    if matches!(state.phase, Phase::Defense) && state.table.is_empty() {
        return Err(DurakError::corrupt("defending against an empty table"));
    }
    if state.table.entries().iter().skip_while(|e| e.is_covered()).any(|e| e.is_covered()) {
        return Err(DurakError::corrupt("covered entry after an uncovered one"));
    }

    if state.is_terminal() {
        let some_hand_empty = PlayerId::ALL.iter().any(|&p| state.hand(p).is_empty());
        if !(state.deck.is_exhausted() && some_hand_empty) {
            return Err(DurakError::corrupt("terminal state with play still possible"));
        }
    }

    if state.last_action != state.history.last().map(|r| r.action) {
        return Err(DurakError::corrupt("last action disagrees with history"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Turn;

    fn dealing_state() -> GameState {
        let order: Vec<Card> = Card::all().collect();
        let mut state = GameState::new(Deck::from_order(&order).unwrap());
        state.draw_to(PlayerId::FIRST);
        state.cards_dealt = 1;
        state.record(Turn::Chance, Action::from_id(0).unwrap());
        state
    }

    #[test]
    fn test_snapshot_round_trip() {
        let state = dealing_state();
        let snapshot = state.snapshot();
        let restored = GameState::from_snapshot(&snapshot).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_bincode_round_trip() {
        let snapshot = dealing_state().snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(StateSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = dealing_state().snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_rejects_duplicated_card() {
        let mut snapshot = dealing_state().snapshot();
        snapshot.hands[1].push(snapshot.hands[0][0]);
        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(DurakError::CorruptSnapshot { .. })
        ));
    }

    #[test]
    fn test_rejects_equal_roles() {
        let mut snapshot = dealing_state().snapshot();
        snapshot.defender = snapshot.attacker;
        assert!(GameState::from_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_rejects_terminal_mismatch() {
        let mut snapshot = dealing_state().snapshot();
        snapshot.terminal = true;
        assert!(GameState::from_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_rejects_early_trump() {
        let mut snapshot = dealing_state().snapshot();
        snapshot.trump_card = Card::from_id(35);
        snapshot.trump_suit = Some(Suit::Hearts);
        assert!(GameState::from_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_rejects_garbage_bytes() {
        assert!(StateSnapshot::from_bytes(&[1, 2, 3]).is_err());
    }
}
