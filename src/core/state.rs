//! Game state: everything needed to continue a game.
//!
//! `GameState` holds the deck and cursor, both hands, the table, the discard
//! pile, the roles, the phase, the trump and the action history. It is only
//! mutated through `DurakGame`, so phase transitions stay inside the rules.
//!
//! Hands, discard and history are `im` persistent vectors and the deck is a
//! `Copy` array, so `clone()` is cheap and yields a fully independent value
//! for lookahead.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::card::{Card, Suit, NUM_CARDS};
use super::error::{DurakError, Result};
use super::player::{PlayerId, PlayerPair, Turn};
use crate::zones::{Deck, Table};

/// Hand size every refill tops up to.
pub const HAND_SIZE: usize = 6;

/// Number of forced deals before the trump reveal.
pub const INITIAL_DEAL: usize = HAND_SIZE * super::player::NUM_PLAYERS;

/// Round phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Forced deals and the trump reveal.
    Dealing,
    /// Attacker places cards.
    Attack,
    /// Defender covers, takes or (with transfers) redirects.
    Defense,
    /// Everything on the table is covered; attacker may add more.
    Additional,
    /// Game over.
    Terminal,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) deck: Deck,
    pub(crate) hands: PlayerPair<Vector<Card>>,
    pub(crate) table: Table,
    pub(crate) discard: Vector<Card>,
    pub(crate) attacker: PlayerId,
    pub(crate) defender: PlayerId,
    pub(crate) phase: Phase,
    pub(crate) trump: Option<Card>,
    pub(crate) cards_dealt: u8,
    pub(crate) round_starter: PlayerId,
    pub(crate) last_action: Option<Action>,
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// A fresh state at the start of dealing.
    #[must_use]
    pub(crate) fn new(deck: Deck) -> Self {
        Self {
            deck,
            hands: PlayerPair::default(),
            table: Table::new(),
            discard: Vector::new(),
            attacker: PlayerId::FIRST,
            defender: PlayerId::SECOND,
            phase: Phase::Dealing,
            trump: None,
            cards_dealt: 0,
            round_starter: PlayerId::FIRST,
            last_action: None,
            history: Vector::new(),
        }
    }

    // === Observation ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn attacker(&self) -> PlayerId {
        self.attacker
    }

    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.defender
    }

    /// Attacker who opened the current round.
    #[must_use]
    pub fn round_starter(&self) -> PlayerId {
        self.round_starter
    }

    /// The revealed trump card, `None` before the reveal.
    #[must_use]
    pub fn trump_card(&self) -> Option<Card> {
        self.trump
    }

    /// The trump suit, `None` before the reveal.
    #[must_use]
    pub fn trump_suit(&self) -> Option<Suit> {
        self.trump.map(Card::suit)
    }

    /// A seat's hand, in the order the cards arrived.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.hands[player]
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn discard(&self) -> &Vector<Card> {
        &self.discard
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards still in the deck (the revealed trump included).
    #[must_use]
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Number of forced deals applied so far.
    #[must_use]
    pub fn cards_dealt(&self) -> usize {
        self.cards_dealt as usize
    }

    /// The most recently applied action, chance steps included.
    #[must_use]
    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Every applied action, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Applied action ids, in order.
    #[must_use]
    pub fn history_ids(&self) -> Vec<u8> {
        self.history.iter().map(|r| r.action.id()).collect()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    #[must_use]
    pub fn is_chance_node(&self) -> bool {
        self.phase == Phase::Dealing
    }

    /// Who acts next.
    #[must_use]
    pub fn current_turn(&self) -> Turn {
        match self.phase {
            Phase::Dealing => Turn::Chance,
            Phase::Attack | Phase::Additional => Turn::Player(self.attacker),
            Phase::Defense => Turn::Player(self.defender),
            Phase::Terminal => Turn::Terminal,
        }
    }

    /// Check that every card is in exactly one place and roles are distinct.
    pub fn check_invariants(&self) -> Result<()> {
        if self.attacker == self.defender {
            return Err(DurakError::corrupt(format!(
                "attacker and defender are both seat {}",
                self.attacker
            )));
        }

        let mut seen = [false; NUM_CARDS];
        let locations = self
            .deck
            .remaining_cards()
            .iter()
            .copied()
            .chain(self.hands[PlayerId::FIRST].iter().copied())
            .chain(self.hands[PlayerId::SECOND].iter().copied())
            .chain(self.table.cards())
            .chain(self.discard.iter().copied());
        for card in locations {
            if std::mem::replace(&mut seen[card.index()], true) {
                return Err(DurakError::corrupt(format!("card {card} is in two places")));
            }
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(DurakError::corrupt(format!("card id {missing} is nowhere")));
        }
        Ok(())
    }

    // === Mutation (rules only) ===

    /// Remove a card from a hand. Returns false if it was not there.
    pub(crate) fn remove_from_hand(&mut self, player: PlayerId, card: Card) -> bool {
        match self.hands[player].index_of(&card) {
            Some(index) => {
                self.hands[player].remove(index);
                true
            }
            None => false,
        }
    }

    /// Draw the next deck card into a hand.
    pub(crate) fn draw_to(&mut self, player: PlayerId) -> Option<Card> {
        let card = self.deck.draw()?;
        self.hands[player].push_back(card);
        Some(card)
    }

    pub(crate) fn swap_roles(&mut self) {
        std::mem::swap(&mut self.attacker, &mut self.defender);
    }

    pub(crate) fn record(&mut self, turn: Turn, action: Action) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord::new(turn, action, sequence));
        self.last_action = Some(action);
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let trump_suit = self.trump_suit().map_or("None".to_string(), |s| s.to_string());
        let trump_card = self.trump.map_or("None".to_string(), |c| c.to_string());
        writeln!(
            f,
            "Phase={} Attacker={} Defender={} DeckPos={}/{} TrumpSuit={} TrumpCard={} Terminal={}",
            self.phase,
            self.attacker,
            self.defender,
            self.deck.position(),
            NUM_CARDS,
            trump_suit,
            trump_card,
            self.is_terminal(),
        )?;
        for (player, hand) in self.hands.iter() {
            write!(f, "Player {player} hand: ")?;
            for card in hand {
                write!(f, "{card} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Table: {}", self.table)?;
        writeln!(f, "Discard: {} cards", self.discard.len())
    }
}
