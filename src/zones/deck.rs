//! The deck: a fixed permutation of all 36 cards and a read cursor.
//!
//! Cards at positions `>= position()` are still in the deck. The bottom
//! card (last in the permutation) is the one revealed as trump; it stays in
//! the deck and is the final card drawn.

use rustc_hash::FxHashSet;

use crate::core::card::{Card, Rank, Suit, NUM_CARDS};
use crate::core::error::{DurakError, Result};
use crate::core::rng::GameRng;

/// Deck permutation plus cursor. `Copy`, so cloning a state copies it for free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Deck {
    order: [Card; NUM_CARDS],
    pos: u8,
}

impl Deck {
    /// Parse a comma-separated permutation of `0..36`.
    ///
    /// ```
    /// use durak_engine::zones::Deck;
    ///
    /// let ids: Vec<String> = (0..36).rev().map(|i| i.to_string()).collect();
    /// let deck = Deck::parse(&ids.join(",")).unwrap();
    /// assert_eq!(deck.bottom().id(), 0);
    ///
    /// assert!(Deck::parse("0,1,2").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let cards = text
            .split(',')
            .map(|token| {
                let token = token.trim();
                let id: u8 = token
                    .parse()
                    .map_err(|_| DurakError::malformed_deck(format!("`{token}` is not a card id")))?;
                Card::from_id(id)
                    .ok_or_else(|| DurakError::malformed_deck(format!("card id {id} out of range")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_order(&cards)
    }

    /// Build a deck from an explicit order, checking it is a permutation.
    pub fn from_order(cards: &[Card]) -> Result<Self> {
        if cards.len() != NUM_CARDS {
            return Err(DurakError::malformed_deck(format!(
                "expected {NUM_CARDS} cards, got {}",
                cards.len()
            )));
        }
        let mut seen = FxHashSet::default();
        for card in cards {
            if !seen.insert(*card) {
                return Err(DurakError::malformed_deck(format!("card {} appears twice", card.id())));
            }
        }
        let mut order = [cards[0]; NUM_CARDS];
        order.copy_from_slice(cards);
        Ok(Self { order, pos: 0 })
    }

    /// The identity order shuffled by `rng`.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut order = [Card::new(Suit::Spades, Rank::Six); NUM_CARDS];
        for (slot, card) in order.iter_mut().zip(Card::all()) {
            *slot = card;
        }
        rng.shuffle(&mut order);
        Self { order, pos: 0 }
    }

    /// Rebuild a deck with its cursor, as stored in a snapshot.
    pub fn with_position(cards: &[Card], position: usize) -> Result<Self> {
        if position > NUM_CARDS {
            return Err(DurakError::corrupt(format!("deck position {position} past {NUM_CARDS}")));
        }
        let mut deck = Self::from_order(cards).map_err(|e| DurakError::corrupt(e.to_string()))?;
        deck.pos = position as u8;
        Ok(deck)
    }

    /// The full permutation, drawn cards included.
    #[must_use]
    pub fn order(&self) -> &[Card; NUM_CARDS] {
        &self.order
    }

    /// Read cursor: the number of cards already drawn.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos as usize
    }

    /// Cards still in the deck, top first.
    #[must_use]
    pub fn remaining_cards(&self) -> &[Card] {
        &self.order[self.position()..]
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        NUM_CARDS - self.position()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position() == NUM_CARDS
    }

    /// The next card to be drawn, without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<Card> {
        self.order.get(self.position()).copied()
    }

    /// Draw the next card.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.peek()?;
        self.pos += 1;
        Some(card)
    }

    /// The bottom card, revealed as trump after the deal.
    #[must_use]
    pub fn bottom(&self) -> Card {
        self.order[NUM_CARDS - 1]
    }
}
