//! Card model: 36 card identifiers, suit/rank decomposition and covering.
//!
//! A card is an identifier in `0..36`. `suit = id / 9` and `rank = id % 9`,
//! ranks running low to high from six to ace:
//!
//! ```
//! use durak_engine::core::{Card, Rank, Suit};
//!
//! let card = Card::new(Suit::Hearts, Rank::Ten);
//! assert_eq!(card.id(), 31);
//! assert_eq!(card.to_string(), "10♥");
//! assert_eq!(Card::from_id(31), Some(card));
//! ```

use serde::{Deserialize, Serialize};

/// Number of cards in the deck.
pub const NUM_CARDS: usize = 36;

/// Number of suits.
pub const NUM_SUITS: usize = 4;

/// Number of ranks per suit.
pub const NUM_RANKS: usize = 9;

/// Card suit. Discriminants match `id / 9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Clubs = 1,
    Diamonds = 2,
    Hearts = 3,
}

impl Suit {
    /// All suits in id order.
    pub const ALL: [Suit; NUM_SUITS] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];

    /// Suit for a raw index in `0..4`.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Raw index in `0..4`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Printed symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card rank, lowest first. Discriminants match `id % 9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Six = 0,
    Seven = 1,
    Eight = 2,
    Nine = 3,
    Ten = 4,
    Jack = 5,
    Queen = 6,
    King = 7,
    Ace = 8,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; NUM_RANKS] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Rank for a raw index in `0..9`.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Raw index in `0..9`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Printed symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single card, identified by `0..36`.
///
/// Ordering follows the numeric identifier, which is also the action id
/// used to play the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Build a card from suit and rank.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self(suit as u8 * NUM_RANKS as u8 + rank as u8)
    }

    /// Card for an identifier, or `None` outside `0..36`.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < NUM_CARDS {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Numeric identifier.
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Identifier as a `usize`, for indexing per-card tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub fn suit(self) -> Suit {
        Suit::ALL[(self.0 / NUM_RANKS as u8) as usize]
    }

    #[must_use]
    pub fn rank(self) -> Rank {
        Rank::ALL[(self.0 % NUM_RANKS as u8) as usize]
    }

    /// Iterate over all 36 cards in id order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..NUM_CARDS as u8).map(Card)
    }

    /// Whether `self` covers `attack` when `trump` is the trump suit.
    ///
    /// A card covers an attack of its own suit with a strictly higher rank,
    /// and any non-trump attack when it is a trump itself. A card never
    /// covers itself.
    ///
    /// ```
    /// use durak_engine::core::{Card, Rank, Suit};
    ///
    /// let trump = Suit::Hearts;
    /// let six_spades = Card::new(Suit::Spades, Rank::Six);
    /// let ace_spades = Card::new(Suit::Spades, Rank::Ace);
    /// let six_hearts = Card::new(Suit::Hearts, Rank::Six);
    ///
    /// assert!(ace_spades.beats(six_spades, trump));
    /// assert!(six_hearts.beats(ace_spades, trump));
    /// assert!(!ace_spades.beats(six_hearts, trump));
    /// ```
    #[must_use]
    pub fn beats(self, attack: Card, trump: Suit) -> bool {
        let (def_suit, att_suit) = (self.suit(), attack.suit());
        if def_suit == att_suit {
            // Covers the trump-on-trump case as well.
            return self.rank() > attack.rank();
        }
        def_suit == trump
    }
}

impl TryFrom<u8> for Card {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Card::from_id(id).ok_or_else(|| format!("card id {id} out of range 0..{NUM_CARDS}"))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}
