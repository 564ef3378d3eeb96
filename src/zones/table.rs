//! The table: attacking cards in play order, each optionally covered.
//!
//! Play order matters. The defender always answers the earliest uncovered
//! entry, so entries are never reordered while a round is in progress.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::card::{Card, Rank};

/// Most attacking cards a single round may hold.
pub const MAX_TABLE_ENTRIES: usize = 6;

/// One attacking card and, once answered, the card that covers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableEntry {
    pub attack: Card,
    pub defense: Option<Card>,
}

impl TableEntry {
    /// A fresh, uncovered entry.
    #[must_use]
    pub fn uncovered(attack: Card) -> Self {
        Self {
            attack,
            defense: None,
        }
    }

    #[must_use]
    pub fn is_covered(&self) -> bool {
        self.defense.is_some()
    }

    /// The attacking card followed by the defending card, if any.
    pub fn cards(&self) -> impl Iterator<Item = Card> {
        std::iter::once(self.attack).chain(self.defense)
    }
}

impl std::fmt::Display for TableEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.defense {
            Some(defense) => write!(f, "{}->{}", self.attack, defense),
            None => write!(f, "{}->?", self.attack),
        }
    }
}

/// Ordered table entries.
///
/// ```
/// use durak_engine::core::Card;
/// use durak_engine::zones::Table;
///
/// let mut table = Table::new();
/// table.push_attack(Card::from_id(0).unwrap());
/// table.push_attack(Card::from_id(9).unwrap());
/// assert_eq!(table.earliest_uncovered(), Some(0));
///
/// table.cover_earliest(Card::from_id(1).unwrap());
/// assert_eq!(table.earliest_uncovered(), Some(1));
/// assert!(!table.all_covered());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    entries: SmallVec<[TableEntry; MAX_TABLE_ENTRIES]>,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a table from stored entries.
    #[must_use]
    pub fn from_entries(entries: &[TableEntry]) -> Self {
        Self {
            entries: SmallVec::from_slice(entries),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in play order.
    #[must_use]
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Index of the first entry without a defending card.
    #[must_use]
    pub fn earliest_uncovered(&self) -> Option<usize> {
        self.entries.iter().position(|e| !e.is_covered())
    }

    /// The attacking card the defender must answer next.
    #[must_use]
    pub fn next_to_cover(&self) -> Option<Card> {
        self.earliest_uncovered().map(|i| self.entries[i].attack)
    }

    /// True when every entry is covered (vacuously true for an empty table).
    #[must_use]
    pub fn all_covered(&self) -> bool {
        self.entries.iter().all(TableEntry::is_covered)
    }

    #[must_use]
    pub fn any_covered(&self) -> bool {
        self.entries.iter().any(TableEntry::is_covered)
    }

    #[must_use]
    pub fn uncovered_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_covered()).count()
    }

    /// Ranks on the table, attacking and defending sides combined, with
    /// repetitions.
    #[must_use]
    pub fn ranks(&self) -> SmallVec<[Rank; 2 * MAX_TABLE_ENTRIES]> {
        self.cards().map(Card::rank).collect()
    }

    /// Whether any card on the table (either side) has this rank.
    #[must_use]
    pub fn contains_rank(&self, rank: Rank) -> bool {
        self.cards().any(|c| c.rank() == rank)
    }

    /// Whether any attacking card has this rank.
    #[must_use]
    pub fn attack_contains_rank(&self, rank: Rank) -> bool {
        self.entries.iter().any(|e| e.attack.rank() == rank)
    }

    /// Every card on the table, in entry order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.entries.iter().flat_map(TableEntry::cards)
    }

    /// Append a new uncovered entry.
    pub fn push_attack(&mut self, card: Card) {
        self.entries.push(TableEntry::uncovered(card));
    }

    /// Cover the earliest uncovered entry with `card`.
    ///
    /// Returns the covered index, or `None` if nothing was uncovered.
    pub fn cover_earliest(&mut self, card: Card) -> Option<usize> {
        let index = self.earliest_uncovered()?;
        self.entries[index].defense = Some(card);
        Some(index)
    }

    /// Remove every card from the table, returning them in entry order.
    pub fn clear(&mut self) -> SmallVec<[Card; 2 * MAX_TABLE_ENTRIES]> {
        let cards = self.cards().collect();
        self.entries.clear();
        cards
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            write!(f, "{entry}  ")?;
        }
        Ok(())
    }
}
