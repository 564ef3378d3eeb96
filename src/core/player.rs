//! Player identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Durak here is strictly two-player, so a `PlayerId` is either seat 0 or
//! seat 1 and always has exactly one opponent.
//!
//! ## PlayerPair
//!
//! Fixed two-slot storage indexed by `PlayerId`. Backed by an array, so it is
//! `Copy` whenever `T` is.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table.
pub const NUM_PLAYERS: usize = 2;

/// Seat identifier, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// Seat 0, who receives the first dealt card.
    pub const FIRST: PlayerId = PlayerId(0);

    /// Seat 1.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Both seats in order.
    pub const ALL: [PlayerId; NUM_PLAYERS] = [PlayerId::FIRST, PlayerId::SECOND];

    /// Seat for a raw index, or `None` if it is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < NUM_PLAYERS {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PlayerId::new(id).ok_or_else(|| format!("player id {id} out of range 0..{NUM_PLAYERS}"))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who acts next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// A forced deck-driven step (dealing or the trump reveal).
    Chance,
    /// A seat must choose an action.
    Player(PlayerId),
    /// The game is over.
    Terminal,
}

impl Turn {
    /// The acting seat, if a player is to move.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Turn::Player(p) => Some(p),
            Turn::Chance | Turn::Terminal => None,
        }
    }
}

/// Per-seat storage with O(1) access.
///
/// ```
/// use durak_engine::core::{PlayerId, PlayerPair};
///
/// let mut taken = PlayerPair::new(|_| 0u32);
/// taken[PlayerId::SECOND] += 3;
/// assert_eq!(taken[PlayerId::FIRST], 0);
/// assert_eq!(taken[PlayerId::SECOND], 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; NUM_PLAYERS],
}

impl<T> PlayerPair<T> {
    /// Create a pair with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::ALL.map(factory),
        }
    }

    /// Create a pair from explicit values for seat 0 and seat 1.
    pub fn from_array(data: [T; NUM_PLAYERS]) -> Self {
        Self { data }
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &[T; NUM_PLAYERS] {
        &self.data
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Apply `f` to both slots.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PlayerPair<U> {
        PlayerPair {
            data: self.data.map(f),
        }
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
