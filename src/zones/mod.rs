//! Card locations that have structure of their own.
//!
//! - `Deck`: the dealt-from permutation and its cursor
//! - `Table`: attack/defence pairs in play order
//!
//! Hands and the discard pile are plain collections on `GameState`.

pub mod deck;
pub mod table;

pub use deck::Deck;
pub use table::{Table, TableEntry, MAX_TABLE_ENTRIES};
