//! Action representation and its numeric identifier space.
//!
//! Ids `0..36` name a card (played by a seat, or dealt/revealed at a chance
//! step). The non-card actions follow:
//!
//! | Action | Id |
//! |---|---|
//! | `TakeCards` | 36 |
//! | `FinishAttack` | 37 |
//! | `FinishDefense` | 38 |
//! | `Transfer` | 39 (transfer ruleset only) |
//!
//! The derived ordering of `Action` matches id order, so sorting a list of
//! actions sorts it by id with the non-card actions after every card.

use serde::{Deserialize, Serialize};

use super::card::{Card, NUM_CARDS};
use super::player::Turn;

/// Id of `TakeCards`.
pub const TAKE_CARDS_ID: u8 = NUM_CARDS as u8;

/// Id of `FinishAttack`.
pub const FINISH_ATTACK_ID: u8 = NUM_CARDS as u8 + 1;

/// Id of `FinishDefense`.
pub const FINISH_DEFENSE_ID: u8 = NUM_CARDS as u8 + 2;

/// Id of `Transfer`.
pub const TRANSFER_ID: u8 = NUM_CARDS as u8 + 3;

/// A complete game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Action {
    /// Play this card, or the outcome of a chance step.
    Card(Card),
    /// Defender picks up every card on the table.
    TakeCards,
    /// Attacker stops adding cards and hands the turn to the defender.
    FinishAttack,
    /// Defender ends the round: discards if everything is covered, takes otherwise.
    FinishDefense,
    /// Defender redirects the attack by swapping roles.
    Transfer,
}

impl Action {
    /// Numeric identifier.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Action::Card(card) => card.id(),
            Action::TakeCards => TAKE_CARDS_ID,
            Action::FinishAttack => FINISH_ATTACK_ID,
            Action::FinishDefense => FINISH_DEFENSE_ID,
            Action::Transfer => TRANSFER_ID,
        }
    }

    /// Action for a numeric identifier, or `None` outside `0..=39`.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            TAKE_CARDS_ID => Some(Action::TakeCards),
            FINISH_ATTACK_ID => Some(Action::FinishAttack),
            FINISH_DEFENSE_ID => Some(Action::FinishDefense),
            TRANSFER_ID => Some(Action::Transfer),
            _ => match Card::from_id(id) {
                Some(card) => Some(Action::Card(card)),
                None => None,
            },
        }
    }

    /// The card carried by this action, if any.
    #[must_use]
    pub const fn card(self) -> Option<Card> {
        match self {
            Action::Card(card) => Some(card),
            _ => None,
        }
    }

    /// Human-readable name for any raw id, including ids outside the space.
    ///
    /// ```
    /// use durak_engine::core::Action;
    ///
    /// assert_eq!(Action::describe_id(0), "Play:6♠");
    /// assert_eq!(Action::describe_id(37), "FINISH_ATTACK");
    /// assert_eq!(Action::describe_id(77), "UnknownAction(77)");
    /// ```
    #[must_use]
    pub fn describe_id(id: u32) -> String {
        u8::try_from(id)
            .ok()
            .and_then(Action::from_id)
            .map_or_else(|| format!("UnknownAction({id})"), |a| a.to_string())
    }
}

impl From<Card> for Action {
    fn from(card: Card) -> Self {
        Action::Card(card)
    }
}

impl TryFrom<u8> for Action {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Action::from_id(id).ok_or_else(|| format!("action id {id} out of range"))
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        action.id()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Card(card) => write!(f, "Play:{card}"),
            Action::TakeCards => f.write_str("TAKE_CARDS"),
            Action::FinishAttack => f.write_str("FINISH_ATTACK"),
            Action::FinishDefense => f.write_str("FINISH_DEFENSE"),
            Action::Transfer => f.write_str("TRANSFER"),
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay of a game from its initial state
/// - Debugging and training data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who acted (`Turn::Chance` for deals and the trump reveal).
    pub turn: Turn,

    /// The action taken.
    pub action: Action,

    /// Position in the game's action sequence, from 0.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(turn: Turn, action: Action, sequence: u32) -> Self {
        Self {
            turn,
            action,
            sequence,
        }
    }
}
