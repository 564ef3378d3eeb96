//! Game configuration: deck source and ruleset.
//!
//! A game is configured once, before the first state is created. The
//! recognized string parameters mirror what a host framework passes in:
//!
//! | Name | Value |
//! |---|---|
//! | `init_deck` | comma-separated permutation of `0..36`; empty means "shuffle" |
//! | `rng_seed` | `u64` seed for the shuffle |
//! | `enable_transfer` | `true` / `false` |

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::error::{DurakError, Result};
use crate::zones::Deck;

/// Parameter name for a fixed deck order.
pub const PARAM_INIT_DECK: &str = "init_deck";

/// Parameter name for the shuffle seed.
pub const PARAM_RNG_SEED: &str = "rng_seed";

/// Parameter name for the transfer ruleset flag.
pub const PARAM_ENABLE_TRANSFER: &str = "enable_transfer";

/// Rule variant switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ruleset {
    /// Allow the defender to redirect an untouched attack (`Transfer`).
    pub enable_transfer: bool,
}

impl Ruleset {
    /// The base rules.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            enable_transfer: false,
        }
    }

    /// The rules with `Transfer`.
    #[must_use]
    pub const fn with_transfers() -> Self {
        Self {
            enable_transfer: true,
        }
    }
}

/// Where the deck order comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckSource {
    /// Identity order shuffled with a generator seeded by `seed`.
    Shuffled { seed: u64 },
    /// An explicit permutation, already validated.
    Fixed(Vec<Card>),
}

impl Default for DeckSource {
    fn default() -> Self {
        DeckSource::Shuffled { seed: 0 }
    }
}

/// Full game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurakConfig {
    /// Deck order source.
    pub deck: DeckSource,

    /// Rule variant.
    pub ruleset: Ruleset,
}

impl DurakConfig {
    /// Shuffle the deck with this seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.deck = DeckSource::Shuffled { seed };
        self
    }

    /// Use a fixed deck order given as comma-separated ids.
    ///
    /// An empty (or all-whitespace) string keeps the current source.
    pub fn with_init_deck(mut self, init_deck: &str) -> Result<Self> {
        if !init_deck.trim().is_empty() {
            self.deck = DeckSource::Fixed(Deck::parse(init_deck)?.order().to_vec());
        }
        Ok(self)
    }

    /// Choose the rule variant.
    #[must_use]
    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = ruleset;
        self
    }

    /// Build a configuration from host-framework string parameters.
    ///
    /// `init_deck` wins over `rng_seed` when both are present and the deck
    /// is non-empty. Unknown names are rejected.
    pub fn from_params(params: &FxHashMap<String, String>) -> Result<Self> {
        let mut config = DurakConfig::default();

        for name in params.keys() {
            if ![PARAM_INIT_DECK, PARAM_RNG_SEED, PARAM_ENABLE_TRANSFER].contains(&name.as_str()) {
                return Err(DurakError::invalid_parameter(name.as_str(), "unknown parameter"));
            }
        }

        if let Some(raw) = params.get(PARAM_RNG_SEED) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| DurakError::invalid_parameter(PARAM_RNG_SEED, e.to_string()))?;
            config = config.with_seed(seed);
        }

        if let Some(raw) = params.get(PARAM_ENABLE_TRANSFER) {
            let enable_transfer = raw
                .trim()
                .parse::<bool>()
                .map_err(|e| DurakError::invalid_parameter(PARAM_ENABLE_TRANSFER, e.to_string()))?;
            config.ruleset = Ruleset { enable_transfer };
        }

        if let Some(raw) = params.get(PARAM_INIT_DECK) {
            config = config.with_init_deck(raw)?;
        }

        Ok(config)
    }
}
