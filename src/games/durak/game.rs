//! `DurakGame`: configuration, metadata and the `RulesEngine` implementation.

use rustc_hash::FxHashMap;

use crate::core::{
    Action, DeckSource, DurakConfig, DurakError, GameRng, GameState, PlayerPair, Result, Ruleset,
    StateSnapshot, TRANSFER_ID,
};
use crate::rules::{GameResult, RulesEngine};
use crate::zones::Deck;

use super::{dealer, legal, resolution, scoring};

/// Game length hint reported to hosts, chance steps included.
pub const MAX_GAME_LENGTH: usize = 300;

/// A configured Durak game.
///
/// The deck order is fixed when the game is built, so every
/// `new_initial_state` starts from the same permutation.
#[derive(Clone, Debug)]
pub struct DurakGame {
    config: DurakConfig,
    deck: Deck,
}

/// Builder for creating a `DurakGame`.
///
/// ```
/// use durak_engine::games::durak::DurakGameBuilder;
/// use durak_engine::rules::RulesEngine;
///
/// let game = DurakGameBuilder::new().seed(7).transfers(true).build().unwrap();
/// assert_eq!(game.num_distinct_actions(), 40);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DurakGameBuilder {
    seed: u64,
    init_deck: Option<String>,
    ruleset: Ruleset,
}

impl DurakGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuffle seed, used when no deck order is given.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fixed deck order as comma-separated card ids.
    pub fn init_deck(mut self, init_deck: impl Into<String>) -> Self {
        self.init_deck = Some(init_deck.into());
        self
    }

    pub fn transfers(mut self, enable: bool) -> Self {
        self.ruleset.enable_transfer = enable;
        self
    }

    /// Build the game. Fails if the deck order is malformed.
    pub fn build(self) -> Result<DurakGame> {
        let mut config = DurakConfig::default()
            .with_seed(self.seed)
            .with_ruleset(self.ruleset);
        if let Some(init_deck) = &self.init_deck {
            config = config.with_init_deck(init_deck)?;
        }
        DurakGame::new(config)
    }
}

impl DurakGame {
    /// Create a game, building its deck order up front.
    pub fn new(config: DurakConfig) -> Result<Self> {
        let deck = match &config.deck {
            DeckSource::Shuffled { seed } => Deck::shuffled(&mut GameRng::new(*seed)),
            DeckSource::Fixed(order) => Deck::from_order(order)?,
        };
        Ok(Self { config, deck })
    }

    /// Create a game from host-framework string parameters.
    pub fn from_params(params: &FxHashMap<String, String>) -> Result<Self> {
        Self::new(DurakConfig::from_params(params)?)
    }

    pub fn builder() -> DurakGameBuilder {
        DurakGameBuilder::new()
    }

    #[must_use]
    pub fn config(&self) -> &DurakConfig {
        &self.config
    }

    #[must_use]
    pub fn ruleset(&self) -> Ruleset {
        self.config.ruleset
    }

    /// The deck permutation every new state starts from.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    // === Metadata ===

    /// Most outcomes a chance node can have over the game (one per card id).
    #[must_use]
    pub fn max_chance_outcomes(&self) -> usize {
        crate::core::NUM_CARDS
    }

    #[must_use]
    pub fn max_game_length(&self) -> usize {
        MAX_GAME_LENGTH
    }

    #[must_use]
    pub fn min_utility(&self) -> f64 {
        -1.0
    }

    #[must_use]
    pub fn max_utility(&self) -> f64 {
        1.0
    }

    /// Returns always sum to this at a terminal state.
    #[must_use]
    pub fn utility_sum(&self) -> f64 {
        0.0
    }

    /// Rebuild a state from a snapshot taken under this game's ruleset.
    pub fn restore(&self, snapshot: &StateSnapshot) -> Result<GameState> {
        let transferred = snapshot.history.iter().any(|r| r.action == Action::Transfer);
        if transferred && !self.ruleset().enable_transfer {
            return Err(DurakError::corrupt("transfer in history with transfers disabled"));
        }
        GameState::from_snapshot(snapshot)
    }

    /// Decode and rebuild a state from `StateSnapshot::to_bytes` output.
    pub fn restore_bytes(&self, bytes: &[u8]) -> Result<GameState> {
        self.restore(&StateSnapshot::from_bytes(bytes)?)
    }
}

impl RulesEngine for DurakGame {
    fn new_initial_state(&self) -> GameState {
        GameState::new(self.deck)
    }

    fn chance_outcomes(&self, state: &GameState) -> Vec<(Action, f64)> {
        dealer::chance_outcomes(state)
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        legal::legal_actions(state, self.ruleset())
    }

    fn apply_action(&self, state: &mut GameState, action: Action) -> Result<()> {
        resolution::apply_action(state, self.ruleset(), action)
    }

    fn result(&self, state: &GameState) -> Option<GameResult> {
        scoring::result(state)
    }

    fn returns(&self, state: &GameState) -> PlayerPair<f64> {
        scoring::returns(state)
    }

    fn num_distinct_actions(&self) -> usize {
        if self.ruleset().enable_transfer {
            TRANSFER_ID as usize + 1
        } else {
            TRANSFER_ID as usize
        }
    }

    fn apply_action_id(&self, state: &mut GameState, id: u32) -> Result<()> {
        if id as usize >= self.num_distinct_actions() {
            return Err(DurakError::UnknownActionId { id });
        }
        let action = u8::try_from(id)
            .ok()
            .and_then(Action::from_id)
            .ok_or(DurakError::UnknownActionId { id })?;
        self.apply_action(state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, PlayerId, Turn};

    fn identity_deck() -> String {
        (0..36).map(|i| i.to_string()).collect::<Vec<_>>().join(",")
    }

    fn deal_out(game: &DurakGame, state: &mut GameState) {
        while let Some(&(action, _)) = game.chance_outcomes(state).first() {
            game.apply_action(state, action).unwrap();
        }
    }

    #[test]
    fn test_game_creation() {
        let game = DurakGame::builder().seed(42).build().unwrap();
        let state = game.new_initial_state();

        assert_eq!(state.phase(), Phase::Dealing);
        assert_eq!(game.current_turn(&state), Turn::Chance);
        assert_eq!(game.num_distinct_actions(), 39);
        assert_eq!(game.max_chance_outcomes(), 36);
        assert_eq!(game.max_game_length(), 300);
        assert_eq!(game.min_utility() + game.max_utility(), game.utility_sum());
    }

    #[test]
    fn test_same_seed_same_deck() {
        let a = DurakGame::builder().seed(9).build().unwrap();
        let b = DurakGame::builder().seed(9).build().unwrap();
        assert_eq!(a.deck(), b.deck());
        assert_eq!(a.new_initial_state(), a.new_initial_state());
    }

    #[test]
    fn test_init_deck_overrides_seed() {
        let game = DurakGame::builder().seed(9).init_deck(identity_deck()).build().unwrap();
        assert_eq!(game.deck().bottom().id(), 35);
        assert_eq!(game.deck().peek().map(|c| c.id()), Some(0));
    }

    #[test]
    fn test_empty_init_deck_shuffles() {
        let a = DurakGame::builder().seed(9).init_deck("").build().unwrap();
        let b = DurakGame::builder().seed(9).build().unwrap();
        assert_eq!(a.deck(), b.deck());
    }

    #[test]
    fn test_malformed_deck_fails_at_build() {
        let err = DurakGame::builder().init_deck("0,1,2").build().unwrap_err();
        assert!(matches!(err, DurakError::MalformedDeckConfig { .. }));
    }

    #[test]
    fn test_deal_out_reaches_attack() {
        let game = DurakGame::builder().init_deck(identity_deck()).build().unwrap();
        let mut state = game.new_initial_state();
        deal_out(&game, &mut state);

        assert_eq!(state.phase(), Phase::Attack);
        assert_eq!(state.history().len(), 13);
        // Identity deck: hearts trump, nobody holds one, seat 0 attacks.
        assert_eq!(state.attacker(), PlayerId::FIRST);
        assert_eq!(game.current_turn(&state), Turn::Player(PlayerId::FIRST));
    }

    #[test]
    fn test_apply_action_id_bounds() {
        let game = DurakGame::builder().seed(1).build().unwrap();
        let mut state = game.new_initial_state();
        assert_eq!(
            game.apply_action_id(&mut state, 39),
            Err(DurakError::UnknownActionId { id: 39 })
        );
        assert_eq!(
            game.apply_action_id(&mut state, 1000),
            Err(DurakError::UnknownActionId { id: 1000 })
        );
    }

    #[test]
    fn test_wrong_chance_outcome_rejected() {
        let game = DurakGame::builder().init_deck(identity_deck()).build().unwrap();
        let mut state = game.new_initial_state();
        let err = game.apply_action_id(&mut state, 5).unwrap_err();
        assert!(matches!(err, DurakError::InvalidAction { phase: Phase::Dealing, .. }));
        assert_eq!(state.cards_dealt(), 0);
    }

    #[test]
    fn test_undo_unsupported() {
        let game = DurakGame::builder().build().unwrap();
        let mut state = game.new_initial_state();
        let err = game.undo_action(&mut state, Action::TakeCards).unwrap_err();
        assert_eq!(err, DurakError::UnsupportedOperation { operation: "undo_action" });
    }

    #[test]
    fn test_action_to_string() {
        let game = DurakGame::builder().build().unwrap();
        assert_eq!(game.action_to_string(36), "TAKE_CARDS");
        assert_eq!(game.action_to_string(39), "TRANSFER");
        assert_eq!(game.action_to_string(13), "Play:10♣");
        assert_eq!(game.action_to_string(40), "UnknownAction(40)");
    }

    #[test]
    fn test_restore_rejects_transfer_without_variant() {
        let with = DurakGame::builder().init_deck(identity_deck()).transfers(true).build().unwrap();
        let without = DurakGame::builder().init_deck(identity_deck()).build().unwrap();

        let mut state = with.new_initial_state();
        deal_out(&with, &mut state);
        // Seat 0 holds 6♠ 8♠ 10♠ Q♠ A♠ 7♣; seat 1 holds 7♠ 9♠ J♠ K♠ 6♣ 8♣.
        with.apply_action(&mut state, Action::Card(crate::core::Card::from_id(0).unwrap()))
            .unwrap();
        with.apply_action(&mut state, Action::FinishAttack).unwrap();
        with.apply_action(&mut state, Action::Transfer).unwrap();

        let snapshot = state.snapshot();
        assert!(with.restore(&snapshot).is_ok());
        assert!(without.restore(&snapshot).is_err());
    }

    #[test]
    fn test_from_params() {
        let params: FxHashMap<String, String> = [
            ("init_deck".to_string(), identity_deck()),
            ("enable_transfer".to_string(), "true".to_string()),
        ]
        .into_iter()
        .collect();
        let game = DurakGame::from_params(&params).unwrap();
        assert_eq!(game.num_distinct_actions(), 40);
        assert_eq!(game.deck().bottom().id(), 35);

        let params: FxHashMap<String, String> =
            [("rng_seed".to_string(), "x".to_string())].into_iter().collect();
        assert!(matches!(
            DurakGame::from_params(&params),
            Err(DurakError::InvalidParameter { .. })
        ));
    }
}
