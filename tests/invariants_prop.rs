//! Property tests over random seeds and random legal rollouts.
//!
//! Every state reached by a rollout is checked for card conservation, role
//! distinctness, a non-empty legal set before the end, and a faithful
//! snapshot round trip.

use std::collections::HashSet;

use durak_engine::core::{
    Action, GameRng, GameState, Phase, PlayerId, StateSnapshot, Turn, NUM_CARDS,
};
use durak_engine::games::durak::DurakGame;
use durak_engine::rules::{GameResult, RulesEngine};
use proptest::prelude::*;

/// Step cap for random rollouts; random play ends long before this.
const ROLLOUT_CAP: usize = 10_000;

fn game(seed: u64, transfers: bool) -> DurakGame {
    DurakGame::builder().seed(seed).transfers(transfers).build().unwrap()
}

/// Play random legal actions to the end, calling `visit` on every state.
fn rollout(game: &DurakGame, rng_seed: u64, mut visit: impl FnMut(&GameState)) -> GameState {
    let mut rng = GameRng::new(rng_seed);
    let mut state = game.new_initial_state();
    visit(&state);
    for _ in 0..ROLLOUT_CAP {
        let legal = game.legal_actions(&state);
        let Some(&action) = rng.choose(&legal) else {
            break;
        };
        game.apply_action(&mut state, action).unwrap();
        visit(&state);
    }
    state
}

fn all_card_ids(state: &GameState) -> Vec<u8> {
    let mut ids: Vec<u8> = state.deck().remaining_cards().iter().map(|c| c.id()).collect();
    for player in PlayerId::ALL {
        ids.extend(state.hand(player).iter().map(|c| c.id()));
    }
    ids.extend(state.table().cards().map(|c| c.id()));
    ids.extend(state.discard().iter().map(|c| c.id()));
    ids
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    /// Every card is in exactly one place at every step.
    #[test]
    fn prop_cards_conserved(seed in any::<u64>(), rng_seed in any::<u64>(), transfers in any::<bool>()) {
        let game = game(seed, transfers);
        let mut failures = Vec::new();
        rollout(&game, rng_seed, |state| {
            let ids = all_card_ids(state);
            let unique: HashSet<u8> = ids.iter().copied().collect();
            if ids.len() != NUM_CARDS || unique.len() != NUM_CARDS {
                failures.push(state.to_string());
            }
        });
        prop_assert!(failures.is_empty(), "conservation broken:\n{}", failures.join("\n"));
    }

    /// Attacker and defender always differ.
    #[test]
    fn prop_roles_distinct(seed in any::<u64>(), rng_seed in any::<u64>(), transfers in any::<bool>()) {
        let game = game(seed, transfers);
        let mut clashes = 0;
        rollout(&game, rng_seed, |state| {
            if state.attacker() == state.defender() || state.check_invariants().is_err() {
                clashes += 1;
            }
        });
        prop_assert_eq!(clashes, 0);
    }

    /// Random play always reaches the end and nobody is ever stuck.
    #[test]
    fn prop_games_terminate(seed in any::<u64>(), rng_seed in any::<u64>(), transfers in any::<bool>()) {
        let game = game(seed, transfers);
        let mut stuck = 0;
        let end = rollout(&game, rng_seed, |state| {
            if !state.is_terminal() && game.legal_actions(state).is_empty() {
                stuck += 1;
            }
        });
        prop_assert_eq!(stuck, 0);
        prop_assert!(game.is_terminal(&end));
        prop_assert_eq!(game.current_turn(&end), Turn::Terminal);
    }

    /// Terminal returns are ±1 and sum to zero; earlier returns are zero.
    #[test]
    fn prop_returns_zero_sum(seed in any::<u64>(), rng_seed in any::<u64>(), transfers in any::<bool>()) {
        let game = game(seed, transfers);
        let mut early_nonzero = 0;
        let end = rollout(&game, rng_seed, |state| {
            if !state.is_terminal() && game.returns(state).as_array() != &[0.0, 0.0] {
                early_nonzero += 1;
            }
        });
        prop_assert_eq!(early_nonzero, 0);

        let returns = game.returns(&end);
        let [r0, r1] = *returns.as_array();
        prop_assert_eq!(r0 + r1, game.utility_sum());
        prop_assert_eq!(r0.abs(), 1.0);
        let Some(GameResult::Winner(winner)) = game.result(&end) else {
            return Err(TestCaseError::fail("terminal state without a result"));
        };
        prop_assert_eq!(returns[winner], 1.0);
        prop_assert_eq!(returns[winner.opponent()], -1.0);
    }

    /// Snapshots restore to an identical state, string and legal set, via
    /// bincode and JSON.
    #[test]
    fn prop_snapshot_round_trip(seed in any::<u64>(), rng_seed in any::<u64>(), transfers in any::<bool>()) {
        let game = game(seed, transfers);
        let mut mismatches = Vec::new();
        rollout(&game, rng_seed, |state| {
            let snapshot = state.snapshot();
            let bytes = snapshot.to_bytes().unwrap();
            let restored = game.restore_bytes(&bytes);
            match restored {
                Ok(restored) => {
                    if restored.to_string() != state.to_string()
                        || game.legal_actions(&restored) != game.legal_actions(state)
                        || &restored != state
                    {
                        mismatches.push(state.to_string());
                    }
                }
                Err(err) => mismatches.push(format!("{err}: {state}")),
            }

            let json = serde_json::to_string(&snapshot).unwrap();
            let back: StateSnapshot = serde_json::from_str(&json).unwrap();
            if back != snapshot {
                mismatches.push(format!("json: {state}"));
            }
        });
        prop_assert!(mismatches.is_empty(), "round trip failed:\n{}", mismatches.join("\n"));
    }

    /// Exploring a clone never changes the original.
    #[test]
    fn prop_clone_isolation(seed in any::<u64>(), rng_seed in any::<u64>(), steps in 0usize..120) {
        let game = game(seed, true);
        let mut rng = GameRng::new(rng_seed);
        let mut state = game.new_initial_state();
        for _ in 0..steps {
            let legal = game.legal_actions(&state);
            let Some(&action) = rng.choose(&legal) else { break };
            game.apply_action(&mut state, action).unwrap();
        }

        let original = state.clone();
        let display = state.to_string();
        let mut branch = state.clone();
        for _ in 0..ROLLOUT_CAP {
            let legal = game.legal_actions(&branch);
            let Some(&action) = rng.choose(&legal) else { break };
            game.apply_action(&mut branch, action).unwrap();
        }
        prop_assert!(game.is_terminal(&branch));

        prop_assert_eq!(&state, &original);
        prop_assert_eq!(state.to_string(), display);
    }

    /// Legal sets are strictly sorted by id.
    #[test]
    fn prop_legal_sets_sorted(seed in any::<u64>(), rng_seed in any::<u64>(), transfers in any::<bool>()) {
        let game = game(seed, transfers);
        let mut unsorted = 0;
        rollout(&game, rng_seed, |state| {
            let ids = game.legal_action_ids(state);
            if ids.windows(2).any(|w| w[0] >= w[1]) {
                unsorted += 1;
            }
            if state.phase() == Phase::Dealing && ids.len() != 1 {
                unsorted += 1;
            }
            if !transfers && game.legal_actions(state).contains(&Action::Transfer) {
                unsorted += 1;
            }
        });
        prop_assert_eq!(unsorted, 0);
    }
}
