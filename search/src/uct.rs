use anyhow::{anyhow, Result};
use common::{create_rng_from_seed, TranspositionHash};
use engine::{GameEngine, GameState};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use slideshow::{Slide, SlideshowEngine};

use crate::{random_playout, Sequencer, TranspositionEntry, TranspositionTable, UctOptions};

/// Monte-Carlo tree search over a transposition table. Statistics are keyed by the state
/// hash alone, so every state that hashes the same shares one entry.
pub struct Uct<'e, E> {
    engine: &'e E,
    exploration: f64,
}

impl<'e, E> Uct<'e, E>
where
    E: GameEngine,
    E::State: TranspositionHash,
{
    pub fn new(engine: &'e E, exploration: f64) -> Self {
        Self { engine, exploration }
    }

    /// Runs one simulation from `state` and returns the score of the final state it reached.
    ///
    /// A state seen for the first time gets an empty entry and a random playout. A known
    /// state descends into the move with the highest UCB1 value and records the result
    /// against that move.
    pub fn simulate<R: Rng>(
        &self,
        state: E::State,
        table: &mut TranspositionTable,
        rng: &mut R,
    ) -> Result<f64> {
        if self.engine.is_terminal_state(&state) {
            return Ok(state.score() as f64);
        }

        let hash = state.transposition_hash();
        let legal_actions = self.engine.legal_actions(&state);

        let index = match table.get(hash) {
            Some(entry) => entry
                .select(legal_actions.len(), self.exploration)
                .ok_or_else(|| anyhow!("No legal action from a non terminal state"))?,
            None => {
                table.insert(hash, TranspositionEntry::new(legal_actions.len()));
                let ending = random_playout(self.engine, state, rng)?;
                return Ok(ending.score() as f64);
            }
        };

        let action = legal_actions[index];
        let child = self.engine.take_action(&state, &action)?;
        let reward = self.simulate(child, table, rng)?;

        table.record(hash, index, reward);

        Ok(reward)
    }

    /// Runs `simulations` simulations from `state` with a fresh table and returns the most
    /// visited move along with its mean reward.
    pub fn best_move<R: Rng>(
        &self,
        state: &E::State,
        simulations: usize,
        rng: &mut R,
    ) -> Result<(E::Action, f64)> {
        let mut table = TranspositionTable::new();

        for _ in 0..simulations {
            self.simulate(state.clone(), &mut table, rng)?;
        }

        let legal_actions = self.engine.legal_actions(state);
        let entry = table.get(state.transposition_hash());
        let index = entry
            .and_then(|entry| entry.most_visited(legal_actions.len()))
            .unwrap_or(0);
        let action = *legal_actions
            .get(index)
            .ok_or_else(|| anyhow!("No legal action from a non terminal state"))?;
        let mean_reward = entry.map_or(0.0, |entry| entry.mean_reward(index));

        Ok((action, mean_reward))
    }

    /// Plays a full game, spending `simulations` simulations on every move.
    pub fn search<R: Rng>(&self, simulations: usize, rng: &mut R) -> Result<E::State> {
        let mut state = self.engine.initial_state();

        while !self.engine.is_terminal_state(&state) {
            let (action, mean_reward) = self.best_move(&state, simulations, rng)?;

            debug!(
                "Move {}: {:?}, mean reward {:.2}",
                self.engine.move_number(&state),
                action,
                mean_reward
            );

            self.engine.play(&mut state, &action)?;
        }

        Ok(state)
    }
}

pub struct UctSequencer {
    options: UctOptions,
    rng: StdRng,
}

impl UctSequencer {
    pub fn new(options: UctOptions, seed: u64) -> Self {
        Self {
            options,
            rng: create_rng_from_seed(seed),
        }
    }
}

impl Sequencer for UctSequencer {
    fn name(&self) -> &'static str {
        "uct"
    }

    fn sequence(&mut self, slides: &[Slide]) -> Result<Vec<usize>> {
        let engine = SlideshowEngine::new(slides, self.options.max_candidates);
        let uct = Uct::new(&engine, self.options.exploration);

        let state = uct.search(self.options.simulations, &mut self.rng)?;

        Ok(state.actions_taken().to_vec())
    }
}
