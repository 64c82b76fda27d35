use anyhow::{anyhow, Result};
use common::create_rng_from_seed;
use engine::{GameEngine, GameState};
use rand::rngs::StdRng;
use rand::Rng;
use slideshow::{Slide, SlideshowEngine};

use crate::{random_playout, NestedOptions, Sequencer};

/// Nested Monte-Carlo Search. A level `n` search evaluates every legal action with a level
/// `n - 1` search, commits the first action of the best sequence found so far and repeats
/// until the game is over. Level 0 is a uniformly random playout.
pub struct NestedMonteCarlo<'e, E> {
    engine: &'e E,
}

impl<'e, E> NestedMonteCarlo<'e, E>
where
    E: GameEngine,
{
    pub fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    pub fn search<R: Rng>(&self, mut state: E::State, level: usize, rng: &mut R) -> Result<E::State> {
        if level == 0 {
            return random_playout(self.engine, state, rng);
        }

        let mut best: Option<E::State> = None;

        while !self.engine.is_terminal_state(&state) {
            for action in self.engine.legal_actions(&state) {
                let child = self.engine.take_action(&state, action)?;
                let ending = self.search(child, level - 1, rng)?;

                if best.as_ref().map_or(true, |b| ending.score() > b.score()) {
                    best = Some(ending);
                }
            }

            let best_ending = best
                .as_ref()
                .ok_or_else(|| anyhow!("No legal action from a non terminal state"))?;
            let move_number = self.engine.move_number(&state);
            let action = *best_ending
                .actions_taken()
                .get(move_number)
                .ok_or_else(|| anyhow!("Best sequence ends before move {}", move_number))?;

            self.engine.play(&mut state, &action)?;
        }

        Ok(state)
    }
}

pub struct NestedSequencer {
    options: NestedOptions,
    rng: StdRng,
}

impl NestedSequencer {
    pub fn new(options: NestedOptions, seed: u64) -> Self {
        Self {
            options,
            rng: create_rng_from_seed(seed),
        }
    }
}

impl Sequencer for NestedSequencer {
    fn name(&self) -> &'static str {
        "nested"
    }

    fn sequence(&mut self, slides: &[Slide]) -> Result<Vec<usize>> {
        let engine = SlideshowEngine::new(slides, self.options.max_candidates);
        let nested = NestedMonteCarlo::new(&engine);

        let state = nested.search(engine.initial_state(), self.options.level, &mut self.rng)?;

        Ok(state.actions_taken().to_vec())
    }
}
