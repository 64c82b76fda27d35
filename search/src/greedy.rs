use anyhow::{anyhow, Result};
use common::create_rng_from_seed;
use rand::rngs::StdRng;
use rand::Rng;
use slideshow::{pair_score, Slide, UnplacedSet};

use crate::{construct_order, first_max, GreedyOptions, MoveProposer, Sequencer};

/// Picks the candidate that scores best against the last placed slide.
pub struct Greedy;

impl MoveProposer for Greedy {
    fn propose<R: Rng>(
        &mut self,
        slides: &[Slide],
        placed: &[usize],
        candidates: &[usize],
        _: &UnplacedSet,
        _: &mut R,
    ) -> Result<usize> {
        let last = &slides[*placed
            .last()
            .ok_or_else(|| anyhow!("Greedy needs a slide to extend"))?];

        let index = first_max(candidates.iter().map(|&id| pair_score(last, &slides[id])))
            .ok_or_else(|| anyhow!("Greedy needs at least one candidate"))?;

        Ok(candidates[index])
    }
}

pub struct GreedySequencer {
    options: GreedyOptions,
    rng: StdRng,
}

impl GreedySequencer {
    pub fn new(options: GreedyOptions, seed: u64) -> Self {
        Self {
            options,
            rng: create_rng_from_seed(seed),
        }
    }
}

impl Sequencer for GreedySequencer {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn sequence(&mut self, slides: &[Slide]) -> Result<Vec<usize>> {
        construct_order(slides, &mut Greedy, self.options.max_candidates, &mut self.rng)
    }
}
