use anyhow::Result;
use common::create_rng_from_seed;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use slideshow::{order_score, Slide};

use crate::{RandomOptions, Sequencer};

/// Baseline: the best of several uniformly shuffled orderings.
pub struct RandomSequencer {
    options: RandomOptions,
    rng: StdRng,
}

impl RandomSequencer {
    pub fn new(options: RandomOptions, seed: u64) -> Self {
        Self {
            options,
            rng: create_rng_from_seed(seed),
        }
    }
}

impl Sequencer for RandomSequencer {
    fn name(&self) -> &'static str {
        "random"
    }

    fn sequence(&mut self, slides: &[Slide]) -> Result<Vec<usize>> {
        let mut order = (0..slides.len()).collect::<Vec<_>>();

        if slides.is_empty() {
            return Ok(order);
        }

        let mut best: Option<(usize, Vec<usize>)> = None;

        for iteration in 0..self.options.iterations {
            order.shuffle(&mut self.rng);
            let score = order_score(slides, &order)?;
            debug!("Shuffle {} scored {}", iteration, score);

            if best.as_ref().map_or(true, |(best_score, _)| score > *best_score) {
                best = Some((score, order.clone()));
            }
        }

        Ok(best.map_or(order, |(_, best_order)| best_order))
    }
}
