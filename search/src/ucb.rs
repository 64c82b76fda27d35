use anyhow::{anyhow, Result};
use common::create_rng_from_seed;
use itertools::Itertools;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use slideshow::{pair_score, Slide, UnplacedSet};

use crate::{construct_order, first_max, ucb1, MoveProposer, Sequencer, UcbOptions};

#[derive(Clone, Debug, Default)]
struct ArmStats {
    visits: usize,
    total_reward: f64,
}

impl ArmStats {
    fn record(&mut self, reward: usize) {
        self.visits += 1;
        self.total_reward += reward as f64;
    }

    fn mean(&self) -> f64 {
        common::div_or_zero(self.total_reward, self.visits as f64)
    }
}

/// The arm that was played most often, whatever its mean reward.
fn most_visited(arms: &[ArmStats]) -> Option<usize> {
    first_max(arms.iter().map(|arm| arm.visits))
}

/// Treats every candidate as an arm of a bandit. Each trial plays the arm with the highest
/// UCB1 value and rewards it with its transition score plus a short random rollout over the
/// unplaced slides. The most visited arm is proposed.
pub struct Ucb {
    simulations: usize,
    exploration: f64,
    rollout_length: usize,
}

impl Ucb {
    pub fn new(simulations: usize, exploration: f64, rollout_length: usize) -> Self {
        Self {
            simulations,
            exploration,
            rollout_length,
        }
    }

    fn rollout<R: Rng>(
        &self,
        slides: &[Slide],
        start: usize,
        unplaced: &UnplacedSet,
        rng: &mut R,
    ) -> usize {
        let sample = unplaced.sample_excluding(start, self.rollout_length, rng);

        std::iter::once(start)
            .chain(sample)
            .tuple_windows()
            .map(|(a, b)| pair_score(&slides[a], &slides[b]))
            .sum()
    }
}

impl MoveProposer for Ucb {
    fn propose<R: Rng>(
        &mut self,
        slides: &[Slide],
        placed: &[usize],
        candidates: &[usize],
        unplaced: &UnplacedSet,
        rng: &mut R,
    ) -> Result<usize> {
        let current = &slides[*placed
            .last()
            .ok_or_else(|| anyhow!("UCB needs a slide to extend"))?];

        let mut arms = vec![ArmStats::default(); candidates.len()];

        for trial in 1..=self.simulations {
            let index = first_max(
                arms.iter()
                    .map(|arm| ucb1(arm.total_reward, arm.visits, trial, self.exploration)),
            )
            .ok_or_else(|| anyhow!("UCB needs at least one candidate"))?;

            let arm = candidates[index];
            let reward = pair_score(current, &slides[arm]) + self.rollout(slides, arm, unplaced, rng);

            arms[index].record(reward);
        }

        let index = most_visited(&arms)
            .ok_or_else(|| anyhow!("UCB needs at least one candidate"))?;

        debug!(
            "Slide {} after {} visits, mean reward {:.2}",
            candidates[index], arms[index].visits, arms[index].mean()
        );

        Ok(candidates[index])
    }
}

pub struct UcbSequencer {
    options: UcbOptions,
    rng: StdRng,
}

impl UcbSequencer {
    pub fn new(options: UcbOptions, seed: u64) -> Self {
        Self {
            options,
            rng: create_rng_from_seed(seed),
        }
    }
}

impl Sequencer for UcbSequencer {
    fn name(&self) -> &'static str {
        "ucb"
    }

    fn sequence(&mut self, slides: &[Slide]) -> Result<Vec<usize>> {
        let mut ucb = Ucb::new(
            self.options.simulations,
            self.options.exploration,
            self.options.rollout_length,
        );

        construct_order(slides, &mut ucb, self.options.max_candidates, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slideshow::{Orientation, Photo};

    fn slide(id: usize, tags: &[&str]) -> Slide {
        Slide::horizontal(id, Photo::new(id, Orientation::Horizontal, tags.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_candidate_is_proposed() {
        let slides = vec![slide(0, &["a", "b"]), slide(1, &["b", "c"])];
        let mut unplaced = UnplacedSet::full(2);
        unplaced.remove(0);
        let mut rng = create_rng_from_seed(1);

        let proposed = Ucb::new(10, 0.7, 10)
            .propose(&slides, &[0], &[1], &unplaced, &mut rng)
            .unwrap();

        assert_eq!(proposed, 1);
    }

    #[test]
    fn test_prefers_clearly_better_arm() {
        let slides = vec![
            slide(0, &["a", "b", "c", "d"]),
            slide(1, &["x", "y", "z", "w"]),
            slide(2, &["c", "d", "e", "f"]),
        ];
        let mut unplaced = UnplacedSet::full(3);
        unplaced.remove(0);
        let mut rng = create_rng_from_seed(1);

        let proposed = Ucb::new(50, 0.7, 0)
            .propose(&slides, &[0], &[1, 2], &unplaced, &mut rng)
            .unwrap();

        assert_eq!(proposed, 2);
    }

    #[test]
    fn test_most_visited_arm_beats_higher_mean() {
        let mut steady = ArmStats::default();
        for _ in 0..3 {
            steady.record(1);
        }
        let mut lucky = ArmStats::default();
        lucky.record(9);

        let arms = vec![lucky, steady];

        assert!(arms[0].mean() > arms[1].mean());
        assert_eq!(most_visited(&arms), Some(1));
    }

    #[test]
    fn test_equal_visits_propose_first_arm_over_higher_mean() {
        let slides = vec![
            slide(0, &["a", "b", "c", "d"]),
            slide(1, &["x", "y", "z", "w"]),
            slide(2, &["c", "d", "e", "f"]),
        ];
        let mut unplaced = UnplacedSet::full(3);
        unplaced.remove(0);
        let mut rng = create_rng_from_seed(1);

        // Two trials play each arm once. Arm 2 earns 2, arm 1 earns 0, and the visit
        // counts tie, so the earlier arm is proposed.
        let proposed = Ucb::new(2, 100.0, 0)
            .propose(&slides, &[0], &[1, 2], &unplaced, &mut rng)
            .unwrap();

        assert_eq!(proposed, 1);
    }

    #[test]
    fn test_rollout_is_bounded_by_sample() {
        let slides = vec![
            slide(0, &["a", "b"]),
            slide(1, &["b", "c"]),
            slide(2, &["c", "d"]),
        ];
        let unplaced = UnplacedSet::full(3);
        let mut rng = create_rng_from_seed(4);
        let ucb = Ucb::new(1, 0.7, 0);

        assert_eq!(ucb.rollout(&slides, 0, &unplaced, &mut rng), 0);
    }
}
