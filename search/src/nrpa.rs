use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use common::create_rng_from_seed;
use engine::{GameEngine, GameState};
use log::{debug, info};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;
use slideshow::{Slide, SlideshowEngine};

use crate::{NrpaOptions, Policy, Sequencer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredSequence<A> {
    pub score: usize,
    pub actions: Vec<A>,
}

/// Nested Rollout Policy Adaptation.
///
/// Policies are passed by value. A nested call adapts its own copy, so the caller's policy
/// only changes through the caller's own adaptation steps.
pub struct Nrpa<'e, E> {
    engine: &'e E,
    alpha: f64,
    iterations: usize,
    stabilization: Option<usize>,
}

impl<'e, E> Nrpa<'e, E>
where
    E: GameEngine,
{
    /// With `stabilization` set, level 1 runs that many playouts without adapting and keeps
    /// the best of them.
    pub fn new(engine: &'e E, alpha: f64, iterations: usize, stabilization: Option<usize>) -> Self {
        Self {
            engine,
            alpha,
            iterations,
            stabilization,
        }
    }

    /// Plays a game from the initial state, sampling every move from the softmax of the
    /// policy weights over the legal actions.
    pub fn playout<R: Rng>(&self, policy: &Policy, rng: &mut R) -> Result<ScoredSequence<E::Action>> {
        let mut state = self.engine.initial_state();

        while !self.engine.is_terminal_state(&state) {
            let legal_actions = self.engine.legal_actions(&state);
            let distribution = policy.distribution(&self.action_codes(legal_actions));
            let index = WeightedIndex::new(&distribution)
                .map_err(|err| anyhow!("Invalid move distribution: {}", err))?
                .sample(rng);
            let action = legal_actions[index];

            self.engine.play(&mut state, &action)?;
        }

        Ok(ScoredSequence {
            score: state.score(),
            actions: state.actions_taken().to_vec(),
        })
    }

    /// Returns a policy moved towards replaying `sequence`. At every step the played action
    /// gains `alpha` and each legal action loses `alpha` times its probability under `policy`.
    pub fn adapt(&self, policy: &Policy, sequence: &[E::Action]) -> Result<Policy> {
        let mut adapted = policy.clone();
        let mut state = self.engine.initial_state();

        for action in sequence {
            let codes = self.action_codes(self.engine.legal_actions(&state));
            let distribution = policy.distribution(&codes);

            adapted.add(self.engine.action_code(action), self.alpha);
            for (code, probability) in codes.iter().zip(distribution) {
                adapted.add(*code, -self.alpha * probability);
            }

            self.engine.play(&mut state, action)?;
        }

        Ok(adapted)
    }

    /// The best sequence found by a level `level` search. When `deadline` passes the search
    /// stops after the current iteration and returns what it has.
    pub fn search<R: Rng>(
        &self,
        level: usize,
        mut policy: Policy,
        deadline: Option<Instant>,
        rng: &mut R,
    ) -> Result<ScoredSequence<E::Action>> {
        if level == 0 {
            return self.playout(&policy, rng);
        }

        let (iterations, adapting) = match self.stabilization {
            Some(playouts) if level == 1 => (playouts, false),
            _ => (self.iterations, true),
        };

        let mut best: Option<ScoredSequence<E::Action>> = None;

        for iteration in 0..iterations {
            let result = self.search(level - 1, policy.clone(), None, rng)?;

            if best.as_ref().map_or(true, |b| result.score > b.score) {
                best = Some(result);
            }

            if adapting {
                if let Some(best) = &best {
                    policy = self.adapt(&policy, &best.actions)?;
                }
            }

            if deadline.map_or(false, |deadline| Instant::now() >= deadline) {
                debug!(
                    "Time limit reached at level {} after {} iterations",
                    level,
                    iteration + 1
                );
                break;
            }
        }

        best.ok_or_else(|| anyhow!("Level {} search ran no iterations", level))
    }

    fn action_codes(&self, actions: &[E::Action]) -> Vec<usize> {
        actions
            .iter()
            .map(|action| self.engine.action_code(action))
            .collect()
    }
}

pub struct NrpaSequencer {
    options: NrpaOptions,
    rng: StdRng,
}

impl NrpaSequencer {
    pub fn new(options: NrpaOptions, seed: u64) -> Self {
        Self {
            options,
            rng: create_rng_from_seed(seed),
        }
    }

    fn deadline(&self) -> Result<Option<Instant>> {
        self.options
            .time_limit_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map(|limit| Instant::now() + limit)
                    .map_err(|err| anyhow!("Invalid time limit {}: {}", secs, err))
            })
            .transpose()
    }
}

impl Sequencer for NrpaSequencer {
    fn name(&self) -> &'static str {
        "nrpa"
    }

    fn sequence(&mut self, slides: &[Slide]) -> Result<Vec<usize>> {
        let start = Instant::now();
        let deadline = self.deadline()?;
        let engine = SlideshowEngine::new(slides, self.options.max_candidates);
        let stabilization = self.options.stabilized.then_some(self.options.stabilization);
        let nrpa = Nrpa::new(
            &engine,
            self.options.alpha,
            self.options.iterations,
            stabilization,
        );

        let policy = Policy::random(engine.num_action_codes(), &mut self.rng);
        let best = nrpa.search(self.options.level, policy, deadline, &mut self.rng)?;

        if deadline.map_or(false, |deadline| Instant::now() >= deadline) {
            info!(
                "NRPA time limit reached after {:.3}s, best score {}",
                start.elapsed().as_secs_f64(),
                best.score
            );
        } else {
            info!("NRPA best score {}", best.score);
        }

        Ok(best.actions)
    }
}
