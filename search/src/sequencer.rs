use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use common::ConfigLoader;
use log::{debug, info, warn};
use rand::Rng;
use slideshow::{
    sequence_score, CandidateSelector, Slide, Slideshow, SlideshowError, UnplacedSet,
};

use crate::{
    GreedySequencer, NestedSequencer, NrpaSequencer, RandomSequencer, SearchOptions,
    SequencerKind, UcbSequencer, UctSequencer,
};

const PROGRESS_INTERVAL: usize = 10_000;

/// A strategy that orders every slide exactly once.
pub trait Sequencer {
    fn name(&self) -> &'static str;

    /// Returns a permutation of the slide ids.
    fn sequence(&mut self, slides: &[Slide]) -> Result<Vec<usize>>;
}

/// Proposes the next slide from the placed prefix and the current candidate window.
pub trait MoveProposer {
    fn propose<R: Rng>(
        &mut self,
        slides: &[Slide],
        placed: &[usize],
        candidates: &[usize],
        unplaced: &UnplacedSet,
        rng: &mut R,
    ) -> Result<usize>;
}

/// Builds an ordering one slide at a time, starting from the first slide in priority
/// order and asking `proposer` for every following slide.
pub fn construct_order<P, R>(
    slides: &[Slide],
    proposer: &mut P,
    max_candidates: usize,
    rng: &mut R,
) -> Result<Vec<usize>>
where
    P: MoveProposer,
    R: Rng,
{
    let mut selector = CandidateSelector::for_slides(slides, max_candidates);
    let mut unplaced = UnplacedSet::full(slides.len());
    let mut order = Vec::with_capacity(slides.len());

    let Some(&seed) = selector.priority().first() else {
        return Ok(order);
    };

    unplaced.remove(seed);
    order.push(seed);

    while !unplaced.is_empty() {
        let candidates = selector.candidates(&unplaced);

        let next = if candidates.is_empty() {
            selector
                .fallback(&unplaced, rng)
                .ok_or_else(|| anyhow!("No unplaced slide to fall back on"))?
        } else {
            let next = proposer.propose(slides, &order, &candidates, &unplaced, rng)?;

            if !candidates.contains(&next) {
                return Err(SlideshowError::IllegalMove { action: next }.into());
            }

            next
        };

        if !unplaced.remove(next) {
            return Err(SlideshowError::IllegalMove { action: next }.into());
        }

        order.push(next);

        if order.len() % PROGRESS_INTERVAL == 0 {
            debug!("{} slides placed", order.len());
        }
    }

    let fallbacks = selector.fallbacks();
    if fallbacks > 0 {
        warn!("Num random: {}/{}", fallbacks, slides.len());
    } else {
        info!("Num random: {}/{}", fallbacks, slides.len());
    }

    Ok(order)
}

#[derive(Debug)]
pub struct SequencerOutcome<'a> {
    pub slideshow: Slideshow<'a>,
    pub score: usize,
    pub elapsed: Duration,
}

/// Runs `sequencer`, checks that it placed every slide exactly once and scores the result.
pub fn run_sequencer<'a>(
    sequencer: &mut dyn Sequencer,
    slides: &'a [Slide],
) -> Result<SequencerOutcome<'a>> {
    info!(
        "Running the {} sequencer over {} slides",
        sequencer.name(),
        slides.len()
    );

    let start = Instant::now();
    let order = sequencer.sequence(slides)?;
    let elapsed = start.elapsed();

    if order.len() != slides.len() {
        return Err(anyhow!(
            "The {} sequencer placed {} of {} slides",
            sequencer.name(),
            order.len(),
            slides.len()
        ));
    }

    let slideshow = Slideshow::from_order(slides, &order)?;
    let score = sequence_score(&slideshow)?;

    info!(
        "The {} sequencer scored {} in {:.3}s",
        sequencer.name(),
        score,
        elapsed.as_secs_f64()
    );

    Ok(SequencerOutcome {
        slideshow,
        score,
        elapsed,
    })
}

pub fn create_sequencer(
    options: &SearchOptions,
    config: &ConfigLoader,
) -> Result<Box<dyn Sequencer>> {
    let seed = options.seed;

    let sequencer: Box<dyn Sequencer> = match options.sequencer {
        SequencerKind::Random => Box::new(RandomSequencer::new(config.load()?, seed)),
        SequencerKind::Greedy => Box::new(GreedySequencer::new(config.load()?, seed)),
        SequencerKind::Nested => Box::new(NestedSequencer::new(config.load()?, seed)),
        SequencerKind::Ucb => Box::new(UcbSequencer::new(config.load()?, seed)),
        SequencerKind::Uct => Box::new(UctSequencer::new(config.load()?, seed)),
        SequencerKind::Nrpa => Box::new(NrpaSequencer::new(config.load()?, seed)),
    };

    Ok(sequencer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::create_rng_from_seed;
    use slideshow::{Orientation, Photo};

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|id| {
                let tags = (0..id % 4 + 1).map(|t| format!("t{}", t + id % 3));
                Slide::horizontal(id, Photo::new(id, Orientation::Horizontal, tags)).unwrap()
            })
            .collect()
    }

    struct FirstCandidate;

    impl MoveProposer for FirstCandidate {
        fn propose<R: Rng>(
            &mut self,
            _: &[Slide],
            _: &[usize],
            candidates: &[usize],
            _: &UnplacedSet,
            _: &mut R,
        ) -> Result<usize> {
            Ok(candidates[0])
        }
    }

    struct OutOfWindow;

    impl MoveProposer for OutOfWindow {
        fn propose<R: Rng>(
            &mut self,
            _: &[Slide],
            placed: &[usize],
            _: &[usize],
            _: &UnplacedSet,
            _: &mut R,
        ) -> Result<usize> {
            Ok(placed[0])
        }
    }

    struct Truncating;

    impl Sequencer for Truncating {
        fn name(&self) -> &'static str {
            "truncating"
        }

        fn sequence(&mut self, slides: &[Slide]) -> Result<Vec<usize>> {
            Ok((1..slides.len()).collect())
        }
    }

    #[test]
    fn test_first_candidate_follows_priority_order() {
        let slides = slides(6);
        let mut rng = create_rng_from_seed(0);

        let order = construct_order(&slides, &mut FirstCandidate, 3, &mut rng).unwrap();

        assert_eq!(order, slideshow::priority_order(&slides));
    }

    #[test]
    fn test_proposal_outside_window_is_illegal() {
        let slides = slides(4);
        let mut rng = create_rng_from_seed(0);

        let err = construct_order(&slides, &mut OutOfWindow, 3, &mut rng).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SlideshowError>(),
            Some(SlideshowError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_empty_window_places_every_slide_at_random() {
        let slides = slides(12);
        let mut rng = create_rng_from_seed(5);

        let mut order = construct_order(&slides, &mut FirstCandidate, 0, &mut rng).unwrap();
        order.sort_unstable();

        assert_eq!(order, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_run_rejects_incomplete_order() {
        let slides = slides(4);

        assert!(run_sequencer(&mut Truncating, &slides).is_err());
    }

    #[test]
    fn test_run_rejects_empty_input() {
        let slides = slides(0);
        let mut sequencer = GreedySequencer::new(Default::default(), 0);

        let err = run_sequencer(&mut sequencer, &slides).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SlideshowError>(),
            Some(SlideshowError::EmptyInput)
        ));
    }

    #[test]
    fn test_create_sequencer_from_config() {
        let config = ConfigLoader::empty("slideshow".to_string());

        for kind in SequencerKind::ALL {
            let options = SearchOptions {
                sequencer: kind,
                ..Default::default()
            };
            let sequencer = create_sequencer(&options, &config).unwrap();

            assert_eq!(sequencer.name(), kind.name());
        }
    }
}
