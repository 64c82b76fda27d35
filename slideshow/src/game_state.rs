use common::TranspositionHash;

use crate::error::{Result, SlideshowError};
use crate::scoring::pair_score;
use crate::slide::Slide;

use super::Zobrist;

/// A partial slideshow: the slides placed so far, the slides left in priority order and the
/// score accumulated along the placed prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    chosen: Vec<usize>,
    remaining: Vec<usize>,
    score: usize,
    zobrist: Zobrist,
}

impl SearchState {
    pub fn initial(remaining: Vec<usize>) -> Self {
        Self {
            chosen: Vec::with_capacity(remaining.len()),
            remaining,
            score: 0,
            zobrist: Zobrist::initial(),
        }
    }

    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn last(&self) -> Option<usize> {
        self.chosen.last().copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn place_slide(&mut self, slides: &[Slide], slide_id: usize) -> Result<()> {
        let position = self
            .remaining
            .iter()
            .position(|&id| id == slide_id)
            .ok_or(SlideshowError::IllegalMove { action: slide_id })?;

        self.remaining.remove(position);

        if let Some(last) = self.last() {
            self.score += pair_score(&slides[last], &slides[slide_id]);
        }

        self.chosen.push(slide_id);
        self.zobrist = self.zobrist.place_slide(slide_id);

        Ok(())
    }
}

impl TranspositionHash for SearchState {
    fn transposition_hash(&self) -> u64 {
        self.zobrist.state_hash()
    }
}

impl engine::GameState for SearchState {
    type Action = usize;

    fn actions_taken(&self) -> &[usize] {
        &self.chosen
    }

    fn score(&self) -> usize {
        self.score
    }
}
