use anyhow::Result;
use engine::GameEngine;

use crate::candidates::priority_order;
use crate::error::SlideshowError;
use crate::slide::Slide;
use crate::SearchState;

/// The slideshow as a single player game. The legal moves of a state are its first
/// `max_candidates` remaining slides in priority order.
pub struct SlideshowEngine<'a> {
    slides: &'a [Slide],
    priority: Vec<usize>,
    max_candidates: usize,
}

impl<'a> SlideshowEngine<'a> {
    pub fn new(slides: &'a [Slide], max_candidates: usize) -> Self {
        Self {
            slides,
            priority: priority_order(slides),
            // A window of at least one slide, or a non terminal state would have no moves.
            max_candidates: max_candidates.max(1),
        }
    }

}

impl GameEngine for SlideshowEngine<'_> {
    type Action = usize;
    type State = SearchState;

    fn initial_state(&self) -> Self::State {
        SearchState::initial(self.priority.clone())
    }

    fn legal_actions<'s>(&self, game_state: &'s Self::State) -> &'s [Self::Action] {
        let remaining = game_state.remaining();
        &remaining[..remaining.len().min(self.max_candidates)]
    }

    fn play(&self, game_state: &mut Self::State, action: &Self::Action) -> Result<()> {
        if !self.legal_actions(game_state).contains(action) {
            return Err(SlideshowError::IllegalMove { action: *action }.into());
        }

        game_state.place_slide(self.slides, *action)?;

        Ok(())
    }

    fn is_terminal_state(&self, game_state: &Self::State) -> bool {
        game_state.is_terminal()
    }

    fn move_number(&self, game_state: &Self::State) -> usize {
        game_state.chosen().len()
    }

    fn action_code(&self, action: &Self::Action) -> usize {
        *action
    }

    fn num_action_codes(&self) -> usize {
        self.slides.len()
    }
}
