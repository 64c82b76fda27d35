use anyhow::Result;

use super::game_state::GameState;

/// Rules of a single agent sequencing game. Every action places one item, and the game
/// is over once nothing is left to place.
pub trait GameEngine {
    type Action: Copy + Eq + std::fmt::Debug;
    type State: GameState<Action = Self::Action>;

    fn initial_state(&self) -> Self::State;

    /// The bounded window of actions that may be played next.
    fn legal_actions<'s>(&self, game_state: &'s Self::State) -> &'s [Self::Action];

    /// Plays `action` in place. Fails if the action is not in the legal window.
    fn play(&self, game_state: &mut Self::State, action: &Self::Action) -> Result<()>;

    fn take_action(&self, game_state: &Self::State, action: &Self::Action) -> Result<Self::State> {
        let mut next_state = game_state.clone();
        self.play(&mut next_state, action)?;
        Ok(next_state)
    }

    fn is_terminal_state(&self, game_state: &Self::State) -> bool;

    fn move_number(&self, game_state: &Self::State) -> usize;

    /// Stable index of an action, used to key per-action weights.
    fn action_code(&self, action: &Self::Action) -> usize;

    fn num_action_codes(&self) -> usize;
}
