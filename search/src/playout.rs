use anyhow::{anyhow, Result};
use engine::GameEngine;
use rand::seq::SliceRandom;
use rand::Rng;

/// Plays uniformly random legal actions until the game is over.
pub fn random_playout<E, R>(engine: &E, mut state: E::State, rng: &mut R) -> Result<E::State>
where
    E: GameEngine,
    R: Rng,
{
    while !engine.is_terminal_state(&state) {
        let action = *engine
            .legal_actions(&state)
            .choose(rng)
            .ok_or_else(|| anyhow!("No legal action from a non terminal state"))?;

        engine.play(&mut state, &action)?;
    }

    Ok(state)
}
