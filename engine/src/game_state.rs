use std::fmt::Debug;

/// A partial ordering under construction. States are values: searchers clone a state
/// before exploring a branch so sibling branches never observe each other's moves.
pub trait GameState: Clone + Debug {
    type Action: Copy + Eq + Debug;

    fn actions_taken(&self) -> &[Self::Action];

    fn score(&self) -> usize;
}
