pub mod greedy;
pub mod nested;
pub mod nrpa;
pub mod options;
pub mod playout;
pub mod policy;
pub mod random;
pub mod selection_strategy;
pub mod sequencer;
pub mod transposition_table;
pub mod ucb;
pub mod uct;

pub use greedy::*;
pub use nested::*;
pub use nrpa::*;
pub use options::*;
pub use playout::*;
pub use policy::*;
pub use random::*;
pub use selection_strategy::*;
pub use sequencer::*;
pub use transposition_table::*;
pub use ucb::*;
pub use uct::*;
