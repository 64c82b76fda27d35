pub mod config;
pub mod fs;
pub mod math;
pub mod rng;
pub mod softmax;
pub mod transposition_hash;

pub use config::*;
pub use fs::*;
pub use math::*;
pub use rng::*;
pub use softmax::*;
pub use transposition_hash::*;
