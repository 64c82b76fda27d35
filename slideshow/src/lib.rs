pub mod assembler;
pub mod candidates;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod loader;
pub mod photo;
pub mod scoring;
pub mod slide;
pub mod slideshow;

mod zobrist;

use zobrist::*;

pub use crate::engine::*;
pub use crate::slideshow::*;
pub use assembler::*;
pub use candidates::*;
pub use error::SlideshowError;
pub use game_state::*;
pub use loader::*;
pub use photo::*;
pub use scoring::*;
pub use slide::*;
