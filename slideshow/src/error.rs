use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlideshowError>;

#[derive(Error, Debug)]
pub enum SlideshowError {
    /// An odd number of vertical photos leaves one of them without a partner.
    #[error("vertical photo {photo_id} has no partner to share a slide with")]
    DanglingVertical { photo_id: usize },

    /// A selection rule produced a slide that was not in the legal set.
    #[error("slide {action} is not a legal move from the current position")]
    IllegalMove { action: usize },

    #[error("cannot score a slideshow without slides")]
    EmptyInput,

    #[error("invalid slide: {0}")]
    InvalidSlide(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("expected {expected} photos but found {actual}")]
    PhotoCount { expected: usize, actual: usize },

    #[error("line {line}: expected {expected} tags but found {actual}")]
    TagCount {
        line: usize,
        expected: usize,
        actual: usize,
    },
}
