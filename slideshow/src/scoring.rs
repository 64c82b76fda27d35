use itertools::Itertools;

use crate::error::{Result, SlideshowError};
use crate::slide::Slide;
use crate::slideshow::{slide_at, Slideshow};

/// Interest of showing `b` right after `a`: the smallest of the shared tags, the tags only
/// in `a` and the tags only in `b`.
pub fn pair_score(a: &Slide, b: &Slide) -> usize {
    let common = a.tags().intersection(b.tags()).count();

    common
        .min(a.tag_count() - common)
        .min(b.tag_count() - common)
}

pub fn sequence_score(slideshow: &Slideshow) -> Result<usize> {
    if slideshow.is_empty() {
        return Err(SlideshowError::EmptyInput);
    }

    Ok(slideshow
        .iter()
        .tuple_windows()
        .map(|(a, b)| pair_score(a, b))
        .sum())
}

/// Scores an ordering given as slide ids without building a `Slideshow`.
pub fn order_score(slides: &[Slide], order: &[usize]) -> Result<usize> {
    if order.is_empty() {
        return Err(SlideshowError::EmptyInput);
    }

    order.iter().tuple_windows().try_fold(0, |score, (&a, &b)| {
        Ok(score + pair_score(slide_at(slides, a)?, slide_at(slides, b)?))
    })
}
