use std::collections::{HashSet, VecDeque};
use std::fmt::{self, Display, Formatter};

use crate::error::{Result, SlideshowError};
use crate::slide::Slide;

/// An ordering of slides that can grow at either end. A slide can only be placed once.
#[derive(Clone, Debug, Default)]
pub struct Slideshow<'a> {
    slides: VecDeque<&'a Slide>,
    placed: HashSet<usize>,
}

impl<'a> Slideshow<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slides: VecDeque::with_capacity(capacity),
            placed: HashSet::with_capacity(capacity),
        }
    }

    /// Builds a slideshow from slide ids, in order. Every slide must sit at the index of its id.
    pub fn from_order(slides: &'a [Slide], order: &[usize]) -> Result<Self> {
        let mut slideshow = Self::with_capacity(order.len());

        for &id in order {
            slideshow.add_right(slide_at(slides, id)?)?;
        }

        Ok(slideshow)
    }

    pub fn add_left(&mut self, slide: &'a Slide) -> Result<()> {
        self.mark_placed(slide)?;
        self.slides.push_front(slide);
        Ok(())
    }

    pub fn add_right(&mut self, slide: &'a Slide) -> Result<()> {
        self.mark_placed(slide)?;
        self.slides.push_back(slide);
        Ok(())
    }

    fn mark_placed(&mut self, slide: &Slide) -> Result<()> {
        if self.placed.insert(slide.id()) {
            Ok(())
        } else {
            Err(SlideshowError::IllegalMove { action: slide.id() })
        }
    }

    pub fn first(&self) -> Option<&'a Slide> {
        self.slides.front().copied()
    }

    pub fn last(&self) -> Option<&'a Slide> {
        self.slides.back().copied()
    }

    pub fn contains(&self, slide_id: usize) -> bool {
        self.placed.contains(&slide_id)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Slide> + '_ {
        self.slides.iter().copied()
    }

    pub fn slide_ids(&self) -> Vec<usize> {
        self.iter().map(Slide::id).collect()
    }
}

/// The slide with id `id`, which must also be its index in `slides`.
pub(crate) fn slide_at(slides: &[Slide], id: usize) -> Result<&Slide> {
    slides
        .get(id)
        .filter(|slide| slide.id() == id)
        .ok_or(SlideshowError::IllegalMove { action: id })
}

/// Submission format: the slide count, then one line per slide with its photo ids.
impl Display for Slideshow<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.len())?;

        for slide in self.iter() {
            let photo_ids = slide
                .photo_ids()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", photo_ids)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::{Orientation, Photo};

    fn slides() -> Vec<Slide> {
        vec![
            Slide::horizontal(0, Photo::new(0, Orientation::Horizontal, ["a"])).unwrap(),
            Slide::vertical_pair(
                1,
                Photo::new(1, Orientation::Vertical, ["b"]),
                Photo::new(3, Orientation::Vertical, ["c"]),
            )
            .unwrap(),
            Slide::horizontal(2, Photo::new(2, Orientation::Horizontal, ["d"])).unwrap(),
        ]
    }

    #[test]
    fn test_grows_at_both_ends() {
        let slides = slides();
        let mut slideshow = Slideshow::new();

        slideshow.add_right(&slides[1]).unwrap();
        slideshow.add_left(&slides[0]).unwrap();
        slideshow.add_right(&slides[2]).unwrap();

        assert_eq!(slideshow.first().map(Slide::id), Some(0));
        assert_eq!(slideshow.last().map(Slide::id), Some(2));
        assert_eq!(slideshow.slide_ids(), vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_duplicate_slide() {
        let slides = slides();
        let mut slideshow = Slideshow::new();

        slideshow.add_right(&slides[1]).unwrap();

        assert!(matches!(
            slideshow.add_left(&slides[1]),
            Err(SlideshowError::IllegalMove { action: 1 })
        ));
        assert_eq!(slideshow.len(), 1);
    }

    #[test]
    fn test_from_order_rejects_unknown_slide() {
        let slides = slides();

        assert!(matches!(
            Slideshow::from_order(&slides, &[0, 7]),
            Err(SlideshowError::IllegalMove { action: 7 })
        ));
    }

    #[test]
    fn test_from_order_rejects_misnumbered_slide() {
        let mut slides = slides();
        slides.swap(0, 2);

        assert!(matches!(
            Slideshow::from_order(&slides, &[1, 0]),
            Err(SlideshowError::IllegalMove { action: 0 })
        ));
    }

    #[test]
    fn test_submission_format() {
        let slides = slides();
        let slideshow = Slideshow::from_order(&slides, &[2, 1, 0]).unwrap();

        assert_eq!(slideshow.to_string(), "3\n2\n1 3\n0\n");
    }
}
