use std::collections::BTreeSet;

use crate::error::{Result, SlideshowError};
use crate::photo::Photo;

/// One horizontal photo on its own, or two vertical photos shown together. The tag set is
/// the union of the member photos' tags.
///
/// Slides are addressed by id everywhere, so a slide's id must equal its index in the
/// slide list it belongs to. `assemble_slides` numbers slides that way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    id: usize,
    photos: Vec<Photo>,
    tags: BTreeSet<String>,
}

impl Slide {
    pub fn horizontal(id: usize, photo: Photo) -> Result<Self> {
        if photo.is_vertical() {
            return Err(SlideshowError::InvalidSlide(format!(
                "vertical photo {} cannot fill a slide on its own",
                photo.id()
            )));
        }

        let tags = photo.tags().clone();

        Ok(Self {
            id,
            photos: vec![photo],
            tags,
        })
    }

    pub fn vertical_pair(id: usize, first: Photo, second: Photo) -> Result<Self> {
        if let Some(photo) = [&first, &second].into_iter().find(|p| !p.is_vertical()) {
            return Err(SlideshowError::InvalidSlide(format!(
                "horizontal photo {} cannot be paired",
                photo.id()
            )));
        }

        let tags = first.tags().union(second.tags()).cloned().collect();

        Ok(Self {
            id,
            photos: vec![first, second],
            tags,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn photo_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.photos.iter().map(Photo::id)
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::Orientation;

    #[test]
    fn test_vertical_pair_unions_tags() {
        let first = Photo::new(0, Orientation::Vertical, ["a", "b"]);
        let second = Photo::new(1, Orientation::Vertical, ["b", "c"]);
        let slide = Slide::vertical_pair(0, first, second).unwrap();

        assert_eq!(slide.tag_count(), 3);
        assert_eq!(slide.photo_ids().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_horizontal_rejects_vertical() {
        let photo = Photo::new(3, Orientation::Vertical, ["a"]);

        assert!(matches!(
            Slide::horizontal(0, photo),
            Err(SlideshowError::InvalidSlide(_))
        ));
    }

    #[test]
    fn test_pair_rejects_horizontal() {
        let first = Photo::new(0, Orientation::Vertical, ["a"]);
        let second = Photo::new(1, Orientation::Horizontal, ["b"]);

        assert!(matches!(
            Slide::vertical_pair(0, first, second),
            Err(SlideshowError::InvalidSlide(_))
        ));
    }
}
