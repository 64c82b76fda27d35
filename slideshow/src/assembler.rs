use log::debug;

use crate::error::{Result, SlideshowError};
use crate::photo::{Orientation, Photo};
use crate::slide::Slide;

/// Turns photos into slides in a single pass. Horizontal photos become slides right away;
/// vertical photos are paired with the next vertical photo in input order.
pub fn assemble_slides(photos: impl IntoIterator<Item = Photo>) -> Result<Vec<Slide>> {
    let mut slides = Vec::new();
    let mut pending_vertical: Option<Photo> = None;

    for photo in photos {
        let id = slides.len();

        match photo.orientation() {
            Orientation::Horizontal => slides.push(Slide::horizontal(id, photo)?),
            Orientation::Vertical => match pending_vertical.take() {
                Some(first) => slides.push(Slide::vertical_pair(id, first, photo)?),
                None => pending_vertical = Some(photo),
            },
        }
    }

    if let Some(photo) = pending_vertical {
        return Err(SlideshowError::DanglingVertical {
            photo_id: photo.id(),
        });
    }

    debug!("Assembled {} slides", slides.len());

    Ok(slides)
}
