use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::error::{Result, SlideshowError};
use crate::photo::{Orientation, Photo};

pub fn load_photos(path: impl AsRef<Path>) -> Result<Vec<Photo>> {
    let file = File::open(path.as_ref())?;
    let photos = parse_photos(BufReader::new(file))?;

    info!("{} photos read from {:?}", photos.len(), path.as_ref());

    Ok(photos)
}

/// Reads the photo count from the first line, then one `orientation tag_count tags...`
/// record per line. Blank lines are skipped.
pub fn parse_photos(reader: impl BufRead) -> Result<Vec<Photo>> {
    let mut lines = reader.lines();

    let header = lines.next().transpose()?.unwrap_or_default();
    let expected = header.trim().parse::<usize>().map_err(|_| SlideshowError::Parse {
        line: 1,
        reason: format!("expected a photo count, found {:?}", header.trim()),
    })?;

    let mut photos = Vec::new();

    for (index, line) in lines.enumerate() {
        let line = line?;
        let line_number = index + 2;

        if line.trim().is_empty() {
            continue;
        }

        photos.push(parse_photo(photos.len(), &line, line_number)?);
    }

    if photos.len() != expected {
        return Err(SlideshowError::PhotoCount {
            expected,
            actual: photos.len(),
        });
    }

    Ok(photos)
}

fn parse_photo(id: usize, line: &str, line_number: usize) -> Result<Photo> {
    let mut fields = line.split_whitespace();

    let orientation = fields
        .next()
        .unwrap_or_default()
        .parse::<Orientation>()
        .map_err(|reason| SlideshowError::Parse {
            line: line_number,
            reason,
        })?;

    let num_tags = fields.next().and_then(|f| f.parse::<usize>().ok()).ok_or_else(|| {
        SlideshowError::Parse {
            line: line_number,
            reason: "expected a tag count".to_string(),
        }
    })?;

    let tags = fields.collect::<Vec<_>>();

    if tags.len() != num_tags {
        return Err(SlideshowError::TagCount {
            line: line_number,
            expected: num_tags,
            actual: tags.len(),
        });
    }

    Ok(Photo::new(id, orientation, tags))
}
