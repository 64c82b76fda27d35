use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Orientation::Horizontal),
            "V" => Ok(Orientation::Vertical),
            _ => Err(format!("unknown orientation {:?}, expected H or V", s)),
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "H"),
            Orientation::Vertical => write!(f, "V"),
        }
    }
}

/// A photo as read from the input. The id is its position in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Photo {
    id: usize,
    orientation: Orientation,
    tags: BTreeSet<String>,
}

impl Photo {
    pub fn new<I, T>(id: usize, orientation: Orientation, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            id,
            orientation,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

impl Display for Photo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.orientation, self.tags)
    }
}
