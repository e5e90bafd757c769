//! Named sub-regions of an image used for color sampling and neighbor matching

use std::fmt;

/// Region of a candidate image whose average color is compared
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// The whole (cropped) image
    All,
    /// Left band
    Left,
    /// Right band
    Right,
    /// Top band
    Top,
    /// Bottom band
    Bottom,
}

impl Segment {
    /// Every segment, in declaration order
    pub const ALL_SEGMENTS: [Self; 5] = [Self::All, Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Mirror across the image center; `All` maps to itself
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Lowercase name used in cache keys
    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Parse a name produced by [`Segment::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL_SEGMENTS
            .into_iter()
            .find(|segment| segment.name() == name)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
