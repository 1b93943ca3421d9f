use std::fmt;
use std::str::FromStr;

use loam_geom::BlockPos;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Empty,
    Grass,
    Dirt,
    Stone,
    Snow,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Empty,
        BlockKind::Grass,
        BlockKind::Dirt,
        BlockKind::Stone,
        BlockKind::Snow,
    ];

    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockKind::Empty)
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Empty => "empty",
            BlockKind::Grass => "grass",
            BlockKind::Dirt => "dirt",
            BlockKind::Stone => "stone",
            BlockKind::Snow => "snow",
        }
    }

    /// 0xRRGGBB tint a renderer can use for the instance colour.
    pub fn color(self) -> u32 {
        match self {
            BlockKind::Empty => 0x000000,
            BlockKind::Grass => 0x5C9E57,
            BlockKind::Dirt => 0xDEB887,
            BlockKind::Stone => 0x808080,
            BlockKind::Snow => 0xFFFFFF,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownBlockKind(pub String);

impl fmt::Display for UnknownBlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownBlockKind {}

impl FromStr for BlockKind {
    type Err = UnknownBlockKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBlockKind(s.to_string()))
    }
}

/// A unit cube at an absolute world coordinate. Changing a block means
/// replacing the record, never editing it in place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub pos: BlockPos,
    pub kind: BlockKind,
}

impl Block {
    #[inline]
    pub const fn new(pos: BlockPos, kind: BlockKind) -> Self {
        Self { pos, kind }
    }
}
