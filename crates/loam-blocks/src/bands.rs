//! Height banding: block kind as a pure function of absolute `y`.
use serde::Deserialize;

use crate::types::BlockKind;

/// Exclusive lower thresholds. `y > snow_above` is snow, then stone, then
/// dirt; everything at or below `dirt_above` is grass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct HeightBands {
    #[serde(default = "default_dirt_above")]
    pub dirt_above: i32,
    #[serde(default = "default_stone_above")]
    pub stone_above: i32,
    #[serde(default = "default_snow_above")]
    pub snow_above: i32,
}

fn default_dirt_above() -> i32 {
    10
}
fn default_stone_above() -> i32 {
    25
}
fn default_snow_above() -> i32 {
    40
}

impl Default for HeightBands {
    fn default() -> Self {
        Self {
            dirt_above: default_dirt_above(),
            stone_above: default_stone_above(),
            snow_above: default_snow_above(),
        }
    }
}

impl HeightBands {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    #[inline]
    pub fn kind_for(&self, y: i32) -> BlockKind {
        if y > self.snow_above {
            BlockKind::Snow
        } else if y > self.stone_above {
            BlockKind::Stone
        } else if y > self.dirt_above {
            BlockKind::Dirt
        } else {
            BlockKind::Grass
        }
    }

    /// Thresholds must be strictly ascending for every band to be reachable.
    pub fn is_ascending(&self) -> bool {
        self.dirt_above < self.stone_above && self.stone_above < self.snow_above
    }
}
