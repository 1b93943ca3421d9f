//! Column generation: one `(x, z)` world column to a vertical run of blocks.
//!
//! Policy: full column from `y = 0` up to and including the surface height.
//! The surface height is `floor(((noise + 1) / 2) * max_height)`, clamped to
//! `[0, max_height - 1]`, so every column has between 1 and `max_height`
//! blocks and nothing is generated at or above `max_height`.
use loam_blocks::{BlockKind, HeightBands};

use crate::noise::NoiseField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnCell {
    pub y: i32,
    pub kind: BlockKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub x: i32,
    pub z: i32,
    /// Topmost generated `y`.
    pub height: i32,
    pub cells: Vec<ColumnCell>,
}

impl Column {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains_y(&self, y: i32) -> bool {
        (0..=self.height).contains(&y)
    }
}

#[inline]
pub fn remap_noise_to_height(noise: f32, max_height: i32) -> i32 {
    let h = ((noise + 1.0) * 0.5 * max_height as f32).floor() as i32;
    h.clamp(0, max_height - 1)
}

#[derive(Debug)]
pub struct ColumnGenerator {
    noise: NoiseField,
    scale: f32,
    max_height: i32,
    bands: HeightBands,
}

impl ColumnGenerator {
    pub fn new(noise: NoiseField, scale: f32, max_height: i32, bands: HeightBands) -> Self {
        debug_assert!(max_height > 0);
        Self {
            noise,
            scale,
            max_height,
            bands,
        }
    }

    #[inline]
    pub fn max_height(&self) -> i32 {
        self.max_height
    }

    #[inline]
    pub fn bands(&self) -> &HeightBands {
        &self.bands
    }

    #[inline]
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Surface height of world column `(wx, wz)`. Depends only on absolute
    /// coordinates, so neighbouring chunks agree on shared edges.
    #[inline]
    pub fn height_at(&self, wx: i32, wz: i32) -> i32 {
        let n = self
            .noise
            .sample(wx as f32 * self.scale, wz as f32 * self.scale);
        remap_noise_to_height(n, self.max_height)
    }

    /// Kind of the generated block at absolute `y`, ignoring whether the
    /// column actually reaches that high.
    #[inline]
    pub fn kind_at(&self, y: i32) -> BlockKind {
        self.bands.kind_for(y)
    }

    /// Generated kind at `(wx, y, wz)`, or `None` if that cell is open air.
    pub fn block_at(&self, wx: i32, y: i32, wz: i32) -> Option<BlockKind> {
        if y < 0 || y > self.height_at(wx, wz) {
            return None;
        }
        Some(self.kind_at(y))
    }

    pub fn generate(&self, wx: i32, wz: i32) -> Column {
        let height = self.height_at(wx, wz);
        let cells = (0..=height)
            .map(|y| ColumnCell {
                y,
                kind: self.kind_at(y),
            })
            .collect();
        Column {
            x: wx,
            z: wz,
            height,
            cells,
        }
    }
}
