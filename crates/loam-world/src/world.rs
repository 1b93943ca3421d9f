use loam_blocks::HeightBands;
use loam_geom::{BlockPos, Vec3};

use crate::chunk_coord::ChunkCoord;
use crate::column::{Column, ColumnGenerator};
use crate::noise::NoiseField;
use crate::worldgen::WorldGenConfig;

/// Immutable world description: chunk sizing plus the column generator.
/// Shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct World {
    pub chunk_size: usize,
    pub seed: i32,
    columns: ColumnGenerator,
}

impl World {
    /// `cfg` must already be validated; a non-positive size or height is a
    /// programming error at this point.
    pub fn new(cfg: &WorldGenConfig) -> Self {
        assert!(cfg.chunk_size > 0, "chunk_size must be positive");
        assert!(cfg.max_height > 0, "max_height must be positive");
        let noise = NoiseField::new(cfg.seed);
        Self {
            chunk_size: cfg.chunk_size as usize,
            seed: cfg.seed,
            columns: ColumnGenerator::new(noise, cfg.noise_scale, cfg.max_height, cfg.bands),
        }
    }

    #[inline]
    pub fn columns(&self) -> &ColumnGenerator {
        &self.columns
    }

    #[inline]
    pub fn bands(&self) -> &HeightBands {
        self.columns.bands()
    }

    #[inline]
    pub fn max_height(&self) -> i32 {
        self.columns.max_height()
    }

    #[inline]
    pub fn height_at(&self, wx: i32, wz: i32) -> i32 {
        self.columns.height_at(wx, wz)
    }

    #[inline]
    pub fn column(&self, wx: i32, wz: i32) -> Column {
        self.columns.generate(wx, wz)
    }

    #[inline]
    pub fn chunk_of_block(&self, pos: BlockPos) -> ChunkCoord {
        ChunkCoord::of_block(pos, self.chunk_size)
    }

    #[inline]
    pub fn chunk_of_position(&self, p: Vec3) -> ChunkCoord {
        ChunkCoord::of_position(p, self.chunk_size)
    }

    /// Centre of the top block of column `(wx, wz)` plus `eye` blocks.
    pub fn spawn_above(&self, wx: i32, wz: i32, eye: f32) -> Vec3 {
        Vec3::new(wx as f32, self.height_at(wx, wz) as f32 + eye, wz as f32)
    }
}
