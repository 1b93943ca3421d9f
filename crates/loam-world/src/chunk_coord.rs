use loam_geom::{BlockPos, Vec3};
use serde::{Deserialize, Serialize};

/// Horizontal chunk coordinate. Chunk `(cx, cz)` covers world columns
/// `[cx*S, (cx+1)*S) x [cz*S, (cz+1)*S)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk owning world column `(wx, wz)`.
    #[inline]
    pub fn containing(wx: i32, wz: i32, size: usize) -> Self {
        let s = size as i32;
        Self {
            cx: wx.div_euclid(s),
            cz: wz.div_euclid(s),
        }
    }

    #[inline]
    pub fn of_block(pos: BlockPos, size: usize) -> Self {
        Self::containing(pos.x, pos.z, size)
    }

    /// Chunk under a real-valued position, `floor(p / size)` per axis.
    #[inline]
    pub fn of_position(p: Vec3, size: usize) -> Self {
        let s = size as f32;
        Self {
            cx: (p.x / s).floor() as i32,
            cz: (p.z / s).floor() as i32,
        }
    }

    /// World `(x, z)` of the chunk's minimum corner.
    #[inline]
    pub fn origin(self, size: usize) -> (i32, i32) {
        let s = size as i32;
        (self.cx * s, self.cz * s)
    }

    #[inline]
    pub fn contains(self, wx: i32, wz: i32, size: usize) -> bool {
        Self::containing(wx, wz, size) == self
    }

    /// Saturates at the edges of the `i32` range.
    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx.saturating_add(dx),
            cz: self.cz.saturating_add(dz),
        }
    }

    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        let dx = (i64::from(self.cx) - i64::from(other.cx)).abs();
        let dz = (i64::from(self.cz) - i64::from(other.cz)).abs();
        dx.max(dz).min(i64::from(i32::MAX)) as i32
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx) - i64::from(other.cx);
        let dz = i64::from(self.cz) - i64::from(other.cz);
        dx.saturating_mul(dx).saturating_add(dz.saturating_mul(dz))
    }

    /// Every coordinate within Chebyshev distance `radius`, a square of
    /// side `2r+1`, in row-major order.
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        (-radius..=radius)
            .flat_map(move |dz| (-radius..=radius).map(move |dx| self.offset(dx, dz)))
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}
