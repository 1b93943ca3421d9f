//! Turns a view ray plus the first surface it hits into a ledger write.
use loam_blocks::{BlockKind, HeightBands};
use loam_edit::{EditStore, Mutation};
use loam_geom::{BlockPos, Vec3};

use crate::raycast::raycast_first_hit_with_face;
use crate::sink::RenderSink;
use crate::streaming::Streamer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Place,
    Remove,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Place => "place",
            Action::Remove => "remove",
        }
    }
}

/// First surface crossed by a ray: a point on a block face and that face's
/// outward unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Whatever can answer "what does this ray hit first". The renderer owns the
/// real geometry; [`VoxelPicker`] stands in for it headless.
pub trait SurfacePicker {
    fn first_hit(&self, origin: Vec3, dir: Vec3) -> Option<SurfaceHit>;
}

/// Removal targets the block behind the face, placement the cell in front.
#[inline]
pub fn target_for(hit: SurfaceHit, action: Action) -> BlockPos {
    let half = hit.normal * 0.5;
    match action {
        Action::Remove => BlockPos::from_rounded(hit.point - half),
        Action::Place => BlockPos::from_rounded(hit.point + half),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub pos: BlockPos,
    pub mutation: Mutation,
    /// Ledger revision of the owning chunk after the write.
    pub rev: u64,
    /// A loaded chunk was patched in place.
    pub patched: bool,
}

#[derive(Clone, Debug)]
pub struct Resolver {
    bands: HeightBands,
    place_block: Option<BlockKind>,
}

impl Resolver {
    pub fn new(bands: HeightBands, place_block: Option<BlockKind>) -> Self {
        debug_assert!(place_block != Some(BlockKind::Empty));
        Self { bands, place_block }
    }

    /// Placed blocks take the configured kind, or else the band of their `y`.
    #[inline]
    pub fn place_kind_at(&self, y: i32) -> BlockKind {
        self.place_block.unwrap_or_else(|| self.bands.kind_for(y))
    }

    /// Pure part: the mutation a hit would produce. `None` hit is a no-op.
    pub fn mutation_for(
        &self,
        hit: Option<SurfaceHit>,
        action: Action,
    ) -> Option<(BlockPos, Mutation)> {
        let hit = hit?;
        let pos = target_for(hit, action);
        let mutation = match action {
            Action::Remove => Mutation::Removed,
            Action::Place => Mutation::Added(self.place_kind_at(pos.y)),
        };
        Some((pos, mutation))
    }

    /// Records the mutation for `hit` and patches the loaded chunk covering
    /// it in the same call, so the next materialization and the live view
    /// agree. Placing into an occupied cell does nothing.
    pub fn apply(
        &self,
        hit: Option<SurfaceHit>,
        action: Action,
        edits: &mut EditStore,
        streamer: &mut Streamer,
        sink: &mut dyn RenderSink,
    ) -> Option<Resolved> {
        let (pos, mutation) = self.mutation_for(hit, action)?;
        if matches!(mutation, Mutation::Added(_)) && is_occupied(pos, edits, streamer) {
            log::debug!(
                "place at ({}, {}, {}) skipped: cell occupied",
                pos.x,
                pos.y,
                pos.z
            );
            return None;
        }
        let rev = edits.record(pos, mutation);
        let patched = streamer.patch_block(pos, mutation, sink);
        log::debug!(
            "{} at ({}, {}, {}) -> {:?} (rev {}, patched={})",
            action.name(),
            pos.x,
            pos.y,
            pos.z,
            mutation,
            rev,
            patched
        );
        Some(Resolved {
            pos,
            mutation,
            rev,
            patched,
        })
    }

    /// Picks against the loaded set with a voxel raycast, then applies.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        &self,
        origin: Vec3,
        dir: Vec3,
        action: Action,
        reach: f32,
        edits: &mut EditStore,
        streamer: &mut Streamer,
        sink: &mut dyn RenderSink,
    ) -> Option<Resolved> {
        let hit = VoxelPicker::new(streamer, reach).first_hit(origin, dir);
        self.apply(hit, action, edits, streamer, sink)
    }
}

/// Whether a block currently stands at `pos`: the live chunk if loaded,
/// otherwise the ledger over the generator.
fn is_occupied(pos: BlockPos, edits: &EditStore, streamer: &Streamer) -> bool {
    let world = streamer.world();
    if let Some(buf) = streamer.get(world.chunk_of_block(pos)) {
        return buf.get_world(pos).is_some();
    }
    match edits.lookup(pos) {
        Some(Mutation::Added(_)) => true,
        Some(Mutation::Removed) => false,
        None => world.columns().block_at(pos.x, pos.y, pos.z).is_some(),
    }
}

/// Raycasts against the blocks of the loaded chunks.
pub struct VoxelPicker<'a> {
    streamer: &'a Streamer,
    reach: f32,
}

impl<'a> VoxelPicker<'a> {
    pub fn new(streamer: &'a Streamer, reach: f32) -> Self {
        Self { streamer, reach }
    }
}

impl SurfacePicker for VoxelPicker<'_> {
    fn first_hit(&self, origin: Vec3, dir: Vec3) -> Option<SurfaceHit> {
        let hit = raycast_first_hit_with_face(origin, dir, self.reach, |p| {
            self.streamer.is_solid_at(p)
        })?;
        // starting inside a block gives no face to aim at
        if hit.normal == (0, 0, 0) {
            return None;
        }
        let (nx, ny, nz) = hit.normal;
        Some(SurfaceHit {
            point: origin + dir.normalized() * hit.t,
            normal: Vec3::new(nx as f32, ny as f32, nz as f32),
        })
    }
}
