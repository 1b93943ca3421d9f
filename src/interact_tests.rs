#![cfg(test)]

use std::sync::Arc;

use crate::interact::target_for;
use crate::{
    Action, RecordingSink, RenderNotice, Resolved, Resolver, Streamer, SurfaceHit, SurfacePicker,
    VoxelPicker,
};
use loam_blocks::{BlockKind, HeightBands};
use loam_edit::{EditStore, Mutation};
use loam_geom::{BlockPos, Vec3};
use loam_world::{ChunkCoord, World, WorldGenConfig};

const SIZE: usize = 8;
const REACH: f32 = 64.0;

struct Scene {
    world: Arc<World>,
    streamer: Streamer,
    edits: EditStore,
    sink: RecordingSink,
    resolver: Resolver,
}

fn scene(place_block: Option<BlockKind>) -> Scene {
    let world = Arc::new(World::new(&WorldGenConfig {
        chunk_size: SIZE as i32,
        max_height: 16,
        seed: 99,
        ..WorldGenConfig::default()
    }));
    let mut streamer = Streamer::new(world.clone(), 1, 0, 0);
    let edits = EditStore::new(SIZE);
    let mut sink = RecordingSink::new();
    streamer.update(Vec3::new(4.0, 20.0, 4.0), &edits, &mut sink);
    sink.take();
    Scene {
        resolver: Resolver::new(HeightBands::default(), place_block),
        world,
        streamer,
        edits,
        sink,
    }
}

impl Scene {
    fn resolve(&mut self, origin: Vec3, dir: Vec3, action: Action) -> Option<Resolved> {
        self.resolver.resolve(
            origin,
            dir,
            action,
            REACH,
            &mut self.edits,
            &mut self.streamer,
            &mut self.sink,
        )
    }
}

#[test]
fn looking_down_removes_top_and_places_above() {
    let mut sc = scene(None);
    let (wx, wz) = (3, 5);
    let top = sc.world.height_at(wx, wz);
    let eye = Vec3::new(wx as f32, top as f32 + 3.0, wz as f32);
    let down = Vec3::new(0.0, -1.0, 0.0);

    let placed = sc.resolve(eye, down, Action::Place).expect("hit ground");
    assert_eq!(placed.pos, BlockPos::new(wx, top + 1, wz));
    assert_eq!(
        placed.mutation,
        Mutation::Added(HeightBands::default().kind_for(top + 1))
    );
    assert!(placed.patched);

    // the placed block is now the first surface
    let removed = sc.resolve(eye, down, Action::Remove).expect("hit placed block");
    assert_eq!(removed.pos, BlockPos::new(wx, top + 1, wz));
    assert_eq!(removed.mutation, Mutation::Removed);
    assert_eq!(sc.edits.lookup(removed.pos), Some(Mutation::Removed));
    assert!(!sc.streamer.is_solid_at(removed.pos));
    assert!(sc.streamer.is_solid_at(BlockPos::new(wx, top, wz)));
}

#[test]
fn removing_a_floating_block_twice_is_a_no_hit() {
    let mut sc = scene(Some(BlockKind::Stone));
    let pos = BlockPos::new(2, 30, 2);
    sc.edits.record(pos, Mutation::Added(BlockKind::Stone));
    sc.streamer
        .patch_block(pos, Mutation::Added(BlockKind::Stone), &mut sc.sink);
    sc.sink.take();

    let origin = Vec3::new(-3.0, 30.0, 2.0);
    let east = Vec3::new(1.0, 0.0, 0.0);
    let first = sc.resolve(origin, east, Action::Remove).expect("hits floating block");
    assert_eq!(first.pos, pos);
    assert_eq!(
        sc.sink.take(),
        vec![RenderNotice::BlockChanged {
            coord: ChunkCoord::new(0, 0),
            pos,
            kind: None,
        }]
    );

    let revs = sc.edits.get_rev(ChunkCoord::new(0, 0));
    assert_eq!(sc.resolve(origin, east, Action::Remove), None);
    assert_eq!(sc.edits.get_rev(ChunkCoord::new(0, 0)), revs);
    assert!(sc.sink.notices.is_empty());
}

#[test]
fn open_sky_is_a_no_op() {
    let mut sc = scene(None);
    let up = Vec3::new(0.0, 1.0, 0.0);
    assert_eq!(sc.resolve(Vec3::new(1.0, 20.0, 1.0), up, Action::Place), None);
    assert!(sc.edits.is_empty());
}

#[test]
fn ray_starting_inside_terrain_has_no_face() {
    let sc = scene(None);
    let picker = VoxelPicker::new(&sc.streamer, REACH);
    let inside = Vec3::new(1.0, 0.0, 1.0);
    assert_eq!(picker.first_hit(inside, Vec3::new(0.0, -1.0, 0.0)), None);
}

#[test]
fn voxel_picker_reports_face_point_and_normal() {
    let sc = scene(None);
    let (wx, wz) = (-2, 6);
    let top = sc.world.height_at(wx, wz);
    let picker = VoxelPicker::new(&sc.streamer, REACH);
    let hit = picker
        .first_hit(
            Vec3::new(wx as f32, top as f32 + 4.0, wz as f32),
            Vec3::new(0.0, -2.0, 0.0),
        )
        .expect("ground below");
    assert_eq!(hit.normal, Vec3::new(0.0, 1.0, 0.0));
    assert!((hit.point.y - (top as f32 + 0.5)).abs() < 1e-4);
    assert_eq!(target_for(hit, Action::Remove), BlockPos::new(wx, top, wz));
}

struct FixedPicker(Option<SurfaceHit>);

impl SurfacePicker for FixedPicker {
    fn first_hit(&self, _origin: Vec3, _dir: Vec3) -> Option<SurfaceHit> {
        self.0
    }
}

impl Scene {
    fn kind_at(&self, pos: BlockPos) -> Option<BlockKind> {
        self.streamer
            .get(self.world.chunk_of_block(pos))
            .and_then(|buf| buf.get_world(pos))
    }

    fn apply(&mut self, hit: SurfaceHit, action: Action) -> Option<Resolved> {
        let hit = FixedPicker(Some(hit)).first_hit(Vec3::ZERO, Vec3::UP);
        self.resolver
            .apply(hit, action, &mut self.edits, &mut self.streamer, &mut self.sink)
    }
}

#[test]
fn external_hit_outside_loaded_set_still_reaches_ledger() {
    let mut sc = scene(None);
    let out = sc
        .apply(
            SurfaceHit {
                point: Vec3::new(200.5, 20.2, 0.1),
                normal: Vec3::new(1.0, 0.0, 0.0),
            },
            Action::Place,
        )
        .expect("hit given");
    assert_eq!(out.pos, BlockPos::new(201, 20, 0));
    assert!(!out.patched);
    assert_eq!(sc.edits.lookup(out.pos), Some(Mutation::Added(BlockKind::Dirt)));
}

#[test]
fn placing_into_a_loaded_solid_cell_changes_nothing() {
    let mut sc = scene(Some(BlockKind::Snow));
    let (wx, wz) = (3, 3);
    let top = BlockPos::new(wx, sc.world.height_at(wx, wz), wz);
    let before = sc.kind_at(top);
    assert!(before.is_some());

    // a bottom face hit from below aims its placement at the ground block
    let out = sc.apply(
        SurfaceHit {
            point: Vec3::new(wx as f32, top.y as f32 + 0.5, wz as f32),
            normal: Vec3::new(0.0, -1.0, 0.0),
        },
        Action::Place,
    );
    assert_eq!(out, None);
    assert!(sc.edits.is_empty());
    assert_eq!(sc.edits.get_rev(ChunkCoord::new(0, 0)), 0);
    assert_eq!(sc.kind_at(top), before);
    assert!(sc.sink.notices.is_empty());
}

#[test]
fn placing_into_an_unloaded_cell_consults_ledger_then_terrain() {
    let mut sc = scene(None);
    let (wx, wz) = (200, 0);
    let top = sc.world.height_at(wx, wz);
    assert!(!sc.streamer.is_loaded(sc.world.chunk_of_block(BlockPos::new(wx, top, wz))));
    let aim_at = |y: i32| SurfaceHit {
        point: Vec3::new(wx as f32, y as f32 + 0.5, wz as f32),
        normal: Vec3::new(0.0, -1.0, 0.0),
    };

    // generated ground
    assert_eq!(sc.apply(aim_at(top), Action::Place), None);
    assert!(sc.edits.is_empty());

    // a removed ground block frees the cell again
    let ground = BlockPos::new(wx, top, wz);
    sc.edits.record(ground, Mutation::Removed);
    let out = sc.apply(aim_at(top), Action::Place).expect("cell was cleared");
    assert_eq!(out.pos, ground);
    assert!(!out.patched);

    // and the block placed there now occupies it
    let rev = sc.edits.get_rev(sc.world.chunk_of_block(ground));
    assert_eq!(sc.apply(aim_at(top), Action::Place), None);
    assert_eq!(sc.edits.get_rev(sc.world.chunk_of_block(ground)), rev);
    assert!(sc.sink.notices.is_empty());
}
