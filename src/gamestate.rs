use std::sync::Arc;

use loam_edit::EditStore;
use loam_geom::Vec3;
use loam_world::World;

use crate::interact::Resolver;
use crate::streaming::Streamer;

/// Everything the tick thread owns. The ledger and the streaming set live
/// here and are only lent out for the duration of a call.
pub struct GameState {
    pub tick: u64,
    pub world: Arc<World>,

    // Observer, sampled once per tick
    pub observer: Vec3,

    // Authoritative overrides + the loaded set derived from them
    pub edits: EditStore,
    pub streamer: Streamer,

    pub resolver: Resolver,
    pub reach: f32,
}

impl GameState {
    pub fn new(world: Arc<World>, streamer: Streamer, resolver: Resolver, reach: f32, observer: Vec3) -> Self {
        let edits = EditStore::new(world.chunk_size);
        Self {
            tick: 0,
            world,
            observer,
            edits,
            streamer,
            resolver,
            reach,
        }
    }
}
