mod events;
mod step;

pub use step::StepReport;

use std::sync::Arc;

use loam_geom::Vec3;
use loam_world::World;

use crate::config::Config;
use crate::event::{Event, EventQueue};
use crate::gamestate::GameState;
use crate::interact::{Action, Resolved, Resolver, SurfaceHit};
use crate::streaming::Streamer;

/// Tick driver. Inputs arrive as events; each [`App::step`] drains the
/// events due this tick and then runs one streaming pass.
pub struct App {
    pub gs: GameState,
    pub queue: EventQueue,
    // results of interactions handled during the current step
    resolved: Vec<Resolved>,
}

impl App {
    pub fn new(cfg: &Config) -> Self {
        let world = Arc::new(World::new(&cfg.world));
        let streamer = Streamer::new(
            world.clone(),
            cfg.stream.radius,
            cfg.stream.max_loads_per_tick,
            cfg.stream.workers,
        );
        let resolver = Resolver::new(cfg.world.bands, cfg.interact.place_block);
        let spawn = world.spawn_above(0, 0, 2.0);
        log::info!(
            "world seed={} chunk_size={} max_height={} radius={} workers={}",
            world.seed,
            world.chunk_size,
            world.max_height(),
            cfg.stream.radius,
            cfg.stream.workers
        );
        let gs = GameState::new(world, streamer, resolver, cfg.interact.reach, spawn);
        Self {
            gs,
            queue: EventQueue::new(),
            resolved: Vec::new(),
        }
    }

    #[inline]
    pub fn observer(&self) -> Vec3 {
        self.gs.observer
    }

    #[inline]
    pub fn streamer(&self) -> &Streamer {
        &self.gs.streamer
    }

    #[inline]
    pub fn world(&self) -> &Arc<World> {
        &self.gs.world
    }

    /// Observer position for the next step.
    pub fn move_observer(&mut self, pos: Vec3) {
        self.queue.emit_now(Event::ObserverMoved { pos });
    }

    /// Queues a ray interaction, resolved against the loaded set at the
    /// start of the next step.
    pub fn request_interaction(&mut self, origin: Vec3, dir: Vec3, action: Action) {
        self.queue
            .emit_now(Event::InteractionRequested { origin, dir, action });
    }

    /// Queues an interaction whose surface hit came from an outside picker.
    pub fn request_hit(&mut self, hit: Option<SurfaceHit>, action: Action) {
        self.queue.emit_now(Event::SurfaceHitReported { hit, action });
    }
}
