//! Chunk streaming around a moving observer.
//!
//! Once per tick the observer's chunk is compared with the last one seen.
//! Only when it changes is the desired square of side `2R+1` recomputed;
//! chunks that fell outside are dropped at once and newly desired ones are
//! queued nearest-first. The queue is drained under an optional per-tick
//! budget, either inline or through the worker runtime.
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hashbrown::HashMap;
use loam_chunk::{ChunkBuf, materialize};
use loam_edit::{EditStore, Mutation};
use loam_geom::{BlockPos, Vec3};
use loam_runtime::{BuildJob, JobOut, Runtime};
use loam_world::{ChunkCoord, World};

use crate::sink::RenderSink;

// keeps every block coordinate of the desired square inside `i32`
const MAX_OBSERVER_COORD: f32 = (1u32 << 28) as f32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub loaded: usize,
    pub unloaded: usize,
    pub submitted: usize,
    /// Worker results rebuilt because the ledger moved on while in flight.
    pub stale: usize,
    /// Worker results for chunks no longer wanted.
    pub dropped: usize,
}

impl StreamStats {
    fn absorb(&mut self, other: StreamStats) {
        self.loaded += other.loaded;
        self.unloaded += other.unloaded;
        self.submitted += other.submitted;
        self.stale += other.stale;
        self.dropped += other.dropped;
    }
}

pub struct Streamer {
    world: Arc<World>,
    radius: i32,
    max_loads_per_tick: usize,
    center: Option<ChunkCoord>,
    // the streaming set
    chunks: HashMap<ChunkCoord, ChunkBuf>,
    backlog: VecDeque<ChunkCoord>,
    // coord -> job id of the build in flight
    inflight: HashMap<ChunkCoord, u64>,
    runtime: Option<Runtime>,
    next_job_id: u64,
}

impl Streamer {
    /// `workers == 0` materializes on the calling thread.
    pub fn new(world: Arc<World>, radius: i32, max_loads_per_tick: usize, workers: usize) -> Self {
        debug_assert!(radius >= 0);
        let runtime = (workers > 0).then(|| Runtime::new(world.clone(), workers));
        Self {
            world,
            radius,
            max_loads_per_tick,
            center: None,
            chunks: HashMap::new(),
            backlog: VecDeque::new(),
            inflight: HashMap::new(),
            runtime,
            next_job_id: 1,
        }
    }

    #[inline]
    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    #[inline]
    pub fn is_desired(&self, coord: ChunkCoord) -> bool {
        self.center
            .is_some_and(|c| c.chebyshev(coord) <= self.radius)
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Desired chunks not loaded yet, queued or in flight.
    #[inline]
    pub fn pending(&self) -> usize {
        self.backlog.len() + self.inflight.len()
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.backlog.is_empty() && self.inflight.is_empty()
    }

    /// Solid block at `pos` in the loaded set. Unloaded space reads as empty.
    pub fn is_solid_at(&self, pos: BlockPos) -> bool {
        let coord = self.world.chunk_of_block(pos);
        self.chunks
            .get(&coord)
            .is_some_and(|buf| buf.is_solid_at(pos))
    }

    /// One tick of streaming for an observer at `observer`.
    pub fn update(
        &mut self,
        observer: Vec3,
        edits: &EditStore,
        sink: &mut dyn RenderSink,
    ) -> StreamStats {
        let mut stats = StreamStats::default();
        if !(observer.x.abs() < MAX_OBSERVER_COORD && observer.z.abs() < MAX_OBSERVER_COORD) {
            log::warn!("observer at {:?} is outside the world, skipping tick", observer);
            return stats;
        }
        let current = self.world.chunk_of_position(observer);
        if self.center != Some(current) {
            self.recenter(current, sink, &mut stats);
        }
        if self.runtime.is_some() {
            self.drain_results(edits, sink, &mut stats);
        }
        if !self.backlog.is_empty() {
            self.pump_backlog(edits, sink, &mut stats);
        }
        stats
    }

    fn recenter(&mut self, center: ChunkCoord, sink: &mut dyn RenderSink, stats: &mut StreamStats) {
        log::debug!(
            "view center ({:?}) -> ({}, {})",
            self.center.map(<(i32, i32)>::from),
            center.cx,
            center.cz
        );
        self.center = Some(center);
        let r = self.radius;

        let gone: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .copied()
            .filter(|c| c.chebyshev(center) > r)
            .collect();
        for coord in gone {
            self.chunks.remove(&coord);
            sink.chunk_unloaded(coord);
            stats.unloaded += 1;
        }
        // results for forgotten jobs are discarded when they arrive
        self.inflight.retain(|c, _| c.chebyshev(center) <= r);

        let mut missing: Vec<ChunkCoord> = center
            .square_around(r)
            .filter(|c| !self.chunks.contains_key(c) && !self.inflight.contains_key(c))
            .collect();
        missing.sort_by_key(|c| (c.distance_sq(center), c.cz, c.cx));
        self.backlog = missing.into();
    }

    fn pump_backlog(&mut self, edits: &EditStore, sink: &mut dyn RenderSink, stats: &mut StreamStats) {
        let mut budget = if self.max_loads_per_tick == 0 {
            usize::MAX
        } else {
            self.max_loads_per_tick
        };
        while budget > 0 {
            let Some(coord) = self.backlog.pop_front() else {
                break;
            };
            if !self.is_desired(coord)
                || self.chunks.contains_key(&coord)
                || self.inflight.contains_key(&coord)
            {
                continue;
            }
            if self.runtime.is_some() {
                self.submit(coord, edits);
                stats.submitted += 1;
            } else {
                let buf = materialize(&self.world, coord, &edits.snapshot_for_chunk(coord));
                self.insert(buf, sink);
                stats.loaded += 1;
            }
            budget -= 1;
        }
        log::debug!(
            "streaming: +{} -{} submitted={} backlog={} inflight={}",
            stats.loaded,
            stats.unloaded,
            stats.submitted,
            self.backlog.len(),
            self.inflight.len()
        );
    }

    fn submit(&mut self, coord: ChunkCoord, edits: &EditStore) {
        let Some(rt) = self.runtime.as_ref() else {
            return;
        };
        let job_id = self.next_job_id;
        self.next_job_id = self.next_job_id.wrapping_add(1).max(1);
        self.inflight.insert(coord, job_id);
        rt.submit_build_job(BuildJob {
            coord,
            job_id,
            edits: edits.snapshot_for_chunk(coord),
        });
    }

    fn drain_results(&mut self, edits: &EditStore, sink: &mut dyn RenderSink, stats: &mut StreamStats) {
        let outs = match self.runtime.as_ref() {
            Some(rt) => rt.drain_worker_results(),
            None => return,
        };
        for out in outs {
            self.accept(out, edits, sink, stats);
        }
    }

    /// Inserts a finished build on the tick thread, unless it is outdated.
    fn accept(
        &mut self,
        out: JobOut,
        edits: &EditStore,
        sink: &mut dyn RenderSink,
        stats: &mut StreamStats,
    ) {
        if self.inflight.get(&out.coord) != Some(&out.job_id) {
            stats.dropped += 1;
            return;
        }
        self.inflight.remove(&out.coord);
        if !self.is_desired(out.coord) {
            stats.dropped += 1;
            return;
        }
        if out.rev < edits.get_rev(out.coord) {
            log::debug!(
                "chunk ({}, {}) built at rev {} but ledger is at {}; rebuilding",
                out.coord.cx,
                out.coord.cz,
                out.rev,
                edits.get_rev(out.coord)
            );
            self.submit(out.coord, edits);
            stats.stale += 1;
            return;
        }
        log::trace!(
            "chunk ({}, {}) built in {} ms",
            out.coord.cx,
            out.coord.cz,
            out.t_gen_ms
        );
        self.insert(out.buf, sink);
        stats.loaded += 1;
    }

    fn insert(&mut self, buf: ChunkBuf, sink: &mut dyn RenderSink) {
        sink.chunk_loaded(buf.view());
        self.chunks.insert(buf.coord, buf);
    }

    /// Blocks until every desired chunk is loaded or `timeout` passes,
    /// ignoring the per-tick budget.
    pub fn finish_pending(
        &mut self,
        edits: &EditStore,
        sink: &mut dyn RenderSink,
        timeout: Duration,
    ) -> StreamStats {
        let mut total = StreamStats::default();
        let deadline = Instant::now() + timeout;
        let budget = std::mem::replace(&mut self.max_loads_per_tick, 0);
        while !self.is_settled() {
            let mut stats = StreamStats::default();
            if !self.backlog.is_empty() {
                self.pump_backlog(edits, sink, &mut stats);
            }
            if !self.inflight.is_empty() {
                let left = deadline.saturating_duration_since(Instant::now());
                let out = self.runtime.as_ref().and_then(|rt| rt.recv_timeout(left));
                match out {
                    Some(out) => self.accept(out, edits, sink, &mut stats),
                    None => {
                        log::warn!(
                            "gave up waiting on {} chunk build(s) after {:?}",
                            self.inflight.len(),
                            timeout
                        );
                        total.absorb(stats);
                        break;
                    }
                }
            }
            total.absorb(stats);
        }
        self.max_loads_per_tick = budget;
        total
    }

    /// Applies a ledger write to the loaded chunk covering `pos`, if any, and
    /// tells the sink. Returns whether a loaded chunk changed.
    pub fn patch_block(
        &mut self,
        pos: BlockPos,
        mutation: Mutation,
        sink: &mut dyn RenderSink,
    ) -> bool {
        let coord = self.world.chunk_of_block(pos);
        let Some(buf) = self.chunks.get_mut(&coord) else {
            return false;
        };
        if !buf.apply(pos, mutation) {
            return false;
        }
        sink.block_changed(coord, pos, mutation.kind());
        true
    }

    /// `(queued, inflight)` counts from the worker runtime, zeros inline.
    pub fn runtime_counts(&self) -> (usize, usize) {
        self.runtime
            .as_ref()
            .map_or((0, 0), Runtime::queue_debug_counts)
    }
}
