//! Worker pool for off-thread chunk materialization.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use loam_chunk::{ChunkBuf, materialize};
use loam_edit::ChunkEdits;
use loam_world::{ChunkCoord, World};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// One chunk to build. `edits` is a snapshot taken on the tick thread, so
/// ledger writes made after submission are never visible to this job.
#[derive(Clone, Debug)]
pub struct BuildJob {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub edits: ChunkEdits,
}

impl BuildJob {
    #[inline]
    pub fn rev(&self) -> u64 {
        self.edits.rev
    }
}

pub struct JobOut {
    pub coord: ChunkCoord,
    pub rev: u64,
    pub job_id: u64,
    pub buf: ChunkBuf,
    pub t_gen_ms: u32,
}

fn process_build_job(job: BuildJob, world: &World, tx: &Sender<JobOut>) {
    let BuildJob {
        coord,
        job_id,
        edits,
    } = job;
    let t0 = Instant::now();
    let buf = materialize(world, coord, &edits);
    let t_gen_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    // receiver gone means the runtime is shutting down
    let _ = tx.send(JobOut {
        coord,
        rev: edits.rev,
        job_id,
        buf,
        t_gen_ms,
    });
}

pub struct Runtime {
    job_tx: Sender<BuildJob>,
    res_rx: Receiver<JobOut>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    pub workers: usize,
}

impl Runtime {
    pub fn new(world: Arc<World>, workers: usize) -> Self {
        let workers = workers.max(1);
        let (job_tx, job_rx) = unbounded::<BuildJob>();
        let (res_tx, res_rx) = unbounded::<JobOut>();
        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("loam-gen-{i}"))
                .build()
                .expect("chunk worker pool"),
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let world = world.clone();
            let queued = queued.clone();
            let inflight = inflight.clone();
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    process_build_job(job, world.as_ref(), &tx);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }
        log::debug!("chunk runtime started with {workers} worker(s)");

        Self {
            job_tx,
            res_rx,
            _pool: pool,
            queued,
            inflight,
            workers,
        }
    }

    pub fn submit_build_job(&self, job: BuildJob) {
        self.queued.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    pub fn drain_worker_results(&self) -> Vec<JobOut> {
        self.res_rx.try_iter().collect()
    }

    /// Blocks for at most `timeout` waiting on the next result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<JobOut> {
        self.res_rx.recv_timeout(timeout).ok()
    }

    /// `(queued, inflight)` job counts.
    pub fn queue_debug_counts(&self) -> (usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }
}
