use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use loam::{Action, App, Config, LogSink};
use loam_geom::Vec3;

const DEFAULT_CONFIG: &str = "loam.toml";
const EYE_HEIGHT: f32 = 2.0;
const REMOVE_EVERY: u64 = 20;
const PLACE_EVERY: u64 = 30;

#[derive(Parser, Debug)]
#[command(
    name = "loam",
    about = "Headless walk through streamed voxel terrain"
)]
struct Cli {
    /// TOML config; a missing default file falls back to built-in defaults
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,
    #[arg(long)]
    seed: Option<i32>,
    /// Streaming radius in chunks
    #[arg(long)]
    radius: Option<i32>,
    /// Worker threads for chunk materialization (0 = tick thread)
    #[arg(long)]
    workers: Option<usize>,
    #[arg(long, default_value_t = 200)]
    ticks: u64,
    /// Blocks walked along +x per tick
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
}

fn load_config(path: &Path) -> Result<Config, loam::ConfigError> {
    if path == Path::new(DEFAULT_CONFIG) && !path.exists() {
        log::info!("{} not found, using defaults", DEFAULT_CONFIG);
        return Ok(Config::default());
    }
    Config::load(path)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut cfg = load_config(&cli.config)?;
    if let Some(seed) = cli.seed {
        cfg.world.seed = seed;
    }
    if let Some(radius) = cli.radius {
        cfg.stream.radius = radius;
    }
    if let Some(workers) = cli.workers {
        cfg.stream.workers = workers;
    }
    cfg.validate()?;
    if !cli.speed.is_finite() {
        return Err(format!("--speed must be finite, got {}", cli.speed).into());
    }

    let mut app = App::new(&cfg);
    let mut sink = LogSink::default();
    let started = Instant::now();
    let mut removed = 0usize;
    let mut placed = 0usize;

    for tick in 0..cli.ticks {
        let x = tick as f32 * cli.speed;
        let wx = x.floor() as i32;
        let ground = app.world().height_at(wx, 0) as f32;
        let eye = Vec3::new(x, ground + EYE_HEIGHT, 0.0);
        app.move_observer(eye);

        // look down and ahead
        let dir = Vec3::new(1.0, -1.0, 0.0);
        if tick > 0 && tick % REMOVE_EVERY == 0 {
            app.request_interaction(eye, dir, Action::Remove);
        }
        if tick > 0 && tick % PLACE_EVERY == 0 {
            app.request_interaction(eye, dir, Action::Place);
        }

        let report = app.step(&mut sink);
        for r in &report.resolved {
            match r.mutation.kind() {
                Some(_) => placed += 1,
                None => removed += 1,
            }
        }
        if report.stream.loaded + report.stream.unloaded > 0 {
            log::debug!(
                "tick {}: +{} -{} loaded={} pending={}",
                report.tick,
                report.stream.loaded,
                report.stream.unloaded,
                app.streamer().len(),
                app.streamer().pending()
            );
        }
    }
    app.settle(&mut sink, Duration::from_secs(10));

    let stats = app.gs.edits.stats();
    log::info!(
        "{} ticks in {:.2?}: chunks loaded={} unloaded={} live={} blocks emitted={}",
        cli.ticks,
        started.elapsed(),
        sink.loaded,
        sink.unloaded,
        app.streamer().len(),
        sink.blocks_emitted
    );
    log::info!(
        "edits: removed={} placed={} patched={} ledger entries={} chunks touched={}",
        removed,
        placed,
        sink.changed,
        stats.block_edits,
        stats.chunk_entries
    );
    Ok(())
}
