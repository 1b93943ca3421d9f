//! Infinite voxel terrain streamed around a moving observer, with block
//! edits that survive chunks leaving and re-entering range.
pub mod app;
pub mod config;
pub mod event;
pub mod gamestate;
pub mod interact;
pub mod raycast;
pub mod sink;
pub mod streaming;

mod interact_tests;

pub use app::{App, StepReport};
pub use config::{Config, ConfigError};
pub use interact::{Action, Resolved, Resolver, SurfaceHit, SurfacePicker, VoxelPicker};
pub use sink::{LogSink, RecordingSink, RenderNotice, RenderSink};
pub use streaming::{StreamStats, Streamer};
