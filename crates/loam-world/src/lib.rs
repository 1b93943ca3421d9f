//! World sizing, noise sampling, and column generation.
#![forbid(unsafe_code)]

pub mod column;
pub mod noise;
pub mod worldgen;
mod chunk_coord;
mod world;

pub use chunk_coord::ChunkCoord;
pub use column::{Column, ColumnCell, ColumnGenerator};
pub use noise::NoiseField;
pub use worldgen::WorldGenConfig;
pub use world::World;
