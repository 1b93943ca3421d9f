//! Block kinds, block records, and height banding.
#![forbid(unsafe_code)]

pub mod bands;
pub mod types;

pub use bands::HeightBands;
pub use types::{Block, BlockKind};
