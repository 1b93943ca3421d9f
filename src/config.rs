//! Startup configuration: one TOML file, every field defaulted.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use loam_blocks::BlockKind;
use loam_world::WorldGenConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub world: WorldGenConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub interact: InteractConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StreamConfig {
    /// Chebyshev radius in chunks.
    #[serde(default = "default_radius")]
    pub radius: i32,
    /// Chunk creations per tick, 0 for no limit.
    #[serde(default)]
    pub max_loads_per_tick: usize,
    /// Worker threads for materialization, 0 to build on the tick thread.
    #[serde(default)]
    pub workers: usize,
}

fn default_radius() -> i32 {
    4
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            max_loads_per_tick: 0,
            workers: 0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InteractConfig {
    #[serde(default = "default_reach")]
    pub reach: f32,
    /// Fixed kind for placed blocks; unset means the height band of the
    /// target `y`.
    #[serde(default)]
    pub place_block: Option<BlockKind>,
}

fn default_reach() -> f32 {
    64.0
}

impl Default for InteractConfig {
    fn default() -> Self {
        Self {
            reach: default_reach(),
            place_block: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and validates `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if w.chunk_size <= 0 {
            return Err(invalid(format!("world.chunk_size must be positive, got {}", w.chunk_size)));
        }
        if w.max_height <= 0 {
            return Err(invalid(format!("world.max_height must be positive, got {}", w.max_height)));
        }
        if !w.noise_scale.is_finite() || w.noise_scale <= 0.0 {
            return Err(invalid(format!(
                "world.noise_scale must be a positive number, got {}",
                w.noise_scale
            )));
        }
        if !w.bands.is_ascending() {
            return Err(invalid(format!(
                "world.bands must ascend (dirt_above < stone_above < snow_above), got {} / {} / {}",
                w.bands.dirt_above, w.bands.stone_above, w.bands.snow_above
            )));
        }
        if self.stream.radius < 0 {
            return Err(invalid(format!("stream.radius must not be negative, got {}", self.stream.radius)));
        }
        if !self.interact.reach.is_finite() || self.interact.reach <= 0.0 {
            return Err(invalid(format!(
                "interact.reach must be a positive number, got {}",
                self.interact.reach
            )));
        }
        if self.interact.place_block == Some(BlockKind::Empty) {
            return Err(invalid("interact.place_block cannot be 'empty'".to_string()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_valid_default() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.world.chunk_size, 16);
        assert_eq!(cfg.stream.radius, 4);
    }

    #[test]
    fn sections_parse() {
        let cfg = Config::from_toml_str(
            r#"
            [world]
            seed = 42
            chunk_size = 8
            [world.bands]
            snow_above = 50
            [stream]
            radius = 2
            max_loads_per_tick = 3
            workers = 2
            [interact]
            reach = 12.5
            place_block = "stone"
        "#,
        )
        .unwrap();
        assert_eq!(cfg.world.seed, 42);
        assert_eq!(cfg.world.chunk_size, 8);
        assert_eq!(cfg.world.bands.snow_above, 50);
        assert_eq!(cfg.stream.max_loads_per_tick, 3);
        assert_eq!(cfg.stream.workers, 2);
        assert_eq!(cfg.interact.place_block, Some(BlockKind::Stone));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            "[world]\nchunk_size = 0",
            "[world]\nchunk_size = -16",
            "[world]\nmax_height = 0",
            "[world]\nnoise_scale = 0.0",
            "[world.bands]\ndirt_above = 30",
            "[stream]\nradius = -1",
            "[interact]\nreach = 0.0",
            "[interact]\nplace_block = \"empty\"",
        ];
        for src in cases {
            let cfg = Config::from_toml_str(src).unwrap();
            assert!(
                matches!(cfg.validate(), Err(ConfigError::Invalid(_))),
                "{src:?} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_block_kind_is_a_parse_error() {
        let err = Config::from_toml_str("[interact]\nplace_block = \"lava\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/loam.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
