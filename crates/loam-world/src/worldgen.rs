use loam_blocks::HeightBands;
use serde::Deserialize;

/// `[world]` section of the config file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldGenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: i32,
    #[serde(default = "default_max_height")]
    pub max_height: i32,
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f32,
    #[serde(default)]
    pub bands: HeightBands,
}

fn default_seed() -> i32 {
    1337
}
fn default_chunk_size() -> i32 {
    16
}
fn default_max_height() -> i32 {
    64
}
fn default_noise_scale() -> f32 {
    0.05
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            chunk_size: default_chunk_size(),
            max_height: default_max_height(),
            noise_scale: default_noise_scale(),
            bands: HeightBands::default(),
        }
    }
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_default() {
        assert_eq!(WorldGenConfig::from_toml_str("").unwrap(), WorldGenConfig::default());
    }

    #[test]
    fn nested_bands_parse() {
        let cfg = WorldGenConfig::from_toml_str(
            r#"
            seed = -4
            max_height = 32
            [bands]
            dirt_above = 4
            stone_above = 12
            snow_above = 24
        "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, -4);
        assert_eq!(cfg.chunk_size, 16);
        assert_eq!(cfg.max_height, 32);
        assert_eq!(cfg.bands.snow_above, 24);
    }
}
