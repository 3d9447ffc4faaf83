//! Game settings gathered from an optional TOML file and command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use slide_merge_core::{TileValue, DEFAULT_BOARD_SIZE, DEFAULT_TARGET_VALUE};
use slide_merge_system_session::{SessionConfig, DEFAULT_INITIAL_TILES};
use slide_merge_system_spawning::SpawnPolicy;

const DEFAULT_FIRST_TILE: u32 = 2;
const DEFAULT_SPAWN_VALUES: [u32; 4] = [2, 2, 2, 4];

/// Settings accepted from the TOML file; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GameSettings {
    pub(crate) size: Option<u32>,
    pub(crate) seed: Option<u64>,
    pub(crate) target: Option<TileValue>,
    pub(crate) first_tile: Option<TileValue>,
    pub(crate) values: Option<Vec<TileValue>>,
    pub(crate) initial_tiles: Option<usize>,
}

impl GameSettings {
    /// Reads settings from the TOML file at `path`.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Parses settings from TOML text.
    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse settings toml contents")
    }

    /// Overlays every field set in `overrides` onto `self`.
    #[must_use]
    pub(crate) fn merged_with(self, overrides: GameSettings) -> Self {
        Self {
            size: overrides.size.or(self.size),
            seed: overrides.seed.or(self.seed),
            target: overrides.target.or(self.target),
            first_tile: overrides.first_tile.or(self.first_tile),
            values: overrides.values.or(self.values),
            initial_tiles: overrides.initial_tiles.or(self.initial_tiles),
        }
    }

    /// Resolves the settings into a session configuration, filling in defaults.
    pub(crate) fn into_session_config(self) -> Result<SessionConfig> {
        let first_tile = match self.first_tile {
            Some(value) => Some(value),
            None => Some(TileValue::new(DEFAULT_FIRST_TILE)?),
        };
        let values = match self.values {
            Some(values) => values,
            None => DEFAULT_SPAWN_VALUES
                .iter()
                .map(|raw| TileValue::new(*raw))
                .collect::<Result<Vec<_>, _>>()?,
        };
        let policy = SpawnPolicy::new(first_tile, values).context("invalid spawn values")?;

        let mut config = SessionConfig::new(policy)
            .with_board_size(self.size.unwrap_or(DEFAULT_BOARD_SIZE))
            .with_target(self.target.unwrap_or(DEFAULT_TARGET_VALUE))
            .with_initial_tiles(self.initial_tiles.unwrap_or(DEFAULT_INITIAL_TILES));
        if let Some(seed) = self.seed {
            config = config.with_rng_seed(seed);
        }
        Ok(config)
    }
}
