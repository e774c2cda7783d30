//! Session configuration
//!
//! Values come from environment variables with lenient parsing: a missing or
//! malformed variable falls back to its default. [`SessionConfig::validate`] then
//! rejects combinations the engine cannot run with.

use anyhow::{ensure, Result};

use crate::core::FieldConfig;
use crate::types::{
    FALL_INTERVAL_MS, FIELD_HEIGHT, FIELD_WIDTH, GAME_OVER_DELAY_MS, LINE_CLEAR_DELAY_MS,
};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub field: FieldConfig,
    /// Period of the `Down` timer
    pub fall_interval_ms: u64,
    /// Delay between top-out detection and `GameOver`
    pub game_over_delay_ms: u64,
    /// Delay between a confirmed lock and the full-row check
    pub line_clear_delay_ms: u64,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            fall_interval_ms: FALL_INTERVAL_MS as u64,
            game_over_delay_ms: GAME_OVER_DELAY_MS as u64,
            line_clear_delay_ms: LINE_CLEAR_DELAY_MS as u64,
            seed: 1,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`: field size (10 x 20)
    /// - `BLOCKFALL_SPAWN_X`: spawn column (width / 2)
    /// - `BLOCKFALL_FALL_MS`: fall timer period (500)
    /// - `BLOCKFALL_SEED`: RNG seed (derived from the clock when unset)
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let width = parsed("BLOCKFALL_WIDTH").unwrap_or(FIELD_WIDTH);
        let height = parsed("BLOCKFALL_HEIGHT").unwrap_or(FIELD_HEIGHT);
        let mut field = FieldConfig::new(width, height);
        if let Some(spawn_x) = parsed("BLOCKFALL_SPAWN_X") {
            field.spawn_x = spawn_x;
        }

        let fall_interval_ms = parsed("BLOCKFALL_FALL_MS").unwrap_or(FALL_INTERVAL_MS as u64);
        let seed = parsed("BLOCKFALL_SEED").unwrap_or_else(clock_seed);

        Self {
            field,
            fall_interval_ms,
            seed,
            ..Self::default()
        }
    }

    /// Reject configurations the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.field.width > 0 && self.field.height > 0,
            "field must have at least one row and one column (got {}x{})",
            self.field.width,
            self.field.height
        );
        ensure!(self.fall_interval_ms > 0, "fall interval must be positive");
        ensure!(
            self.field.catalog_fits(),
            "spawn offset ({}, {}) does not fit every piece on a {}x{} field",
            self.field.spawn_x,
            self.field.spawn_y,
            self.field.width,
            self.field.height
        );
        Ok(())
    }
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
