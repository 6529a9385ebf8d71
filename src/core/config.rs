//! Generator configuration with documented defaults
//!
//! Values are static for a run. Every field has a default, so a TOML file
//! only needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, Result};
use crate::core::types::Direction;

/// Configuration for one road network generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // === ROADS ===
    /// Upper bound on placed road cells, seed included
    pub target_road_count: u32,

    /// World units per grid cell
    ///
    /// Also the period of intersection-eligible cells: only cells whose
    /// coordinates are both multiples of this value may become intersections.
    pub grid_spacing: i32,

    /// Chance an intersection-eligible cell is upgraded to an intersection
    pub intersection_upgrade_chance: f32,

    /// Chance each non-mandatory continuation of an intersection is enqueued
    ///
    /// The first eligible continuation is always enqueued, so at 0.0 every
    /// intersection behaves like a turn or a straight.
    pub branch_chance: f32,

    /// Heading of the seed cell and of its first frontier entry
    pub initial_direction: Direction,

    // === DECORATIONS ===
    /// Per-side chance a decoration candidate is proposed for a road cell
    pub decoration_density: f32,

    /// Distance from the road centerline to a decoration (world units)
    pub decoration_lateral_offset: f32,

    /// Maximum random displacement on each horizontal axis (world units)
    pub decoration_jitter: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_road_count: 30,
            grid_spacing: 10,
            intersection_upgrade_chance: 0.3,
            branch_chance: 0.4,
            initial_direction: Direction::North,
            decoration_density: 0.5,
            decoration_lateral_offset: 5.0,
            decoration_jitter: 1.0,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration before it is used for a run
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.target_road_count == 0 {
            return Err(ConfigError::ZeroTargetCount);
        }

        if self.grid_spacing <= 0 {
            return Err(ConfigError::NonPositiveSpacing(self.grid_spacing));
        }

        for (name, value) in [
            ("intersection_upgrade_chance", self.intersection_upgrade_chance),
            ("branch_chance", self.branch_chance),
            ("decoration_density", self.decoration_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        if !self.decoration_lateral_offset.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "decoration_lateral_offset",
                value: self.decoration_lateral_offset,
            });
        }

        if !self.decoration_jitter.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "decoration_jitter",
                value: self.decoration_jitter,
            });
        }
        if self.decoration_jitter < 0.0 {
            return Err(ConfigError::NegativeJitter(self.decoration_jitter));
        }
        // Jitter is sampled from [-j, j]; the span has to stay representable
        if !(2.0 * self.decoration_jitter).is_finite() {
            return Err(ConfigError::JitterTooLarge(self.decoration_jitter));
        }

        Ok(())
    }
}
