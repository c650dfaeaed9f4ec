//! Battle configuration with documented tunables
//!
//! Board geometry is fixed and lives in `battle::constants`. The values here
//! shape army composition and how long a simulation may run.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::battle::constants::{
    DEFAULT_PRESET_COMPOSITION, DEPLOYMENT_CELLS, MAX_UNITS_PER_TYPE, PRESET_TEMPLATE_COUNT,
};
use crate::core::error::{BattleError, Result};

/// Configuration for army planning and battle simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    // === ARMY PLANNER ===
    /// Upper bound on units purchased from a single template
    ///
    /// The greedy planner buys `min(remaining / cost, max_units_per_type)`
    /// of each template, so this cap is what forces it to diversify.
    pub max_units_per_type: usize,

    /// Unit counts for the fixed preset army, one entry per template
    ///
    /// Default is 11 / 11 / 11 / 9 (42 units). The total must fit in the
    /// deployment zone.
    pub preset_composition: [usize; PRESET_TEMPLATE_COUNT],

    // === TURN SCHEDULER ===
    /// Optional cap on the number of rounds
    ///
    /// `None` runs until one side has no living units. A cap is useful for
    /// attack programs that cannot guarantee progress.
    pub max_rounds: Option<u32>,

    /// Seed used by the CLI when none is given on the command line
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_units_per_type: MAX_UNITS_PER_TYPE,
            preset_composition: DEFAULT_PRESET_COMPOSITION,
            max_rounds: None,
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Total number of units in the preset army
    pub fn preset_size(&self) -> usize {
        self.preset_composition.iter().sum()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_units_per_type == 0 {
            return Err(BattleError::InvalidConfig(
                "max_units_per_type must be at least 1".into(),
            ));
        }

        if self.preset_size() > DEPLOYMENT_CELLS {
            return Err(BattleError::InvalidConfig(format!(
                "preset_composition places {} units but the deployment zone has {} cells",
                self.preset_size(),
                DEPLOYMENT_CELLS
            )));
        }

        if self.max_rounds == Some(0) {
            return Err(BattleError::InvalidConfig(
                "max_rounds must be positive when set".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<BattleConfig> = OnceLock::new();

/// Get the global battle config (initializes with defaults if not set)
pub fn config() -> &'static BattleConfig {
    CONFIG.get_or_init(BattleConfig::default)
}

/// Set the global battle config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: BattleConfig) -> std::result::Result<(), BattleConfig> {
    CONFIG.set(config)
}
