pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, BattleConfig};
pub use error::{BattleError, Result};
pub use types::{ArmyId, Side, UnitId};
