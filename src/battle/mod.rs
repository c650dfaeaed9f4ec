//! Battle system - army planning, targeting, pathfinding and turn order
//!
//! The per-unit attack decision and damage resolution live outside this
//! module: units carry an opaque [`AttackProgram`] that consumes the target
//! filter and the pathfinder.

pub mod battle_map;
pub mod catalog;
pub mod constants;
pub mod execution;
pub mod grid;
pub mod pathfinding;
pub mod planning;
pub mod targeting;
pub mod unit_type;
pub mod units;

// Re-exports for convenient access
pub use battle_map::BattleMap;
pub use catalog::UnitCatalog;
pub use constants::*;
pub use execution::{
    BattleEventLog, BattleLog, BattleOutcome, BattleSummary, StopSignal, TracingBattleLog,
    TurnEvent, TurnScheduler,
};
pub use grid::{GridCoord, GridDirection};
pub use pathfinding::{find_path, find_path_on, path_cost};
pub use planning::{compare_efficiency, ArmyPlanner, CellPool};
pub use targeting::{rows_for, suitable_units, UnitRow};
pub use unit_type::{AttackType, BonusTable, UnitTemplate};
pub use units::{Army, AttackProgram, BattleUnit, Battlefield};
