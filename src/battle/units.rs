//! Battlefield units, armies and the two-sided battlefield
//!
//! Units are instanced from catalog templates by the planner. Dead units stay
//! in their army with `alive == false` until the army is torn down.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::battle::constants::BOARD_WIDTH;
use crate::battle::grid::GridCoord;
use crate::battle::unit_type::{AttackType, BonusTable, UnitTemplate};
use crate::core::types::{ArmyId, Side, UnitId};

/// Decision logic a unit runs on its turn.
///
/// Picks a target, resolves the attack against the battlefield and returns
/// the unit it attacked, or `None` when nothing was in reach.
pub trait AttackProgram: Send + Sync {
    fn attack(&self, attacker: UnitId, field: &mut Battlefield) -> Option<UnitId>;
}

impl<F> AttackProgram for F
where
    F: Fn(UnitId, &mut Battlefield) -> Option<UnitId> + Send + Sync,
{
    fn attack(&self, attacker: UnitId, field: &mut Battlefield) -> Option<UnitId> {
        self(attacker, field)
    }
}

/// A live combat entity placed on the board
#[derive(Clone, Serialize, Deserialize)]
pub struct BattleUnit {
    pub id: UnitId,
    pub name: String,
    pub unit_type: String,
    pub health: u32,
    pub base_attack: u32,
    pub cost: u32,
    pub attack_type: AttackType,
    pub attack_bonuses: BonusTable,
    pub defence_bonuses: BonusTable,
    pub position: GridCoord,
    pub alive: bool,

    #[serde(skip)]
    program: Option<Arc<dyn AttackProgram>>,
}

impl std::fmt::Debug for BattleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleUnit")
            .field("name", &self.name)
            .field("unit_type", &self.unit_type)
            .field("health", &self.health)
            .field("base_attack", &self.base_attack)
            .field("position", &self.position)
            .field("alive", &self.alive)
            .field("has_program", &self.program.is_some())
            .finish_non_exhaustive()
    }
}

impl BattleUnit {
    /// Instance a template. `ordinal` is the 1-based count within its type.
    pub fn from_template(template: &UnitTemplate, ordinal: usize, position: GridCoord) -> Self {
        Self {
            id: UnitId::new(),
            name: format!("{} {}", template.name, ordinal),
            unit_type: template.unit_type.clone(),
            health: template.health,
            base_attack: template.base_attack,
            cost: template.cost,
            attack_type: template.attack_type,
            attack_bonuses: template.attack_bonuses.clone(),
            defence_bonuses: template.defence_bonuses.clone(),
            position,
            alive: template.health > 0,
            program: None,
        }
    }

    pub fn with_program(mut self, program: Arc<dyn AttackProgram>) -> Self {
        self.program = Some(program);
        self
    }

    pub fn set_program(&mut self, program: Arc<dyn AttackProgram>) {
        self.program = Some(program);
    }

    pub fn program(&self) -> Option<Arc<dyn AttackProgram>> {
        self.program.clone()
    }

    /// Lower health, flipping `alive` once it reaches zero
    pub fn receive_damage(&mut self, amount: u32) {
        if !self.alive {
            return;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
        }
    }
}

/// One side's roster plus the points spent on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Army {
    pub id: ArmyId,
    pub units: Vec<BattleUnit>,
    pub points: u32,
}

impl Default for Army {
    fn default() -> Self {
        Self::new(Vec::new(), 0)
    }
}

impl Army {
    pub fn new(units: Vec<BattleUnit>, points: u32) -> Self {
        Self {
            id: ArmyId::new(),
            units,
            points,
        }
    }

    pub fn alive_units(&self) -> impl Iterator<Item = &BattleUnit> {
        self.units.iter().filter(|u| u.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive_units().count()
    }

    pub fn is_defeated(&self) -> bool {
        self.alive_count() == 0
    }

    /// Get a unit by ID
    pub fn get_unit(&self, unit_id: UnitId) -> Option<&BattleUnit> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    /// Get a mutable unit by ID
    pub fn get_unit_mut(&mut self, unit_id: UnitId) -> Option<&mut BattleUnit> {
        self.units.iter_mut().find(|u| u.id == unit_id)
    }

    /// Give every unit the same decision logic
    pub fn set_program(&mut self, program: Arc<dyn AttackProgram>) {
        for unit in &mut self.units {
            unit.set_program(Arc::clone(&program));
        }
    }

    /// Mirror the army across the board's vertical axis.
    ///
    /// A planned army sits in columns 0..=2 with its front at column 2;
    /// mirrored it sits in 24..=26 with its front at column 24.
    pub fn mirror_horizontally(&mut self) {
        for unit in &mut self.units {
            unit.position.x = BOARD_WIDTH - 1 - unit.position.x;
        }
    }
}

/// Both armies of a battle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Battlefield {
    pub left: Army,
    pub right: Army,
}

impl Battlefield {
    pub fn new(left: Army, right: Army) -> Self {
        Self { left, right }
    }

    pub fn army(&self, side: Side) -> &Army {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Which army a unit belongs to
    pub fn side_of(&self, unit_id: UnitId) -> Option<Side> {
        Side::both()
            .into_iter()
            .find(|&side| self.army(side).get_unit(unit_id).is_some())
    }

    /// Get a unit from either army
    pub fn unit(&self, unit_id: UnitId) -> Option<&BattleUnit> {
        self.left
            .get_unit(unit_id)
            .or_else(|| self.right.get_unit(unit_id))
    }

    /// Get a mutable unit from either army
    pub fn unit_mut(&mut self, unit_id: UnitId) -> Option<&mut BattleUnit> {
        if self.left.get_unit(unit_id).is_some() {
            self.left.get_unit_mut(unit_id)
        } else {
            self.right.get_unit_mut(unit_id)
        }
    }

    /// Every existing unit, alive or dead, left army first
    pub fn units(&self) -> impl Iterator<Item = &BattleUnit> {
        self.left.units.iter().chain(self.right.units.iter())
    }
}
