//! Unit templates: the immutable catalog entries armies are bought from

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a unit delivers its attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackType {
    #[default]
    Melee,
    Ranged,
}

/// Per-unit-type multipliers, keyed by the opposing unit's type tag
pub type BonusTable = BTreeMap<String, f64>;

/// Catalog definition of a unit type. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub name: String,
    pub unit_type: String,
    pub health: u32,
    pub base_attack: u32,
    pub cost: u32,
    #[serde(default)]
    pub attack_type: AttackType,
    #[serde(default)]
    pub attack_bonuses: BonusTable,
    #[serde(default)]
    pub defence_bonuses: BonusTable,
}

impl UnitTemplate {
    pub fn new(
        name: impl Into<String>,
        unit_type: impl Into<String>,
        health: u32,
        base_attack: u32,
        cost: u32,
    ) -> Self {
        Self {
            name: name.into(),
            unit_type: unit_type.into(),
            health,
            base_attack,
            cost,
            attack_type: AttackType::default(),
            attack_bonuses: BonusTable::new(),
            defence_bonuses: BonusTable::new(),
        }
    }

    pub fn with_attack_bonus(mut self, against: impl Into<String>, multiplier: f64) -> Self {
        self.attack_bonuses.insert(against.into(), multiplier);
        self
    }

    pub fn with_defence_bonus(mut self, against: impl Into<String>, multiplier: f64) -> Self {
        self.defence_bonuses.insert(against.into(), multiplier);
        self
    }
}
