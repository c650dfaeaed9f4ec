//! Army planning: turn a catalog and a point budget into a deployed roster
//!
//! Two planners share one placement rule: every unit takes the next cell
//! from a pool of the 63 deployment cells shuffled once per call.

use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::battle::constants::{DEPLOYMENT_COLUMNS, DEPLOYMENT_ROWS, PRESET_TEMPLATE_COUNT};
use crate::battle::grid::GridCoord;
use crate::battle::unit_type::UnitTemplate;
use crate::battle::units::{Army, BattleUnit};
use crate::core::config::BattleConfig;
use crate::core::error::{BattleError, Result};

/// Free deployment cells in random order, consumed front to back
#[derive(Debug, Clone)]
pub struct CellPool {
    cells: VecDeque<GridCoord>,
    taken: usize,
}

impl CellPool {
    /// All cells of the left deployment zone (x in 0..3, y in 0..21), shuffled
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells: Vec<GridCoord> = (0..DEPLOYMENT_ROWS)
            .flat_map(|y| (0..DEPLOYMENT_COLUMNS).map(move |x| GridCoord::new(x, y)))
            .collect();
        cells.shuffle(rng);
        Self {
            cells: cells.into(),
            taken: 0,
        }
    }

    /// Next free cell. Running dry means the army is larger than the board.
    pub fn take(&mut self) -> Result<GridCoord> {
        self.taken += 1;
        self.cells
            .pop_front()
            .ok_or(BattleError::CellPoolExhausted {
                requested: self.taken,
            })
    }

    pub fn remaining(&self) -> usize {
        self.cells.len()
    }
}

/// Order templates by attack per point, then health per point, best first.
///
/// Ratios are compared by cross-multiplying so no division or float is needed.
pub fn compare_efficiency(a: &UnitTemplate, b: &UnitTemplate) -> Ordering {
    let a_attack = a.base_attack as u64 * b.cost as u64;
    let b_attack = b.base_attack as u64 * a.cost as u64;
    b_attack.cmp(&a_attack).then_with(|| {
        let a_health = a.health as u64 * b.cost as u64;
        let b_health = b.health as u64 * a.cost as u64;
        b_health.cmp(&a_health)
    })
}

/// Builds armies from unit templates
#[derive(Debug, Clone)]
pub struct ArmyPlanner {
    max_units_per_type: usize,
    preset_composition: [usize; PRESET_TEMPLATE_COUNT],
}

impl Default for ArmyPlanner {
    fn default() -> Self {
        Self::new(&BattleConfig::default())
    }
}

impl ArmyPlanner {
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            max_units_per_type: config.max_units_per_type,
            preset_composition: config.preset_composition,
        }
    }

    /// Greedy budgeted generation.
    ///
    /// Templates are ranked with [`compare_efficiency`] (stable, so equal
    /// templates keep catalog order) and each is bought as many times as the
    /// remaining budget allows, capped per type. Army points record what was
    /// actually spent.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        templates: &[UnitTemplate],
        budget: u32,
        rng: &mut R,
    ) -> Result<Army> {
        let mut pool = CellPool::shuffled(rng);

        let mut ranked: Vec<&UnitTemplate> = templates.iter().collect();
        ranked.sort_by(|a, b| compare_efficiency(a, b));

        let mut remaining = budget;
        let mut units = Vec::new();

        for template in ranked {
            if remaining == 0 {
                break;
            }
            if template.cost == 0 {
                tracing::warn!("Skipping zero-cost template {}", template.name);
                continue;
            }

            let affordable = (remaining / template.cost) as usize;
            let count = affordable.min(self.max_units_per_type);
            for ordinal in 1..=count {
                units.push(BattleUnit::from_template(template, ordinal, pool.take()?));
            }

            tracing::debug!("Added {} units of type {}", count, template.unit_type);
            remaining -= count as u32 * template.cost;
        }

        let army = Army::new(units, budget - remaining);
        tracing::info!(
            "Planned army of {} units for {} points ({} unspent)",
            army.units.len(),
            army.points,
            remaining
        );
        Ok(army)
    }

    /// Fixed-composition preset: counts from the config (11/11/11/9 by
    /// default) of the first four templates, in the order given.
    ///
    /// Points are set to the full budget whatever the templates cost.
    pub fn generate_preset<R: Rng + ?Sized>(
        &self,
        templates: &[UnitTemplate],
        budget: u32,
        rng: &mut R,
    ) -> Result<Army> {
        if templates.len() < PRESET_TEMPLATE_COUNT {
            return Err(BattleError::PresetTemplatesMissing {
                expected: PRESET_TEMPLATE_COUNT,
                found: templates.len(),
            });
        }

        let mut pool = CellPool::shuffled(rng);
        let mut units = Vec::with_capacity(self.preset_composition.iter().sum());

        for (template, &count) in templates.iter().zip(self.preset_composition.iter()) {
            for ordinal in 1..=count {
                units.push(BattleUnit::from_template(template, ordinal, pool.take()?));
            }
        }

        tracing::info!("Generated preset army of {} units", units.len());
        Ok(Army::new(units, budget))
    }
}
