//! Battle execution loop
//!
//! Each round: collect living units -> sort by attack -> let each act -> log.
//! The battle ends when a round starts with one side wiped out.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::battle::units::{BattleUnit, Battlefield};
use crate::core::config::BattleConfig;
use crate::core::error::{BattleError, Result};
use crate::core::types::{Side, UnitId};

/// Sink for the per-turn battle log
///
/// Called once for every unit that took its turn, with the unit it attacked
/// or `None` when it found no target.
pub trait BattleLog {
    fn on_turn(&mut self, actor: &BattleUnit, target: Option<&BattleUnit>);

    /// Called before the first turn of each round, numbered from 1
    fn on_round_start(&mut self, _round: u32) {}
}

impl<F> BattleLog for F
where
    F: FnMut(&BattleUnit, Option<&BattleUnit>),
{
    fn on_turn(&mut self, actor: &BattleUnit, target: Option<&BattleUnit>) {
        self(actor, target)
    }
}

/// Writes each turn as a tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBattleLog;

impl BattleLog for TracingBattleLog {
    fn on_turn(&mut self, actor: &BattleUnit, target: Option<&BattleUnit>) {
        match target {
            Some(target) => tracing::info!(
                "{} at {} attacks {} at {} (health {})",
                actor.name,
                actor.position,
                target.name,
                target.position,
                target.health
            ),
            None => tracing::info!("{} at {} found no target", actor.name, actor.position),
        }
    }
}

/// Log entry for one unit's turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEvent {
    pub round: u32,
    pub actor: UnitId,
    pub actor_name: String,
    pub target: Option<UnitId>,
    pub target_name: Option<String>,
    pub target_alive: Option<bool>,
}

/// Collected turn events, in the order they happened
#[derive(Debug, Clone, Default)]
pub struct BattleEventLog {
    pub events: Vec<TurnEvent>,
    round: u32,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl BattleLog for BattleEventLog {
    fn on_turn(&mut self, actor: &BattleUnit, target: Option<&BattleUnit>) {
        self.events.push(TurnEvent {
            round: self.round,
            actor: actor.id,
            actor_name: actor.name.clone(),
            target: target.map(|t| t.id),
            target_name: target.map(|t| t.name.clone()),
            target_alive: target.map(|t| t.alive),
        });
    }

    fn on_round_start(&mut self, round: u32) {
        self.round = round;
    }
}

/// Cooperative cancellation flag, shareable across threads
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a finished battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The other side had no living units at the start of a round
    Victory(Side),
    /// Neither side had living units
    Stalemate,
    /// The configured round cap was reached first
    RoundLimit,
}

/// Summary of a completed simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub outcome: BattleOutcome,
    /// Rounds in which at least one unit was offered a turn
    pub rounds: u32,
    pub turns: u32,
}

/// Runs battles round by round
#[derive(Debug, Clone, Default)]
pub struct TurnScheduler {
    max_rounds: Option<u32>,
}

impl TurnScheduler {
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            max_rounds: config.max_rounds,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Living units of both sides in turn order, or the outcome if one side
    /// has none.
    ///
    /// Collection goes left roster then right roster and the sort is stable,
    /// so units with equal attack act in that order.
    pub fn round_order(field: &Battlefield) -> std::result::Result<Vec<UnitId>, BattleOutcome> {
        let mut pool: Vec<&BattleUnit> = Vec::new();
        let mut alive_per_side = [0usize; 2];

        for (i, side) in Side::both().into_iter().enumerate() {
            for unit in field.army(side).alive_units() {
                pool.push(unit);
                alive_per_side[i] += 1;
            }
        }

        match alive_per_side {
            [0, 0] => return Err(BattleOutcome::Stalemate),
            [0, _] => return Err(BattleOutcome::Victory(Side::Right)),
            [_, 0] => return Err(BattleOutcome::Victory(Side::Left)),
            _ => {}
        }

        pool.sort_by(|a, b| b.base_attack.cmp(&a.base_attack));
        Ok(pool.into_iter().map(|u| u.id).collect())
    }

    /// Run the battle to completion.
    ///
    /// `stop` is checked before every round and every turn. When raised, the
    /// loop returns `BattleError::Interrupted` and every turn already taken
    /// keeps its effects.
    pub fn simulate(
        &self,
        field: &mut Battlefield,
        log: &mut dyn BattleLog,
        stop: &StopSignal,
    ) -> Result<BattleSummary> {
        let mut rounds = 0u32;
        let mut turns = 0u32;

        tracing::info!(
            "Battle begins: {} left units vs {} right units",
            field.left.alive_count(),
            field.right.alive_count()
        );

        loop {
            if stop.is_stopped() {
                tracing::warn!("Battle interrupted before round {}", rounds + 1);
                return Err(BattleError::Interrupted { round: rounds + 1 });
            }

            let order = match Self::round_order(field) {
                Ok(order) => order,
                Err(outcome) => {
                    tracing::info!("Battle over after {} rounds: {:?}", rounds, outcome);
                    return Ok(BattleSummary {
                        outcome,
                        rounds,
                        turns,
                    });
                }
            };

            if self.max_rounds.is_some_and(|max| rounds >= max) {
                tracing::info!("Round limit of {} reached", rounds);
                return Ok(BattleSummary {
                    outcome: BattleOutcome::RoundLimit,
                    rounds,
                    turns,
                });
            }

            rounds += 1;
            tracing::debug!("Round {} with {} units", rounds, order.len());
            log.on_round_start(rounds);

            for unit_id in order {
                if stop.is_stopped() {
                    tracing::warn!("Battle interrupted during round {}", rounds);
                    return Err(BattleError::Interrupted { round: rounds });
                }
                if Self::take_turn(field, unit_id, log) {
                    turns += 1;
                }
            }
        }
    }

    /// Let one unit act if it is still alive. Returns whether it acted.
    fn take_turn(field: &mut Battlefield, unit_id: UnitId, log: &mut dyn BattleLog) -> bool {
        let program = match field.unit(unit_id) {
            Some(unit) if unit.alive => unit.program(),
            _ => return false,
        };

        let target_id = program.and_then(|p| p.attack(unit_id, field));

        if let Some(actor) = field.unit(unit_id) {
            let target = target_id.and_then(|id| field.unit(id));
            log.on_turn(actor, target);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::grid::GridCoord;
    use crate::battle::unit_type::UnitTemplate;
    use crate::battle::units::{Army, AttackProgram};
    use std::sync::atomic::AtomicU32;

    fn unit(name: &str, attack: u32, health: u32, x: i32, y: i32) -> BattleUnit {
        let template = UnitTemplate::new(name, name, health, attack, 10);
        BattleUnit::from_template(&template, 1, GridCoord::new(x, y))
    }

    /// Hits the first living enemy in roster order for `base_attack` damage
    fn first_enemy() -> Arc<dyn AttackProgram> {
        Arc::new(|attacker: UnitId, field: &mut Battlefield| -> Option<UnitId> {
            let side = field.side_of(attacker)?;
            let damage = field.unit(attacker)?.base_attack;
            let target = field.army(side.opponent()).alive_units().next()?.id;
            field.unit_mut(target)?.receive_damage(damage);
            Some(target)
        })
    }

    fn armed(mut army: Army) -> Army {
        army.set_program(first_enemy());
        army
    }

    #[test]
    fn test_round_order_sorted_by_attack() {
        let left = Army::new(vec![unit("Weak", 5, 10, 0, 0), unit("Strong", 50, 10, 0, 1)], 0);
        let right = Army::new(vec![unit("Medium", 20, 10, 26, 0)], 0);
        let strong = left.units[1].id;
        let weak = left.units[0].id;
        let medium = right.units[0].id;
        let field = Battlefield::new(left, right);

        let order = TurnScheduler::round_order(&field).unwrap();
        assert_eq!(order, vec![strong, medium, weak]);
    }

    #[test]
    fn test_equal_attack_keeps_collection_order() {
        let left = Army::new(vec![unit("A", 10, 10, 0, 0)], 0);
        let right = Army::new(vec![unit("B", 10, 10, 26, 0)], 0);
        let a = left.units[0].id;
        let b = right.units[0].id;
        let field = Battlefield::new(left, right);

        assert_eq!(TurnScheduler::round_order(&field).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_round_order_reports_wiped_side() {
        let mut dead = unit("Dead", 10, 10, 0, 0);
        dead.receive_damage(10);
        let field = Battlefield::new(
            Army::new(vec![dead], 0),
            Army::new(vec![unit("Alive", 10, 10, 26, 0)], 0),
        );
        assert_eq!(
            TurnScheduler::round_order(&field),
            Err(BattleOutcome::Victory(Side::Right))
        );
        assert_eq!(
            TurnScheduler::round_order(&Battlefield::default()),
            Err(BattleOutcome::Stalemate)
        );
    }

    #[test]
    fn test_battle_runs_until_one_side_is_dead() {
        let left = armed(Army::new(vec![unit("Knight", 30, 60, 2, 5)], 0));
        let right = armed(Army::new(
            vec![unit("Archer", 10, 20, 24, 5), unit("Archer", 10, 20, 24, 6)],
            0,
        ));
        let mut field = Battlefield::new(left, right);
        let mut log = BattleEventLog::new();

        let summary = TurnScheduler::default()
            .simulate(&mut field, &mut log, &StopSignal::new())
            .unwrap();

        assert_eq!(summary.outcome, BattleOutcome::Victory(Side::Left));
        assert!(field.right.is_defeated());
        // Round 1: knight kills archer 1, archer 2 hits. Round 2: knight kills archer 2.
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.turns, 3);
        assert_eq!(field.left.units[0].health, 50);
        assert_eq!(log.len(), 3);
        assert_eq!(log.events[2].round, 2);
        assert_eq!(log.events[2].target_alive, Some(false));
    }

    #[test]
    fn test_unit_killed_this_round_does_not_act() {
        let left = armed(Army::new(vec![unit("Knight", 100, 60, 2, 5)], 0));
        let right = armed(Army::new(vec![unit("Archer", 10, 20, 24, 5)], 0));
        let archer = right.units[0].id;
        let mut field = Battlefield::new(left, right);

        let mut actors = Vec::new();
        let mut log = |actor: &BattleUnit, _: Option<&BattleUnit>| actors.push(actor.id);
        let summary = TurnScheduler::default()
            .simulate(&mut field, &mut log, &StopSignal::new())
            .unwrap();

        assert_eq!(summary.turns, 1);
        assert!(!actors.contains(&archer));
    }

    #[test]
    fn test_empty_side_ends_before_any_turn() {
        let left = armed(Army::new(vec![unit("Knight", 30, 60, 2, 5)], 0));
        let mut field = Battlefield::new(left, Army::default());
        let mut log = BattleEventLog::new();

        let summary = TurnScheduler::default()
            .simulate(&mut field, &mut log, &StopSignal::new())
            .unwrap();

        assert_eq!(summary.outcome, BattleOutcome::Victory(Side::Left));
        assert_eq!(summary.rounds, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_missing_target_is_logged() {
        // No programs: every unit takes its turn without a target
        let left = Army::new(vec![unit("Knight", 30, 60, 2, 5)], 0);
        let right = Army::new(vec![unit("Archer", 10, 20, 24, 5)], 0);
        let mut field = Battlefield::new(left, right);
        let mut log = BattleEventLog::new();

        let summary = TurnScheduler::default()
            .with_max_rounds(Some(3))
            .simulate(&mut field, &mut log, &StopSignal::new())
            .unwrap();

        assert_eq!(summary.outcome, BattleOutcome::RoundLimit);
        assert_eq!(summary.rounds, 3);
        assert_eq!(log.len(), 6);
        assert!(log.events.iter().all(|e| e.target.is_none()));
    }

    #[test]
    fn test_stop_signal_halts_mid_round() {
        let stop = StopSignal::new();
        let turns = Arc::new(AtomicU32::new(0));
        let program: Arc<dyn AttackProgram> = {
            let stop = stop.clone();
            let turns = Arc::clone(&turns);
            Arc::new(move |_: UnitId, _: &mut Battlefield| -> Option<UnitId> {
                if turns.fetch_add(1, Ordering::SeqCst) == 1 {
                    stop.stop();
                }
                None
            })
        };

        let mut left = Army::new(vec![unit("A", 30, 10, 2, 0), unit("B", 20, 10, 2, 1)], 0);
        let mut right = Army::new(vec![unit("C", 10, 10, 24, 0)], 0);
        left.set_program(Arc::clone(&program));
        right.set_program(program);
        let mut field = Battlefield::new(left, right);
        let mut log = BattleEventLog::new();

        let result = TurnScheduler::default().simulate(&mut field, &mut log, &stop);

        assert!(matches!(result, Err(BattleError::Interrupted { round: 1 })));
        assert_eq!(turns.load(Ordering::SeqCst), 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_stop_before_start() {
        let stop = StopSignal::new();
        stop.stop();
        let mut field = Battlefield::default();
        let mut log = TracingBattleLog;
        let result = TurnScheduler::default().simulate(&mut field, &mut log, &stop);
        assert!(matches!(result, Err(BattleError::Interrupted { round: 1 })));
    }
}
