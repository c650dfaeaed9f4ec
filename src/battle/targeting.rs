//! Target filtering: which enemy units are exposed to attack
//!
//! An army is three columns deep. A unit is shielded when a living unit of its
//! own army stands on the same row (y) in the column directly in front of it.
//! Shielding only reaches one column back: a unit two columns behind a
//! blocker is exposed if the column between them is empty on that row.

use ahash::AHashSet;

use crate::battle::constants::{DEPLOYMENT_COLUMNS, DEPLOYMENT_ROWS, RIGHT_ZONE_ORIGIN};
use crate::battle::units::{Army, BattleUnit, Battlefield};
use crate::core::types::Side;

/// One deployment column, indexed by y. `None` marks an empty cell.
pub type UnitRow<'a> = Vec<Option<&'a BattleUnit>>;

/// Units that may be attacked, scanning from the targeted army's front.
///
/// `units_by_row` holds the targeted army's columns ordered by ascending x.
/// The left army faces right, so its front is the last column; the right
/// army's front is the first.
pub fn suitable_units<'a>(units_by_row: &[UnitRow<'a>], target_side: Side) -> Vec<&'a BattleUnit> {
    match target_side {
        Side::Left => scan_from_front(units_by_row.iter().rev()),
        Side::Right => scan_from_front(units_by_row.iter()),
    }
}

fn scan_from_front<'a, 'r, I>(rows: I) -> Vec<&'a BattleUnit>
where
    'a: 'r,
    I: Iterator<Item = &'r UnitRow<'a>>,
{
    let mut suitable = Vec::new();
    let mut blocking: AHashSet<i32> = AHashSet::new();

    for row in rows {
        let mut occupied: AHashSet<i32> = AHashSet::new();
        for unit in row.iter().flatten() {
            if !unit.alive {
                continue;
            }
            let y = unit.position.y;
            occupied.insert(y);
            if !blocking.contains(&y) {
                suitable.push(*unit);
            }
        }
        // Only the column just scanned shields the next one
        blocking = occupied;
    }

    suitable
}

/// Group an army's living units into its three deployment columns.
///
/// Columns are ordered by ascending x. Units standing outside their side's
/// deployment zone are left out.
pub fn rows_for(army: &Army, side: Side) -> Vec<UnitRow<'_>> {
    let origin = match side {
        Side::Left => 0,
        Side::Right => RIGHT_ZONE_ORIGIN,
    };
    let mut rows: Vec<UnitRow<'_>> =
        vec![vec![None; DEPLOYMENT_ROWS as usize]; DEPLOYMENT_COLUMNS as usize];

    for unit in army.alive_units() {
        let column = unit.position.x - origin;
        let y = unit.position.y;
        if (0..DEPLOYMENT_COLUMNS).contains(&column) && (0..DEPLOYMENT_ROWS).contains(&y) {
            rows[column as usize][y as usize] = Some(unit);
        }
    }

    rows
}

impl Battlefield {
    pub fn target_rows(&self, side: Side) -> Vec<UnitRow<'_>> {
        rows_for(self.army(side), side)
    }

    /// Exposed units of the army on `target_side`
    pub fn suitable_targets(&self, target_side: Side) -> Vec<&BattleUnit> {
        suitable_units(&self.target_rows(target_side), target_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::grid::GridCoord;
    use crate::battle::unit_type::UnitTemplate;

    fn unit_at(x: i32, y: i32) -> BattleUnit {
        let template = UnitTemplate::new("Pikeman", "Pikeman", 30, 10, 10);
        BattleUnit::from_template(&template, 1, GridCoord::new(x, y))
    }

    fn positions(units: &[&BattleUnit]) -> Vec<GridCoord> {
        units.iter().map(|u| u.position).collect()
    }

    #[test]
    fn test_right_army_front_shields_row_behind() {
        let front = unit_at(24, 5);
        let behind = unit_at(25, 5);
        let open = unit_at(25, 6);
        let rows = vec![vec![Some(&front)], vec![Some(&behind), Some(&open)], vec![]];

        let result = suitable_units(&rows, Side::Right);
        assert_eq!(positions(&result), vec![GridCoord::new(24, 5), GridCoord::new(25, 6)]);
    }

    #[test]
    fn test_left_army_scans_from_last_column() {
        let back = unit_at(0, 3);
        let front = unit_at(2, 3);
        let rows = vec![vec![Some(&back)], vec![], vec![Some(&front)]];

        let result = suitable_units(&rows, Side::Left);
        // The middle column is empty, so the back unit is not shielded
        assert_eq!(positions(&result), vec![GridCoord::new(2, 3), GridCoord::new(0, 3)]);
    }

    #[test]
    fn test_shielding_is_not_transitive() {
        let front = unit_at(24, 8);
        let back = unit_at(26, 8);
        let rows = vec![vec![Some(&front)], vec![None], vec![Some(&back)]];

        let result = suitable_units(&rows, Side::Right);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_full_column_of_three_exposes_only_front() {
        let a = unit_at(2, 4);
        let b = unit_at(1, 4);
        let c = unit_at(0, 4);
        let rows = vec![vec![Some(&c)], vec![Some(&b)], vec![Some(&a)]];

        let result = suitable_units(&rows, Side::Left);
        assert_eq!(positions(&result), vec![GridCoord::new(2, 4)]);
    }

    #[test]
    fn test_dead_units_neither_block_nor_count() {
        let mut dead = unit_at(24, 2);
        dead.receive_damage(1000);
        let behind = unit_at(25, 2);
        let rows = vec![vec![Some(&dead), None], vec![Some(&behind)], vec![]];

        let result = suitable_units(&rows, Side::Right);
        assert_eq!(positions(&result), vec![GridCoord::new(25, 2)]);
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<UnitRow<'_>> = vec![vec![], vec![], vec![]];
        assert!(suitable_units(&rows, Side::Left).is_empty());
        assert!(suitable_units(&[], Side::Right).is_empty());
    }

    #[test]
    fn test_rows_for_groups_by_column() {
        let army = Army::new(vec![unit_at(24, 0), unit_at(26, 20), unit_at(10, 10)], 30);
        let rows = rows_for(&army, Side::Right);
        assert_eq!(rows.len(), 3);
        assert!(rows[0][0].is_some());
        assert!(rows[2][20].is_some());
        let placed: usize = rows.iter().map(|r| r.iter().flatten().count()).sum();
        assert_eq!(placed, 2);
    }

    #[test]
    fn test_battlefield_suitable_targets() {
        let left = Army::new(vec![unit_at(2, 1), unit_at(1, 1), unit_at(1, 2)], 30);
        let field = Battlefield::new(left, Army::default());
        let targets = field.suitable_targets(Side::Left);
        assert_eq!(positions(&targets), vec![GridCoord::new(2, 1), GridCoord::new(1, 2)]);
    }
}
