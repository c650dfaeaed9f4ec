//! Dense occupancy board
//!
//! Rebuilt from a unit snapshot for every path query. The board is small
//! (567 cells) so a flat array beats any spatial index.

use crate::battle::constants::BOARD_CELLS;
use crate::battle::grid::GridCoord;
use crate::battle::units::BattleUnit;

/// Which cells of the 27x21 board hold a living unit
#[derive(Debug, Clone)]
pub struct BattleMap {
    occupied: Vec<bool>,
}

impl Default for BattleMap {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleMap {
    /// Empty board
    pub fn new() -> Self {
        Self {
            occupied: vec![false; BOARD_CELLS],
        }
    }

    /// Mark every living unit's cell. Dead units leave their cell free.
    pub fn from_units<'a>(units: impl IntoIterator<Item = &'a BattleUnit>) -> Self {
        let mut map = Self::new();
        for unit in units {
            if unit.alive {
                map.set_occupied(unit.position, true);
            }
        }
        map
    }

    /// Out-of-bounds coordinates are ignored
    pub fn set_occupied(&mut self, coord: GridCoord, occupied: bool) {
        if let Some(idx) = coord.index() {
            self.occupied[idx] = occupied;
        }
    }

    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        coord.index().map(|idx| self.occupied[idx]).unwrap_or(false)
    }

    /// In bounds and not occupied
    pub fn is_passable(&self, coord: GridCoord) -> bool {
        coord
            .index()
            .map(|idx| !self.occupied[idx])
            .unwrap_or(false)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::unit_type::UnitTemplate;

    #[test]
    fn test_empty_map_is_passable() {
        let map = BattleMap::new();
        assert!(map.is_passable(GridCoord::new(0, 0)));
        assert!(map.is_passable(GridCoord::new(26, 20)));
        assert_eq!(map.occupied_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_not_passable() {
        let map = BattleMap::new();
        assert!(!map.is_passable(GridCoord::new(-1, 0)));
        assert!(!map.is_passable(GridCoord::new(27, 3)));
        assert!(!map.is_occupied(GridCoord::new(27, 3)));
    }

    #[test]
    fn test_dead_units_do_not_block() {
        let template = UnitTemplate::new("Archer", "Archer", 10, 5, 20);
        let alive = BattleUnit::from_template(&template, 1, GridCoord::new(3, 4));
        let mut dead = BattleUnit::from_template(&template, 2, GridCoord::new(5, 6));
        dead.receive_damage(100);

        let map = BattleMap::from_units([&alive, &dead]);
        assert!(map.is_occupied(GridCoord::new(3, 4)));
        assert!(!map.is_occupied(GridCoord::new(5, 6)));
        assert_eq!(map.occupied_count(), 1);
    }
}
