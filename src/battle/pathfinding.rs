//! Shortest paths between an attacker and its target
//!
//! Uniform-cost search (Dijkstra) over the 27x21 board with 8-directional
//! unit-cost steps. Cells holding a living unit are impassable, except the
//! target's own cell which is always accepted as the final step.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::battle::battle_map::BattleMap;
use crate::battle::constants::BOARD_CELLS;
use crate::battle::grid::GridCoord;
use crate::battle::units::{BattleUnit, Battlefield};
use crate::core::types::UnitId;

/// Best known route to a cell
#[derive(Debug, Clone, Copy)]
struct PathNode {
    distance: u32,
    parent: Option<GridCoord>,
}

/// Entry in the open set. Entries are never removed when a cell improves;
/// outdated ones are skipped when popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    distance: u32,
    sequence: u32,
    coord: GridCoord,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; equal distances pop in insertion order
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Path from `attacker` to `target`, both cells included.
///
/// `existing` is every unit currently on the board, dead or alive; only the
/// living ones block. Returns an empty vec when the target cannot be reached.
pub fn find_path<'a>(
    attacker: &BattleUnit,
    target: &BattleUnit,
    existing: impl IntoIterator<Item = &'a BattleUnit>,
) -> Vec<GridCoord> {
    let map = BattleMap::from_units(existing);
    let path = find_path_on(&map, attacker.position, target.position);
    if path.is_empty() {
        tracing::trace!("{} cannot reach {}", attacker.name, target.name);
    }
    path
}

/// Search a prepared occupancy map.
///
/// Neighbors are expanded in [`GridCoord::neighbors`] order and equal-distance
/// frontier cells are popped first-in first-out, so results are deterministic.
pub fn find_path_on(map: &BattleMap, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
    if start == goal {
        return vec![start];
    }
    let Some(start_idx) = start.index() else {
        return Vec::new();
    };

    let mut nodes: Vec<Option<PathNode>> = vec![None; BOARD_CELLS];
    let mut open_set = BinaryHeap::new();
    let mut sequence = 0u32;

    nodes[start_idx] = Some(PathNode {
        distance: 0,
        parent: None,
    });
    open_set.push(QueueEntry {
        distance: 0,
        sequence,
        coord: start,
    });

    while let Some(current) = open_set.pop() {
        let best = current
            .coord
            .index()
            .and_then(|idx| nodes[idx])
            .map(|node| node.distance);
        if best.is_some_and(|d| current.distance > d) {
            continue;
        }

        for neighbor in current.coord.neighbors() {
            if neighbor == goal {
                let mut path = reconstruct_path(&nodes, current.coord);
                path.push(goal);
                return path;
            }

            if !map.is_passable(neighbor) {
                continue;
            }
            let Some(idx) = neighbor.index() else {
                continue;
            };

            let tentative = current.distance + 1;
            let improves = nodes[idx].map_or(true, |node| tentative < node.distance);
            if improves {
                nodes[idx] = Some(PathNode {
                    distance: tentative,
                    parent: Some(current.coord),
                });
                sequence += 1;
                open_set.push(QueueEntry {
                    distance: tentative,
                    sequence,
                    coord: neighbor,
                });
            }
        }
    }

    Vec::new() // No path found
}

/// Walk parent links back to the start
fn reconstruct_path(nodes: &[Option<PathNode>], mut current: GridCoord) -> Vec<GridCoord> {
    let mut path = vec![current];
    while let Some(prev) = current
        .index()
        .and_then(|idx| nodes[idx])
        .and_then(|node| node.parent)
    {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Number of steps along a path
pub fn path_cost(path: &[GridCoord]) -> u32 {
    path.len().saturating_sub(1) as u32
}

impl Battlefield {
    /// Path between two units on this battlefield; empty if either is unknown
    pub fn path_between(&self, attacker: UnitId, target: UnitId) -> Vec<GridCoord> {
        match (self.unit(attacker), self.unit(target)) {
            (Some(a), Some(t)) => find_path(a, t, self.units()),
            _ => Vec::new(),
        }
    }
}
