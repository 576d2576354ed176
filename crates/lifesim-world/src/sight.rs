//! Breadth-first sight search.
//!
//! A blip senses its surroundings by flooding outward from its own cell.
//! The search is seeded with the in-bounds neighbors in the fixed order
//! East, South, West, North, each tagged with the direction it was reached
//! through; every cell discovered later inherits that tag. Because BFS pops
//! cells in non-decreasing distance and seeds are pushed in that order, the
//! first hit for any category is at minimum distance and ties go to
//! East, then South, then West, then North.
//!
//! The origin cell itself is never inspected, so a blip does not see
//! itself or anything it shares a cell with.

use std::collections::VecDeque;

use lifesim_types::{Action, Position};

use crate::grid::Grid;

/// A category hit: how far away, and which first step leads there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting {
    /// Path length in steps.
    pub distance: u32,
    /// The first move on a shortest path.
    pub direction: Action,
}

/// Result of a sight search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sight {
    /// Nearest water cell.
    pub water: Option<Sighting>,
    /// Nearest food cell.
    pub food: Option<Sighting>,
    /// Nearest cell holding at least one blip.
    pub blip: Option<Sighting>,
}

impl Sight {
    /// Direction toward the nearest water, if seen.
    pub fn water_direction(&self) -> Option<Action> {
        self.water.map(|s| s.direction)
    }

    /// Direction toward the nearest food, if seen.
    pub fn food_direction(&self) -> Option<Action> {
        self.food.map(|s| s.direction)
    }

    /// Direction toward the nearest other blip, if seen.
    pub fn blip_direction(&self) -> Option<Action> {
        self.blip.map(|s| s.direction)
    }

    const fn is_complete(&self) -> bool {
        self.water.is_some() && self.food.is_some() && self.blip.is_some()
    }
}

/// Search outward from `origin` up to `range` steps.
///
/// Cells farther than `range` are dequeued but neither classified nor
/// expanded. An origin outside the grid sees nothing.
pub fn look(grid: &Grid, origin: Position, range: u32) -> Sight {
    let mut sight = Sight::default();
    let Some(origin_index) = grid.index_of(origin) else {
        return sight;
    };

    let mut visited = vec![false; grid.len()];
    mark(&mut visited, origin_index);

    let (rows, cols) = (grid.rows(), grid.cols());
    let mut queue: VecDeque<(Position, u32, Action)> = VecDeque::new();
    for direction in Action::MOVES {
        if let Some(next) = origin.step(direction, rows, cols)
            && let Some(index) = grid.index_of(next)
        {
            mark(&mut visited, index);
            queue.push_back((next, 1, direction));
        }
    }

    while let Some((position, distance, direction)) = queue.pop_front() {
        if distance > range {
            continue;
        }

        if let Some(cell) = grid.cell(position) {
            let hit = Sighting { distance, direction };
            if cell.is_food() {
                sight.food.get_or_insert(hit);
            } else if cell.is_water() {
                sight.water.get_or_insert(hit);
            }
            if cell.is_occupied() {
                sight.blip.get_or_insert(hit);
            }
        }

        // Later pops are never closer, so nothing left can change the result.
        if sight.is_complete() {
            break;
        }

        let next_distance = distance.saturating_add(1);
        for step in Action::MOVES {
            let Some(next) = position.step(step, rows, cols) else {
                continue;
            };
            let Some(index) = grid.index_of(next) else {
                continue;
            };
            if visited.get(index).copied().unwrap_or(true) {
                continue;
            }
            mark(&mut visited, index);
            queue.push_back((next, next_distance, direction));
        }
    }

    sight
}

fn mark(visited: &mut [bool], index: usize) {
    if let Some(slot) = visited.get_mut(index) {
        *slot = true;
    }
}
