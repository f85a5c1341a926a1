//! Resolve arbitrary coordinates to the nearest open cell.

use std::collections::{HashSet, VecDeque};

use log::warn;

use crate::error::{MazeError, Result};
use crate::grid::{Grid, Pos};

/// Expansion order for the search. Fixed so ties resolve the same way every time.
const NEIGHBORS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Where a search that finds nothing ends up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnapFallback {
    /// Silently land on `(1, 1)`.
    #[default]
    Origin,
    /// Report [`MazeError::NoOpenCell`].
    Fail,
}

pub const FALLBACK_POS: Pos = Pos { x: 1, y: 1 };

/// Nearest open cell to `(x, y)` by breadth-first hop count, falling back to
/// `(1, 1)` if the search runs dry.
pub fn nearest_open(grid: &Grid, x: isize, y: isize) -> Pos {
    search(grid, x, y).unwrap_or_else(|| {
        warn!("no open cell reachable from ({x}, {y}), using {FALLBACK_POS:?}");
        FALLBACK_POS
    })
}

pub fn try_nearest_open(grid: &Grid, x: isize, y: isize, fallback: SnapFallback) -> Result<Pos> {
    match fallback {
        SnapFallback::Origin => Ok(nearest_open(grid, x, y)),
        SnapFallback::Fail => search(grid, x, y).ok_or(MazeError::NoOpenCell { x, y }),
    }
}

/// BFS from the seed over every in-bounds cell, walls included. The seed is
/// queued even when it is a wall or off the grid.
fn search(grid: &Grid, x: isize, y: isize) -> Option<Pos> {
    if grid.is_open(x, y) {
        return Some(Pos::new(x as usize, y as usize));
    }

    let mut q = VecDeque::new();
    let mut seen = HashSet::new();
    seen.insert((x, y));
    q.push_back((x, y));

    while let Some((cx, cy)) = q.pop_front() {
        if grid.is_open(cx, cy) {
            return Some(Pos::new(cx as usize, cy as usize));
        }
        for (dx, dy) in NEIGHBORS {
            // Offsets that overflow can never land on the grid.
            let (Some(nx), Some(ny)) = (cx.checked_add(dx), cy.checked_add(dy)) else {
                continue;
            };
            let next = (nx, ny);
            if !grid.in_bounds(nx, ny) {
                continue;
            }
            if seen.insert(next) {
                q.push_back(next);
            }
        }
    }
    None
}
