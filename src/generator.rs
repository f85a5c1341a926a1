//! Randomized depth-first backtracker.
//!
//! Corridors live on odd coordinates and the generator always steps two cells
//! at a time, so a wall cell stays between neighbouring corridors and the
//! outer ring is never touched.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MazeError, Result};
use crate::grid::{Dir, Grid, Pos};

pub const MIN_SIDE: usize = 3;
/// Rows per column when only a column count is requested.
pub const ROW_RATIO: f64 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeSize {
    pub width: usize,
    pub height: usize,
}

impl MazeSize {
    /// Rounds each even side up to the next odd value.
    pub fn normalized(width: usize, height: usize) -> Result<Self> {
        let width = round_up_odd(width);
        let height = round_up_odd(height);
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(MazeError::TooSmall { width, height });
        }
        Ok(Self { width, height })
    }

    /// Size for a column count, with rows derived from [`ROW_RATIO`].
    pub fn from_columns(columns: usize) -> Result<Self> {
        Self::normalized(columns, rows_for(columns))
    }
}

pub fn rows_for(columns: usize) -> usize {
    (columns as f64 * ROW_RATIO).floor() as usize
}

fn round_up_odd(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

pub fn generate(size: MazeSize, rng: &mut impl Rng) -> Grid {
    let MazeSize { width, height } = size;
    let mut grid = Grid::filled(width, height);
    let start = Pos::new(1, 1);
    grid.carve(start);
    let mut stack = vec![start];
    let mut dirs = Dir::ALL;

    while let Some(&cur) = stack.last() {
        dirs.shuffle(rng);
        let next = dirs
            .iter()
            .find_map(|&dir| carve_target(&grid, cur, dir).map(|target| (dir, target)));

        match next {
            Some((dir, target)) => {
                let (dx, dy) = dir.delta();
                let wall = Pos::new(
                    (cur.x as isize + dx) as usize,
                    (cur.y as isize + dy) as usize,
                );
                grid.carve(wall);
                grid.carve(target);
                stack.push(target);
            }
            None => {
                stack.pop();
            }
        }
    }

    debug!(
        "carved {}x{} maze with {} open cells",
        width,
        height,
        grid.open_count()
    );
    grid
}

/// Cell two steps away in `dir`, if it lies strictly inside the border and
/// has not been carved yet.
fn carve_target(grid: &Grid, cur: Pos, dir: Dir) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let nx = cur.x as isize + dx * 2;
    let ny = cur.y as isize + dy * 2;
    if nx <= 0 || ny <= 0 || nx >= grid.width() as isize - 1 || ny >= grid.height() as isize - 1 {
        return None;
    }
    if grid.is_open(nx, ny) {
        return None;
    }
    Some(Pos::new(nx as usize, ny as usize))
}
