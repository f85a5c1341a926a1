#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Wall/open occupancy grid, stored row-major.
///
/// Callers only read it; the generator is the single writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid where every cell is a wall.
    pub(crate) fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Wall; width * height],
        }
    }

    pub(crate) fn carve(&mut self, pos: Pos) {
        let idx = self.idx(pos);
        self.cells[idx] = Cell::Open;
    }

    /// Builds a grid from text rows, `#` for walls and anything else open.
    /// Handy for fixtures; rows shorter than the first are padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::filled(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(width).enumerate() {
                if ch != '#' {
                    grid.carve(Pos::new(x, y));
                }
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn is_open(&self, x: isize, y: isize) -> bool {
        self.in_bounds(x, y) && self.cells[y as usize * self.width + x as usize] == Cell::Open
    }

    pub fn is_open_at(&self, pos: Pos) -> bool {
        self.is_open(pos.x as isize, pos.y as isize)
    }

    /// Cell at `pos`, or `None` outside the grid.
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        if pos.x < self.width && pos.y < self.height {
            Some(self.cells[self.idx(pos)])
        } else {
            None
        }
    }

    /// Target of a single step from `pos`, if it stays on the grid.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if !self.in_bounds(nx, ny) {
            return None;
        }
        Some(Pos::new(nx as usize, ny as usize))
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Open).count()
    }

    pub fn open_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y * self.width + x] == Cell::Open {
                    cells.push(Pos::new(x, y));
                }
            }
        }
        cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_never_open() {
        let grid = Grid::from_rows(&["###", "#.#", "###"]);
        assert!(grid.is_open(1, 1));
        assert!(!grid.is_open(-1, 1));
        assert!(!grid.is_open(1, 3));
        assert!(!grid.is_open(0, 0));
        assert!(!grid.in_bounds(3, 0));
        assert!(grid.in_bounds(2, 2));
    }

    #[test]
    fn step_stops_at_edges() {
        let grid = Grid::from_rows(&["###", "#.#", "###"]);
        assert_eq!(grid.step(Pos::new(0, 0), Dir::Up), None);
        assert_eq!(grid.step(Pos::new(0, 0), Dir::Right), Some(Pos::new(1, 0)));
        assert_eq!(grid.step(Pos::new(2, 2), Dir::Down), None);
    }

    #[test]
    fn counts_open_cells() {
        let grid = Grid::from_rows(&["#####", "#...#", "#####"]);
        assert_eq!(grid.open_count(), 3);
        assert_eq!(grid.open_cells()[0], Pos::new(1, 1));
        assert_eq!(grid.cell(Pos::new(4, 1)), Some(Cell::Wall));
        assert_eq!(grid.cell(Pos::new(5, 1)), None);
        assert_eq!(grid.rows().count(), 3);
    }
}
