use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_escape::{
    generate, nearest_open, Controller, Dir, Grid, MazeSize, MoveOutcome, Pos, SessionOptions,
    Status,
};

fn maze(width: usize, height: usize, seed: u64) -> Grid {
    let size = MazeSize::normalized(width, height).unwrap();
    generate(size, &mut StdRng::seed_from_u64(seed))
}

fn reachable_from(grid: &Grid, start: Pos) -> HashSet<Pos> {
    let mut seen = HashSet::new();
    let mut q = VecDeque::new();
    seen.insert(start);
    q.push_back(start);
    while let Some(pos) = q.pop_front() {
        for dir in Dir::ALL {
            if let Some(next) = grid.step(pos, dir) {
                if grid.is_open_at(next) && seen.insert(next) {
                    q.push_back(next);
                }
            }
        }
    }
    seen
}

fn open_edges(grid: &Grid) -> usize {
    let mut edges = 0;
    for pos in grid.open_cells() {
        for dir in [Dir::Right, Dir::Down] {
            if let Some(next) = grid.step(pos, dir) {
                if grid.is_open_at(next) {
                    edges += 1;
                }
            }
        }
    }
    edges
}

/// Hop distance from the seed to every in-bounds cell, walls included.
fn hop_distances(grid: &Grid, x: isize, y: isize) -> Vec<Vec<Option<usize>>> {
    let mut dist = vec![vec![None; grid.width()]; grid.height()];
    let mut q = VecDeque::new();
    dist[y as usize][x as usize] = Some(0);
    q.push_back((x, y, 0usize));
    while let Some((cx, cy, d)) = q.pop_front() {
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let (nx, ny) = (cx + dx, cy + dy);
            if grid.in_bounds(nx, ny) && dist[ny as usize][nx as usize].is_none() {
                dist[ny as usize][nx as usize] = Some(d + 1);
                q.push_back((nx, ny, d + 1));
            }
        }
    }
    dist
}

proptest! {
    #[test]
    fn every_open_cell_is_connected(w in 3usize..40, h in 3usize..40, seed in any::<u64>()) {
        let grid = maze(w, h, seed);
        let reached = reachable_from(&grid, Pos::new(1, 1));
        prop_assert_eq!(reached.len(), grid.open_count());
    }

    #[test]
    fn open_cells_form_a_tree(w in 3usize..40, h in 3usize..40, seed in any::<u64>()) {
        let grid = maze(w, h, seed);
        prop_assert_eq!(open_edges(&grid), grid.open_count() - 1);
    }

    #[test]
    fn border_stays_solid(w in 3usize..40, h in 3usize..40, seed in any::<u64>()) {
        let grid = maze(w, h, seed);
        let (gw, gh) = (grid.width() as isize, grid.height() as isize);
        for x in 0..gw {
            prop_assert!(!grid.is_open(x, 0));
            prop_assert!(!grid.is_open(x, gh - 1));
        }
        for y in 0..gh {
            prop_assert!(!grid.is_open(0, y));
            prop_assert!(!grid.is_open(gw - 1, y));
        }
    }

    #[test]
    fn sizes_round_up_to_odd(w in 3usize..60, h in 3usize..60) {
        let size = MazeSize::normalized(w, h).unwrap();
        prop_assert_eq!(size.width, if w % 2 == 0 { w + 1 } else { w });
        prop_assert_eq!(size.height, if h % 2 == 0 { h + 1 } else { h });
        let grid = maze(w, h, 0);
        prop_assert_eq!((grid.width(), grid.height()), (size.width, size.height));
    }

    #[test]
    fn snapping_open_cells_is_identity(w in 5usize..30, h in 5usize..30, seed in any::<u64>()) {
        let grid = maze(w, h, seed);
        for pos in grid.open_cells() {
            prop_assert_eq!(nearest_open(&grid, pos.x as isize, pos.y as isize), pos);
        }
    }

    #[test]
    fn snap_lands_at_minimum_distance(
        w in 5usize..30,
        h in 5usize..30,
        seed in any::<u64>(),
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let grid = maze(w, h, seed);
        let x = (fx * grid.width() as f64) as isize;
        let y = (fy * grid.height() as f64) as isize;
        let snapped = nearest_open(&grid, x, y);
        prop_assert!(grid.is_open_at(snapped));

        let dist = hop_distances(&grid, x, y);
        let best = grid
            .open_cells()
            .iter()
            .filter_map(|p| dist[p.y][p.x])
            .min()
            .unwrap();
        prop_assert_eq!(dist[snapped.y][snapped.x], Some(best));
    }

    #[test]
    fn moves_only_land_on_open_cells(
        seed in any::<u64>(),
        dirs in proptest::collection::vec(0usize..4, 0..200),
    ) {
        let mut controller =
            Controller::seeded(Some(seed), 11, 9, SessionOptions::default()).unwrap();
        for i in dirs {
            let before = controller.session().player();
            let moves_before = controller.session().moves();
            let outcome = controller.move_player(Dir::ALL[i]);
            let session = controller.session();
            prop_assert!(session.grid().is_open_at(session.player()));
            if outcome.moved() {
                prop_assert_eq!(session.moves(), moves_before + 1);
                prop_assert_eq!(Some(session.player()), session.grid().step(before, Dir::ALL[i]));
            } else {
                prop_assert_eq!(session.moves(), moves_before);
                prop_assert_eq!(session.player(), before);
            }
            if outcome == MoveOutcome::ReachedGoal {
                prop_assert_eq!(session.player(), session.goal());
                prop_assert_eq!(session.status(), Status::Won);
                prop_assert!(!session.is_running());
            }
        }
    }
}

#[test]
fn five_by_five_scenario() {
    for seed in 0..32 {
        let mut controller =
            Controller::seeded(Some(seed), 5, 5, SessionOptions::default()).unwrap();
        let session = controller.session();
        assert_eq!((session.grid().width(), session.grid().height()), (5, 5));
        assert_eq!(session.start(), Pos::new(1, 1));
        assert_eq!(session.goal(), Pos::new(3, 3));

        assert_eq!(controller.move_player(Dir::Up), MoveOutcome::Blocked);
        assert_eq!(controller.session().player(), Pos::new(1, 1));
        assert_eq!(controller.session().moves(), 0);
    }
}

#[test]
fn walking_the_unique_path_wins() {
    let mut controller = Controller::seeded(Some(2024), 21, 15, SessionOptions::default()).unwrap();
    let path = {
        let session = controller.session();
        shortest_path(session.grid(), session.start(), session.goal())
    };
    let last = path.len() - 1;
    for (i, dir) in path.into_iter().enumerate() {
        let outcome = controller.move_player(dir);
        if i == last {
            assert_eq!(outcome, MoveOutcome::ReachedGoal);
        } else {
            assert_eq!(outcome, MoveOutcome::Moved);
        }
    }
    let session = controller.session();
    assert_eq!(session.status(), Status::Won);
    assert_eq!(session.moves() as usize, last + 1);

    controller.reset();
    let session = controller.session();
    assert_eq!(session.player(), session.start());
    assert_eq!(session.status(), Status::Playing);
    assert_eq!(session.moves(), 0);
}

fn shortest_path(grid: &Grid, from: Pos, to: Pos) -> Vec<Dir> {
    let mut prev = std::collections::HashMap::new();
    let mut q = VecDeque::new();
    q.push_back(from);
    prev.insert(from, None);
    while let Some(pos) = q.pop_front() {
        if pos == to {
            break;
        }
        for dir in Dir::ALL {
            if let Some(next) = grid.step(pos, dir) {
                if grid.is_open_at(next) && !prev.contains_key(&next) {
                    prev.insert(next, Some((pos, dir)));
                    q.push_back(next);
                }
            }
        }
    }
    let mut dirs = Vec::new();
    let mut cur = to;
    while let Some(Some((p, dir))) = prev.get(&cur).copied() {
        dirs.push(dir);
        cur = p;
    }
    dirs.reverse();
    dirs
}
