//! Session state and the controller that replaces it on request.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::clock::SessionClock;
use crate::error::Result;
use crate::generator::{self, MazeSize};
use crate::grid::{Dir, Grid, Pos};
use crate::movement::{MoveLockout, MoveOutcome, Status, Walker};
use crate::snap::{self, SnapFallback};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub lockout: MoveLockout,
    pub fallback: SnapFallback,
}

/// One play-through on one maze.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    start: Pos,
    walker: Walker,
    clock: SessionClock,
    lockout: MoveLockout,
}

impl Session {
    /// Places start near `(1, 1)` and goal near the opposite inner corner.
    pub fn new(grid: Grid, options: SessionOptions) -> Result<Self> {
        let far_x = grid.width() as isize - 2;
        let far_y = grid.height() as isize - 2;
        let start = snap::try_nearest_open(&grid, 1, 1, options.fallback)?;
        let goal = snap::try_nearest_open(&grid, far_x, far_y, options.fallback)?;
        Ok(Self {
            grid,
            start,
            walker: Walker::new(start, goal, options.lockout),
            clock: SessionClock::start(),
            lockout: options.lockout,
        })
    }

    /// Back to the start on the same maze, with a fresh counter and clock.
    pub fn reset(&mut self) {
        self.walker = Walker::new(self.start, self.walker.goal(), self.lockout);
        self.clock = SessionClock::start();
    }

    pub fn move_player(&mut self, dir: Dir) -> MoveOutcome {
        let outcome = self.walker.step(&self.grid, dir);
        if outcome == MoveOutcome::ReachedGoal && self.clock.is_running() {
            self.clock.stop();
            info!(
                "goal reached in {} moves, {:.2}s",
                self.walker.moves(),
                self.clock.elapsed().as_secs_f64()
            );
        }
        outcome
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn goal(&self) -> Pos {
        self.walker.goal()
    }

    pub fn player(&self) -> Pos {
        self.walker.pos()
    }

    pub fn moves(&self) -> u32 {
        self.walker.moves()
    }

    pub fn status(&self) -> Status {
        self.walker.status()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }
}

/// Owns the random source and the current session.
pub struct Controller<R: Rng = StdRng> {
    rng: R,
    options: SessionOptions,
    session: Session,
}

impl Controller<StdRng> {
    /// Reproducible when `seed` is given, entropy-seeded otherwise.
    pub fn seeded(
        seed: Option<u64>,
        width: usize,
        height: usize,
        options: SessionOptions,
    ) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, width, height, options)
    }
}

impl<R: Rng> Controller<R> {
    pub fn new(mut rng: R, width: usize, height: usize, options: SessionOptions) -> Result<Self> {
        let session = build_session(&mut rng, width, height, options)?;
        Ok(Self {
            rng,
            options,
            session,
        })
    }

    /// Replaces the whole session. On error the current one is kept.
    pub fn new_maze(&mut self, width: usize, height: usize) -> Result<()> {
        self.session = build_session(&mut self.rng, width, height, self.options)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.session.reset();
        info!("session reset");
    }

    pub fn move_player(&mut self, dir: Dir) -> MoveOutcome {
        self.session.move_player(dir)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }
}

fn build_session(
    rng: &mut impl Rng,
    width: usize,
    height: usize,
    options: SessionOptions,
) -> Result<Session> {
    let size = MazeSize::normalized(width, height)?;
    let grid = generator::generate(size, rng);
    let session = Session::new(grid, options)?;
    info!(
        "new {}x{} maze, start {:?}, goal {:?}",
        size.width,
        size.height,
        session.start(),
        session.goal()
    );
    Ok(session)
}
