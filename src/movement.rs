use crate::grid::{Dir, Grid, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveLockout {
    /// Keep accepting moves after the goal is reached.
    #[default]
    Permissive,
    /// Ignore every move once won.
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Target was a wall or off the grid. Nothing changed.
    Blocked,
    Moved,
    /// The move landed on the goal.
    ReachedGoal,
    /// Won under [`MoveLockout::Strict`]; the move was ignored.
    Locked,
}

impl MoveOutcome {
    pub fn moved(self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::ReachedGoal)
    }
}

/// Player position, move counter and win state for one play-through.
#[derive(Clone, Debug)]
pub struct Walker {
    pos: Pos,
    goal: Pos,
    moves: u32,
    status: Status,
    lockout: MoveLockout,
}

impl Walker {
    pub fn new(start: Pos, goal: Pos, lockout: MoveLockout) -> Self {
        Self {
            pos: start,
            goal,
            moves: 0,
            status: Status::Playing,
            lockout,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn step(&mut self, grid: &Grid, dir: Dir) -> MoveOutcome {
        if self.status == Status::Won && self.lockout == MoveLockout::Strict {
            return MoveOutcome::Locked;
        }
        let Some(next) = grid.step(self.pos, dir) else {
            return MoveOutcome::Blocked;
        };
        if !grid.is_open_at(next) {
            return MoveOutcome::Blocked;
        }

        self.pos = next;
        self.moves += 1;
        if self.pos == self.goal {
            self.status = Status::Won;
            return MoveOutcome::ReachedGoal;
        }
        MoveOutcome::Moved
    }
}
