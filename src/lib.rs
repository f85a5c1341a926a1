//! Maze generation, nearest-open-cell snapping and the play session that
//! drives the `maze` terminal game.

pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod movement;
pub mod render;
pub mod session;
pub mod snap;

pub use error::{MazeError, Result};
pub use generator::{generate, MazeSize};
pub use grid::{Cell, Dir, Grid, Pos};
pub use movement::{MoveLockout, MoveOutcome, Status, Walker};
pub use session::{Controller, Session, SessionOptions};
pub use snap::{nearest_open, try_nearest_open, SnapFallback};
