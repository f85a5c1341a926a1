use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze must be at least 3x3 after rounding to odd sizes, got {width}x{height}")]
    TooSmall { width: usize, height: usize },

    #[error("no open cell reachable from ({x}, {y})")]
    NoOpenCell { x: isize, y: isize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
