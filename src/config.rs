//! Command-line and environment settings for the terminal front end.

use std::path::PathBuf;

use clap::Parser;

use crate::generator::rows_for;
use crate::movement::MoveLockout;
use crate::session::SessionOptions;
use crate::snap::SnapFallback;

pub const DEFAULT_COLUMNS: usize = 20;
pub const MIN_COLUMNS: usize = 5;
pub const MAX_COLUMNS: usize = 61;
pub const COLUMN_STEP: usize = 2;
pub const MIN_CELL_W: usize = 1;
pub const MAX_CELL_W: usize = 4;
pub const DEFAULT_CELL_W: usize = 2;
const DEFAULT_RENDER_FPS: u64 = 60;

/// Escape a randomly carved maze in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Requested maze columns (rounded up to odd)
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Requested maze rows; defaults to three quarters of the columns
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Terminal columns per maze cell
    #[arg(long, default_value_t = DEFAULT_CELL_W as u16, value_parser = clap::value_parser!(u16).range(1..=4))]
    pub cell_width: u16,

    /// Start with grid lines shown
    #[arg(short, long)]
    pub grid: bool,

    /// Seed for reproducible mazes
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Ignore moves after the goal is reached
    #[arg(long)]
    pub strict: bool,

    /// Fail instead of falling back to (1, 1) when no open cell is found
    #[arg(long)]
    pub snap_fail: bool,

    /// Write logs to this file (the terminal is taken over by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Front-end state that outlives a single maze: requested size and display toggles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: usize,
    pub show_grid: bool,
    pub seed: Option<u64>,
    pub options: SessionOptions,
    pub render_fps: u64,
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        let lockout = if args.strict {
            MoveLockout::Strict
        } else {
            MoveLockout::Permissive
        };
        let fallback = if args.snap_fail {
            SnapFallback::Fail
        } else {
            SnapFallback::Origin
        };
        Self {
            columns: args.columns,
            rows: args.rows.unwrap_or_else(|| rows_for(args.columns)),
            cell_width: args.cell_width as usize,
            show_grid: args.grid,
            seed: args.seed,
            options: SessionOptions { lockout, fallback },
            render_fps: read_render_fps(),
        }
    }

    /// Grows or shrinks the requested size; rows follow the column ratio.
    pub fn adjust_columns(&mut self, grow: bool) {
        self.columns = if grow {
            (self.columns + COLUMN_STEP).min(MAX_COLUMNS)
        } else {
            self.columns.saturating_sub(COLUMN_STEP).max(MIN_COLUMNS)
        };
        self.rows = rows_for(self.columns);
    }

    pub fn adjust_cell_width(&mut self, grow: bool) {
        self.cell_width = if grow {
            (self.cell_width + 1).min(MAX_CELL_W)
        } else {
            self.cell_width.saturating_sub(1).max(MIN_CELL_W)
        };
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }
}

fn read_render_fps() -> u64 {
    std::env::var("MAZE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS)
}
