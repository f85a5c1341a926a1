//! Terminal drawing. Only cells that changed since the last frame are redrawn.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::config::Settings;
use crate::grid::{Cell, Pos};
use crate::movement::Status;
use crate::session::Session;

const HELP: &str = "arrows/wasd/hjkl move  n new  r reset  +/- size  [/] cell  g grid  q quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Player,
    Goal,
    Wall,
    Empty,
    GridDot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenCell {
    pub glyph: Glyph,
    pub color: Color,
}

const BLANK: ScreenCell = ScreenCell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Where the maze and the text lines above and below it start on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub maze_x: u16,
    pub text_x: u16,
    pub top: u16,
}

/// Centres the maze and, separately, the widest text line. Returns the
/// minimum terminal size as the error when the frame does not fit.
pub fn layout(
    term: (u16, u16),
    width: usize,
    height: usize,
    cell_width: usize,
) -> Result<Layout, (u16, u16)> {
    let (term_w, term_h) = term;
    let maze_w = (width * cell_width) as u16;
    let needed_h = (height + 2) as u16;
    let needed_w = maze_w.max(HELP.len() as u16);
    if term_w < needed_w || term_h < needed_h {
        return Err((needed_w, needed_h));
    }
    Ok(Layout {
        maze_x: (term_w - maze_w) / 2,
        text_x: (term_w - needed_w) / 2,
        top: (term_h - needed_h) / 2 + 1,
    })
}

pub struct Renderer {
    last: Vec<ScreenCell>,
    last_hud: String,
    last_footer: String,
    needs_full: bool,
    layout: Layout,
    width: usize,
    height: usize,
    cell_width: usize,
    show_grid: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            last_footer: String::new(),
            needs_full: true,
            layout: Layout {
                maze_x: 0,
                text_x: 0,
                top: 1,
            },
            width: 0,
            height: 0,
            cell_width: 0,
            show_grid: false,
        }
    }

    /// Forces the next frame to repaint everything.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render(
        &mut self,
        stdout: &mut Stdout,
        session: &Session,
        settings: &Settings,
    ) -> io::Result<()> {
        let grid = session.grid();
        if grid.width() != self.width
            || grid.height() != self.height
            || settings.cell_width != self.cell_width
            || settings.show_grid != self.show_grid
        {
            self.width = grid.width();
            self.height = grid.height();
            self.cell_width = settings.cell_width;
            self.show_grid = settings.show_grid;
            self.last = vec![BLANK; self.width * self.height];
            self.needs_full = true;
            stdout.queue(Clear(ClearType::All))?;
        }

        stdout.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        let layout = match layout((term_w, term_h), self.width, self.height, self.cell_width) {
            Ok(layout) => layout,
            Err((needed_w, needed_h)) => {
                stdout.queue(Clear(ClearType::All))?;
                let msg = format!(
                    "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                    needed_w, needed_h, term_w, term_h
                );
                stdout.queue(Print(msg))?;
                stdout.flush()?;
                self.needs_full = true;
                return Ok(());
            }
        };
        if layout != self.layout {
            self.layout = layout;
            self.needs_full = true;
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(session, settings);
        if self.needs_full || hud != self.last_hud {
            self.draw_line(stdout, self.layout.top - 1, &hud, Color::White)?;
            self.last_hud = hud;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let cell = cell_for(session, Pos::new(x, y), self.show_grid);
                let idx = y * self.width + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, x, y, cell)?;
                }
            }
        }

        let (footer, color) = footer_line(session);
        if self.needs_full || footer != self.last_footer {
            self.draw_line(stdout, self.layout.top + self.height as u16, &footer, color)?;
            self.last_footer = footer;
        }
        self.needs_full = false;

        stdout.flush()?;
        Ok(())
    }

    fn draw_line(&self, stdout: &mut Stdout, row: u16, text: &str, color: Color) -> io::Result<()> {
        stdout.queue(MoveTo(0, row))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(MoveTo(self.layout.text_x, row))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(text))?;
        stdout.queue(ResetColor)?;
        Ok(())
    }

    fn draw_cell(
        &self,
        stdout: &mut Stdout,
        x: usize,
        y: usize,
        cell: ScreenCell,
    ) -> io::Result<()> {
        let text = glyph_text(cell.glyph, self.cell_width);
        let x_pos = self.layout.maze_x + (x * self.cell_width) as u16;
        let y_pos = self.layout.top + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn cell_for(session: &Session, pos: Pos, show_grid: bool) -> ScreenCell {
    if pos == session.player() {
        return ScreenCell {
            glyph: Glyph::Player,
            color: Color::Red,
        };
    }
    if pos == session.goal() {
        return ScreenCell {
            glyph: Glyph::Goal,
            color: Color::Green,
        };
    }
    match session.grid().cell(pos) {
        Some(Cell::Wall) => ScreenCell {
            glyph: Glyph::Wall,
            color: Color::DarkGrey,
        },
        Some(Cell::Open) if show_grid => ScreenCell {
            glyph: Glyph::GridDot,
            color: Color::DarkGrey,
        },
        _ => BLANK,
    }
}

/// Text for one glyph, padded or trimmed to exactly `cell_width` columns.
pub fn glyph_text(glyph: Glyph, cell_width: usize) -> String {
    let base = match glyph {
        Glyph::Player if cell_width >= 2 => "😃",
        Glyph::Player => "@",
        Glyph::Goal if cell_width >= 2 => "🚪",
        Glyph::Goal => "G",
        Glyph::Wall => return "█".repeat(cell_width),
        Glyph::GridDot => "·",
        Glyph::Empty => "",
    };
    let mut text = base.to_string();
    let w = UnicodeWidthStr::width(base);
    if w < cell_width {
        text.push_str(&" ".repeat(cell_width - w));
    }
    text
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}

pub fn hud_line(session: &Session, settings: &Settings) -> String {
    let grid = session.grid();
    format!(
        "Time: {}s  Moves: {}  Maze: {}x{}  Next: {}x{}  Cell: {}",
        format_elapsed(session.elapsed()),
        session.moves(),
        grid.width(),
        grid.height(),
        settings.columns,
        settings.rows,
        settings.cell_width
    )
}

pub fn footer_line(session: &Session) -> (String, Color) {
    match session.status() {
        Status::Won => (
            format!(
                "Escaped! Time: {}s  Moves: {}",
                format_elapsed(session.elapsed()),
                session.moves()
            ),
            Color::Green,
        ),
        Status::Playing => (HELP.to_string(), Color::Grey),
    }
}
