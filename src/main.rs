use std::fs::File;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::{error, info, LevelFilter};

use maze_escape::config::{Args, Settings};
use maze_escape::render::Renderer;
use maze_escape::{Controller, Dir};

enum Action {
    Move(Dir),
    NewMaze,
    Reset,
    Resize(bool),
    CellWidth(bool),
    ToggleGrid,
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    let mut settings = Settings::from_args(&args);
    let mut controller = Controller::seeded(
        settings.seed,
        settings.columns,
        settings.rows,
        settings.options,
    )
    .context("failed to build the first maze")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut controller, &mut settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let file = match &args.log_file {
        Some(path) => Some(
            File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?,
        ),
        None => None,
    };
    logger_builder(file).init();
    Ok(())
}

/// Raw mode owns the terminal, so without a log file nothing is logged,
/// whatever `RUST_LOG` says.
fn logger_builder(log_file: Option<File>) -> env_logger::Builder {
    match log_file {
        Some(file) => {
            let env = env_logger::Env::default().default_filter_or("info");
            let mut builder = env_logger::Builder::from_env(env);
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => {
            let mut builder = env_logger::Builder::new();
            builder.filter_level(LevelFilter::Off);
            builder
        }
    }
}

fn run(stdout: &mut Stdout, controller: &mut Controller, settings: &mut Settings) -> Result<()> {
    let mut renderer = Renderer::new();
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    let Some(action) = action_for(key.code) else {
                        continue;
                    };
                    match action {
                        Action::Quit => return Ok(()),
                        Action::Move(dir) => {
                            controller.move_player(dir);
                        }
                        Action::NewMaze => {
                            if let Err(err) = controller.new_maze(settings.columns, settings.rows) {
                                error!("could not build maze: {err}");
                            }
                        }
                        Action::Reset => controller.reset(),
                        Action::Resize(grow) => {
                            settings.adjust_columns(grow);
                            info!("next maze {}x{}", settings.columns, settings.rows);
                        }
                        Action::CellWidth(grow) => settings.adjust_cell_width(grow),
                        Action::ToggleGrid => settings.toggle_grid(),
                    }
                }
                Event::Resize(_, _) => renderer.invalidate(),
                _ => {}
            }
        }

        renderer.render(stdout, controller.session(), settings)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn action_for(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => {
            Action::Move(Dir::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') => {
            Action::Move(Dir::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
            Action::Move(Dir::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
            Action::Move(Dir::Right)
        }
        KeyCode::Char('n') => Action::NewMaze,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Resize(true),
        KeyCode::Char('-') => Action::Resize(false),
        KeyCode::Char(']') => Action::CellWidth(true),
        KeyCode::Char('[') => Action::CellWidth(false),
        KeyCode::Char('g') => Action::ToggleGrid,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}
