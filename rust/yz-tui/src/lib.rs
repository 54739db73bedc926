//! Ratatui terminal UI for playing Yatzy.
//!
//! The engine owns all game rules; this crate only maps keys to inputs, ticks
//! the engine once per frame and draws whatever state comes back.

mod keys;
mod view;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::{info, warn};

use yz_core::{AdviceSource, Category, Clock, Config, Control, GameEngine, Mode, SystemClock};
use yz_logging::GameLogger;

pub use keys::{help_line, map_key, Action};

pub struct RunOptions {
    pub config: Config,
    pub source: Arc<dyn AdviceSource>,
    /// NDJSON game log; `None` disables it.
    pub game_log: Option<PathBuf>,
}

/// UI-side state that the engine does not care about.
pub struct App {
    engine: GameEngine,
    name_focus: usize,
    cursor: usize,
    logger: Option<GameLogger>,
}

impl App {
    pub fn new(engine: GameEngine, logger: Option<GameLogger>) -> Self {
        Self {
            engine,
            name_focus: 0,
            cursor: 0,
            logger,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn name_focus(&self) -> usize {
        self.name_focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn cursor_category(&self) -> Category {
        Category::ALL[self.cursor.min(Category::ALL.len() - 1)]
    }

    /// Apply one key action. Returns `Control::Quit` when the app should exit.
    pub fn apply(&mut self, action: Action) -> Control {
        match action {
            Action::Engine(input) => {
                let before = self.engine.mode();
                let ctl = self.engine.handle(input);
                if self.engine.mode() != before {
                    self.name_focus = 0;
                    self.cursor = 0;
                }
                self.snap_cursor();
                ctl
            }
            Action::NextField => {
                let n = self.engine.name_drafts().len().max(1);
                self.name_focus = (self.name_focus + 1) % n;
                Control::Continue
            }
            Action::CursorUp => {
                self.move_cursor(-1);
                Control::Continue
            }
            Action::CursorDown => {
                self.move_cursor(1);
                Control::Continue
            }
            Action::SelectCursor => {
                let cat = self.cursor_category();
                let ctl = self.engine.handle(yz_core::Input::SelectCategory(cat));
                self.snap_cursor();
                ctl
            }
        }
    }

    /// Step to the next open category of the current player, wrapping around.
    fn move_cursor(&mut self, dir: isize) {
        let Some(p) = self.engine.current_player() else {
            return;
        };
        let n = Category::ALL.len() as isize;
        let mut i = self.cursor as isize;
        for _ in 0..n {
            i = (i + dir).rem_euclid(n);
            if !p.is_scored(Category::ALL[i as usize]) {
                self.cursor = i as usize;
                return;
            }
        }
    }

    /// Keep the cursor on an open category after the turn changes hands.
    fn snap_cursor(&mut self) {
        if self.engine.mode() != Mode::Playing {
            return;
        }
        let Some(p) = self.engine.current_player() else {
            return;
        };
        if p.is_scored(self.cursor_category()) {
            if let Some(c) = p.open_categories().next() {
                self.cursor = c.index();
            }
        }
    }

    /// Engine tick plus log flush.
    pub fn on_tick(&mut self) {
        self.engine.tick();
        let events = self.engine.drain_events();
        if events.is_empty() {
            return;
        }
        if let Some(log) = self.logger.as_mut() {
            if let Err(e) = log.log_events(self.engine.game_id(), &events) {
                warn!(error = %e, "game log write failed; disabling game log");
                self.logger = None;
            }
        }
    }
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| view::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press {
                    if let Some(action) = map_key(app.engine.mode(), k, app.name_focus) {
                        if app.apply(action) == Control::Quit {
                            app.on_tick();
                            return Ok(());
                        }
                    }
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

pub fn run(opts: RunOptions) -> io::Result<()> {
    let tick_rate = Duration::from_millis(opts.config.ui.tick_ms.max(1));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let engine = GameEngine::new(opts.config, opts.source, clock);
    let logger = match opts.game_log {
        Some(path) => match GameLogger::open(&path) {
            Ok(l) => Some(l),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open game log");
                None
            }
        },
        None => None,
    };
    let mut app = App::new(engine, logger);

    // Terminal init. Once raw mode is on, every exit path goes through the restore.
    enable_raw_mode()?;
    run_then_restore(
        || {
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            terminal.clear()?;
            info!("terminal UI started");
            event_loop(&mut terminal, &mut app, tick_rate)
        },
        restore_terminal,
    )
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    info!("terminal UI stopped");
    Ok(())
}

/// Run `body`, then `restore` no matter how `body` ended. A body error wins over a restore error.
fn run_then_restore<T>(
    body: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let res = body();
    let restored = restore();
    let out = res?;
    restored?;
    Ok(out)
}
