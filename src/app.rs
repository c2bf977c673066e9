// Terminal front end state: turns key and mouse input into session events
// and keeps the little bit of UI state the session does not own.

use crate::config::{GameConfig, GridSize};
use crate::display::{format_best, format_time};
use crate::game_errors::validate_grid_choice;
use crate::score_store::{KeyValueStore, SaveOutcome};
use crate::session::{Event, GameSession, Transition};
use crate::ui;
use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::debug;
use ratatui::layout::Rect;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartOrReset,
    PressCursor,
    MoveCursor { rows: isize, cols: isize },
    SelectSize(usize),
    CycleColor { forward: bool },
    ToggleShowColors,
    ToggleDarkMode,
    ToggleHelp,
    Quit,
}

/// Board sizes reachable from the number keys
pub const SIZE_KEYS: RangeInclusive<usize> = 3..=9;

/// Map a key press to a command
pub fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('s') => Command::StartOrReset,
        KeyCode::Enter | KeyCode::Char(' ') => Command::PressCursor,
        KeyCode::Up => Command::MoveCursor { rows: -1, cols: 0 },
        KeyCode::Down => Command::MoveCursor { rows: 1, cols: 0 },
        KeyCode::Left => Command::MoveCursor { rows: 0, cols: -1 },
        KeyCode::Right => Command::MoveCursor { rows: 0, cols: 1 },
        KeyCode::Char(c @ '3'..='9') => Command::SelectSize(c as usize - '0' as usize),
        KeyCode::Char('c') => Command::CycleColor { forward: true },
        KeyCode::Char('C') => Command::CycleColor { forward: false },
        KeyCode::Char('v') => Command::ToggleShowColors,
        KeyCode::Char('d') => Command::ToggleDarkMode,
        KeyCode::Char('h') | KeyCode::Char('?') => Command::ToggleHelp,
        _ => return None,
    };
    Some(command)
}

pub struct App<S> {
    game: GameSession<S>,
    sizes: Vec<usize>,
    frame_interval: Duration,
    cursor: (usize, usize),
    show_help: bool,
    should_quit: bool,
    status: Option<String>,
    cell_areas: Vec<Rect>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(config: &GameConfig, store: S) -> Self {
        Self::with_session(config, GameSession::new(config, store))
    }

    pub fn with_session(config: &GameConfig, game: GameSession<S>) -> Self {
        Self {
            game,
            sizes: config.board.sizes.clone(),
            frame_interval: config.frame_interval(),
            cursor: (0, 0),
            show_help: false,
            should_quit: false,
            status: None,
            cell_areas: Vec::new(),
        }
    }

    pub fn handle_event(&mut self, event: TermEvent, now: Instant) {
        match event {
            TermEvent::Key(key) => {
                if let Some(command) = map_key(&key) {
                    self.apply(command, now);
                }
            }
            TermEvent::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.show_help {
            return;
        }
        if let Some(index) = ui::hit_test(&self.cell_areas, mouse.column, mouse.row) {
            self.cursor = self.game.grid_size().position_of(index);
            self.press(index, now);
        }
    }

    pub fn apply(&mut self, command: Command, now: Instant) {
        if self.show_help && !matches!(command, Command::ToggleHelp | Command::Quit) {
            return;
        }
        match command {
            Command::StartOrReset => {
                let transition = self.game.dispatch(Event::Start, now);
                self.note(transition);
            }
            Command::PressCursor => {
                if let Ok(index) = self.game.grid_size().index_of(self.cursor.0, self.cursor.1) {
                    self.press(index, now);
                }
            }
            Command::MoveCursor { rows, cols } => self.move_cursor(rows, cols),
            Command::SelectSize(size) => self.select_size(size, now),
            Command::CycleColor { forward } => {
                let current = self.game.preferences().click_color;
                let color = if forward { current.next() } else { current.prev() };
                self.game.dispatch(Event::ColorSelected(color), now);
            }
            Command::ToggleShowColors => {
                let show = !self.game.preferences().show_colors;
                self.game.dispatch(Event::ShowColorsSet(show), now);
            }
            Command::ToggleDarkMode => {
                self.game.dispatch(Event::DarkModeToggled, now);
            }
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::Quit => self.should_quit = true,
        }
    }

    /// Dispatch a timer tick
    pub fn on_tick(&mut self, now: Instant) {
        self.game.dispatch(Event::Tick, now);
    }

    /// How long the event loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.game
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(self.frame_interval)
            .min(self.frame_interval)
    }

    fn press(&mut self, index: usize, now: Instant) {
        let Some(value) = self.game.board().cell(index).map(|cell| cell.value()) else {
            return;
        };
        let transition = self.game.dispatch(Event::CellClicked { value }, now);
        self.note(transition);
    }

    fn move_cursor(&mut self, rows: isize, cols: isize) {
        let max = self.game.grid_size().get() as isize - 1;
        let row = (self.cursor.0 as isize + rows).clamp(0, max);
        let col = (self.cursor.1 as isize + cols).clamp(0, max);
        self.cursor = (row as usize, col as usize);
    }

    fn select_size(&mut self, size: usize, now: Instant) {
        let grid_size = validate_grid_choice(size, &self.sizes).and_then(|_| GridSize::new(size));
        match grid_size {
            Ok(grid_size) => {
                let transition = self.game.dispatch(Event::GridSizeChanged(grid_size), now);
                self.cursor = (0, 0);
                self.note(transition);
            }
            Err(e) => {
                debug!("size selection rejected: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    /// Update the status line from a transition
    fn note(&mut self, transition: Transition) {
        match transition {
            Transition::Completed(completion) => {
                let time = format_time(completion.elapsed_ms);
                self.status = Some(match completion.outcome {
                    SaveOutcome::NewBest { .. } => format!("New best! {}", time),
                    SaveOutcome::NotBest { best } => {
                        format!("Finished in {} (best {})", time, format_best(Some(best)))
                    }
                });
            }
            Transition::Started => self.status = None,
            Transition::Reset { grid_size } => {
                self.status = Some(format!("Switched to {} board", grid_size));
            }
            _ => {}
        }
    }

    /// Record where the board cells were drawn, for mouse hit-testing
    pub fn set_cell_areas(&mut self, areas: Vec<Rect>) {
        self.cell_areas = areas;
    }

    pub fn game(&self) -> &GameSession<S> {
        &self.game
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
