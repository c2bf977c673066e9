// Game session - the single owner of game state.
// Every input arrives as an `Event` and goes through `GameSession::dispatch`,
// which returns a `Transition` describing what changed.

pub mod preferences;

pub use preferences::Preferences;

use crate::board::Board;
use crate::config::{GameConfig, GridSize};
use crate::display::{format_best, format_target, format_time, PaletteColor};
use crate::score_store::{HighScores, KeyValueStore, SaveOutcome};
use crate::timer::GameTimer;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ready,    // Board shown, clicks ignored
    Playing,  // Accepting clicks
    Finished, // Every cell consumed, clicks ignored
}

impl GameState {
    /// Label of the start/reset control in this state
    pub fn button_label(self) -> &'static str {
        match self {
            GameState::Ready => "Start Game",
            GameState::Playing => "Reset",
            GameState::Finished => "Play Again",
        }
    }
}

/// Inputs to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Start, reset or play again
    Start,
    /// A cell labelled `value` was clicked
    CellClicked { value: u32 },
    /// A different board size was picked
    GridSizeChanged(GridSize),
    /// Time passed; sample the timer and expire error flags
    Tick,
    ColorSelected(PaletteColor),
    ShowColorsSet(bool),
    DarkModeToggled,
}

/// A finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub grid_size: GridSize,
    pub elapsed_ms: u64,
    pub outcome: SaveOutcome,
}

/// What a dispatched event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed
    Ignored,
    /// A new round began; the board was reshuffled
    Started,
    /// Correct click; `target` is the next number to find
    Advanced { target: u32 },
    /// Wrong click; the cell is flagged for a moment
    Missed { value: u32 },
    /// Final correct click
    Completed(Completion),
    /// Session reset to `Ready` for a new size
    Reset { grid_size: GridSize },
    /// Timer sampled and/or flags cleared
    Ticked { elapsed_ms: u64, flags_cleared: usize },
    PreferencesChanged,
}

fn as_millis(duration: Duration) -> u64 {
    duration.as_millis().min(u64::MAX as u128) as u64
}

pub struct GameSession<S> {
    grid_size: GridSize,
    state: GameState,
    current_target: u32,
    board: Board,
    timer: GameTimer,
    error_flash: Duration,
    preferences: Preferences,
    scores: HighScores<S>,
    best_ms: Option<u64>,
    last_completion: Option<Completion>,
    rng: StdRng,
}

impl<S: KeyValueStore> GameSession<S> {
    /// New session in `Ready` at the configured default size
    pub fn new(config: &GameConfig, store: S) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Same as `new` with a caller-provided RNG (deterministic boards)
    pub fn with_rng(config: &GameConfig, store: S, mut rng: StdRng) -> Self {
        let grid_size = config.board.default_size;
        let scores = HighScores::new(store);
        let best_ms = scores.load(grid_size);
        let board = Board::new(grid_size, &mut rng);
        info!(
            "Session ready: {} board, best {}",
            grid_size,
            format_best(best_ms)
        );
        Self {
            grid_size,
            state: GameState::Ready,
            current_target: 1,
            board,
            timer: GameTimer::new(config.tick_interval()),
            error_flash: config.error_flash(),
            preferences: Preferences::from(&config.display),
            scores,
            best_ms,
            last_completion: None,
            rng,
        }
    }

    /// Apply one event at time `now`
    pub fn dispatch(&mut self, event: Event, now: Instant) -> Transition {
        let transition = match event {
            Event::Start => self.start(),
            Event::CellClicked { value } => self.click(value, now),
            Event::GridSizeChanged(size) => self.change_size(size),
            Event::Tick => self.tick(now),
            Event::ColorSelected(color) => {
                self.preferences.click_color = color;
                Transition::PreferencesChanged
            }
            Event::ShowColorsSet(show) => {
                self.preferences.show_colors = show;
                Transition::PreferencesChanged
            }
            Event::DarkModeToggled => {
                self.preferences.dark_mode = !self.preferences.dark_mode;
                Transition::PreferencesChanged
            }
        };
        debug_assert!(self.invariants_hold(), "session invariants violated");
        transition
    }

    /// Replace board and counters; the timer is always canceled first
    fn reset_round(&mut self, state: GameState) {
        self.timer.reset();
        self.state = state;
        self.current_target = 1;
        self.board = Board::new(self.grid_size, &mut self.rng);
        self.best_ms = self.scores.load(self.grid_size);
        self.last_completion = None;
    }

    fn start(&mut self) -> Transition {
        self.reset_round(GameState::Playing);
        info!("Round started on {} board", self.grid_size);
        Transition::Started
    }

    fn change_size(&mut self, size: GridSize) -> Transition {
        self.grid_size = size;
        self.reset_round(GameState::Ready);
        info!(
            "Grid size changed to {}, best {}",
            size,
            format_best(self.best_ms)
        );
        Transition::Reset { grid_size: size }
    }

    fn click(&mut self, value: u32, now: Instant) -> Transition {
        if self.state != GameState::Playing {
            return Transition::Ignored;
        }
        let Some(index) = self.board.index_of(value) else {
            return Transition::Ignored;
        };
        if self.board.cells()[index].is_consumed() {
            return Transition::Ignored;
        }

        if value != self.current_target {
            debug!("Missed: clicked {} while looking for {}", value, self.current_target);
            self.board.flag(index, now + self.error_flash);
            return Transition::Missed { value };
        }

        // Study time before the first correct click is not scored
        if self.current_target == 1 {
            self.timer.start(now);
        }
        self.board.consume(index);
        self.current_target += 1;

        if self.current_target > self.max_number() {
            self.finish(now)
        } else {
            Transition::Advanced {
                target: self.current_target,
            }
        }
    }

    fn finish(&mut self, now: Instant) -> Transition {
        let elapsed_ms = as_millis(self.timer.stop(now).unwrap_or_default());
        self.state = GameState::Finished;

        let outcome = self.scores.save(self.grid_size, elapsed_ms);
        if outcome.is_new_best() {
            self.best_ms = Some(elapsed_ms);
        }
        let completion = Completion {
            grid_size: self.grid_size,
            elapsed_ms,
            outcome,
        };
        info!(
            "Finished {} in {} ({})",
            self.grid_size,
            format_time(elapsed_ms),
            if outcome.is_new_best() { "new best" } else { "no record" }
        );
        self.last_completion = Some(completion);
        Transition::Completed(completion)
    }

    fn tick(&mut self, now: Instant) -> Transition {
        let flags_cleared = self.board.expire_flags(now);
        let sampled = self.timer.sample(now);
        if sampled.is_none() && flags_cleared == 0 {
            return Transition::Ignored;
        }
        Transition::Ticked {
            elapsed_ms: self.elapsed_ms(),
            flags_cleared,
        }
    }

    fn invariants_hold(&self) -> bool {
        let max = self.max_number();
        self.current_target >= 1
            && self.current_target <= max + 1
            && ((self.state == GameState::Finished) == (self.current_target == max + 1))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn current_target(&self) -> u32 {
        self.current_target
    }

    pub fn max_number(&self) -> u32 {
        self.grid_size.max_number()
    }

    /// Last sampled elapsed time, or the final time once finished
    pub fn elapsed_ms(&self) -> u64 {
        as_millis(self.timer.displayed())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn best_ms(&self) -> Option<u64> {
        self.best_ms
    }

    pub fn last_completion(&self) -> Option<&Completion> {
        self.last_completion.as_ref()
    }

    pub fn scores(&self) -> &HighScores<S> {
        &self.scores
    }

    pub fn button_label(&self) -> &'static str {
        self.state.button_label()
    }

    pub fn target_display(&self) -> String {
        format_target(self.current_target, self.state == GameState::Finished)
    }

    pub fn timer_display(&self) -> String {
        format_time(self.elapsed_ms())
    }

    pub fn best_display(&self) -> String {
        format_best(self.best_ms)
    }

    /// Earliest moment a `Tick` would change something
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.timer.next_deadline(), self.board.next_flag_expiry()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score_store::MemoryStore;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session(size: usize) -> GameSession<MemoryStore> {
        let mut config = GameConfig::default();
        config.board.default_size = GridSize::new(size).unwrap();
        GameSession::with_rng(&config, MemoryStore::new(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_starts_ready_and_ignores_clicks() {
        let t0 = Instant::now();
        let mut game = session(3);
        assert_eq!(game.state(), GameState::Ready);
        assert_eq!(game.button_label(), "Start Game");
        assert_eq!(game.dispatch(Event::CellClicked { value: 1 }, t0), Transition::Ignored);
        assert_eq!(game.current_target(), 1);
        assert_eq!(game.best_display(), "--:--");
    }

    #[test]
    fn test_timer_starts_on_first_correct_click_not_on_start() {
        let t0 = Instant::now();
        let mut game = session(3);
        game.dispatch(Event::Start, t0);
        assert!(!game.timer().is_running());

        game.dispatch(Event::CellClicked { value: 2 }, t0 + ms(100));
        assert!(!game.timer().is_running());

        game.dispatch(Event::CellClicked { value: 1 }, t0 + ms(3000));
        assert_eq!(
            game.timer().handle().unwrap().started_at(),
            t0 + ms(3000)
        );
    }

    #[test]
    fn test_wrong_click_flags_then_clears() {
        let t0 = Instant::now();
        let mut game = session(3);
        game.dispatch(Event::Start, t0);
        assert_eq!(
            game.dispatch(Event::CellClicked { value: 5 }, t0),
            Transition::Missed { value: 5 }
        );
        assert_eq!(game.current_target(), 1);
        assert_eq!(game.next_deadline(), Some(t0 + ms(500)));

        assert_eq!(game.dispatch(Event::Tick, t0 + ms(499)), Transition::Ignored);
        assert_eq!(
            game.dispatch(Event::Tick, t0 + ms(500)),
            Transition::Ticked {
                elapsed_ms: 0,
                flags_cleared: 1
            }
        );
        assert_eq!(game.next_deadline(), None);
    }

    #[test]
    fn test_consumed_cell_cannot_advance_twice() {
        let t0 = Instant::now();
        let mut game = session(3);
        game.dispatch(Event::Start, t0);
        game.dispatch(Event::CellClicked { value: 1 }, t0);
        assert_eq!(game.dispatch(Event::CellClicked { value: 1 }, t0), Transition::Ignored);
        assert_eq!(game.current_target(), 2);
        assert_eq!(game.board().consumed_count(), 1);
    }

    #[test]
    fn test_unknown_value_is_ignored() {
        let t0 = Instant::now();
        let mut game = session(2);
        game.dispatch(Event::Start, t0);
        assert_eq!(game.dispatch(Event::CellClicked { value: 99 }, t0), Transition::Ignored);
    }

    #[test]
    fn test_ticks_update_elapsed() {
        let t0 = Instant::now();
        let mut game = session(3);
        game.dispatch(Event::Start, t0);
        game.dispatch(Event::CellClicked { value: 1 }, t0);
        game.dispatch(Event::Tick, t0 + ms(1250));
        assert_eq!(game.elapsed_ms(), 1250);
        assert_eq!(game.timer_display(), "00:01.25");
    }

    #[test]
    fn test_preference_events() {
        let t0 = Instant::now();
        let mut game = session(3);
        game.dispatch(Event::ColorSelected(PaletteColor::Pink), t0);
        game.dispatch(Event::ShowColorsSet(false), t0);
        game.dispatch(Event::DarkModeToggled, t0);
        let prefs = game.preferences();
        assert_eq!(prefs.click_color, PaletteColor::Pink);
        assert!(!prefs.show_colors);
        assert!(prefs.dark_mode);
        assert_eq!(game.state(), GameState::Ready);
    }

    #[test]
    fn test_start_while_playing_resets_round() {
        let t0 = Instant::now();
        let mut game = session(3);
        game.dispatch(Event::Start, t0);
        game.dispatch(Event::CellClicked { value: 1 }, t0);
        game.dispatch(Event::CellClicked { value: 2 }, t0 + ms(10));
        assert_eq!(game.button_label(), "Reset");

        assert_eq!(game.dispatch(Event::Start, t0 + ms(20)), Transition::Started);
        assert_eq!(game.current_target(), 1);
        assert_eq!(game.board().consumed_count(), 0);
        assert!(!game.timer().is_running());
        assert_eq!(game.elapsed_ms(), 0);
    }
}
