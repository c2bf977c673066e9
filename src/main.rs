use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::prelude::*;
use schulte::app::App;
use schulte::{ui, FileStore, GameConfig, GameError, GridSize, KeyValueStore, MemoryStore};
use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

const USAGE: &str = "\
Usage: schulte [OPTIONS]

Options:
  --config <path>   Load settings from a JSON config file
  --scores <path>   Keep best times in this JSON file
  --size <n>        Start on an n x n board
  --ephemeral       Keep best times in memory only
  -h, --help        Show this help

Environment:
  SCHULTE_GRID_SIZE, SCHULTE_SCORE_FILE, SCHULTE_DARK_MODE,
  SCHULTE_SHOW_COLORS, SCHULTE_CLICK_COLOR, SCHULTE_LOG_FILE, RUST_LOG";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<String>,
    scores: Option<String>,
    size: Option<usize>,
    ephemeral: bool,
    help: bool,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                parsed.config = Some(args.next().ok_or("--config needs a path")?);
            }
            "--scores" => {
                parsed.scores = Some(args.next().ok_or("--scores needs a path")?);
            }
            "--size" => {
                let value = args.next().ok_or("--size needs a number")?;
                let size = value
                    .parse::<usize>()
                    .map_err(|_| format!("--size expects a number, got '{}'", value))?;
                parsed.size = Some(size);
            }
            "--ephemeral" => parsed.ephemeral = true,
            "-h" | "--help" => parsed.help = true,
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(parsed)
}

/// File (if given), then environment, then command line
fn build_config(args: &CliArgs) -> Result<GameConfig, GameError> {
    let mut config = match &args.config {
        Some(path) => {
            GameConfig::load_from_file(path)?.with_env_overrides(|key| std::env::var(key).ok())
        }
        None => GameConfig::from_env(),
    };
    if let Some(path) = &args.scores {
        config.storage.score_file = path.clone();
    }
    if let Some(size) = args.size {
        config.board.default_size = GridSize::new(size)?;
    }
    if args.ephemeral {
        config.storage.ephemeral = true;
    }
    config.validate()?;
    Ok(config)
}

/// Where log records end up while the TUI owns the terminal
enum LogSink {
    File(std::fs::File),
    Silent,
}

fn open_log_sink(config: &GameConfig) -> LogSink {
    let Some(path) = &config.storage.log_file else {
        return LogSink::Silent;
    };
    match std::fs::File::create(path) {
        Ok(file) => LogSink::File(file),
        Err(e) => {
            // Still on the normal screen here
            eprintln!("cannot open log file {}: {}", path, e);
            LogSink::Silent
        }
    }
}

fn init_logging(config: &GameConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match open_log_sink(config) {
        LogSink::File(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogSink::Silent => {
            // Nothing may reach stderr under the alternate screen
            builder.target(env_logger::Target::Pipe(Box::new(io::sink())));
        }
    }
    builder.init();
}

/// Runs the wrapped closure when dropped
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}

/// Best-effort undo of raw mode, alternate screen and mouse capture
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!("⚠️ Could not leave raw mode: {}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show) {
        warn!("⚠️ Could not restore the screen: {}", e);
    }
}

fn run<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    shutdown: &AtomicBool,
) -> io::Result<()> {
    loop {
        let mut cell_areas = Vec::new();
        terminal.draw(|f| {
            cell_areas = ui::render(f, app);
        })?;
        app.set_cell_areas(cell_areas);

        if app.should_quit() || shutdown.load(Ordering::SeqCst) {
            break;
        }

        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            let input = event::read()?;
            app.handle_event(input, Instant::now());
        }
        app.on_tick(Instant::now());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = build_config(&args)?;
    init_logging(&config);

    let store: Box<dyn KeyValueStore> = if config.storage.ephemeral {
        info!("Using in-memory score store");
        Box::new(MemoryStore::new())
    } else {
        info!("Using score file {}", config.storage.score_file);
        Box::new(FileStore::open(&config.storage.score_file))
    };
    let mut app = App::new(&config, store);

    // SIGINT from outside the terminal (raw mode turns Ctrl-C into a key press)
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst)) {
            warn!("⚠️ Could not install signal handler: {}", e);
        }
    }

    // Setup terminal; any early return from here on restores it
    enable_raw_mode().map_err(|e| GameError::TerminalError(e.to_string()))?;
    let restore = OnDrop(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| GameError::TerminalError(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &shutdown);
    drop(terminal);
    drop(restore);

    result?;
    if let Some(completion) = app.game().last_completion() {
        info!(
            "Last round: {} in {} ms",
            completion.grid_size, completion.elapsed_ms
        );
    }
    Ok(())
}
