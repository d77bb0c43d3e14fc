//! Terminal falling-block runner (default binary).
//!
//! Reads keys with crossterm, advances the session by wall-clock time and
//! redraws only when the session reports a dirty region.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blocktris::core::{GameConfig, GameSession, GameSnapshot};
use blocktris::input::{handle_key_event, should_quit};
use blocktris::term::{restore_terminal, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blocktris::types::{FALLBACK_TICK_MS, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "blocktris", version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    /// TOML file with board size and speed settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Court width in cells (overrides the config file)
    #[arg(long)]
    width: Option<u8>,

    /// Court height in cells (overrides the config file)
    #[arg(long)]
    height: Option<u8>,

    /// Seed for the piece generator; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.clone());

    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    let session = GameSession::with_config(config, seed).context("invalid game configuration")?;
    info!(seed, ?config, "session created");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<PathBuf>) {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("blocktris.log"));

    #[cfg(unix)]
    let null_device = "/dev/null";
    #[cfg(windows)]
    let null_device = "NUL";

    let Ok(log_file) = File::create(&path).or_else(|_| File::create(null_device)) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

/// `RUST_LOG` when it is set and parses, `info` otherwise.
fn log_filter() -> EnvFilter {
    log_filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn log_filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Config file first, then command-line overrides, then validation.
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            GameConfig::from_toml_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn run(term: &mut TerminalRenderer, mut session: GameSession) -> Result<()> {
    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let tick = Duration::from_millis(TICK_MS as u64);
    let max_wait = Duration::from_millis(FALLBACK_TICK_MS as u64);
    let mut last = Instant::now();

    session.mark_all_dirty();

    loop {
        if session.take_dirty().any() {
            let (w, h) = crossterm::terminal::size().unwrap_or((fb.width(), fb.height()));
            session.snapshot_into(&mut snapshot);
            view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
            term.present(&mut fb)?;
        }

        let timeout = tick
            .checked_sub(last.elapsed())
            .unwrap_or(Duration::ZERO)
            .min(max_wait);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(score = session.score(), "quit requested");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        let accepted = session.handle(command);
                        debug!(command = command.as_str(), accepted, "key");
                    }
                }
                Event::Resize(w, h) => {
                    fb.resize(w, h);
                    term.invalidate();
                    session.mark_all_dirty();
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last);
        if elapsed >= tick {
            last = now;
            session.tick(elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::prelude::*;

    /// (debug enabled, info enabled) under `filter`
    fn levels_under(filter: EnvFilter) -> (bool, bool) {
        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, || {
            (
                tracing::enabled!(Level::DEBUG),
                tracing::enabled!(Level::INFO),
            )
        })
    }

    // Kept in one test: scoped subscribers must not overlap.
    #[test]
    fn log_filter_follows_rust_log() {
        assert_eq!(levels_under(log_filter_from(Some("debug"))), (true, true));
        assert_eq!(levels_under(log_filter_from(None)), (false, true));
        assert_eq!(levels_under(log_filter_from(Some(""))), (false, true));
        assert_eq!(levels_under(log_filter_from(Some("warn"))), (false, false));
    }
}
