//! folio CLI - binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`folio_engine`] (page state) and [`folio_tui`] (rendering),
//! providing RAII-based terminal management with guaranteed cleanup.
//!
//! ```text
//! main() -> load config + page -> TerminalSession::new() -> run_page() -> Page + TUI
//! ```
//!
//! # Event Loop
//!
//! A fixed 8ms render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`folio_tui::InputPump`])
//! 3. Advance page timers (`PageEvent::Tick`)
//! 4. Render frame
//!
//! The first argument, if any, is the fragment the page opens with
//! (`folio '#projects'` or `folio https://lyubchak.com/#story`).

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    env,
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use folio_config::{FolioConfig, PageSpec};
use folio_engine::{Document, Page, PageEvent, PageOptions, SystemEnvironment};
use folio_tui::{InputPump, draw, handle_events};
use folio_types::ui::{DEFAULT_HISTORY_LIMIT, UiOptions};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_folio_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than write over the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_folio_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in folio_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn folio_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.folio/logs/folio.log
    if let Some(config_path) = FolioConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("folio.log"));
    }

    // Fallback: ./.folio/logs/folio.log
    candidates.push(PathBuf::from(".folio").join("logs").join("folio.log"));

    candidates
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode and the alternate screen are restored on drop, so the terminal
/// stays usable after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn ui_options(config: Option<&FolioConfig>) -> UiOptions {
    config
        .and_then(|cfg| cfg.app.as_ref())
        .map_or_else(UiOptions::default, |app| UiOptions {
            ascii_only: app.ascii_only,
            high_contrast: app.high_contrast,
        })
}

fn load_page_spec(config: Option<&FolioConfig>) -> Result<PageSpec> {
    match config.and_then(FolioConfig::page_override) {
        Some(path) => PageSpec::load(&path)
            .with_context(|| format!("failed to load page markup from {}", path.display())),
        None => PageSpec::builtin().context("built-in page markup is invalid"),
    }
}

/// Accepts a bare fragment (`projects`, `#projects`) or a full URL.
fn initial_fragment(arg: &str) -> String {
    arg.rsplit_once('#')
        .map_or(arg, |(_, fragment)| fragment)
        .to_owned()
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match FolioConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "Ignoring config: {err}");
            None
        }
    };

    let spec = load_page_spec(config.as_ref())?;
    let document = Document::from_spec(&spec, chrono::Local::now().date_naive());
    let options = PageOptions {
        prompt: config
            .as_ref()
            .map_or(folio_config::DEFAULT_PROMPT, FolioConfig::prompt)
            .to_owned(),
        history_limit: config
            .as_ref()
            .and_then(FolioConfig::history_limit)
            .unwrap_or(DEFAULT_HISTORY_LIMIT),
        initial_fragment: env::args().nth(1).map(|arg| initial_fragment(&arg)),
    };
    let mut page = Page::new(document, options, Box::new(SystemEnvironment::new()))?;
    let ui = ui_options(config.as_ref());

    let result = {
        let mut session = TerminalSession::new()?;
        run_page(&mut session.terminal, &mut page, ui).await
    };

    if let Err(err) = &result {
        tracing::error!("Exiting with error: {err:?}");
    }
    result
}

const FRAME_DURATION: Duration = Duration::from_millis(8);

async fn run_page<B>(terminal: &mut Terminal<B>, page: &mut Page, ui: UiOptions) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let size = terminal.size()?;
    page.handle(PageEvent::Resize {
        width: size.width,
        height: size.height,
    });

    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last_tick = Instant::now();

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(page, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        let now = Instant::now();
        page.handle(PageEvent::Tick(now.duration_since(last_tick)));
        last_tick = now;

        if let Err(e) = terminal.draw(|frame| draw(frame, page, ui)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
