//! The command console: a toggleable prompt with scrollback and recall.
//!
//! Open and Closed are the only states. Opening takes a lease on the shared
//! scroll lock; closing drops it.

mod commands;

pub use commands::{
    CommandContext, CommandHandler, CommandOutcome, CommandSpec, CommandTable, CommandTableError,
    command_specs,
};

use folio_types::{
    NonEmptyString,
    ui::{CommandHistory, LineKind, NavOutcome, ScrollLease, ScrollLock, Scrollback},
};
use tracing::{debug, info};
use unicode_segmentation::UnicodeSegmentation;

use crate::{context::Viewport, environment::Environment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug)]
pub struct CommandConsole {
    state: ConsoleState,
    input: String,
    output: Scrollback,
    history: CommandHistory,
    prompt: String,
    table: CommandTable,
    lease: Option<ScrollLease>,
}

impl CommandConsole {
    pub fn new(prompt: impl Into<String>, history_limit: usize) -> Result<Self, CommandTableError> {
        Ok(Self {
            state: ConsoleState::Closed,
            input: String::new(),
            output: Scrollback::default(),
            history: CommandHistory::with_limit(history_limit),
            prompt: prompt.into(),
            table: CommandTable::builtin()?,
            lease: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> ConsoleState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == ConsoleState::Open
    }

    pub fn open(&mut self, scroll: &ScrollLock) {
        if self.is_open() {
            return;
        }
        self.state = ConsoleState::Open;
        self.lease = Some(scroll.acquire());
        debug!("Console opened");
    }

    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.state = ConsoleState::Closed;
        self.lease = None;
        debug!("Console closed");
    }

    pub fn toggle(&mut self, scroll: &ScrollLock) {
        if self.is_open() {
            self.close();
        } else {
            self.open(scroll);
        }
    }

    /// Run the input line.
    ///
    /// Blank input is ignored. Otherwise the line is recorded, echoed behind
    /// the prompt, and dispatched on its lower-cased first word.
    pub fn submit(&mut self, env: &dyn Environment, viewport: Viewport) {
        let raw = std::mem::take(&mut self.input);
        let Ok(line) = NonEmptyString::new(raw) else {
            return;
        };

        self.history.push(line.clone());
        self.history.reset_navigation();
        self.output
            .push(LineKind::Command, format!("{} {}", self.prompt, line));

        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = tokens.collect();

        let outcome = match self.table.get(&name) {
            Some(spec) => {
                info!(command = spec.name, "Console command");
                let mut ctx = CommandContext {
                    args: &args,
                    output: &mut self.output,
                    env,
                    viewport,
                };
                (spec.handler)(&mut ctx)
            }
            None => {
                debug!(command = %name, "Unknown console command");
                self.output.error(format!("Command not found: {name}"));
                CommandOutcome::Continue
            }
        };

        self.output.scroll_to_end();
        if outcome == CommandOutcome::CloseConsole {
            self.close();
        }
    }

    pub fn history_up(&mut self) {
        let outcome = self.history.navigate_up();
        self.apply_nav(outcome);
    }

    pub fn history_down(&mut self) {
        let outcome = self.history.navigate_down();
        self.apply_nav(outcome);
    }

    fn apply_nav(&mut self, outcome: NavOutcome) {
        match outcome {
            NavOutcome::Moved(entry) => self.input = entry,
            NavOutcome::Cleared => self.input.clear(),
            NavOutcome::AtBoundary => {}
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    /// Remove the last grapheme.
    pub fn backspace(&mut self) {
        if let Some((index, _)) = self.input.grapheme_indices(true).next_back() {
            self.input.truncate(index);
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.output.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.output.scroll_down(lines);
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn output(&self) -> &Scrollback {
        &self.output
    }

    #[must_use]
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}
