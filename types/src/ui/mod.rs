//! UI state types shared by the engine and the TUI.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod history;
mod options;
mod scroll_lock;
mod scrollback;

pub use history::{CommandHistory, DEFAULT_HISTORY_LIMIT, NavOutcome};
pub use options::UiOptions;
pub use scroll_lock::{ScrollLease, ScrollLock};
pub use scrollback::{LineKind, OutputLine, Scrollback};
