//! Command history for console recall.
//!
//! Stores previously submitted console lines with Up/Down navigation support.

use crate::NonEmptyString;

/// Default number of entries kept before the oldest is evicted.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Result of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The cursor moved onto an entry; the input line should show it.
    Moved(String),
    /// The cursor stepped past the newest entry; the input line should be emptied.
    Cleared,
    /// Nothing to do: already at the oldest entry, or not navigating.
    AtBoundary,
}

/// Submitted console lines plus a browsing cursor.
///
/// Entries are stored oldest-first. The cursor counts from the newest entry:
/// `Some(0)` is the most recent line, `Some(len - 1)` the oldest. `None` means
/// the user is editing a fresh input line.
///
/// # Navigation Behavior
///
/// When the user presses Up:
/// 1. If not navigating, show the most recent entry
/// 2. If already navigating, show the next older entry, stopping at the oldest
///
/// When the user presses Down:
/// 1. If at the newest entry, leave history and clear the input line
/// 2. Otherwise, show the next newer entry
///
/// Navigation is reset after submitting a line.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl CommandHistory {
    /// A limit of zero is treated as one.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            limit: limit.max(1),
        }
    }

    /// Append a submitted line.
    ///
    /// Every submission is recorded, including repeats. The buffer is capped
    /// at the configured limit by evicting the oldest entry.
    pub fn push(&mut self, line: NonEmptyString) {
        self.entries.push(line.into_inner());
        if self.entries.len() > self.limit {
            self.entries.remove(0);
        }
    }

    /// Navigate to the previous (older) entry.
    pub fn navigate_up(&mut self) -> NavOutcome {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        match self.entry_from_newest(next) {
            Some(entry) => {
                let entry = entry.to_owned();
                self.cursor = Some(next);
                NavOutcome::Moved(entry)
            }
            None => NavOutcome::AtBoundary,
        }
    }

    /// Navigate to the next (newer) entry.
    pub fn navigate_down(&mut self) -> NavOutcome {
        match self.cursor {
            None => NavOutcome::AtBoundary,
            Some(0) => {
                self.cursor = None;
                NavOutcome::Cleared
            }
            Some(cursor) => {
                let next = cursor - 1;
                self.cursor = Some(next);
                self.entry_from_newest(next)
                    .map_or(NavOutcome::Cleared, |entry| NavOutcome::Moved(entry.to_owned()))
            }
        }
    }

    /// Leave history browsing. Call after every submission.
    pub fn reset_navigation(&mut self) {
        self.cursor = None;
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    fn entry_from_newest(&self, offset: usize) -> Option<&str> {
        let index = self.entries.len().checked_sub(offset + 1)?;
        self.entries.get(index).map(String::as_str)
    }
}
