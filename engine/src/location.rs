//! URL fragment and session history.
//!
//! Mirrors the browser's `location.hash` plus the back/forward stack: assigning
//! a new fragment pushes an entry, replacing rewrites the current entry in
//! place.

/// Normalise a raw fragment: drop a leading `#`; empty means "no fragment".
#[must_use]
pub fn parse_fragment(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let value = trimmed.strip_prefix('#').unwrap_or(trimmed);
    (!value.is_empty()).then(|| value.to_owned())
}

#[derive(Debug, Clone)]
pub struct Location {
    entries: Vec<Option<String>>,
    index: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Location {
    #[must_use]
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            entries: vec![initial.and_then(parse_fragment)],
            index: 0,
        }
    }

    /// Current fragment, without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.entries[self.index].as_deref()
    }

    #[must_use]
    pub fn is(&self, fragment: &str) -> bool {
        self.fragment() == Some(fragment)
    }

    /// Navigate to a fragment, adding a history entry.
    ///
    /// Forward entries are discarded. Assigning the current fragment is a
    /// no-op. Returns whether the fragment changed.
    pub fn assign(&mut self, raw: &str) -> bool {
        let next = parse_fragment(raw);
        if next.as_deref() == self.fragment() {
            return false;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(next);
        self.index += 1;
        true
    }

    /// Rewrite the current entry without adding history.
    pub fn replace(&mut self, raw: Option<&str>) {
        self.entries[self.index] = raw.and_then(parse_fragment);
    }

    /// Drop the fragment from the current entry without adding history.
    pub fn clear(&mut self) {
        self.replace(None);
    }

    /// Step back one entry. Returns whether the fragment changed.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        let before = self.entries[self.index].clone();
        self.index -= 1;
        before != self.entries[self.index]
    }

    /// Step forward one entry. Returns whether the fragment changed.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        let before = self.entries[self.index].clone();
        self.index += 1;
        before != self.entries[self.index]
    }

    /// Number of session history entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }
}
