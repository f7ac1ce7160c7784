//! Console scrollback buffer.

/// Visual role of a scrollback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Echo of a submitted line, prompt included.
    Command,
    /// Regular command output.
    Output,
    /// Error-styled output (unknown command, denied sudo).
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: LineKind,
    pub text: String,
}

impl OutputLine {
    #[must_use]
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Upper bound on retained lines; older lines fall off the top.
const MAX_SCROLLBACK_LINES: usize = 1000;

/// Accumulated console output plus the view position.
///
/// `offset` counts lines scrolled up from the end; zero means the view
/// follows the newest line.
#[derive(Debug, Clone, Default)]
pub struct Scrollback {
    lines: Vec<OutputLine>,
    offset: usize,
}

impl Scrollback {
    pub fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(OutputLine::new(kind, text));
        if self.lines.len() > MAX_SCROLLBACK_LINES {
            let excess = self.lines.len() - MAX_SCROLLBACK_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn output(&mut self, text: impl Into<String>) {
        self.push(LineKind::Output, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(LineKind::Error, text);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.offset = 0;
    }

    pub fn scroll_to_end(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.lines.len().saturating_sub(1);
        self.offset = self.offset.saturating_add(lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The window of at most `height` lines ending `offset` lines above the newest.
    #[must_use]
    pub fn visible(&self, height: usize) -> &[OutputLine] {
        let end = self.lines.len().saturating_sub(self.offset);
        let start = end.saturating_sub(height);
        &self.lines[start..end]
    }
}
