//! Composition root for one loaded page.
//!
//! [`Page`] owns the shared [`PageContext`], the overlay controller and the
//! console, and routes every user event to the right one. It is the only
//! type the front end talks to.

use std::time::Duration;

use folio_config::DEFAULT_PROMPT;
use folio_types::ui::DEFAULT_HISTORY_LIMIT;
use tracing::{debug, info};

use crate::{
    console::{CommandConsole, CommandTableError},
    context::{PageContext, Viewport},
    document::Document,
    environment::Environment,
    location::Location,
    overlay::OverlayController,
};

/// How long after load the initial fragment is honoured.
pub const INITIAL_FRAGMENT_DELAY: Duration = Duration::from_millis(100);

/// Console lines moved per page-scroll key.
const CONSOLE_PAGE_LINES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// A navigation trigger carrying its target's public id.
    NavButton(String),
    /// The dimmed area around modal `id`.
    ModalOverlay(String),
    ModalClose(String),
    SectionClose(String),
    Backdrop,
    ConsoleClose,
    /// Anywhere outside the console while it is open.
    ConsoleOutside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Escape,
    ToggleConsole,
    Enter,
    Up,
    Down,
    PageUp,
    PageDown,
    Char(char),
    Backspace,
    Back,
    Forward,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Click(ClickTarget),
    Key(PageKey),
    /// The address bar changed to this fragment from outside the page.
    Navigate(String),
    Resize { width: u16, height: u16 },
    /// Time elapsed since the previous tick.
    Tick(Duration),
}

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub prompt: String,
    pub history_limit: usize,
    /// Fragment the page was opened with.
    pub initial_fragment: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            initial_fragment: None,
        }
    }
}

pub struct Page {
    ctx: PageContext,
    overlays: OverlayController,
    console: CommandConsole,
    env: Box<dyn Environment>,
    /// Time left before the initial fragment is applied.
    pending_fragment: Option<Duration>,
}

impl Page {
    pub fn new(
        document: Document,
        options: PageOptions,
        env: Box<dyn Environment>,
    ) -> Result<Self, CommandTableError> {
        let console = CommandConsole::new(options.prompt, options.history_limit)?;
        let location = Location::new(options.initial_fragment.as_deref());
        let pending_fragment = location.fragment().map(|_| INITIAL_FRAGMENT_DELAY);
        info!(
            title = document.title(),
            fragment = ?location.fragment(),
            "Page loaded"
        );
        Ok(Self {
            ctx: PageContext::new(document, location),
            overlays: OverlayController::new(),
            console,
            env,
            pending_fragment,
        })
    }

    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::Click(target) => self.handle_click(target),
            PageEvent::Key(key) => self.handle_key(key),
            PageEvent::Navigate(raw) => {
                if self.ctx.location.assign(&raw) {
                    self.overlays.handle_fragment_change(&mut self.ctx);
                }
            }
            PageEvent::Resize { width, height } => {
                self.ctx.viewport = Viewport { width, height };
            }
            PageEvent::Tick(elapsed) => self.tick(elapsed),
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        let Some(remaining) = self.pending_fragment else {
            return;
        };
        match remaining.checked_sub(elapsed) {
            Some(left) if !left.is_zero() => self.pending_fragment = Some(left),
            _ => {
                self.pending_fragment = None;
                debug!(fragment = ?self.ctx.location.fragment(), "Applying initial fragment");
                self.overlays.handle_fragment_change(&mut self.ctx);
            }
        }
    }

    fn handle_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::NavButton(public_id) => {
                let Some(element) = self.ctx.document.for_fragment(&public_id) else {
                    return;
                };
                let id = element.id.clone();
                if element.is_modal() {
                    self.overlays.open_modal(&mut self.ctx, &id);
                } else {
                    self.overlays.open_section(&mut self.ctx, &id);
                }
            }
            ClickTarget::ModalOverlay(id) | ClickTarget::ModalClose(id) => {
                self.overlays.close_modal(&mut self.ctx, &id);
            }
            ClickTarget::SectionClose(id) => {
                self.overlays.close_section(&mut self.ctx, &id, true);
            }
            ClickTarget::Backdrop => self.overlays.close_all(&mut self.ctx),
            ClickTarget::ConsoleClose | ClickTarget::ConsoleOutside => self.console.close(),
        }
    }

    fn handle_key(&mut self, key: PageKey) {
        if key == PageKey::ToggleConsole {
            self.console.toggle(&self.ctx.scroll);
            return;
        }

        if self.console.is_open() {
            match key {
                PageKey::Escape => {
                    self.console.close();
                    self.overlays.close_all(&mut self.ctx);
                }
                PageKey::Enter => {
                    self.console
                        .submit(self.env.as_ref(), self.ctx.viewport);
                }
                PageKey::Up => self.console.history_up(),
                PageKey::Down => self.console.history_down(),
                PageKey::PageUp => self.console.scroll_up(CONSOLE_PAGE_LINES),
                PageKey::PageDown => self.console.scroll_down(CONSOLE_PAGE_LINES),
                PageKey::Char(c) => self.console.insert_char(c),
                PageKey::Backspace => self.console.backspace(),
                PageKey::ToggleConsole | PageKey::Back | PageKey::Forward => {}
            }
            return;
        }

        match key {
            PageKey::Escape => self.overlays.close_all(&mut self.ctx),
            PageKey::Back => {
                if self.ctx.location.back() {
                    self.overlays.handle_fragment_change(&mut self.ctx);
                }
            }
            PageKey::Forward => {
                if self.ctx.location.forward() {
                    self.overlays.handle_fragment_change(&mut self.ctx);
                }
            }
            _ => {}
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.ctx.document
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.ctx.location
    }

    #[must_use]
    pub fn overlays(&self) -> &OverlayController {
        &self.overlays
    }

    #[must_use]
    pub fn console(&self) -> &CommandConsole {
        &self.console
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.ctx.scroll.is_locked()
    }

    /// Whether the initial fragment is still waiting to be applied.
    #[must_use]
    pub fn has_pending_fragment(&self) -> bool {
        self.pending_fragment.is_some()
    }
}
