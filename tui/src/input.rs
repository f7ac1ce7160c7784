//! Input handling for the folio TUI.
//!
//! A blocking reader thread feeds crossterm events into a bounded channel;
//! [`handle_events`] drains it once per frame and translates keys into
//! [`PageEvent`]s.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::trace;

use folio_engine::{ClickTarget, Page, PageEvent, PageKey};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a reader blocked on a full channel wakes up.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// What a terminal event means for the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Page(PageEvent),
    Quit,
    Ignore,
}

impl From<PageKey> for KeyAction {
    fn from(key: PageKey) -> Self {
        KeyAction::Page(PageEvent::Key(key))
    }
}

impl From<ClickTarget> for KeyAction {
    fn from(target: ClickTarget) -> Self {
        KeyAction::Page(PageEvent::Click(target))
    }
}

/// Translate one terminal event.
///
/// While the console is open every printable key is text. Otherwise single
/// keys stand in for clicks: digits press nav buttons, `x` closes the top
/// overlay, `b` clicks outside it.
#[must_use]
pub fn map_event(event: &Event, page: &Page) -> KeyAction {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(*key, page),
        Event::Resize(width, height) => KeyAction::Page(PageEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => KeyAction::Ignore,
    }
}

#[must_use]
pub fn map_key(key: KeyEvent, page: &Page) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Char('k' | 'K') if ctrl => return PageKey::ToggleConsole.into(),
        _ => {}
    }

    if page.console().is_open() {
        return match key.code {
            KeyCode::Esc => PageKey::Escape.into(),
            // Focus leaves the drawer: only the console closes.
            KeyCode::Tab => ClickTarget::ConsoleOutside.into(),
            KeyCode::Enter => PageKey::Enter.into(),
            KeyCode::Up => PageKey::Up.into(),
            KeyCode::Down => PageKey::Down.into(),
            KeyCode::PageUp => PageKey::PageUp.into(),
            KeyCode::PageDown => PageKey::PageDown.into(),
            KeyCode::Backspace => PageKey::Backspace.into(),
            KeyCode::Char(c) if !ctrl && !alt => PageKey::Char(c).into(),
            _ => KeyAction::Ignore,
        };
    }

    let overlays = page.overlays();
    match key.code {
        KeyCode::Esc => PageKey::Escape.into(),
        KeyCode::Left if alt => PageKey::Back.into(),
        KeyCode::Right if alt => PageKey::Forward.into(),
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            page.document()
                .nav()
                .get(index)
                .map_or(KeyAction::Ignore, |button| {
                    ClickTarget::NavButton(button.target.clone()).into()
                })
        }
        KeyCode::Char('x') => {
            if let Some(modal) = overlays.active_modal() {
                ClickTarget::ModalClose(modal.to_owned()).into()
            } else if let Some(section) = overlays.active_section() {
                ClickTarget::SectionClose(section.to_owned()).into()
            } else {
                KeyAction::Ignore
            }
        }
        KeyCode::Char('b') => match overlays.active_modal() {
            Some(modal) => ClickTarget::ModalOverlay(modal.to_owned()).into(),
            None if overlays.is_backdrop_visible() => ClickTarget::Backdrop.into(),
            None => KeyAction::Ignore,
        },
        _ => KeyAction::Ignore,
    }
}

/// Drain pending input into the page. Returns `true` when the user asked to quit.
pub fn handle_events(page: &mut Page, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        match map_event(&ev, page) {
            KeyAction::Page(event) => {
                trace!(?event, "Page event");
                page.handle(event);
            }
            KeyAction::Quit => return Ok(true),
            KeyAction::Ignore => {}
        }
        processed += 1;
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{Local, NaiveDate, TimeZone};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use folio_engine::{
        ClickTarget, Document, FixedEnvironment, Page, PageEvent, PageKey, PageOptions, PageSpec,
    };

    use super::{KeyAction, map_key};

    fn page() -> Page {
        let spec = PageSpec::builtin().unwrap();
        let document = Document::from_spec(&spec, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let env = FixedEnvironment::new(
            Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Duration::ZERO,
        );
        Page::new(document, PageOptions::default(), Box::new(env)).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_press_nav_buttons() {
        let page = page();
        assert_eq!(
            map_key(key(KeyCode::Char('1')), &page),
            ClickTarget::NavButton("about".into()).into()
        );
        assert_eq!(
            map_key(key(KeyCode::Char('2')), &page),
            ClickTarget::NavButton("projects".into()).into()
        );
        assert_eq!(map_key(key(KeyCode::Char('9')), &page), KeyAction::Ignore);
    }

    #[test]
    fn ctrl_k_toggles_console_in_any_state() {
        let mut page = page();
        let ctrl_k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_k, &page), PageKey::ToggleConsole.into());

        page.handle(PageEvent::Key(PageKey::ToggleConsole));
        assert_eq!(map_key(ctrl_k, &page), PageKey::ToggleConsole.into());
    }

    #[test]
    fn open_console_captures_text() {
        let mut page = page();
        page.handle(PageEvent::Key(PageKey::ToggleConsole));
        assert_eq!(map_key(key(KeyCode::Char('q')), &page), PageKey::Char('q').into());
        assert_eq!(map_key(key(KeyCode::Char('1')), &page), PageKey::Char('1').into());
        assert_eq!(map_key(key(KeyCode::Up), &page), PageKey::Up.into());
    }

    #[test]
    fn tab_leaves_open_console_only() {
        let mut page = page();
        assert_eq!(map_key(key(KeyCode::Tab), &page), KeyAction::Ignore);

        page.handle(PageEvent::Click(ClickTarget::NavButton("about".into())));
        page.handle(PageEvent::Key(PageKey::ToggleConsole));
        let action = map_key(key(KeyCode::Tab), &page);
        assert_eq!(action, ClickTarget::ConsoleOutside.into());

        let KeyAction::Page(event) = action else {
            panic!("expected a page event");
        };
        page.handle(event);
        assert!(!page.console().is_open());
        assert_eq!(page.overlays().active_section(), Some("about"));
    }

    #[test]
    fn x_closes_topmost_overlay() {
        let mut page = page();
        assert_eq!(map_key(key(KeyCode::Char('x')), &page), KeyAction::Ignore);

        page.handle(PageEvent::Click(ClickTarget::NavButton("projects".into())));
        assert_eq!(
            map_key(key(KeyCode::Char('x')), &page),
            ClickTarget::ModalClose("projects-modal".into()).into()
        );
    }

    #[test]
    fn b_clicks_backdrop_behind_section() {
        let mut page = page();
        page.handle(PageEvent::Click(ClickTarget::NavButton("story".into())));
        assert_eq!(
            map_key(key(KeyCode::Char('b')), &page),
            ClickTarget::Backdrop.into()
        );
    }

    #[test]
    fn alt_arrows_walk_history() {
        let page = page();
        let alt_left = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(map_key(alt_left, &page), PageKey::Back.into());
        assert_eq!(map_key(key(KeyCode::Left), &page), KeyAction::Ignore);
    }
}
