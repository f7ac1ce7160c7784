//! Core engine for folio: overlay coordination and the command console.
//!
//! This crate holds the page state machines without TUI dependencies. The
//! front end feeds [`PageEvent`]s into a [`Page`] and renders from its
//! accessors.

mod age;
mod console;
mod context;
mod document;
mod environment;
mod location;
mod overlay;
mod page;

pub use age::calculate_age;
pub use console::{
    CommandConsole, CommandContext, CommandHandler, CommandOutcome, CommandSpec, CommandTable,
    CommandTableError, ConsoleState, command_specs,
};
pub use context::{PageContext, Viewport};
pub use document::{Document, Element, ElementKind, NavButton};
pub use environment::{Environment, FixedEnvironment, SystemEnvironment, format_uptime};
pub use location::{Location, parse_fragment};
pub use overlay::OverlayController;
pub use page::{ClickTarget, INITIAL_FRAGMENT_DELAY, Page, PageEvent, PageKey, PageOptions};

pub use folio_config::{PageError, PageSpec};
pub use folio_types::ui::{LineKind, OutputLine, ScrollLock, Scrollback};
