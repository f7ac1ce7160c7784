use folio_types::ui::ScrollLock;

use crate::{document::Document, location::Location};

/// Terminal size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Page-scoped shared state.
///
/// Owned by [`crate::Page`] and lent to the overlay controller and the
/// console for the duration of one event.
#[derive(Debug)]
pub struct PageContext {
    pub document: Document,
    pub location: Location,
    pub scroll: ScrollLock,
    pub viewport: Viewport,
}

impl PageContext {
    #[must_use]
    pub fn new(document: Document, location: Location) -> Self {
        Self {
            document,
            location,
            scroll: ScrollLock::new(),
            viewport: Viewport::default(),
        }
    }
}
