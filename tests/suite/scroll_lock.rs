//! The shared scroll lock: held while any overlay or the console is open.

use folio_engine::{ClickTarget, PageKey};

use crate::common::{builtin_page, click, nav, open_console, press};

#[test]
fn lock_follows_last_holder() {
    let mut page = builtin_page();
    assert!(!page.is_scroll_locked());

    nav(&mut page, "projects");
    nav(&mut page, "about");
    open_console(&mut page);

    click(&mut page, ClickTarget::ConsoleClose);
    assert!(page.is_scroll_locked(), "overlays still open");

    click(&mut page, ClickTarget::ModalClose("projects-modal".into()));
    assert!(page.is_scroll_locked(), "section still open");

    click(&mut page, ClickTarget::SectionClose("about".into()));
    assert!(!page.is_scroll_locked());
}

#[test]
fn escape_from_console_releases_every_holder() {
    let mut page = builtin_page();
    nav(&mut page, "story");
    open_console(&mut page);
    assert!(page.is_scroll_locked());

    press(&mut page, PageKey::Escape);
    assert!(!page.console().is_open());
    assert!(!page.overlays().has_open_overlay());
    assert!(!page.is_scroll_locked());
}

#[test]
fn reopening_does_not_stack() {
    let mut page = builtin_page();
    for _ in 0..3 {
        nav(&mut page, "story");
        nav(&mut page, "donate");
    }
    click(&mut page, ClickTarget::SectionClose("donate".into()));
    assert!(!page.is_scroll_locked());
}

#[test]
fn closing_section_under_modal_keeps_lock() {
    let mut page = builtin_page();
    nav(&mut page, "projects");
    nav(&mut page, "contacts");

    click(&mut page, ClickTarget::SectionClose("contacts".into()));

    assert_eq!(page.overlays().active_modal(), Some("projects-modal"));
    assert!(page.is_scroll_locked());
}
