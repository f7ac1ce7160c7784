//! URL fragment round trips and session history.

use std::time::Duration;

use folio_config::PageSpec;
use folio_engine::{ClickTarget, PageEvent, PageKey};

use crate::common::{builtin_page, click, loaded_at, nav, page_from, press};

#[test]
fn opening_modal_writes_alias_that_reopens_it() {
    let mut page = builtin_page();
    nav(&mut page, "projects");
    let fragment = page.location().fragment().unwrap().to_owned();
    assert_eq!(fragment, "projects");

    press(&mut page, PageKey::Escape);
    page.handle(PageEvent::Navigate(format!("#{fragment}")));

    assert_eq!(page.overlays().active_modal(), Some("projects-modal"));
}

#[test]
fn nav_clicks_add_history_and_back_reopens_previous() {
    let mut page = builtin_page();
    nav(&mut page, "about");
    nav(&mut page, "story");
    assert_eq!(page.location().history_len(), 3);

    press(&mut page, PageKey::Back);

    assert_eq!(page.location().fragment(), Some("about"));
    assert_eq!(page.overlays().active_section(), Some("about"));

    press(&mut page, PageKey::Forward);
    assert_eq!(page.overlays().active_section(), Some("story"));
}

#[test]
fn closing_clears_fragment_in_place() {
    let mut page = builtin_page();
    nav(&mut page, "projects");
    let entries = page.location().history_len();

    click(&mut page, ClickTarget::ModalClose("projects-modal".into()));

    assert_eq!(page.location().fragment(), None);
    assert_eq!(page.location().history_len(), entries);
}

#[test]
fn initial_fragment_opens_section_after_delay() {
    let page = loaded_at("#story");
    assert_eq!(page.overlays().active_section(), Some("story"));
    assert!(page.is_scroll_locked());
}

#[test]
fn initial_fragment_is_not_applied_early() {
    let mut page = page_from(&PageSpec::builtin().unwrap(), Some("projects"));
    page.handle(PageEvent::Tick(Duration::from_millis(99)));
    assert!(!page.overlays().has_open_overlay());
    assert!(page.has_pending_fragment());
}

#[test]
fn raw_modal_id_in_fragment_is_ignored() {
    let page = loaded_at("projects-modal");
    assert!(!page.overlays().has_open_overlay());
}

#[test]
fn unknown_fragment_is_ignored() {
    let mut page = loaded_at("about");
    page.handle(PageEvent::Navigate("#no-such-thing".into()));

    assert_eq!(page.overlays().active_section(), Some("about"));
    assert_eq!(page.location().fragment(), Some("no-such-thing"));
}

#[test]
fn unaliased_modal_answers_to_its_id() {
    let spec = PageSpec::parse(
        r#"
        title = "x"
        [[modals]]
        id = "gallery"
        title = "Gallery"
        "#,
    )
    .unwrap();
    let mut page = page_from(&spec, None);

    page.handle(PageEvent::Navigate("gallery".into()));
    assert_eq!(page.overlays().active_modal(), Some("gallery"));
}
