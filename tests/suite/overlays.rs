//! Overlay exclusivity and close paths, driven through page events.

use folio_engine::{ClickTarget, PageKey};

use crate::common::{builtin_page, click, nav, press};

#[test]
fn at_most_one_modal_and_one_section_after_any_sequence() {
    let mut page = builtin_page();
    let steps = [
        "about", "projects", "story", "story", "donate", "projects", "contacts", "about",
        "projects", "projects",
    ];

    for (i, target) in steps.iter().enumerate() {
        nav(&mut page, target);
        if i % 4 == 3 {
            press(&mut page, PageKey::Escape);
        }
        let overlays = page.overlays();
        assert!(overlays.active_sections().count() <= 1, "after {target}");
        assert_eq!(
            page.is_scroll_locked(),
            overlays.has_open_overlay(),
            "lock mirrors overlays after {target}"
        );
    }
}

#[test]
fn section_opened_over_modal_keeps_modal() {
    let mut page = builtin_page();
    nav(&mut page, "projects");
    nav(&mut page, "about");

    assert_eq!(page.overlays().active_modal(), Some("projects-modal"));
    assert_eq!(page.overlays().active_section(), Some("about"));

    nav(&mut page, "projects");
    assert_eq!(page.overlays().active_section(), None);
}

#[test]
fn escape_closes_everything() {
    let mut page = builtin_page();
    nav(&mut page, "projects");
    nav(&mut page, "story");

    press(&mut page, PageKey::Escape);

    assert!(!page.overlays().has_open_overlay());
    assert!(!page.overlays().is_backdrop_visible());
    assert!(!page.is_scroll_locked());
    assert_eq!(page.location().fragment(), None);
}

#[test]
fn backdrop_click_closes_everything() {
    let mut page = builtin_page();
    nav(&mut page, "donate");
    assert!(page.overlays().is_backdrop_visible());

    click(&mut page, ClickTarget::Backdrop);

    assert!(!page.overlays().has_open_overlay());
    assert!(!page.is_scroll_locked());
}

#[test]
fn modal_overlay_click_closes_only_that_modal() {
    let mut page = builtin_page();
    nav(&mut page, "projects");

    click(&mut page, ClickTarget::ModalOverlay("other".into()));
    assert_eq!(page.overlays().active_modal(), Some("projects-modal"));

    click(&mut page, ClickTarget::ModalOverlay("projects-modal".into()));
    assert_eq!(page.overlays().active_modal(), None);
    assert_eq!(page.location().fragment(), None);
    assert!(!page.is_scroll_locked());
}

#[test]
fn section_close_control_hides_backdrop() {
    let mut page = builtin_page();
    nav(&mut page, "contacts");

    click(&mut page, ClickTarget::SectionClose("contacts".into()));

    assert_eq!(page.overlays().active_section(), None);
    assert!(!page.overlays().is_backdrop_visible());
    assert!(!page.is_scroll_locked());
}

#[test]
fn unknown_nav_targets_do_nothing() {
    let mut page = builtin_page();
    nav(&mut page, "nowhere");
    nav(&mut page, "projects-modal");
    nav(&mut page, "footer");

    assert!(!page.overlays().has_open_overlay());
    assert_eq!(page.location().history_len(), 1);
}

#[test]
fn close_controls_for_inactive_overlays_are_ignored() {
    let mut page = builtin_page();
    nav(&mut page, "about");

    click(&mut page, ClickTarget::ModalClose("projects-modal".into()));
    click(&mut page, ClickTarget::SectionClose("story".into()));

    assert_eq!(page.overlays().active_section(), Some("about"));
    assert!(page.is_scroll_locked());
}
