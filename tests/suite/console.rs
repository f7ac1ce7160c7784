//! Command console behavior through page events.

use folio_engine::{ClickTarget, LineKind, PageKey};

use crate::common::{builtin_page, click, nav, open_console, output_texts, press, run};

#[test]
fn sudo_easter_egg() {
    let mut page = builtin_page();
    open_console(&mut page);

    run(&mut page, "sudo make me a sandwich");
    run(&mut page, "sudo make me a coffee");

    let lines = page.console().output().lines();
    assert_eq!(lines[1].kind, LineKind::Error);
    assert_eq!(lines[1].text, "Make it yourself.");
    assert_eq!(lines[3].text, "Permission denied: you are not root.");
}

#[test]
fn clear_then_help_leaves_only_help_output() {
    let mut page = builtin_page();
    open_console(&mut page);
    run(&mut page, "about");
    run(&mut page, "projects");
    run(&mut page, "clear");
    run(&mut page, "help");

    let lines = output_texts(&page);
    assert_eq!(lines[0], "guest@folio:~$ help");
    assert_eq!(lines[1], "Available commands:");
    assert_eq!(lines.len(), 9);
}

#[test]
fn history_survives_clear_and_unknown_commands() {
    let mut page = builtin_page();
    open_console(&mut page);
    run(&mut page, "whoami");
    run(&mut page, "bogus");
    run(&mut page, "clear");

    let history: Vec<&str> = page.console().history().iter().collect();
    assert_eq!(history, vec!["whoami", "bogus", "clear"]);

    press(&mut page, PageKey::Up);
    press(&mut page, PageKey::Up);
    assert_eq!(page.console().input(), "bogus");
}

#[test]
fn unknown_command_uses_lowercased_name() {
    let mut page = builtin_page();
    open_console(&mut page);
    run(&mut page, "LAUNCH rockets");

    let last = page.console().output().lines().last().unwrap();
    assert_eq!(last.kind, LineKind::Error);
    assert_eq!(last.text, "Command not found: launch");
}

#[test]
fn exit_closes_console_but_leaves_overlays() {
    let mut page = builtin_page();
    nav(&mut page, "about");
    open_console(&mut page);
    run(&mut page, "exit");

    assert!(!page.console().is_open());
    assert_eq!(page.overlays().active_section(), Some("about"));
    assert!(page.is_scroll_locked());
}

#[test]
fn console_and_overlays_share_one_lock() {
    let mut page = builtin_page();
    open_console(&mut page);
    nav(&mut page, "projects");
    assert!(page.is_scroll_locked());

    click(&mut page, ClickTarget::ModalClose("projects-modal".into()));
    assert!(page.is_scroll_locked(), "console still holds the lock");

    click(&mut page, ClickTarget::ConsoleOutside);
    assert!(!page.is_scroll_locked());
}

#[test]
fn close_control_and_toggle() {
    let mut page = builtin_page();
    press(&mut page, PageKey::ToggleConsole);
    assert!(page.console().is_open());

    click(&mut page, ClickTarget::ConsoleClose);
    assert!(!page.console().is_open());

    press(&mut page, PageKey::ToggleConsole);
    press(&mut page, PageKey::ToggleConsole);
    assert!(!page.console().is_open());
    assert!(!page.is_scroll_locked());
}

#[test]
fn neofetch_reports_uptime_from_environment() {
    let mut page = builtin_page();
    open_console(&mut page);
    run(&mut page, "neofetch");

    assert!(
        output_texts(&page)
            .iter()
            .any(|line| line.ends_with("Uptime: 1m 35s"))
    );
}
