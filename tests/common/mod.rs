//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use chrono::{Local, NaiveDate, TimeZone};
use folio_config::PageSpec;
use folio_engine::{
    ClickTarget, Document, FixedEnvironment, INITIAL_FRAGMENT_DELAY, Page, PageEvent, PageKey,
    PageOptions,
};

/// The day every fixture page is rendered on.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn fixed_env() -> FixedEnvironment {
    FixedEnvironment::new(
        Local.with_ymd_and_hms(2026, 10, 18, 21, 30, 0).unwrap(),
        Duration::from_secs(95),
    )
}

pub fn page_from(spec: &PageSpec, initial_fragment: Option<&str>) -> Page {
    let options = PageOptions {
        initial_fragment: initial_fragment.map(str::to_owned),
        ..PageOptions::default()
    };
    Page::new(
        Document::from_spec(spec, today()),
        options,
        Box::new(fixed_env()),
    )
    .unwrap()
}

/// The built-in landing page, opened without a fragment.
pub fn builtin_page() -> Page {
    page_from(&PageSpec::builtin().unwrap(), None)
}

/// The built-in page opened at `fragment`, after the initial delay has passed.
pub fn loaded_at(fragment: &str) -> Page {
    let mut page = page_from(&PageSpec::builtin().unwrap(), Some(fragment));
    page.handle(PageEvent::Tick(INITIAL_FRAGMENT_DELAY));
    page
}

pub fn click(page: &mut Page, target: ClickTarget) {
    page.handle(PageEvent::Click(target));
}

pub fn nav(page: &mut Page, target: &str) {
    click(page, ClickTarget::NavButton(target.to_owned()));
}

pub fn press(page: &mut Page, key: PageKey) {
    page.handle(PageEvent::Key(key));
}

/// Type `line` into the open console and press Enter.
pub fn run(page: &mut Page, line: &str) {
    for c in line.chars() {
        press(page, PageKey::Char(c));
    }
    press(page, PageKey::Enter);
}

pub fn open_console(page: &mut Page) {
    if !page.console().is_open() {
        press(page, PageKey::ToggleConsole);
    }
}

pub fn output_texts(page: &Page) -> Vec<String> {
    page.console()
        .output()
        .lines()
        .iter()
        .map(|line| line.text.clone())
        .collect()
}
