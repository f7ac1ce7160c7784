//! TUI rendering for folio using ratatui.

mod input;
mod theme;

pub use input::{InputPump, KeyAction, handle_events, map_event, map_key};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use folio_engine::{Element, LineKind, Page};
use folio_types::ui::UiOptions;

/// Main draw function
pub fn draw(frame: &mut Frame, page: &Page, options: UiOptions) {
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title + tagline
            Constraint::Length(1), // Nav
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, page, chunks[0], &palette);
    draw_nav(frame, page, chunks[1], &palette, &glyphs);
    draw_body(frame, page, chunks[2], &palette, &glyphs);

    if page.overlays().is_backdrop_visible() {
        let dimmed = Rect {
            height: chunks[2].bottom().saturating_sub(chunks[0].y),
            ..chunks[0]
        };
        frame.buffer_mut().set_style(dimmed, styles::dimmed(&palette));
    }

    if let Some(section) = page
        .overlays()
        .active_section()
        .and_then(|id| page.document().section(id))
    {
        draw_section_panel(frame, section, chunks[2], &palette, &glyphs);
    }

    if let Some(modal) = page
        .overlays()
        .active_modal()
        .and_then(|id| page.document().modal(id))
    {
        draw_modal(frame, modal, &palette, &glyphs);
    }

    if page.console().is_open() {
        draw_console(frame, page, chunks[3].y, &palette, &glyphs);
    }

    draw_status_bar(frame, page, chunks[3], &palette, &glyphs);
}

fn draw_header(frame: &mut Frame, page: &Page, area: Rect, palette: &Palette) {
    let document = page.document();
    let mut lines = vec![Line::from(Span::styled(
        document.title().to_owned(),
        styles::title(palette),
    ))];
    if let Some(tagline) = document.tagline() {
        lines.push(Line::from(Span::styled(
            tagline.to_owned(),
            Style::default()
                .fg(palette.text_muted)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_nav(frame: &mut Frame, page: &Page, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let overlays = page.overlays();
    let mut spans = Vec::new();
    for (index, button) in page.document().nav().iter().enumerate() {
        let active = page.document().for_fragment(&button.target).is_some_and(|element| {
            overlays.is_modal_active(&element.id) || overlays.is_section_active(&element.id)
        });
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let label = if active {
            format!(" {} {} ", glyphs.nav_open, button.label)
        } else {
            format!(" {} {} ", index + 1, button.label)
        };
        let style = if active {
            styles::nav_active(palette)
        } else {
            styles::nav_idle(palette)
        };
        spans.push(Span::styled(label, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_body(frame: &mut Frame, page: &Page, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let document = page.document();
    let text_style = Style::default().fg(palette.text_primary);
    let mut lines: Vec<Line> = Vec::new();

    for block in document.blocks() {
        lines.push(Line::from(Span::styled(block.clone(), text_style)));
        lines.push(Line::from(""));
    }
    for section in document.static_sections() {
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default()
                .fg(palette.text_secondary)
                .add_modifier(Modifier::BOLD),
        )));
        for line in &section.body {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", glyphs.bullet), Style::default().fg(palette.text_muted)),
                Span::styled(line.clone(), Style::default().fg(palette.text_muted)),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn overlay_block<'a>(title: &'a str, palette: &Palette, glyphs: &Glyphs) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(1))
        .title(Line::from(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )))
        .title_bottom(Line::from(vec![
            Span::styled(" x ", styles::key_highlight(palette)),
            Span::styled(format!("{} close ", glyphs.close), styles::key_hint(palette)),
        ]))
}

fn element_lines(element: &Element, palette: &Palette) -> Vec<Line<'static>> {
    element
        .body
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(palette.text_primary),
            ))
        })
        .collect()
}

fn draw_section_panel(
    frame: &mut Frame,
    section: &Element,
    body: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let width = (body.width * 3 / 5).max(20).min(body.width);
    let area = Rect {
        x: body.right().saturating_sub(width),
        width,
        ..body
    };
    frame.render_widget(Clear, area);
    let panel = Paragraph::new(element_lines(section, palette))
        .wrap(Wrap { trim: false })
        .block(overlay_block(&section.title, palette, glyphs));
    frame.render_widget(panel, area);
}

fn draw_modal(frame: &mut Frame, modal: &Element, palette: &Palette, glyphs: &Glyphs) {
    let area = centered_rect(frame.area(), 70, 60);
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(element_lines(modal, palette))
        .wrap(Wrap { trim: false })
        .block(overlay_block(&modal.title, palette, glyphs).style(Style::default().bg(palette.bg_popup)));
    frame.render_widget(popup, area);
}

/// Bottom drawer ending just above row `bottom`.
fn draw_console(frame: &mut Frame, page: &Page, bottom: u16, palette: &Palette, glyphs: &Glyphs) {
    let screen = frame.area();
    let height = (screen.height * 2 / 5).max(6).min(bottom.saturating_sub(screen.y));
    let area = Rect {
        x: screen.x,
        y: bottom.saturating_sub(height),
        width: screen.width,
        height,
    };
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_dark))
        .title(Line::from(vec![
            Span::styled(" Terminal ", styles::title(palette)),
            Span::styled("Tab", styles::key_highlight(palette)),
            Span::styled(" hide ", styles::key_hint(palette)),
        ]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let console = page.console();
    let output_height = usize::from(inner.height.saturating_sub(1));
    let mut lines: Vec<Line> = console
        .output()
        .visible(output_height)
        .iter()
        .map(|line| {
            let style = match line.kind {
                LineKind::Command => Style::default().fg(palette.text_secondary),
                LineKind::Output => Style::default().fg(palette.text_primary),
                LineKind::Error => styles::error_line(palette),
            };
            Line::from(Span::styled(line.text.clone(), style))
        })
        .collect();
    if console.output().offset() > 0 && !lines.is_empty() {
        lines[0] = Line::from(Span::styled(
            format!("{} {} more", glyphs.arrow_up, console.output().offset()),
            styles::key_hint(palette),
        ));
    }
    while lines.len() < output_height {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", console.prompt()), styles::prompt(palette)),
        Span::styled(console.input().to_owned(), Style::default().fg(palette.text_primary)),
        Span::styled(glyphs.cursor, Style::default().fg(palette.accent)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);

    let cursor_x = inner.x
        + u16::try_from(console.prompt().width() + 1 + console.input().width()).unwrap_or(u16::MAX);
    frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.bottom().saturating_sub(1)));
}

fn draw_status_bar(frame: &mut Frame, page: &Page, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let fragment = page
        .location()
        .fragment()
        .map_or_else(|| "-".to_owned(), |fragment| format!("{}{fragment}", glyphs.fragment));
    let lock = if page.is_scroll_locked() {
        glyphs.locked
    } else {
        glyphs.unlocked
    };

    let mut spans = vec![
        Span::styled(format!(" {fragment} "), Style::default().fg(palette.accent)),
        Span::styled(format!(" {lock} "), Style::default().fg(palette.warning)),
        Span::raw("  "),
    ];
    let hints: &[(&str, &str)] = if page.console().is_open() {
        &[
            ("Enter", "run"),
            ("Up/Down", "history"),
            ("Tab", "hide"),
            ("Esc", "close all"),
        ]
    } else {
        &[
            ("1-9", "open"),
            ("x", "close"),
            ("Esc", "close all"),
            ("Ctrl+K", "terminal"),
            ("q", "quit"),
        ]
    };
    for (key, label) in hints {
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {label}  "), styles::key_hint(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (area.width * percent_x / 100).max(10).min(area.width);
    let height = (area.height * percent_y / 100).max(5).min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width) / 2),
        y: area.y + (area.height.saturating_sub(height) / 2),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::centered_rect;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 12, 6);
        let rect = centered_rect(area, 70, 60);
        assert!(rect.right() <= area.right());
        assert!(rect.bottom() <= area.bottom());
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 5);
    }
}
