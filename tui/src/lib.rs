//! TUI rendering for Veneer.
//!
//! Pure rendering: every function takes `&App` and draws into the frame.
//! All state lives in the engine; nothing here mutates anything.

mod modal;
mod pages;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use veneer_engine::App;
use veneer_types::Page;

use crate::theme::colors;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let bg = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header / page tabs
            Constraint::Min(1),    // Active page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.page() {
        Page::Welcome => pages::draw_welcome(frame, chunks[1]),
        Page::Upload => pages::draw_upload(frame, app, chunks[1]),
        Page::Analyze => pages::draw_analyze(frame, app, chunks[1]),
        Page::Results => pages::draw_results(frame, app, chunks[1]),
    }
    draw_status_bar(frame, app, chunks[2]);

    if app.open_preview().is_some() {
        modal::draw_preview(frame, app);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " veneer ",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("· ", Style::default().fg(colors::TEXT_MUTED)),
    ];

    for page in [Page::Welcome, Page::Upload, Page::Analyze, Page::Results] {
        let style = if page == app.page() {
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::TEXT_MUTED)
        };
        spans.push(Span::styled(page.title(), style));
        spans.push(Span::raw("  "));
    }

    if let Some(session) = app.state().session() {
        spans.push(Span::styled(
            format!("session {session}"),
            Style::default().fg(colors::TEXT_DISABLED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.status() {
        Some(status) => Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(colors::WARNING),
        )),
        None => Line::from(Span::styled(
            pages::key_hints(app.page()),
            Style::default().fg(colors::TEXT_MUTED),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// A centered rect of the given percentage size, for modal overlays.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
