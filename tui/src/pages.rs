//! Rendering for the four application pages.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use veneer_engine::App;
use veneer_types::{Model, Page, Severity};

use crate::theme::{colors, model_color, severity_color};

/// Bottom-bar key hints for the active page.
pub(crate) fn key_hints(page: Page) -> &'static str {
    match page {
        Page::Welcome => " n new analysis · q quit",
        Page::Upload => " j/k move · space select · u upload · esc back · q quit",
        Page::Analyze => " 1-4 toggle models · a analyze · esc back · q quit",
        Page::Results => " j/k move · enter preview · n new analysis · q quit",
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::TEXT_MUTED))
        .style(Style::default().bg(colors::BG_PANEL))
        .padding(Padding::horizontal(1))
}

fn human_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let current = text.width();
    let mut padded = text.to_string();
    for _ in current..width {
        padded.push(' ');
    }
    padded
}

pub(crate) fn draw_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "V E N E E R",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Aesthetic analysis for your interface code",
            Style::default().fg(colors::TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Upload source files, run them through AI models,",
            Style::default().fg(colors::TEXT_MUTED),
        )),
        Line::from(Span::styled(
            "review the detected issues, and preview fixes.",
            Style::default().fg(colors::TEXT_MUTED),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(colors::TEXT_MUTED)),
            Span::styled(
                "n",
                Style::default()
                    .fg(colors::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " to start a new analysis",
                Style::default().fg(colors::TEXT_MUTED),
            ),
        ]),
    ];

    let welcome = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel("Welcome"));
    frame.render_widget(welcome, area);
}

pub(crate) fn draw_upload(frame: &mut Frame, app: &App, area: Rect) {
    let picker = app.picker();

    if picker.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No analyzable files in this directory.",
            Style::default().fg(colors::TEXT_MUTED),
        )))
        .block(panel("Select Files"));
        frame.render_widget(empty, area);
        return;
    }

    let name_width = picker
        .entries()
        .iter()
        .map(|entry| entry.name.width())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (index, entry) in picker.entries().iter().enumerate() {
        let cursor = if index == picker.cursor() { "▶" } else { " " };
        let checkbox = if entry.selected { "[x]" } else { "[ ]" };
        let style = if entry.selected {
            Style::default().fg(colors::TEXT_PRIMARY)
        } else {
            Style::default().fg(colors::TEXT_SECONDARY)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{cursor} "), Style::default().fg(colors::ACCENT)),
            Span::styled(format!("{checkbox} "), style),
            Span::styled(pad_to(&entry.name, name_width + 2), style),
            Span::styled(
                human_size(entry.size),
                Style::default().fg(colors::TEXT_MUTED),
            ),
        ]));
    }

    let title = format!("Select Files ({} selected)", picker.selected_count());
    let list = Paragraph::new(lines).block(panel(&title));
    frame.render_widget(list, area);
}

pub(crate) fn draw_analyze(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_manifest(frame, app, chunks[0]);
    draw_model_menu(frame, app, chunks[1]);
}

fn draw_manifest(frame: &mut Frame, app: &App, area: Rect) {
    let files = app.state().files();
    let name_width = files.iter().map(|file| file.name.width()).max().unwrap_or(0);

    let lines: Vec<Line> = files
        .iter()
        .map(|file| {
            Line::from(vec![
                Span::styled(
                    pad_to(&file.name, name_width + 2),
                    Style::default().fg(colors::TEXT_PRIMARY),
                ),
                Span::styled(
                    human_size(file.size),
                    Style::default().fg(colors::TEXT_MUTED),
                ),
            ])
        })
        .collect();

    let title = format!("Uploaded Files ({})", files.len());
    frame.render_widget(Paragraph::new(lines).block(panel(&title)), area);
}

fn draw_model_menu(frame: &mut Frame, app: &App, area: Rect) {
    let selection = app.state().selection();

    let mut lines = Vec::new();
    for (index, model) in Model::all().iter().copied().enumerate() {
        let checked = selection.contains(model);
        let checkbox = if checked { "[x]" } else { "[ ]" };
        let style = if checked {
            Style::default().fg(model_color(model))
        } else {
            Style::default().fg(colors::TEXT_MUTED)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", index + 1),
                Style::default().fg(colors::TEXT_DISABLED),
            ),
            Span::styled(format!("{checkbox} "), style),
            Span::styled(model.display_name(), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(colors::TEXT_MUTED)),
        Span::styled(
            "a",
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " to start the analysis",
            Style::default().fg(colors::TEXT_MUTED),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines).block(panel("Models")), area);
}

pub(crate) fn draw_results(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    draw_stats_bar(frame, app, chunks[0]);
    draw_issue_list(frame, app, chunks[1]);
}

fn draw_stats_bar(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();

    let mut spans = vec![Span::styled(
        format!("{} issue(s)  ", stats.total()),
        Style::default()
            .fg(colors::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    )];
    for severity in Severity::all().iter().copied() {
        let count = stats.severity(severity);
        if count == 0 {
            continue;
        }
        spans.push(Span::styled(
            format!("{count} {severity}  "),
            Style::default().fg(severity_color(severity)),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(panel("Summary")),
        area,
    );
}

fn draw_issue_list(frame: &mut Frame, app: &App, area: Rect) {
    let issues = app.issues();

    if issues.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No aesthetic issues detected.",
            Style::default().fg(colors::SUCCESS),
        )))
        .block(panel("Issues"));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor row inside the visible window.
    let visible = area.height.saturating_sub(2) as usize;
    let offset = app
        .results_cursor()
        .saturating_sub(visible.saturating_sub(1));

    let mut lines = Vec::new();
    for (index, flat) in issues.iter().enumerate().skip(offset).take(visible.max(1)) {
        let is_current = index == app.results_cursor();
        let cursor = if is_current { "▶" } else { " " };
        let base = if is_current {
            Style::default().fg(colors::TEXT_PRIMARY)
        } else {
            Style::default().fg(colors::TEXT_SECONDARY)
        };

        let mut spans = vec![
            Span::styled(format!("{cursor} "), Style::default().fg(colors::ACCENT)),
            Span::styled(
                format!("{:<9}", flat.issue.severity.as_str()),
                Style::default().fg(severity_color(flat.issue.severity)),
            ),
            Span::styled(
                format!("{:<16}", flat.issue.category.display_name()),
                base,
            ),
            Span::styled(
                format!("{}  ", flat.file),
                Style::default().fg(colors::BLUE),
            ),
            Span::styled(
                format!("{}  ", flat.model.display_name()),
                Style::default().fg(model_color(flat.model)),
            ),
            Span::styled(flat.issue.description.clone(), base),
        ];
        if !flat.issue.line_numbers.is_empty() {
            let rendered: Vec<String> = flat
                .issue
                .line_numbers
                .iter()
                .map(ToString::to_string)
                .collect();
            spans.push(Span::styled(
                format!("  (lines {})", rendered.join(", ")),
                Style::default().fg(colors::TEXT_MUTED),
            ));
        }
        lines.push(Line::from(spans));
    }

    let title = match app.report_url() {
        Some(url) => format!("Issues · report: {url}"),
        None => "Issues".to_string(),
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(panel(&title)),
        area,
    );
}
