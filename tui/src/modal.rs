//! Fix-preview modal overlaying the results page.

use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

use veneer_engine::App;

use crate::centered_rect;
use crate::theme::colors;

pub(crate) fn draw_preview(frame: &mut Frame, app: &App) {
    let Some((issue_id, record)) = app.open_preview() else {
        return;
    };

    let area = centered_rect(80, 70, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    if record.is_empty() {
        lines.push(Line::from(Span::styled(
            "The model returned no line changes for this issue.",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    }

    for change in &record.changes {
        lines.push(Line::from(Span::styled(
            format!("line {}", change.line_number),
            Style::default()
                .fg(colors::TEXT_DISABLED)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled("- ", Style::default().fg(colors::ERROR)),
            Span::styled(
                change.original.clone(),
                Style::default().fg(colors::ERROR),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("+ ", Style::default().fg(colors::SUCCESS)),
            Span::styled(change.fixed.clone(), Style::default().fg(colors::SUCCESS)),
        ]));
        if let Some(explanation) = &change.explanation {
            lines.push(Line::from(Span::styled(
                explanation.clone(),
                Style::default().fg(colors::TEXT_MUTED),
            )));
        }
        lines.push(Line::from(""));
    }

    if let Some(improvement) = &record.design_improvement {
        lines.push(Line::from(Span::styled(
            improvement.clone(),
            Style::default().fg(colors::TEXT_SECONDARY),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "esc close · p request again",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let applied = if record.applied { " · applied" } else { "" };
    let block = Block::default()
        .title(format!(" Fix Preview · {issue_id}{applied} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::PRIMARY))
        .style(Style::default().bg(colors::BG_POPUP))
        .padding(Padding::horizontal(1));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
