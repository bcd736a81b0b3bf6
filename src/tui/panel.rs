//! # Form Panel
//!
//! Draws the form as one bordered panel: title on the top border, one line
//! per row, footer centered on the bottom border. The hovered row is the one
//! starting with the hover marker and is highlighted.
//!
//! While an edit is open, a prompt box is drawn over the panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::entry::HOVER_MARKER;

pub fn draw_panel(frame: &mut Frame, title: &str, body: &str, footer: &str) {
    let area = frame.area();

    let lines: Vec<Line> = body
        .lines()
        .map(|row| {
            if row.starts_with(HOVER_MARKER) {
                Line::from(Span::styled(
                    row.to_string(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(row.to_string())
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {title} "))
        .title_bottom(Line::from(format!(" {footer} ")).centered())
        .padding(Padding::horizontal(1));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Prompt box with the typed text and a trailing caret.
pub fn draw_prompt(frame: &mut Frame, prompt: &str, buffer: &str) {
    let overlay = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, overlay);

    let mut lines: Vec<Line> = prompt.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(buffer.to_string()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Edit ")
        .title_bottom(Line::from(" Enter Save ").centered())
        .padding(Padding::horizontal(1));

    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
