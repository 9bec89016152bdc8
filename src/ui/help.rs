use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;

pub fn render_help(f: &mut Frame) {
    let area = centered_rect(60, 80, f.area());

    // Clear the background
    f.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![
            Span::styled("Reallocate", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" - City Budget Comparison"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Navigation", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ←/→    ", Style::default().fg(Color::Green)),
            Span::raw("Switch between views"),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓    ", Style::default().fg(Color::Green)),
            Span::raw("Change selection / move through sections"),
        ]),
        Line::from(vec![
            Span::styled("  Tab    ", Style::default().fg(Color::Green)),
            Span::raw("Switch between city and alternative selectors"),
        ]),
        Line::from(vec![
            Span::styled("  Scroll ", Style::default().fg(Color::Green)),
            Span::raw("Change selection with the mouse wheel"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Actions", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter  ", Style::default().fg(Color::Green)),
            Span::raw("Expand/collapse a sources section"),
        ]),
        Line::from(vec![
            Span::styled("  r      ", Style::default().fg(Color::Green)),
            Span::raw("Reload the dataset from the data directory"),
        ]),
        Line::from(vec![
            Span::styled("  ?      ", Style::default().fg(Color::Green)),
            Span::raw("Toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("  q      ", Style::default().fg(Color::Green)),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Views", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Compare ", Style::default().fg(Color::Yellow)),
            Span::raw("What half the police budget could pay for"),
        ]),
        Line::from(vec![
            Span::styled("  Chart   ", Style::default().fg(Color::Yellow)),
            Span::raw("General fund split: police, alternative, remainder"),
        ]),
        Line::from(vec![
            Span::styled("  Sources ", Style::default().fg(Color::Yellow)),
            Span::raw("Where the numbers come from"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}
