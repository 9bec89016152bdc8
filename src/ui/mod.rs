pub mod chart;
pub mod compare;
pub mod help;
pub mod sources;
pub mod tabs;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, View};
use crate::data::LookupError;

/// Helper to create a centered rect as a percentage of the given area
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Main render function that draws the entire UI
pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(2), // Tabs
            Constraint::Min(5),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0], app);
    tabs::render_tabs(f, chunks[1], app.view);

    match app.view {
        View::Compare => compare::render_compare(f, chunks[2], app),
        View::Chart => chart::render_chart(f, chunks[2], app),
        View::Sources => sources::render_sources(f, chunks[2], app),
    }

    render_status_bar(f, chunks[3], app);

    // Help overlay (on top of everything)
    if app.show_help {
        help::render_help(f);
    }
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let city = app.current_city();
    let title = format!("Reallocate: {}, {}", city.name, city.state);

    let paragraph = Paragraph::new(title)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let help_hint = "←→: views | ↑↓: select | Tab: selector | r: reload | ?: help | q: quit";

    let (status_line, style) = match app.load_error {
        // A failed reload keeps the previous dataset; say so instead of hints
        Some(ref error) => (
            format!("dataset reload failed ({}) — keeping previous data", error),
            Style::default().fg(Color::Red),
        ),
        None => (help_hint.to_string(), Style::default().fg(Color::DarkGray)),
    };

    let paragraph = Paragraph::new(status_line)
        .style(style)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

/// Visible failure state for a lookup error: malformed data must never be
/// papered over with a default figure
fn render_lookup_failure(f: &mut Frame, area: Rect, error: &LookupError) {
    let paragraph = Paragraph::new(format!("Data error: {}", error))
        .block(
            Block::default()
                .title(" Data error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
