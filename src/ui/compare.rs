use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Selector};
use crate::data::{compare, group_thousands, to_abbreviated_word, Comparison};

pub fn render_compare(f: &mut Frame, area: Rect, app: &App) {
    let city = app.current_city();
    let alt = app.current_alternative();

    let comparison = match compare(city, alt, &app.dataset.cities) {
        Ok(c) => c,
        Err(e) => {
            super::render_lookup_failure(f, area, &e);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Headline
            Constraint::Min(6),    // Budget comparison
            Constraint::Length(2), // Selector hint
        ])
        .split(area);

    render_headline(f, chunks[0], app, &comparison);
    render_budget_sections(f, chunks[1], city.name.as_str(), &comparison);
    render_selector_hint(f, chunks[2], app.focus);
}

fn selector_span<'a>(text: String, focused: bool, color: Color) -> Span<'a> {
    let style = Style::default()
        .fg(color)
        .add_modifier(Modifier::UNDERLINED);
    if focused {
        Span::styled(text, style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED))
    } else {
        Span::styled(text, style)
    }
}

fn render_headline(f: &mut Frame, area: Rect, app: &App, comparison: &Comparison) {
    let city = app.current_city();
    let alt = app.current_alternative();

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("With 50% of the "),
            selector_span(
                format!("{}, {}", city.name, city.state),
                app.focus == Selector::City,
                Color::White,
            ),
        ]),
        Line::from(vec![
            Span::styled(
                "police budget",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(", we could pay for"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            group_thousands(comparison.affordable_units),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(selector_span(
            alt.name.clone(),
            app.focus == Selector::Alternative,
            Color::Yellow,
        )),
        Line::from(""),
        Line::from(format!("Instead, {}'s spending looks like this:", city.name)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_budget_sections(f: &mut Frame, area: Rect, city_name: &str, comparison: &Comparison) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let police = budget_section(
        "Police",
        comparison.police_budget,
        comparison.police_percent,
        Color::Red,
    );
    let police_widget = Paragraph::new(police)
        .block(
            Block::default()
                .title(format!(" {} Police ", city_name))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Left);
    f.render_widget(police_widget, halves[0]);

    let dept = budget_section(
        &comparison.department,
        comparison.department_budget,
        comparison.department_percent,
        Color::Yellow,
    );
    let dept_widget = Paragraph::new(dept)
        .block(
            Block::default()
                .title(format!(" {} ", comparison.department))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Right);
    f.render_widget(dept_widget, halves[1]);
}

fn budget_section<'a>(name: &str, budget: u64, percent: u32, color: Color) -> Vec<Line<'a>> {
    vec![
        Line::from(Span::styled(
            format!("{}:", name),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            to_abbreviated_word(budget),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}% of the general fund", percent),
            Style::default().fg(color),
        )),
    ]
}

fn render_selector_hint(f: &mut Frame, area: Rect, focus: Selector) {
    let focused = match focus {
        Selector::City => "city",
        Selector::Alternative => "alternative",
    };
    let hint = format!("Tab: switch selector (now: {})  |  \u{2191}\u{2193}: change", focused);
    let paragraph = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
