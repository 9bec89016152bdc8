use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::app::App;
use crate::data::{compare, to_abbreviated_word, Comparison};

/// Proportional view of the general fund: the police slice, the alternative's
/// department slice, and the remainder. The three percentages sum to 100.
pub fn render_chart(f: &mut Frame, area: Rect, app: &App) {
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
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(area);

    render_bars(f, chunks[0], city.name.as_str(), &comparison);
    render_legend(f, chunks[1], city.general_fund, &comparison);
}

fn slices(comparison: &Comparison) -> [(&str, u32, Color); 3] {
    [
        ("General", comparison.remainder_percent(), Color::DarkGray),
        ("Police", comparison.police_percent, Color::Red),
        (
            comparison.department.as_str(),
            comparison.department_percent,
            Color::Yellow,
        ),
    ]
}

fn render_bars(f: &mut Frame, area: Rect, city_name: &str, comparison: &Comparison) {
    let bars: Vec<Bar> = slices(comparison)
        .iter()
        .map(|(label, percent, color)| {
            Bar::default()
                .value(*percent as u64)
                .text_value(format!("{}%", percent))
                .label(Line::from(label.to_string()))
                .style(Style::default().fg(*color))
                .value_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let bar_width = ((area.width.saturating_sub(4)) / 3).clamp(5, 24);

    let bar_chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" {} general fund ", city_name))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
        .max(100);

    f.render_widget(bar_chart, area);
}

fn render_legend(f: &mut Frame, area: Rect, general_fund: u64, comparison: &Comparison) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Police: ", Style::default().fg(Color::Red)),
            Span::raw(format!(
                "{} ({}%)   ",
                to_abbreviated_word(comparison.police_budget),
                comparison.police_percent
            )),
            Span::styled(
                format!("{}: ", comparison.department),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(
                "{} ({}%)",
                to_abbreviated_word(comparison.department_budget),
                comparison.department_percent
            )),
        ]),
        Line::from(vec![
            Span::styled("General fund: ", Style::default().fg(Color::Gray)),
            Span::raw(to_abbreviated_word(general_fund)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_whole_fund() {
        let comparison = Comparison {
            police_budget: 301809379,
            police_percent: 46,
            department: "Parks and Recreation".to_string(),
            department_budget: 18558125,
            department_percent: 3,
            affordable_units: 1437,
        };
        let slices = slices(&comparison);
        let total: u32 = slices.iter().map(|(_, pct, _)| *pct).sum();
        assert_eq!(total, 100);
        assert_eq!(slices[0].1, 51);
    }
}
