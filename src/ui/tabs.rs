use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Tabs as RatatuiTabs},
};

use crate::app::View;

pub fn render_tabs(f: &mut Frame, area: Rect, active_view: View) {
    let titles = vec!["1:Compare", "2:Chart", "3:Sources"];

    let tabs = RatatuiTabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .select(active_view as usize)
        .divider(symbols::DOT);

    f.render_widget(tabs, area);
}
