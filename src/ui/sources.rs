use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::HashSet;

use crate::app::App;
use crate::data::{truncate_string, DataLink, Dataset};

/// One selectable row on the sources page: a top-level section or a
/// per-city / per-alternative subsection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Disclaimer,
    GeneralFunds,
    CityBudgets,
    City(usize),
    SalaryData,
    OtherData,
    Alternative(usize),
}

const DISCLAIMER: &[&str] = &[
    "This app represents data in a very simplified, generalized way -- it's \
     intended for starting conversations, not for basing financial decisions on.",
    "But honesty and transparency are still key. Nothing here is intended to \
     mislead. So provided below are sources and rationale for the numbers used \
     by this app.",
];

const GENERAL_FUNDS: &[&str] = &[
    "Unless otherwise noted, \"City Budget\", for the purposes of this app, \
     means General Funds.",
    "General Funds (also called discretionary funds) is money that can be \
     freely distributed by the mayor and council members without any direct \
     input from the average citizen. It is usually the majority of the city's \
     total budget, and comes primarily from general taxes.",
    "In every major city in the U.S., police departments are given an enormous \
     percentage of the General Funds money.",
];

const SALARY_DATA: &[&str] = &["All salary data uses state averages taken from \
     the U.S. Bureau of Labor Statistics."];

/// The selectable rows in display order, given the current expansion state.
/// Subsection rows exist only while their parent section is expanded.
pub fn section_rows(dataset: &Dataset, expanded: &HashSet<SectionId>) -> Vec<SectionId> {
    let mut rows = vec![
        SectionId::Disclaimer,
        SectionId::GeneralFunds,
        SectionId::CityBudgets,
    ];
    if expanded.contains(&SectionId::CityBudgets) {
        rows.extend((0..dataset.cities.len()).map(SectionId::City));
    }
    rows.push(SectionId::SalaryData);
    rows.push(SectionId::OtherData);
    if expanded.contains(&SectionId::OtherData) {
        rows.extend(
            dataset
                .alternatives
                .iter()
                .enumerate()
                .filter(|(_, alt)| !alt.salary)
                .map(|(i, _)| SectionId::Alternative(i)),
        );
    }
    rows
}

struct PageBuilder<'a> {
    lines: Vec<Line<'a>>,
    rows: Vec<SectionId>,
    selected: usize,
    /// Line index of the selected row, for scrolling
    selected_line: usize,
    next_row: usize,
}

impl<'a> PageBuilder<'a> {
    fn arrow(&self, expanded: bool) -> &'static str {
        if expanded {
            " \u{25be}"
        } else {
            " \u{25b8}"
        }
    }

    fn header(&mut self, title: &'a str, expanded: bool) {
        let is_selected = self.next_row == self.selected;
        if is_selected {
            self.selected_line = self.lines.len();
        }
        let style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        self.lines
            .push(Line::from(Span::styled(format!("{}{}", title, self.arrow(expanded)), style)));
        self.next_row += 1;
    }

    fn sub_header(&mut self, title: &'a str, expanded: bool) {
        let is_selected = self.next_row == self.selected;
        if is_selected {
            self.selected_line = self.lines.len();
        }
        let style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let title = truncate_string(title, 40);
        self.lines
            .push(Line::from(Span::styled(format!("  {}{}", title, self.arrow(expanded)), style)));
        self.next_row += 1;
    }

    fn title(&mut self, text: &'a str) {
        self.lines.push(Line::from(""));
        self.lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        self.lines.push(Line::from(""));
    }

    fn paragraphs(&mut self, texts: &'a [&'a str], indent: &str) {
        for text in texts {
            self.lines.push(Line::from(Span::styled(
                format!("{}{}", indent, text),
                Style::default().fg(Color::Gray),
            )));
            self.lines.push(Line::from(""));
        }
    }

    fn notes(&mut self, notes: &'a [String], indent: &'static str) {
        if notes.is_empty() {
            return;
        }
        self.lines.push(Line::from(Span::styled(
            format!("{}Notes", indent),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        for note in notes {
            self.lines.push(Line::from(Span::styled(
                format!("{}{}", indent, note),
                Style::default().fg(Color::Gray),
            )));
        }
        self.lines.push(Line::from(""));
    }

    fn links(&mut self, links: &'a [DataLink], indent: &'static str) {
        if links.is_empty() {
            return;
        }
        self.lines.push(Line::from(Span::styled(
            format!("{}Links", indent),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        for link in links {
            self.lines.push(Line::from(vec![
                Span::styled(
                    format!("{}{}: ", indent, link.link_text),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    link.url.as_str(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        self.lines.push(Line::from(""));
    }
}

pub fn render_sources(f: &mut Frame, area: Rect, app: &App) {
    let dataset = &app.dataset;
    let expanded = &app.expanded;
    let mut page = PageBuilder {
        lines: Vec::new(),
        rows: section_rows(dataset, expanded),
        selected: app.sources_selected,
        selected_line: 0,
        next_row: 0,
    };

    page.title("About the Data");

    let open = expanded.contains(&SectionId::Disclaimer);
    page.header("Disclaimer", open);
    if open {
        page.paragraphs(DISCLAIMER, "  ");
    }

    let open = expanded.contains(&SectionId::GeneralFunds);
    page.header("General Funds", open);
    if open {
        page.paragraphs(GENERAL_FUNDS, "  ");
    }

    page.title("Sources");

    let open = expanded.contains(&SectionId::CityBudgets);
    page.header("City Budgets", open);
    if open {
        for (i, city) in dataset.cities.iter().enumerate() {
            let city_open = expanded.contains(&SectionId::City(i));
            page.sub_header(&city.name, city_open);
            if city_open {
                page.links(&city.links, "    ");
                page.notes(&city.notes, "    ");
            }
        }
    }

    let open = expanded.contains(&SectionId::SalaryData);
    page.header("Salary Data", open);
    if open {
        page.paragraphs(SALARY_DATA, "  ");
    }

    let open = expanded.contains(&SectionId::OtherData);
    page.header("Other Data", open);
    if open {
        for (i, alt) in dataset.alternatives.iter().enumerate() {
            if alt.salary {
                continue;
            }
            let alt_open = expanded.contains(&SectionId::Alternative(i));
            page.sub_header(&alt.name, alt_open);
            if alt_open {
                page.links(&alt.links, "    ");
                page.notes(&alt.notes, "    ");
            }
        }
    }

    // Keep the selected row visible
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = page.selected_line.saturating_sub(visible / 2) as u16;

    let row_count = page.rows.len();
    let paragraph = Paragraph::new(page.lines)
        .block(
            Block::default()
                .title(format!(" Sources ({} sections) ", row_count))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    #[test]
    fn collapsed_page_lists_only_top_sections() {
        let dataset = Dataset::bundled().unwrap();
        let rows = section_rows(&dataset, &HashSet::new());
        assert_eq!(
            rows,
            vec![
                SectionId::Disclaimer,
                SectionId::GeneralFunds,
                SectionId::CityBudgets,
                SectionId::SalaryData,
                SectionId::OtherData,
            ]
        );
    }

    #[test]
    fn expanding_city_budgets_adds_one_row_per_city() {
        let dataset = Dataset::bundled().unwrap();
        let mut expanded = HashSet::new();
        expanded.insert(SectionId::CityBudgets);
        let rows = section_rows(&dataset, &expanded);
        assert_eq!(rows.len(), 5 + dataset.cities.len());
        assert_eq!(rows[3], SectionId::City(0));
    }

    #[test]
    fn other_data_lists_only_non_salary_alternatives() {
        let dataset = Dataset::bundled().unwrap();
        let mut expanded = HashSet::new();
        expanded.insert(SectionId::OtherData);
        let rows = section_rows(&dataset, &expanded);
        let alt_rows: Vec<_> = rows
            .iter()
            .filter_map(|row| match row {
                SectionId::Alternative(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert!(!alt_rows.is_empty());
        for i in alt_rows {
            assert!(!dataset.alternatives[i].salary);
        }
    }
}
