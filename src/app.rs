use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use log::info;
use std::collections::HashSet;

use crate::data::{Alternative, City, Dataset};
use crate::ui::sources::{section_rows, SectionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Compare = 0,
    Chart = 1,
    Sources = 2,
}

impl View {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => View::Compare,
            1 => View::Chart,
            2 => View::Sources,
            _ => View::Compare,
        }
    }

    pub fn next(&self) -> Self {
        View::from_index((*self as usize + 1) % 3)
    }

    pub fn prev(&self) -> Self {
        View::from_index((*self as usize + 2) % 3)
    }
}

/// Which dropdown the arrow keys drive on the comparison views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    City,
    Alternative,
}

impl Selector {
    pub fn toggle(&self) -> Self {
        match self {
            Selector::City => Selector::Alternative,
            Selector::Alternative => Selector::City,
        }
    }
}

/// UI state: the loaded dataset plus transient selections. The selections are
/// indices into the dataset, so no name round-trip is needed to recover the
/// chosen entities.
pub struct App {
    pub dataset: Dataset,
    pub view: View,
    pub selected_city: usize,
    pub selected_alternative: usize,
    pub focus: Selector,
    pub show_help: bool,
    pub running: bool,
    pub sources_selected: usize,
    pub expanded: HashSet<SectionId>,
    /// Error from the most recent failed reload; the previous dataset stays live
    pub load_error: Option<String>,
    /// Manual reload request (polled by the main loop)
    pending_reload: bool,
}

impl App {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            view: View::Compare,
            selected_city: 0,
            selected_alternative: 0,
            focus: Selector::City,
            show_help: false,
            running: true,
            sources_selected: 0,
            expanded: HashSet::new(),
            load_error: None,
            pending_reload: false,
        }
    }

    pub fn current_city(&self) -> &City {
        &self.dataset.cities[self.selected_city]
    }

    pub fn current_alternative(&self) -> &Alternative {
        &self.dataset.alternatives[self.selected_alternative]
    }

    pub fn on_dataset_update(&mut self, dataset: Dataset) {
        info!(
            "Dataset updated: {} cities, {} alternatives",
            dataset.cities.len(),
            dataset.alternatives.len()
        );
        self.dataset = dataset;
        self.selected_city = self.selected_city.min(self.dataset.cities.len() - 1);
        self.selected_alternative = self
            .selected_alternative
            .min(self.dataset.alternatives.len() - 1);
        self.clamp_sources_selection();
        self.load_error = None;
    }

    pub fn on_load_error(&mut self, error: String) {
        self.load_error = Some(error);
    }

    pub fn take_pending_reload(&mut self) -> bool {
        std::mem::take(&mut self.pending_reload)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Any key closes help
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.pending_reload = true,
            KeyCode::Left => self.view = self.view.prev(),
            KeyCode::Right => self.view = self.view.next(),
            KeyCode::Tab => {
                if matches!(self.view, View::Compare | View::Chart) {
                    self.focus = self.focus.toggle();
                }
            }
            KeyCode::Enter => {
                if self.view == View::Sources {
                    self.toggle_section();
                }
            }
            KeyCode::Up => self.handle_up(),
            KeyCode::Down => self.handle_down(),
            KeyCode::Home => self.handle_home(),
            KeyCode::End => self.handle_end(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                self.show_help = false;
            }
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => self.handle_up(),
            MouseEventKind::ScrollDown => self.handle_down(),
            _ => {}
        }
    }

    fn handle_up(&mut self) {
        match self.view {
            View::Compare | View::Chart => self.cycle_selection(-1),
            View::Sources => {
                self.sources_selected = self.sources_selected.saturating_sub(1);
            }
        }
    }

    fn handle_down(&mut self) {
        match self.view {
            View::Compare | View::Chart => self.cycle_selection(1),
            View::Sources => {
                let max = self.source_rows().len().saturating_sub(1);
                self.sources_selected = (self.sources_selected + 1).min(max);
            }
        }
    }

    fn handle_home(&mut self) {
        match self.view {
            View::Compare | View::Chart => match self.focus {
                Selector::City => self.selected_city = 0,
                Selector::Alternative => self.selected_alternative = 0,
            },
            View::Sources => self.sources_selected = 0,
        }
    }

    fn handle_end(&mut self) {
        match self.view {
            View::Compare | View::Chart => match self.focus {
                Selector::City => self.selected_city = self.dataset.cities.len() - 1,
                Selector::Alternative => {
                    self.selected_alternative = self.dataset.alternatives.len() - 1
                }
            },
            View::Sources => {
                self.sources_selected = self.source_rows().len().saturating_sub(1);
            }
        }
    }

    /// Step the focused dropdown, wrapping at either end
    fn cycle_selection(&mut self, delta: isize) {
        match self.focus {
            Selector::City => {
                let len = self.dataset.cities.len();
                self.selected_city =
                    (self.selected_city + len).wrapping_add_signed(delta) % len;
            }
            Selector::Alternative => {
                let len = self.dataset.alternatives.len();
                self.selected_alternative =
                    (self.selected_alternative + len).wrapping_add_signed(delta) % len;
            }
        }
    }

    pub fn source_rows(&self) -> Vec<SectionId> {
        section_rows(&self.dataset, &self.expanded)
    }

    fn toggle_section(&mut self) {
        let rows = self.source_rows();
        let Some(&section) = rows.get(self.sources_selected) else {
            return;
        };
        if !self.expanded.remove(&section) {
            self.expanded.insert(section);
        }
        self.clamp_sources_selection();
    }

    fn clamp_sources_selection(&mut self) {
        let max = self.source_rows().len().saturating_sub(1);
        self.sources_selected = self.sources_selected.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn app() -> App {
        App::new(Dataset::bundled().unwrap())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrow_keys_cycle_views() {
        let mut app = app();
        assert_eq!(app.view, View::Compare);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.view, View::Chart);
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.view, View::Sources);
    }

    #[test]
    fn selection_wraps_both_directions() {
        let mut app = app();
        let cities = app.dataset.cities.len();
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_city, cities - 1);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_city, 0);
    }

    #[test]
    fn tab_switches_the_focused_selector() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Selector::Alternative);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_alternative, 1);
        assert_eq!(app.selected_city, 0);
    }

    #[test]
    fn enter_expands_and_collapses_sections() {
        let mut app = app();
        app.view = View::Sources;
        let collapsed_rows = app.source_rows().len();
        app.handle_key(key(KeyCode::Enter)); // expand Disclaimer (no sub-rows)
        assert!(app.expanded.contains(&SectionId::Disclaimer));
        app.sources_selected = 2; // City Budgets
        app.handle_key(key(KeyCode::Enter));
        assert!(app.source_rows().len() > collapsed_rows);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.source_rows().len(),
            collapsed_rows,
            "collapse removes the per-city rows"
        );
    }

    #[test]
    fn failed_reload_keeps_previous_dataset() {
        let mut app = app();
        let cities_before = app.dataset.cities.len();
        app.on_load_error("invalid dataset".to_string());
        assert_eq!(app.dataset.cities.len(), cities_before);
        assert!(app.load_error.is_some());
    }

    #[test]
    fn dataset_update_clamps_selection() {
        let mut app = app();
        app.selected_city = app.dataset.cities.len() - 1;
        let mut smaller = app.dataset.clone();
        smaller.cities.truncate(1);
        for alt in &mut smaller.alternatives {
            alt.city_data.retain(|entry| entry.name == smaller.cities[0].name);
        }
        smaller.validate().unwrap();
        app.on_dataset_update(smaller);
        assert_eq!(app.selected_city, 0);
        assert!(app.load_error.is_none());
    }
}
