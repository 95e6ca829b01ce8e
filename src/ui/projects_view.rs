//! Projects screen: filter panel on the left, results on the right

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::form_field::FormField;
use super::keybindings::ShortcutContext;
use super::{button, render_footer, ViewAction};
use crate::catalog::{
    Location, Project, ProjectBrowser, PropertyType, Selection, MIN_INVESTMENT_SLIDER_MAX,
};
use crate::calculator::format_mad;
use crate::routes::Route;

/// Focusable controls, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFocus {
    Search,
    Location,
    PropertyType,
    MinInvestment,
    Reset,
    Results,
}

impl FilterFocus {
    const ORDER: [FilterFocus; 6] = [
        FilterFocus::Search,
        FilterFocus::Location,
        FilterFocus::PropertyType,
        FilterFocus::MinInvestment,
        FilterFocus::Reset,
        FilterFocus::Results,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Step through `All` followed by every value, wrapping at both ends
fn cycle<T: Copy + PartialEq>(current: Selection<T>, values: &[T], forward: bool) -> Selection<T> {
    let slots = values.len() + 1;
    let index = match current {
        Selection::All => 0,
        Selection::Only(v) => values.iter().position(|x| *x == v).map_or(0, |i| i + 1),
    };
    let next = if forward {
        (index + 1) % slots
    } else {
        (index + slots - 1) % slots
    };
    if next == 0 {
        Selection::All
    } else {
        Selection::Only(values[next - 1])
    }
}

fn selection_label<T: std::fmt::Display>(selection: &Selection<T>, all_label: &str) -> String {
    match selection {
        Selection::All => all_label.to_string(),
        Selection::Only(v) => v.to_string(),
    }
}

pub struct ProjectsView {
    browser: ProjectBrowser,
    search: FormField,
    focus: FilterFocus,
    results_state: ListState,
}

impl ProjectsView {
    pub fn new(projects: Vec<Project>) -> Self {
        let mut view = Self {
            browser: ProjectBrowser::new(projects),
            search: FormField::text("", "Search by name or location..."),
            focus: FilterFocus::Search,
            results_state: ListState::default(),
        };
        view.sync_results_selection();
        view
    }

    pub fn browser(&self) -> &ProjectBrowser {
        &self.browser
    }

    pub fn focus(&self) -> FilterFocus {
        self.focus
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.results_state
            .selected()
            .and_then(|i| self.browser.filtered().get(i))
    }

    fn sync_results_selection(&mut self) {
        let len = self.browser.filtered().len();
        let selected = match self.results_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.results_state.select(selected);
    }

    fn reset_filters(&mut self) {
        self.browser.reset();
        self.search = FormField::text("", "Search by name or location...");
        self.results_state.select(None);
        self.sync_results_selection();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') {
                self.reset_filters();
            }
            return ViewAction::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return ViewAction::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return ViewAction::None;
            }
            _ => {}
        }

        let forward = matches!(key.code, KeyCode::Right);
        match (self.focus, key.code) {
            (FilterFocus::Search, code) => {
                let before = self.search.value();
                if self.search.handle_key(code) {
                    let after = self.search.value();
                    if after != before {
                        self.browser.set_search_term(after);
                        self.sync_results_selection();
                    }
                }
            }
            (FilterFocus::Location, KeyCode::Left | KeyCode::Right) => {
                let next = cycle(self.browser.criteria().location, Location::all(), forward);
                self.browser.set_location(next);
                self.sync_results_selection();
            }
            (FilterFocus::PropertyType, KeyCode::Left | KeyCode::Right) => {
                let next = cycle(
                    self.browser.criteria().property_type,
                    PropertyType::all(),
                    forward,
                );
                self.browser.set_property_type(next);
                self.sync_results_selection();
            }
            (FilterFocus::MinInvestment, KeyCode::Left | KeyCode::Right) => {
                let current = self.browser.criteria().min_investment;
                let next = if forward {
                    current.saturating_add(1).min(MIN_INVESTMENT_SLIDER_MAX)
                } else {
                    current.saturating_sub(1)
                };
                if next != current {
                    self.browser.set_min_investment(next);
                    self.sync_results_selection();
                }
            }
            (FilterFocus::Reset, KeyCode::Enter) => self.reset_filters(),
            (FilterFocus::Results, KeyCode::Enter) => {
                if let Some(project) = self.selected_project() {
                    return ViewAction::Navigate(Route::ProjectDetail(project.id));
                }
                // Empty state offers the reset button here
                self.reset_filters();
            }
            (FilterFocus::Results, KeyCode::Down) => {
                let len = self.browser.filtered().len();
                if let Some(i) = self.results_state.selected() {
                    self.results_state.select(Some((i + 1).min(len.saturating_sub(1))));
                }
            }
            (FilterFocus::Results, KeyCode::Up) => {
                if let Some(i) = self.results_state.selected() {
                    self.results_state.select(Some(i.saturating_sub(1)));
                }
            }
            _ => {}
        }
        ViewAction::None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(1)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(30)])
            .split(rows[0]);

        self.render_filters(frame, columns[0]);
        self.render_results(frame, columns[1]);
        render_footer(frame, rows[1], ShortcutContext::Projects);
    }

    fn label_style(&self, focus: FilterFocus) -> Style {
        if self.focus == focus {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    fn render_filters(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Filter Projects ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Search label
                Constraint::Length(2), // Search input
                Constraint::Length(3), // Location
                Constraint::Length(3), // Type
                Constraint::Length(3), // Minimum
                Constraint::Length(1), // Reset
                Constraint::Min(0),
            ])
            .split(inner);

        let criteria = self.browser.criteria().clone();

        frame.render_widget(
            Paragraph::new(Span::styled("Search", self.label_style(FilterFocus::Search))),
            chunks[0],
        );
        let focused = self.focus == FilterFocus::Search;
        self.search.render(frame, chunks[1], focused);

        let choice = |label: &str, value: String, focus: FilterFocus| {
            Paragraph::new(vec![
                Line::from(Span::styled(label.to_string(), self.label_style(focus))),
                Line::from(format!("◂ {value} ▸")),
            ])
        };
        frame.render_widget(
            choice(
                "Location",
                selection_label(&criteria.location, "All Locations"),
                FilterFocus::Location,
            ),
            chunks[2],
        );
        frame.render_widget(
            choice(
                "Property Type",
                selection_label(&criteria.property_type, "All Types"),
                FilterFocus::PropertyType,
            ),
            chunks[3],
        );
        let minimum = criteria
            .min_investment_amount()
            .map_or_else(|| "Any".to_string(), |amount| format_mad(amount as f64));
        frame.render_widget(
            choice("Minimum Investment", minimum, FilterFocus::MinInvestment),
            chunks[4],
        );

        frame.render_widget(
            Paragraph::new(Line::from(button(
                "Reset Filters",
                self.focus == FilterFocus::Reset,
                true,
            ))),
            chunks[5],
        );
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let filtered = self.browser.filtered();
        let title = format!(
            " {} of {} projects ",
            filtered.len(),
            self.browser.all().len()
        );
        let border = if self.focus == FilterFocus::Results {
            Color::Yellow
        } else {
            Color::Cyan
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        if filtered.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No projects match your filters",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("Try adjusting your search criteria."),
                Line::from(""),
                Line::from(button(
                    "Reset Filters",
                    self.focus == FilterFocus::Results,
                    true,
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = filtered
            .iter()
            .map(|p| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            p.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}% funded", p.funded),
                            Style::default().fg(Color::Yellow),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "  {} · {} · Min {} · {}",
                            p.location, p.property_type, p.investment_minimum, p.expected_return
                        ),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.results_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FixtureCatalog, ProjectCatalog};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view() -> ProjectsView {
        ProjectsView::new(FixtureCatalog::instant().projects().to_vec())
    }

    fn type_text(view: &mut ProjectsView, text: &str) {
        for c in text.chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn ids(view: &ProjectsView) -> Vec<u32> {
        view.browser().filtered().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_cycle_wraps_through_all() {
        let values = [1, 2];
        assert_eq!(cycle(Selection::All, &values, true), Selection::Only(1));
        assert_eq!(cycle(Selection::Only(2), &values, true), Selection::All);
        assert_eq!(cycle(Selection::All, &values, false), Selection::Only(2));
    }

    #[test]
    fn test_typing_filters_on_every_keystroke() {
        let mut view = view();
        let start = view.browser().revision();
        type_text(&mut view, "marina");
        assert_eq!(ids(&view), vec![1]);
        assert_eq!(view.browser().revision(), start + 6);
    }

    #[test]
    fn test_focus_cycles_with_tab() {
        let mut view = view();
        for _ in 0..6 {
            view.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(view.focus(), FilterFocus::Search);
        view.handle_key(key(KeyCode::BackTab));
        assert_eq!(view.focus(), FilterFocus::Results);
    }

    #[test]
    fn test_min_investment_slider_is_bounded() {
        let mut view = view();
        view.handle_key(key(KeyCode::Tab));
        view.handle_key(key(KeyCode::Tab));
        view.handle_key(key(KeyCode::Tab));
        assert_eq!(view.focus(), FilterFocus::MinInvestment);
        view.handle_key(key(KeyCode::Left));
        assert_eq!(view.browser().criteria().min_investment, 0);
        for _ in 0..30 {
            view.handle_key(key(KeyCode::Right));
        }
        assert_eq!(
            view.browser().criteria().min_investment,
            MIN_INVESTMENT_SLIDER_MAX
        );
    }

    #[test]
    fn test_empty_results_then_reset() {
        let mut view = view();
        type_text(&mut view, "zzz");
        assert!(view.browser().filtered().is_empty());
        assert!(view.selected_project().is_none());

        view.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(view.browser().criteria().is_default());
        assert_eq!(ids(&view), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(view.selected_project().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_enter_on_result_opens_detail() {
        let mut view = view();
        view.handle_key(key(KeyCode::BackTab));
        view.handle_key(key(KeyCode::Down));
        assert_eq!(
            view.handle_key(key(KeyCode::Enter)),
            ViewAction::Navigate(Route::ProjectDetail(2))
        );
    }

    #[test]
    fn test_location_choice_moves_from_all() {
        let mut view = view();
        view.handle_key(key(KeyCode::Tab));
        view.handle_key(key(KeyCode::Right));
        assert_eq!(
            view.browser().criteria().location,
            Selection::Only(Location::all()[0])
        );
        view.handle_key(key(KeyCode::Left));
        assert_eq!(view.browser().criteria().location, Selection::All);
    }
}
