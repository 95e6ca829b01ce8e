//! Landing screen: hero, platform stats and featured projects

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::keybindings::ShortcutContext;
use super::{render_footer, ViewAction};
use crate::catalog::Project;
use crate::routes::Route;

/// Projects shown on the landing screen
pub const FEATURED_COUNT: usize = 3;

/// (value, label)
pub const PLATFORM_STATS: [(&str, &str); 4] = [
    ("120M MAD", "Total Investments"),
    ("3,500+", "Investors"),
    ("42", "Projects Funded"),
    ("9.2%", "Average Returns"),
];

const HERO_TITLE: &str = "Invest in Morocco's Future";
const HERO_TEXT: &str = "Join Morocco's first real estate crowdfunding platform and diversify \
your portfolio with high-quality property investments, starting from just 2,500 MAD.";

pub struct HomeView {
    featured: Vec<Project>,
    list_state: ListState,
}

impl HomeView {
    pub fn new(featured: Vec<Project>) -> Self {
        let mut list_state = ListState::default();
        if !featured.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            featured,
            list_state,
        }
    }

    pub fn featured(&self) -> &[Project] {
        &self.featured
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.list_state.selected().and_then(|i| self.featured.get(i))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        let len = self.featured.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                let next = self.list_state.selected().map_or(0, |i| (i + 1) % len);
                self.list_state.select(Some(next));
                ViewAction::None
            }
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                let prev = self
                    .list_state
                    .selected()
                    .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
                self.list_state.select(Some(prev));
                ViewAction::None
            }
            KeyCode::Enter => self
                .selected_project()
                .map(|p| ViewAction::Navigate(Route::ProjectDetail(p.id)))
                .unwrap_or(ViewAction::None),
            KeyCode::Char('p') => ViewAction::Navigate(Route::Projects),
            KeyCode::Char('r') => ViewAction::Navigate(Route::Register),
            _ => ViewAction::None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Hero
                Constraint::Length(4), // Stats
                Constraint::Min(6),    // Featured
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let hero = Paragraph::new(vec![
            Line::from(Span::styled(
                HERO_TITLE,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(HERO_TEXT),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(hero, chunks[0]);

        let stat_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(chunks[1]);
        for ((value, label), stat_area) in PLATFORM_STATS.iter().zip(stat_areas.iter()) {
            let stat = Paragraph::new(vec![
                Line::from(Span::styled(
                    *value,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*label, Style::default().fg(Color::Gray))),
            ])
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(stat, *stat_area);
        }

        self.render_featured(frame, chunks[2]);
        render_footer(frame, chunks[3], ShortcutContext::Home);
    }

    fn render_featured(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Featured Investment Opportunities ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = self
            .featured
            .iter()
            .map(|p| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        p.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "  {} · {} · Goal {} · Min {} · {}",
                            p.location, p.property_type, p.investment_goal, p.investment_minimum,
                            p.expected_return
                        ),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, parts[0], &mut self.list_state);

        if let Some(project) = self.selected_project() {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Yellow))
                .percent(u16::from(project.funded.min(100)))
                .label(format!("{}% funded", project.funded));
            frame.render_widget(gauge, parts[1]);
        }
    }
}
