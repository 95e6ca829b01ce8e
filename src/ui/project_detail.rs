//! Project detail screen with the investment calculator

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap},
    Frame,
};

use super::keybindings::ShortcutContext;
use super::{button, render_footer, ViewAction};
use crate::calculator::{format_mad, ReturnCalculator};
use crate::catalog::ProjectDetail;
use crate::routes::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<ProjectDetail>),
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Overview,
    Details,
    Financials,
    Documents,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Overview,
        DetailTab::Details,
        DetailTab::Financials,
        DetailTab::Documents,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Details => "Details",
            DetailTab::Financials => "Financials",
            DetailTab::Documents => "Documents",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

pub struct ProjectDetailView {
    id: u32,
    state: DetailState,
    tab: DetailTab,
    image_index: usize,
    amount: u64,
    calculator: ReturnCalculator,
}

impl ProjectDetailView {
    /// Starts in the loading state; the app delivers the lookup result
    /// through `finish_loading`.
    pub fn new(id: u32, calculator: ReturnCalculator, default_amount: u64) -> Self {
        Self {
            id,
            state: DetailState::Loading,
            tab: DetailTab::Overview,
            image_index: 0,
            amount: default_amount,
            calculator,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn finish_loading(&mut self, detail: Option<ProjectDetail>) {
        self.state = match detail {
            Some(detail) => DetailState::Loaded(Box::new(detail)),
            None => DetailState::NotFound,
        };
        tracing::debug!(project_id = self.id, found = matches!(self.state, DetailState::Loaded(_)), "Project detail loaded");
    }

    /// Project title once loaded, for the window title
    pub fn project_title(&self) -> Option<&str> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail.project.title.as_str()),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        let image_count = match &self.state {
            DetailState::Loaded(detail) => detail.images.len(),
            DetailState::NotFound => {
                return match key.code {
                    KeyCode::Enter => ViewAction::Navigate(Route::Projects),
                    _ => ViewAction::None,
                };
            }
            DetailState::Loading => return ViewAction::None,
        };

        match key.code {
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Right if image_count > 0 => {
                self.image_index = (self.image_index + 1) % image_count;
            }
            KeyCode::Left if image_count > 0 => {
                self.image_index = (self.image_index + image_count - 1) % image_count;
            }
            KeyCode::Up | KeyCode::Char('+') => {
                self.amount = self.calculator.increment(self.amount);
            }
            KeyCode::Down | KeyCode::Char('-') => {
                self.amount = self.calculator.decrement(self.amount);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = u64::from(c.to_digit(10).unwrap_or(0));
                self.amount = self
                    .amount
                    .checked_mul(10)
                    .and_then(|a| a.checked_add(digit))
                    .unwrap_or(self.amount);
            }
            KeyCode::Backspace => self.amount /= 10,
            KeyCode::Enter => return ViewAction::Navigate(Route::Login),
            _ => {}
        }
        ViewAction::None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(1)])
            .split(area);

        match &self.state {
            DetailState::Loading => {
                let loading = Paragraph::new("Loading project...")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Gray))
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(loading, rows[0]);
            }
            DetailState::NotFound => {
                let missing = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Project Not Found",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(
                        "The project you're looking for doesn't exist or has been removed.",
                    ),
                    Line::from(""),
                    Line::from(button("Browse Projects", true, true)),
                ])
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
                frame.render_widget(missing, rows[0]);
            }
            DetailState::Loaded(detail) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(40), Constraint::Length(40)])
                    .split(rows[0]);
                self.render_main(frame, columns[0], detail);
                self.render_sidebar(frame, columns[1], detail);
            }
        }
        render_footer(frame, rows[1], ShortcutContext::ProjectDetail);
    }

    fn render_main(&self, frame: &mut Frame, area: Rect, detail: &ProjectDetail) {
        let project = &detail.project;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + location
                Constraint::Length(1), // Tabs
                Constraint::Min(5),    // Tab body
            ])
            .split(area);

        let image = detail
            .images
            .get(self.image_index)
            .map(|_| format!("image {}/{}", self.image_index + 1, detail.images.len()))
            .unwrap_or_default();
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                project.title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw(format!("{} · {}", project.location, project.property_type)),
                Span::styled(format!("   {image}"), Style::default().fg(Color::DarkGray)),
            ]),
        ]);
        frame.render_widget(header, chunks[0]);

        let tabs = Tabs::new(DetailTab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[1]);

        let body = match self.tab {
            DetailTab::Overview => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "Project Overview",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(detail.overview.clone()),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Projected Returns",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                ];
                for point in &detail.projections {
                    let bar = "█".repeat((point.returns * 2.0).round() as usize);
                    lines.push(Line::from(vec![
                        Span::raw(format!("{:<8}", point.year)),
                        Span::styled(bar, Style::default().fg(Color::Cyan)),
                        Span::raw(format!(" {:.1}%", point.returns)),
                    ]));
                }
                lines
            }
            DetailTab::Details => {
                let mut lines = key_value_lines("Project Details", &detail.details);
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Development Timeline",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for (i, phase) in ProjectDetail::TIMELINE.iter().enumerate() {
                    lines.push(Line::from(format!("  {}. {phase}", i + 1)));
                }
                lines
            }
            DetailTab::Financials => key_value_lines("Financial Details", &detail.financials),
            DetailTab::Documents => {
                let mut lines = vec![Line::from(Span::styled(
                    "Project Documents",
                    Style::default().add_modifier(Modifier::BOLD),
                ))];
                for doc in &detail.documents {
                    lines.push(Line::from(vec![
                        Span::raw(format!("  {}", doc.name)),
                        Span::styled(format!("  ({})", doc.kind), Style::default().fg(Color::DarkGray)),
                    ]));
                }
                lines
            }
        };
        let body = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(body, chunks[2]);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect, detail: &ProjectDetail) {
        let project = &detail.project;
        let block = Block::default()
            .title(" Investment Details ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Funding gauge
                Constraint::Length(5), // Investment details
                Constraint::Min(6),    // Calculator
                Constraint::Length(2), // Invest button
            ])
            .split(inner);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Yellow))
            .percent(u16::from(project.funded.min(100)))
            .label(format!(
                "{}% funded · {} investors",
                project.funded, detail.investor_count
            ));
        frame.render_widget(gauge, chunks[0]);

        let facts = Paragraph::new(vec![
            Line::from(""),
            fact("Investment Goal", &project.investment_goal),
            fact("Minimum Investment", &project.investment_minimum),
            fact("Expected Return", &project.expected_return),
        ]);
        frame.render_widget(facts, chunks[1]);

        let estimate = self.calculator.estimate(self.amount);
        let calculator = Paragraph::new(vec![
            Line::from(Span::styled(
                "Investment Calculator",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw("Amount to invest (MAD): "),
                Span::styled(
                    format_mad(self.amount as f64),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "min {} · step {}",
                    format_mad(self.calculator.minimum() as f64),
                    format_mad(self.calculator.step() as f64)
                ),
                Style::default().fg(Color::DarkGray),
            )),
            fact("Potential Annual Return", &format_mad(estimate.annual)),
            fact(
                &format!("Total Return ({} years)", self.calculator.years()),
                &format_mad(estimate.total),
            ),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(calculator, chunks[2]);

        let invest = Paragraph::new(vec![
            Line::from(button("Invest Now", true, true)),
            Line::from(Span::styled(
                "You need to log in or create an account to invest",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(invest, chunks[3]);
    }
}

fn fact<'a>(label: &str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

fn key_value_lines(heading: &str, rows: &[(String, String)]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        heading.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(rows.iter().map(|(label, value)| fact(label, value)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FixtureCatalog, ProjectCatalog};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn loaded(id: u32) -> ProjectDetailView {
        let catalog = FixtureCatalog::instant();
        let mut view = ProjectDetailView::new(id, ReturnCalculator::default(), 5_000);
        view.finish_loading(catalog.find(id).await.unwrap());
        view
    }

    #[test]
    fn test_starts_loading_and_ignores_keys() {
        let mut view = ProjectDetailView::new(1, ReturnCalculator::default(), 5_000);
        assert_eq!(view.state(), &DetailState::Loading);
        assert_eq!(view.handle_key(key(KeyCode::Enter)), ViewAction::None);
        assert_eq!(view.project_title(), None);
    }

    #[tokio::test]
    async fn test_loaded_project_exposes_title() {
        let view = loaded(1).await;
        assert_eq!(view.project_title(), Some("Casablanca Marina Residences"));
    }

    #[tokio::test]
    async fn test_unknown_project_offers_browse() {
        let mut view = loaded(2).await;
        assert_eq!(view.state(), &DetailState::NotFound);
        assert_eq!(
            view.handle_key(key(KeyCode::Enter)),
            ViewAction::Navigate(Route::Projects)
        );
    }

    #[tokio::test]
    async fn test_amount_editing() {
        let mut view = loaded(1).await;
        view.handle_key(key(KeyCode::Up));
        assert_eq!(view.amount(), 6_000);
        view.handle_key(key(KeyCode::Char('-')));
        view.handle_key(key(KeyCode::Char('-')));
        assert_eq!(view.amount(), 4_000);
        view.handle_key(key(KeyCode::Backspace));
        assert_eq!(view.amount(), 400);
        view.handle_key(key(KeyCode::Char('5')));
        assert_eq!(view.amount(), 4_005);
    }

    #[tokio::test]
    async fn test_tabs_and_images_wrap() {
        let mut view = loaded(1).await;
        for _ in 0..DetailTab::ALL.len() {
            view.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(view.tab(), DetailTab::Overview);
        view.handle_key(key(KeyCode::Left));
        let DetailState::Loaded(detail) = view.state() else {
            panic!("project 1 should load");
        };
        assert_eq!(view.image_index(), detail.images.len() - 1);
    }
}
