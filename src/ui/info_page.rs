//! Static pages that only carry a heading and placeholder text

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::keybindings::ShortcutContext;
use super::{button, render_footer, ViewAction};
use crate::routes::Route;

pub struct InfoPage {
    route: Route,
}

impl InfoPage {
    pub fn new(route: Route) -> Self {
        Self { route }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn body(&self) -> String {
        match &self.route {
            Route::NotFound(path) => format!("Oops! The page {path} could not be found."),
            other => format!(
                "The {} page is coming soon.",
                other.page_name().to_lowercase()
            ),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        match key.code {
            KeyCode::Enter => ViewAction::Navigate(Route::Home),
            _ => ViewAction::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);

        let page = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                self.route.page_name(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(self.body()),
            Line::from(""),
            Line::from(button("Return to Home", true, true)),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(page, rows[0]);
        render_footer(frame, rows[1], ShortcutContext::Global);
    }
}
