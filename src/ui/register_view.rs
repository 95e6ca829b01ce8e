//! Account registration screen

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::dialogs::centered_rect;
use super::form_field::{FieldForm, FormField};
use super::keybindings::ShortcutContext;
use super::{button, render_footer, ViewAction};
use crate::kyc::FieldValue;
use crate::notifications::NotificationEvent;
use crate::register::{RegisterController, RegisterField, PASSWORD_HINT};
use crate::submission::{SubmissionError, SubmissionReceipt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterSlot {
    Field(RegisterField),
    Terms,
}

pub struct RegisterView {
    controller: RegisterController,
    form: FieldForm<RegisterSlot>,
}

impl Default for RegisterView {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterView {
    pub fn new() -> Self {
        let mut fields: Vec<(RegisterSlot, FormField)> = RegisterField::all()
            .iter()
            .map(|f| {
                let placeholder = f.placeholder().unwrap_or("");
                let widget = if f.is_secret() {
                    FormField::password("", placeholder)
                } else {
                    FormField::text("", placeholder)
                };
                (RegisterSlot::Field(*f), widget)
            })
            .collect();
        fields.push((RegisterSlot::Terms, FormField::Toggle { value: false }));

        Self {
            controller: RegisterController::new(),
            form: FieldForm::with_buttons(fields, 1),
        }
    }

    pub fn controller(&self) -> &RegisterController {
        &self.controller
    }

    pub fn complete_submission(
        &mut self,
        outcome: Result<SubmissionReceipt, SubmissionError>,
    ) -> NotificationEvent {
        self.controller.complete_submission(outcome)
    }

    fn submit(&mut self) -> ViewAction {
        match self.controller.begin_submission() {
            Ok(form) => ViewAction::SubmitRegistration(form),
            Err(e) => e
                .notification()
                .map_or(ViewAction::None, ViewAction::Notify),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => self.submit(),
                _ => ViewAction::None,
            };
        }

        match key.code {
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Enter if self.form.focused_button().is_some() => return self.submit(),
            KeyCode::Enter => self.form.next_field(),
            code => {
                let Some((slot, field)) = self.form.focused_field_mut() else {
                    return ViewAction::None;
                };
                if field.handle_key(code) {
                    match slot {
                        RegisterSlot::Field(f) => self.controller.update_field(f, field.value()),
                        RegisterSlot::Terms => self
                            .controller
                            .set_accept_terms(field.field_value() == FieldValue::Flag(true)),
                    }
                }
            }
        }
        ViewAction::None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(1)])
            .split(area);
        let card = centered_rect(60, 100, rows[0]);

        let block = Block::default()
            .title(" Create Your Account ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut constraints = vec![Constraint::Length(2)]; // Subtitle
        constraints.extend(RegisterField::all().iter().map(|f| {
            // Label + input, plus the hint under the password
            Constraint::Length(if *f == RegisterField::Password { 3 } else { 2 })
        }));
        constraints.push(Constraint::Length(2)); // Terms
        constraints.push(Constraint::Length(1)); // Button
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(inner);

        frame.render_widget(
            Paragraph::new("Join Morocco's premier real estate investment platform")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center),
            chunks[0],
        );

        let focused_index = self.form.focused_index;
        for (i, (slot, field)) in self.form.fields.iter_mut().enumerate() {
            let area = chunks[i + 1];
            let focused = i == focused_index;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            match slot {
                RegisterSlot::Field(f) => {
                    let parts = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
                        .split(area);
                    frame.render_widget(Paragraph::new(Span::styled(f.label(), label_style)), parts[0]);
                    field.render(frame, parts[1], focused);
                    if *f == RegisterField::Password {
                        frame.render_widget(
                            Paragraph::new(Span::styled(
                                PASSWORD_HINT,
                                Style::default().fg(Color::DarkGray),
                            )),
                            parts[2],
                        );
                    }
                }
                RegisterSlot::Terms => {
                    let parts = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Length(4), Constraint::Min(10)])
                        .split(area);
                    field.render(frame, parts[0], focused);
                    frame.render_widget(
                        Paragraph::new(Span::styled(
                            "I agree to the Terms of Service and Privacy Policy",
                            label_style,
                        )),
                        parts[1],
                    );
                }
            }
        }

        let label = if self.controller.is_submitting() {
            "Creating Account..."
        } else {
            "Create Account"
        };
        let button_line = Line::from(button(
            label,
            self.form.focused_button().is_some(),
            self.controller.submit_enabled(),
        ));
        frame.render_widget(
            Paragraph::new(button_line).alignment(Alignment::Center),
            chunks[RegisterField::all().len() + 2],
        );

        render_footer(frame, rows[1], ShortcutContext::Register);
    }
}
