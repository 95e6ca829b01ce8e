//! KYC wizard rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::{KycWizard, WizardButton};
use crate::kyc::{FieldKind, KycField, KycStep};
use crate::ui::keybindings::ShortcutContext;
use crate::ui::{button, render_footer};

const INTRO: &str = "To comply with regulations and ensure the security of our platform, we \
need to verify your identity. Please complete the form below with accurate information.";

/// Rows a field takes: label, widget, hint and a blank separator
fn field_height(field: KycField, widget_height: u16) -> u16 {
    let hint = match field.hint() {
        Some(h) if h.len() > 70 => 2,
        Some(_) => 1,
        None => 0,
    };
    match field.kind() {
        // Checkbox and label share the first rows
        FieldKind::Flag => 2 + hint + 1,
        _ => 1 + widget_height + hint + 1,
    }
}

impl KycWizard {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Heading and intro
                Constraint::Length(1), // Progress bar
                Constraint::Length(1), // Step tabs
                Constraint::Min(6),    // Step body
                Constraint::Length(1), // Buttons
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "KYC Verification",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(INTRO, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(header, rows[0]);

        let step = self.stepper.step();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(step.progress_percent())
            .label(format!("Step {} of {}", step.number(), KycStep::COUNT));
        frame.render_widget(gauge, rows[1]);

        self.render_tabs(frame, rows[2]);
        self.render_fields(frame, rows[3]);
        self.render_buttons(frame, rows[4]);
        render_footer(frame, rows[5], ShortcutContext::KycWizard);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let current = self.stepper.step().number();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, u32::from(KycStep::COUNT)); KycStep::COUNT as usize])
            .split(area);
        for (step, cell) in KycStep::all().iter().zip(cells.iter()) {
            let style = if step.number() <= current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(step.tab_label(), style)).alignment(Alignment::Center),
                *cell,
            );
        }
    }

    fn render_fields(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.stepper.step().heading()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let heights: Vec<u16> = self
            .form
            .fields
            .iter()
            .map(|(field, widget)| field_height(*field, widget.render_height()))
            .collect();

        // Keep the focused field on screen
        let focus = self.form.focused_index.min(heights.len().saturating_sub(1));
        if focus < self.scroll {
            self.scroll = focus;
        }
        while self.scroll < focus
            && heights[self.scroll..=focus].iter().sum::<u16>() > inner.height
        {
            self.scroll += 1;
        }

        let mut y = inner.y;
        let bottom = inner.y + inner.height;
        let focused_index = self.form.focused_index;
        for (i, (field, widget)) in self.form.fields.iter_mut().enumerate().skip(self.scroll) {
            let height = heights[i];
            if y + height > bottom {
                break;
            }
            let focused = i == focused_index;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if field.required() { " *" } else { "" };
            let hint_style = Style::default().fg(Color::DarkGray);

            if field.kind() == FieldKind::Flag {
                let parts = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(4), Constraint::Min(10)])
                    .split(Rect::new(inner.x, y, inner.width, height - 1));
                widget.render(frame, parts[0], focused);
                let mut lines = vec![Line::from(vec![
                    Span::styled(field.label(), label_style),
                    Span::styled(marker, Style::default().fg(Color::Red)),
                ])];
                if let Some(hint) = field.hint() {
                    lines.push(Line::from(Span::styled(hint, hint_style)));
                }
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), parts[1]);
            } else {
                let widget_height = widget.render_height();
                frame.render_widget(
                    Paragraph::new(Line::from(vec![
                        Span::styled(field.label(), label_style),
                        Span::styled(marker, Style::default().fg(Color::Red)),
                    ])),
                    Rect::new(inner.x, y, inner.width, 1),
                );
                widget.render(
                    frame,
                    Rect::new(inner.x + 2, y + 1, inner.width.saturating_sub(2), widget_height),
                    focused,
                );
                let hint_rows = height - widget_height - 2;
                if hint_rows > 0 && !widget.is_multiline() {
                    if let Some(hint) = field.hint() {
                        frame.render_widget(
                            Paragraph::new(Span::styled(hint, hint_style))
                                .wrap(Wrap { trim: true }),
                            Rect::new(inner.x + 2, y + 1 + widget_height, inner.width.saturating_sub(2), hint_rows),
                        );
                    }
                }
            }
            y += height;
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let step = self.stepper.step();
        let submitting = self.stepper.is_submitting();
        let focused = self.focused_button();
        let mut spans = Vec::new();
        for b in &self.buttons {
            let enabled = match b {
                WizardButton::Submit => self.stepper.submit_enabled(),
                _ => !submitting,
            };
            spans.push(button(b.label(step, submitting), focused == Some(*b), enabled));
            spans.push(Span::raw("  "));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
            area,
        );
    }
}
