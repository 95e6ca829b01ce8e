//! Reusable form field widgets for TUI forms

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use crate::kyc::{DocumentHandle, FieldKind, FieldValue};

/// A form field widget that can handle different input types
pub enum FormField {
    /// Single-line text input
    TextInput {
        value: String,
        /// Cursor position in characters
        cursor_pos: usize,
        placeholder: String,
        /// Render as bullets (passwords)
        masked: bool,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        placeholder: String,
    },
    /// Choice from a fixed (value, label) table; `None` until picked
    Select {
        options: &'static [(&'static str, &'static str)],
        selected: Option<usize>,
        placeholder: String,
    },
    /// Checkbox
    Toggle { value: bool },
    /// Date input (YYYY-MM-DD format)
    DateInput { value: String, cursor_pos: usize },
    /// Path to a document; the file itself is never read
    DocumentPath { value: String, cursor_pos: usize },
}

fn byte_index(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

/// Shared line-editing keys for the single-line variants
fn edit_line(value: &mut String, cursor_pos: &mut usize, key: KeyCode, accept: impl Fn(char) -> bool) -> bool {
    let len = value.chars().count();
    match key {
        KeyCode::Char(c) if accept(c) => {
            value.insert(byte_index(value, *cursor_pos), c);
            *cursor_pos += 1;
            true
        }
        KeyCode::Backspace => {
            if *cursor_pos > 0 {
                *cursor_pos -= 1;
                value.remove(byte_index(value, *cursor_pos));
            }
            true
        }
        KeyCode::Delete => {
            if *cursor_pos < len {
                value.remove(byte_index(value, *cursor_pos));
            }
            true
        }
        KeyCode::Left => {
            *cursor_pos = cursor_pos.saturating_sub(1);
            true
        }
        KeyCode::Right => {
            if *cursor_pos < len {
                *cursor_pos += 1;
            }
            true
        }
        KeyCode::Home => {
            *cursor_pos = 0;
            true
        }
        KeyCode::End => {
            *cursor_pos = len;
            true
        }
        _ => false,
    }
}

fn with_cursor(text: &str, cursor_pos: usize) -> String {
    let mut shown = text.to_string();
    shown.insert(byte_index(&shown, cursor_pos), '|');
    shown
}

impl FormField {
    pub fn text(value: &str, placeholder: &str) -> Self {
        FormField::TextInput {
            cursor_pos: value.chars().count(),
            value: value.to_string(),
            placeholder: placeholder.to_string(),
            masked: false,
        }
    }

    pub fn password(value: &str, placeholder: &str) -> Self {
        FormField::TextInput {
            cursor_pos: value.chars().count(),
            value: value.to_string(),
            placeholder: placeholder.to_string(),
            masked: true,
        }
    }

    /// Build the widget for a KYC field from its kind and current value
    pub fn for_kind(kind: FieldKind, value: &FieldValue, placeholder: &str) -> Self {
        let text = match value {
            FieldValue::Text(t) => t.clone(),
            FieldValue::Document(Some(doc)) => doc.path().display().to_string(),
            _ => String::new(),
        };
        match kind {
            FieldKind::Text | FieldKind::Phone => Self::text(&text, placeholder),
            FieldKind::Date => FormField::DateInput {
                cursor_pos: text.chars().count(),
                value: text,
            },
            FieldKind::LongText => {
                let mut textarea = TextArea::default();
                textarea.insert_str(&text);
                FormField::TextArea {
                    textarea: Box::new(textarea),
                    placeholder: placeholder.to_string(),
                }
            }
            FieldKind::Select(options) => FormField::Select {
                selected: options.iter().position(|(v, _)| *v == text),
                options,
                placeholder: placeholder.to_string(),
            },
            FieldKind::Flag => FormField::Toggle {
                value: matches!(value, FieldValue::Flag(true)),
            },
            FieldKind::Document => FormField::DocumentPath {
                cursor_pos: text.chars().count(),
                value: text,
            },
        }
    }

    /// Get the current value as a string
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. }
            | FormField::DateInput { value, .. }
            | FormField::DocumentPath { value, .. } => value.clone(),
            FormField::TextArea { textarea, .. } => textarea.lines().join("\n"),
            FormField::Select {
                options, selected, ..
            } => selected
                .and_then(|i| options.get(i))
                .map(|(v, _)| (*v).to_string())
                .unwrap_or_default(),
            FormField::Toggle { value } => value.to_string(),
        }
    }

    /// Current value in the shape the KYC form stores
    pub fn field_value(&self) -> FieldValue {
        match self {
            FormField::Toggle { value } => FieldValue::Flag(*value),
            FormField::DocumentPath { value, .. } => {
                let trimmed = value.trim();
                FieldValue::Document(
                    (!trimmed.is_empty()).then(|| DocumentHandle::new(trimmed)),
                )
            }
            other => FieldValue::Text(other.value()),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::TextArea { .. })
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            }
            | FormField::DocumentPath { value, cursor_pos } => {
                edit_line(value, cursor_pos, key, |_| true)
            }
            FormField::DateInput { value, cursor_pos } => {
                let full = value.chars().count() >= 10;
                edit_line(value, cursor_pos, key, |c| {
                    !full && (c.is_ascii_digit() || c == '-')
                })
            }
            FormField::TextArea { textarea, .. } => {
                textarea.input(KeyEvent::new(key, KeyModifiers::NONE));
                true
            }
            FormField::Select {
                options, selected, ..
            } => match key {
                KeyCode::Up | KeyCode::Left => {
                    *selected = Some(match *selected {
                        Some(i) if i > 0 => i - 1,
                        Some(i) => i,
                        None => 0,
                    });
                    true
                }
                KeyCode::Down | KeyCode::Right => {
                    let last = options.len().saturating_sub(1);
                    *selected = Some(selected.map_or(0, |i| (i + 1).min(last)));
                    true
                }
                _ => false,
            },
            FormField::Toggle { value } => match key {
                KeyCode::Char(' ') => {
                    *value = !*value;
                    true
                }
                _ => false,
            },
        }
    }

    /// Get the height needed to render this field
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextArea { .. } => 5,
            _ => 1,
        }
    }

    /// Render the field
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let text_style = Style::default().fg(if focused { Color::White } else { Color::Gray });
        let placeholder_style = Style::default().fg(Color::DarkGray);

        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                masked,
            } => {
                let shown = if *masked {
                    "•".repeat(value.chars().count())
                } else {
                    value.clone()
                };
                let line = if value.is_empty() && !focused {
                    Line::from(Span::styled(placeholder.as_str(), placeholder_style))
                } else if focused {
                    Line::from(with_cursor(&shown, *cursor_pos))
                } else {
                    Line::from(shown)
                };
                frame.render_widget(Paragraph::new(line).style(text_style), area);
            }
            FormField::DateInput { value, cursor_pos }
            | FormField::DocumentPath { value, cursor_pos } => {
                let is_date = value.len() <= 10 && value.chars().all(|c| c.is_ascii_digit() || c == '-');
                let line = if value.is_empty() && !focused {
                    let hint = if is_date { "YYYY-MM-DD" } else { "path/to/file.pdf" };
                    Line::from(Span::styled(hint, placeholder_style))
                } else if focused {
                    Line::from(with_cursor(value, *cursor_pos))
                } else {
                    Line::from(value.as_str())
                };
                frame.render_widget(Paragraph::new(line).style(text_style), area);
            }
            FormField::TextArea {
                textarea,
                placeholder,
            } => {
                let border_color = if focused { Color::Cyan } else { Color::Gray };
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );
                textarea.set_placeholder_text(placeholder.clone());
                textarea.set_placeholder_style(placeholder_style);

                frame.render_widget(&**textarea, area);
            }
            FormField::Select {
                options,
                selected,
                placeholder,
            } => {
                let label = selected
                    .and_then(|i| options.get(i))
                    .map(|(_, label)| Span::styled(*label, text_style.add_modifier(Modifier::BOLD)))
                    .unwrap_or_else(|| Span::styled(placeholder.clone(), placeholder_style));
                let arrows = if focused { "◂ " } else { "  " };
                let line = Line::from(vec![
                    Span::styled(arrows, Style::default().fg(Color::Cyan)),
                    label,
                    Span::styled(if focused { " ▸" } else { "" }, Style::default().fg(Color::Cyan)),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
            FormField::Toggle { value } => {
                let (mark, style) = if *value {
                    ("[x]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                } else {
                    ("[ ]", Style::default().fg(Color::DarkGray))
                };
                frame.render_widget(Paragraph::new(Span::styled(mark, style)), area);
            }
        }
    }
}

/// Focus ring over a list of keyed fields followed by `buttons` push
/// buttons. Tab order wraps at both ends.
pub struct FieldForm<K> {
    pub fields: Vec<(K, FormField)>,
    pub focused_index: usize,
    buttons: usize,
}

impl<K: Copy + PartialEq> FieldForm<K> {
    pub fn new(fields: Vec<(K, FormField)>) -> Self {
        Self::with_buttons(fields, 0)
    }

    pub fn with_buttons(fields: Vec<(K, FormField)>, buttons: usize) -> Self {
        Self {
            fields,
            focused_index: 0,
            buttons,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn stops(&self) -> usize {
        self.fields.len() + self.buttons
    }

    pub fn focused_key(&self) -> Option<K> {
        self.fields.get(self.focused_index).map(|(k, _)| *k)
    }

    /// Index of the focused button, if focus is past the fields
    pub fn focused_button(&self) -> Option<usize> {
        self.focused_index
            .checked_sub(self.fields.len())
            .filter(|i| *i < self.buttons)
    }

    pub fn focused_field_mut(&mut self) -> Option<(K, &mut FormField)> {
        self.fields
            .get_mut(self.focused_index)
            .map(|(k, f)| (*k, f))
    }

    pub fn get(&self, key: K) -> Option<&FormField> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, f)| f)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut FormField> {
        self.fields
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, f)| f)
    }

    pub fn next_field(&mut self) {
        let stops = self.stops();
        if stops > 0 {
            self.focused_index = (self.focused_index + 1) % stops;
        }
    }

    pub fn prev_field(&mut self) {
        let stops = self.stops();
        if stops > 0 {
            self.focused_index = (self.focused_index + stops - 1) % stops;
        }
    }

    pub fn focus_button(&mut self, index: usize) {
        if index < self.buttons {
            self.focused_index = self.fields.len() + index;
        }
    }

    /// Check if we're on the last stop
    pub fn is_last_field(&self) -> bool {
        self.focused_index + 1 >= self.stops()
    }

    /// Check if we're on the first stop
    pub fn is_first_field(&self) -> bool {
        self.focused_index == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyc::{KycField, ID_TYPES};

    #[test]
    fn test_text_input_handles_chars() {
        let mut field = FormField::text("", "Name");
        assert!(field.handle_key(KeyCode::Char('h')));
        assert!(field.handle_key(KeyCode::Char('i')));
        assert_eq!(field.value(), "hi");
    }

    #[test]
    fn test_text_input_edits_multibyte_text() {
        let mut field = FormField::text("Fès", "");
        field.handle_key(KeyCode::Left);
        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), "Fs");
        field.handle_key(KeyCode::Char('é'));
        assert_eq!(field.value(), "Fés");
    }

    #[test]
    fn test_date_input_rejects_letters_and_overflow() {
        let mut field = FormField::for_kind(FieldKind::Date, &FieldValue::text(""), "");
        for c in "1990-0a5-17".chars() {
            field.handle_key(KeyCode::Char(c));
        }
        assert_eq!(field.value(), "1990-05-17");
        field.handle_key(KeyCode::Char('9'));
        assert_eq!(field.value(), "1990-05-17");
    }

    #[test]
    fn test_select_starts_on_current_value() {
        let field = FormField::for_kind(
            KycField::IdType.kind(),
            &FieldValue::text("passport"),
            "Select ID Type",
        );
        assert_eq!(field.value(), "passport");
    }

    #[test]
    fn test_select_navigation_from_unset() {
        let mut field = FormField::Select {
            options: ID_TYPES,
            selected: None,
            placeholder: "Select".into(),
        };
        assert_eq!(field.value(), "");
        field.handle_key(KeyCode::Down);
        assert_eq!(field.value(), "passport");
        field.handle_key(KeyCode::Down);
        field.handle_key(KeyCode::Down);
        field.handle_key(KeyCode::Down);
        assert_eq!(field.value(), "drivers_license");
        field.handle_key(KeyCode::Up);
        assert_eq!(field.value(), "national_id");
    }

    #[test]
    fn test_toggle_and_document_values() {
        let mut toggle = FormField::for_kind(FieldKind::Flag, &FieldValue::Flag(false), "");
        toggle.handle_key(KeyCode::Char(' '));
        assert_eq!(toggle.field_value(), FieldValue::Flag(true));

        let mut doc = FormField::for_kind(FieldKind::Document, &FieldValue::Document(None), "");
        assert_eq!(doc.field_value(), FieldValue::Document(None));
        for c in "id.pdf".chars() {
            doc.handle_key(KeyCode::Char(c));
        }
        assert_eq!(
            doc.field_value(),
            FieldValue::Document(Some(DocumentHandle::new("id.pdf")))
        );
    }

    #[test]
    fn test_field_form_focus_wraps_through_buttons() {
        let mut form = FieldForm::with_buttons(
            vec![(1u8, FormField::text("", "")), (2u8, FormField::text("", ""))],
            1,
        );
        assert!(form.is_first_field());
        form.prev_field();
        assert_eq!(form.focused_key(), None);
        assert_eq!(form.focused_button(), Some(0));
        assert!(form.is_last_field());
        form.next_field();
        assert_eq!(form.focused_key(), Some(1));
        form.next_field();
        assert_eq!(form.focused_key(), Some(2));
        assert_eq!(form.focused_button(), None);
    }
}
