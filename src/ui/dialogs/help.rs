use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::ui::keybindings::{shortcuts_by_category_for_context, ShortcutContext};

/// Overlay listing the global shortcuts plus those of the current screen
pub struct HelpDialog {
    pub visible: bool,
}

impl Default for HelpDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpDialog {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn section(context: ShortcutContext) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            format!("{}:", context.display_name()),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        ))];
        for (_, shortcuts) in shortcuts_by_category_for_context(context) {
            for shortcut in shortcuts {
                lines.push(Line::from(vec![
                    Span::styled(
                        shortcut.key_display_padded(),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(shortcut.description),
                ]));
            }
        }
        lines
    }

    /// Help text for a screen; global keys always come first
    pub fn lines(context: ShortcutContext) -> Vec<Line<'static>> {
        let mut help_text = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            )),
            Line::from(""),
        ];
        help_text.extend(Self::section(ShortcutContext::Global));
        if context != ShortcutContext::Global {
            help_text.push(Line::from(""));
            help_text.extend(Self::section(context));
        }

        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::Gray),
        )));
        help_text
    }

    pub fn render(&self, frame: &mut Frame, context: ShortcutContext) {
        if !self.visible {
            return;
        }

        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);

        let help = Paragraph::new(Self::lines(context))
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_help_dialog_toggle() {
        let mut dialog = HelpDialog::new();
        assert!(!dialog.visible);

        dialog.toggle();
        assert!(dialog.visible);

        dialog.toggle();
        assert!(!dialog.visible);
    }

    #[test]
    fn test_help_lists_screen_section_after_globals() {
        let text = plain(&HelpDialog::lines(ShortcutContext::KycWizard));
        let global = text.iter().position(|l| l == "Everywhere:").unwrap();
        let kyc = text.iter().position(|l| l == "KYC Verification:").unwrap();
        assert!(global < kyc);
        assert!(text.iter().any(|l| l.contains("Submit application")));
        assert_eq!(text.last().unwrap(), "Press any key to close");
    }

    #[test]
    fn test_global_help_has_single_section() {
        let text = plain(&HelpDialog::lines(ShortcutContext::Global));
        assert_eq!(text.iter().filter(|l| l.ends_with(':')).count(), 1);
    }
}
