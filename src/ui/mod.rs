pub mod dialogs;
pub mod form_field;
pub mod home;
pub mod info_page;
pub mod keybindings;
pub mod kyc_wizard;
pub mod project_detail;
pub mod projects_view;
pub mod register_view;
pub mod terminal_guard;
pub mod toasts;

pub use dialogs::HelpDialog;
pub use home::HomeView;
pub use info_page::InfoPage;
pub use kyc_wizard::KycWizard;
pub use project_detail::ProjectDetailView;
pub use projects_view::ProjectsView;
pub use register_view::RegisterView;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::kyc::KycForm;
use crate::notifications::NotificationEvent;
use crate::register::RegistrationForm;
use crate::routes::Route;
use keybindings::{footer_hint, ShortcutContext};

/// What a screen asks the app loop to do after handling a key
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    None,
    Navigate(Route),
    Back,
    /// The wizard entered the submitting state with this snapshot
    SubmitKyc(KycForm),
    SubmitRegistration(RegistrationForm),
    Notify(NotificationEvent),
    Quit,
}

/// Dim one-line key hint at the bottom of a screen
pub(crate) fn render_footer(frame: &mut Frame, area: Rect, context: ShortcutContext) {
    let hint = Paragraph::new(Line::from(Span::styled(
        footer_hint(context),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hint, area);
}

/// Label for a push button; the focused one is highlighted
pub(crate) fn button<'a>(label: &'a str, focused: bool, enabled: bool) -> Span<'a> {
    let style = match (focused, enabled) {
        (_, false) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Black).bg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Cyan),
    };
    Span::styled(format!("[ {label} ]"), style)
}
