//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the shortcuts shown by `HelpDialog` and by
//! the footer hint line of each screen.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., arrow key variant)
    pub alt_key: Option<KeyCode>,
    /// Whether Ctrl must be held
    pub ctrl: bool,
    pub description: &'static str,
    pub category: ShortcutCategory,
    pub context: ShortcutContext,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

/// Screens where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Active on every screen
    Global,
    Home,
    Projects,
    ProjectDetail,
    KycWizard,
    Register,
}

impl ShortcutCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navigation",
            ShortcutCategory::Actions => "Actions",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
        ]
    }
}

impl ShortcutContext {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Global => "Everywhere",
            ShortcutContext::Home => "Home",
            ShortcutContext::Projects => "Projects",
            ShortcutContext::ProjectDetail => "Project Details",
            ShortcutContext::KycWizard => "KYC Verification",
            ShortcutContext::Register => "Registration",
        }
    }

    /// All contexts in display order
    pub fn all() -> &'static [ShortcutContext] {
        &[
            ShortcutContext::Global,
            ShortcutContext::Home,
            ShortcutContext::Projects,
            ShortcutContext::ProjectDetail,
            ShortcutContext::KycWizard,
            ShortcutContext::Register,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "F2", "Tab", "Ctrl+S", "↑/k")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        let primary = if self.ctrl {
            format!("Ctrl+{}", primary.to_uppercase())
        } else {
            primary
        };
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for help dialog (left-padded to 12 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<12}", self.key_display())
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", key),
    }
}

const fn shortcut(
    key: KeyCode,
    alt_key: Option<KeyCode>,
    ctrl: bool,
    description: &'static str,
    category: ShortcutCategory,
    context: ShortcutContext,
) -> Shortcut {
    Shortcut {
        key,
        alt_key,
        ctrl,
        description,
        category,
        context,
    }
}

use ShortcutCategory::{Actions, General, Navigation};
use ShortcutContext::{Global, Home, KycWizard, ProjectDetail, Projects, Register};

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Global ===
    shortcut(KeyCode::Char('c'), None, true, "Quit", General, Global),
    shortcut(KeyCode::F(1), None, false, "Toggle help", General, Global),
    shortcut(KeyCode::Esc, None, false, "Back", Navigation, Global),
    shortcut(KeyCode::F(2), None, false, "Home", Navigation, Global),
    shortcut(KeyCode::F(3), None, false, "Browse projects", Navigation, Global),
    shortcut(KeyCode::F(4), None, false, "KYC verification", Navigation, Global),
    shortcut(KeyCode::F(5), None, false, "Create account", Navigation, Global),
    // === Home ===
    shortcut(KeyCode::Down, Some(KeyCode::Char('j')), false, "Next featured project", Navigation, Home),
    shortcut(KeyCode::Up, Some(KeyCode::Char('k')), false, "Previous featured project", Navigation, Home),
    shortcut(KeyCode::Enter, None, false, "Open project", Actions, Home),
    shortcut(KeyCode::Char('p'), None, false, "View all projects", Actions, Home),
    shortcut(KeyCode::Char('r'), None, false, "Get started (register)", Actions, Home),
    // === Projects ===
    shortcut(KeyCode::Tab, None, false, "Next filter control", Navigation, Projects),
    shortcut(KeyCode::BackTab, None, false, "Previous filter control", Navigation, Projects),
    shortcut(KeyCode::Left, Some(KeyCode::Right), false, "Change location, type or minimum", Actions, Projects),
    shortcut(KeyCode::Down, Some(KeyCode::Up), false, "Move through results", Navigation, Projects),
    shortcut(KeyCode::Enter, None, false, "Open project / reset filters", Actions, Projects),
    shortcut(KeyCode::Char('r'), None, true, "Reset filters", Actions, Projects),
    // === Project detail ===
    shortcut(KeyCode::Tab, None, false, "Next tab", Navigation, ProjectDetail),
    shortcut(KeyCode::Left, Some(KeyCode::Right), false, "Previous/next image", Navigation, ProjectDetail),
    shortcut(KeyCode::Up, Some(KeyCode::Char('+')), false, "Increase amount", Actions, ProjectDetail),
    shortcut(KeyCode::Down, Some(KeyCode::Char('-')), false, "Decrease amount", Actions, ProjectDetail),
    shortcut(KeyCode::Backspace, None, false, "Edit amount (or type digits)", Actions, ProjectDetail),
    shortcut(KeyCode::Enter, None, false, "Invest now", Actions, ProjectDetail),
    // === KYC wizard ===
    shortcut(KeyCode::Tab, Some(KeyCode::BackTab), false, "Next/previous field", Navigation, KycWizard),
    shortcut(KeyCode::Up, Some(KeyCode::Down), false, "Choose option", Actions, KycWizard),
    shortcut(KeyCode::Char(' '), None, false, "Toggle checkbox", Actions, KycWizard),
    shortcut(KeyCode::Char('n'), None, true, "Next step", Navigation, KycWizard),
    shortcut(KeyCode::Char('p'), None, true, "Previous step", Navigation, KycWizard),
    shortcut(KeyCode::Char('s'), None, true, "Submit application", Actions, KycWizard),
    shortcut(KeyCode::Enter, None, false, "Press focused button", Actions, KycWizard),
    // === Register ===
    shortcut(KeyCode::Tab, Some(KeyCode::BackTab), false, "Next/previous field", Navigation, Register),
    shortcut(KeyCode::Char(' '), None, false, "Toggle terms", Actions, Register),
    shortcut(KeyCode::Char('s'), None, true, "Create account", Actions, Register),
    shortcut(KeyCode::Enter, None, false, "Press focused button", Actions, Register),
];

/// Get all shortcuts for a given context
pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Get shortcuts grouped by category for a given context
pub fn shortcuts_by_category_for_context(
    context: ShortcutContext,
) -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.context == context && s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

/// One-line hint for a screen's footer, e.g. "Tab next filter control · ..."
pub fn footer_hint(context: ShortcutContext) -> String {
    shortcuts_for_context(context)
        .chain(shortcuts_for_context(ShortcutContext::Global).take(2))
        .map(|s| format!("{} {}", s.key_display(), s.description.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" · ")
}
