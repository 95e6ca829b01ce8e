use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use crate::calculator::ReturnCalculator;
use crate::catalog::{CatalogError, FixtureCatalog, ProjectCatalog, ProjectDetail};
use crate::config::Config;
use crate::notifications::{NotificationService, ToastQueue};
use crate::routes::Route;
use crate::submission::{SimulatedSubmission, SubmissionError, SubmissionPort, SubmissionReceipt};
use crate::ui::home::FEATURED_COUNT;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::toasts::render_toasts;
use crate::ui::{
    HelpDialog, HomeView, InfoPage, KycWizard, ProjectDetailView, ProjectsView, RegisterView,
    ViewAction,
};

/// The page currently on screen. Each variant owns its page state.
pub enum Screen {
    Home(HomeView),
    Projects(ProjectsView),
    ProjectDetail(ProjectDetailView),
    Kyc(KycWizard),
    Register(RegisterView),
    Info(InfoPage),
}

impl Screen {
    fn context(&self) -> ShortcutContext {
        match self {
            Screen::Home(_) => ShortcutContext::Home,
            Screen::Projects(_) => ShortcutContext::Projects,
            Screen::ProjectDetail(_) => ShortcutContext::ProjectDetail,
            Screen::Kyc(_) => ShortcutContext::KycWizard,
            Screen::Register(_) => ShortcutContext::Register,
            Screen::Info(_) => ShortcutContext::Global,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        match self {
            Screen::Home(view) => view.handle_key(key),
            Screen::Projects(view) => view.handle_key(key),
            Screen::ProjectDetail(view) => view.handle_key(key),
            Screen::Kyc(view) => view.handle_key(key),
            Screen::Register(view) => view.handle_key(key),
            Screen::Info(view) => view.handle_key(key),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self {
            Screen::Home(view) => view.render(frame, area),
            Screen::Projects(view) => view.render(frame, area),
            Screen::ProjectDetail(view) => view.render(frame, area),
            Screen::Kyc(view) => view.render(frame, area),
            Screen::Register(view) => view.render(frame, area),
            Screen::Info(view) => view.render(frame, area),
        }
    }
}

/// Result of a background task, delivered back to the event loop
#[derive(Debug)]
pub enum TaskOutcome {
    KycFinished(Result<SubmissionReceipt, SubmissionError>),
    RegistrationFinished(Result<SubmissionReceipt, SubmissionError>),
    DetailLoaded(Result<Option<ProjectDetail>, CatalogError>),
}

/// A task outcome tagged with the screen generation that spawned it
#[derive(Debug)]
pub struct TaskMessage {
    generation: u64,
    outcome: TaskOutcome,
}

pub struct App {
    config: Config,
    route: Route,
    history: Vec<Route>,
    screen: Screen,
    /// Bumped every time a screen is opened; stale task results are dropped
    generation: u64,
    help_dialog: HelpDialog,
    toasts: ToastQueue,
    notifier: NotificationService,
    catalog: Arc<dyn ProjectCatalog>,
    port: Arc<dyn SubmissionPort>,
    tasks_tx: mpsc::UnboundedSender<TaskMessage>,
    tasks_rx: mpsc::UnboundedReceiver<TaskMessage>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, start: Route) -> Self {
        let catalog = Arc::new(FixtureCatalog::new(config.submission.detail_delay()));
        let port = Arc::new(SimulatedSubmission::from_config(&config.submission));
        let toasts = ToastQueue::new();
        let notifier = NotificationService::from_config(&config, toasts.clone());
        Self::with_services(config, start, catalog, port, toasts, notifier)
    }

    /// Build an app around explicit collaborators
    pub fn with_services(
        config: Config,
        start: Route,
        catalog: Arc<dyn ProjectCatalog>,
        port: Arc<dyn SubmissionPort>,
        toasts: ToastQueue,
        notifier: NotificationService,
    ) -> Self {
        let (tasks_tx, tasks_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            config,
            route: Route::Home,
            history: Vec::new(),
            screen: Screen::Info(InfoPage::new(Route::Home)),
            generation: 0,
            help_dialog: HelpDialog::new(),
            toasts,
            notifier,
            catalog,
            port,
            tasks_tx,
            tasks_rx,
            should_quit: false,
        };
        app.open(start);
        app
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Window title for the current route
    pub fn title(&self) -> String {
        let project_title = match &self.screen {
            Screen::ProjectDetail(view) => view.project_title(),
            _ => None,
        };
        self.route.title(&self.config.ui.site_name, project_title)
    }

    pub async fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let guard = TerminalGuard::new().context("failed to initialize terminal")?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = self.config.tick_rate();
        let mut shown_title = String::new();

        while !self.should_quit {
            let title = self.title();
            if title != shown_title {
                TerminalGuard::set_title(&title)?;
                shown_title = title;
            }

            let toasts = self.toasts.active(Instant::now());
            let context = self.screen.context();
            terminal.draw(|f| {
                let area = f.area();
                self.screen.render(f, area);
                render_toasts(f, &toasts);
                self.help_dialog.render(f, context);
            })?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                    }
                }
            }

            while let Ok(message) = self.tasks_rx.try_recv() {
                self.handle_task(message).await;
            }
        }

        drop(guard);
        Ok(())
    }

    /// Replace the current screen with a fresh one for `route`
    fn open(&mut self, route: Route) {
        self.generation += 1;
        tracing::info!(route = %route, generation = self.generation, "Opening page");

        self.screen = match &route {
            info if info.is_informational() => Screen::Info(InfoPage::new(info.clone())),
            Route::Home => Screen::Home(HomeView::new(
                self.catalog.featured(FEATURED_COUNT).to_vec(),
            )),
            Route::Projects => Screen::Projects(ProjectsView::new(self.catalog.projects().to_vec())),
            Route::ProjectDetail(id) => {
                self.spawn_detail_lookup(*id);
                Screen::ProjectDetail(ProjectDetailView::new(
                    *id,
                    ReturnCalculator::new(&self.config.calculator),
                    self.config.calculator.default_amount,
                ))
            }
            Route::Kyc => Screen::Kyc(KycWizard::new()),
            Route::Register => Screen::Register(RegisterView::new()),
            other => {
                tracing::warn!(route = %other, "No screen for route");
                Screen::Info(InfoPage::new(other.clone()))
            }
        };
        self.route = route;
    }

    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let previous = std::mem::replace(&mut self.route, Route::Home);
        self.history.push(previous);
        self.open(route);
    }

    /// Return to the previous page; a fresh state is built for it
    pub fn back(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.open(previous);
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if self.help_dialog.visible {
            self.help_dialog.visible = false;
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let global = match key.code {
            KeyCode::F(1) => {
                self.help_dialog.toggle();
                return;
            }
            KeyCode::Esc => Some(ViewAction::Back),
            KeyCode::F(2) => Some(ViewAction::Navigate(Route::Home)),
            KeyCode::F(3) => Some(ViewAction::Navigate(Route::Projects)),
            KeyCode::F(4) => Some(ViewAction::Navigate(Route::Kyc)),
            KeyCode::F(5) => Some(ViewAction::Navigate(Route::Register)),
            _ => None,
        };
        let action = match global {
            Some(action) => action,
            None => self.screen.handle_key(key),
        };
        self.apply(action).await;
    }

    async fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::None => {}
            ViewAction::Navigate(route) => self.navigate(route),
            ViewAction::Back => self.back(),
            ViewAction::Quit => self.should_quit = true,
            ViewAction::Notify(event) => self.notifier.notify(event).await,
            ViewAction::SubmitKyc(form) => {
                let port = Arc::clone(&self.port);
                self.spawn(async move { TaskOutcome::KycFinished(port.submit_kyc(&form).await) });
            }
            ViewAction::SubmitRegistration(form) => {
                let port = Arc::clone(&self.port);
                self.spawn(async move {
                    TaskOutcome::RegistrationFinished(port.submit_registration(&form).await)
                });
            }
        }
    }

    fn spawn_detail_lookup(&self, id: u32) {
        let catalog = Arc::clone(&self.catalog);
        self.spawn(async move { TaskOutcome::DetailLoaded(catalog.find(id).await) });
    }

    /// Run `task` on the runtime and send its outcome to the loop
    fn spawn<F>(&self, task: F)
    where
        F: std::future::Future<Output = TaskOutcome> + Send + 'static,
    {
        let tx = self.tasks_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let outcome = task.await;
            if tx.send(TaskMessage { generation, outcome }).is_err() {
                tracing::debug!("Event loop gone, task outcome discarded");
            }
        });
    }

    /// Wait for the next background task and apply its outcome
    pub async fn process_next_task(&mut self) -> bool {
        match self.tasks_rx.recv().await {
            Some(message) => {
                self.handle_task(message).await;
                true
            }
            None => false,
        }
    }

    async fn handle_task(&mut self, message: TaskMessage) {
        if message.generation != self.generation {
            tracing::debug!(
                generation = message.generation,
                current = self.generation,
                "Dropping result for a page that was left"
            );
            return;
        }

        let event = match (message.outcome, &mut self.screen) {
            (TaskOutcome::KycFinished(outcome), Screen::Kyc(wizard)) => {
                Some(wizard.complete_submission(outcome))
            }
            (TaskOutcome::RegistrationFinished(outcome), Screen::Register(view)) => {
                Some(view.complete_submission(outcome))
            }
            (TaskOutcome::DetailLoaded(result), Screen::ProjectDetail(view)) => {
                match result {
                    Ok(detail) => view.finish_loading(detail),
                    Err(e) => {
                        tracing::warn!(project_id = view.id(), error = %e, "Project lookup failed");
                        view.finish_loading(None);
                    }
                }
                None
            }
            (outcome, _) => {
                tracing::warn!(?outcome, "Task outcome does not match the current page");
                None
            }
        };

        if let Some(event) = event {
            self.notifier.notify(event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::project_detail::DetailState;
    use std::time::Duration;

    fn app(start: Route) -> App {
        let toasts = ToastQueue::new();
        App::with_services(
            Config::default(),
            start,
            Arc::new(FixtureCatalog::instant()),
            Arc::new(SimulatedSubmission::new(
                Duration::from_millis(2000),
                Duration::from_millis(1500),
            )),
            toasts.clone(),
            NotificationService::toasts_only(toasts),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_function_keys_navigate_and_esc_goes_back() {
        let mut app = app(Route::Home);
        app.handle_key(key(KeyCode::F(3))).await;
        assert_eq!(app.route(), &Route::Projects);
        app.handle_key(key(KeyCode::F(4))).await;
        assert_eq!(app.route(), &Route::Kyc);
        app.handle_key(key(KeyCode::Esc)).await;
        assert_eq!(app.route(), &Route::Projects);
        app.handle_key(key(KeyCode::Esc)).await;
        app.handle_key(key(KeyCode::Esc)).await;
        assert_eq!(app.route(), &Route::Home);
    }

    #[tokio::test]
    async fn test_help_swallows_next_key() {
        let mut app = app(Route::Home);
        app.handle_key(key(KeyCode::F(1))).await;
        app.handle_key(key(KeyCode::F(3))).await;
        assert_eq!(app.route(), &Route::Home);
        app.handle_key(key(KeyCode::F(3))).await;
        assert_eq!(app.route(), &Route::Projects);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mut app = app(Route::Kyc);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await;
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_detail_title_follows_lookup() {
        let mut app = app(Route::ProjectDetail(1));
        assert_eq!(app.title(), "Project Details | Moroccan Real Estate Rise");
        assert!(app.process_next_task().await);
        assert_eq!(
            app.title(),
            "Casablanca Marina Residences | Moroccan Real Estate Rise"
        );
    }

    #[tokio::test]
    async fn test_unknown_project_resolves_not_found() {
        let mut app = app(Route::ProjectDetail(9));
        assert!(app.process_next_task().await);
        let Screen::ProjectDetail(view) = app.screen() else {
            panic!("expected detail screen");
        };
        assert_eq!(view.state(), &DetailState::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_route_shows_not_found_page() {
        let app = app(Route::resolve("/nowhere"));
        assert!(matches!(app.screen(), Screen::Info(_)));
        assert_eq!(app.title(), "Page Not Found | Moroccan Real Estate Rise");
    }

    #[tokio::test(start_paused = true)]
    async fn test_kyc_submission_ends_in_one_toast() {
        let mut app = app(Route::Kyc);
        for _ in 0..4 {
            app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL))
                .await;
        }
        // Declarations: is_pep, is_sanctioned, is_compliant
        app.handle_key(key(KeyCode::Tab)).await;
        app.handle_key(key(KeyCode::Tab)).await;
        app.handle_key(key(KeyCode::Char(' '))).await;
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .await;

        let Screen::Kyc(wizard) = app.screen() else {
            panic!("expected KYC screen");
        };
        assert!(wizard.stepper().is_submitting());
        assert!(app.toasts().is_empty());

        assert!(app.process_next_task().await);
        let Screen::Kyc(wizard) = app.screen() else {
            panic!("expected KYC screen");
        };
        assert!(!wizard.stepper().is_submitting());
        let toasts = app.toasts().snapshot();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "KYC Submission Successful");
    }

    #[tokio::test(start_paused = true)]
    async fn test_informational_route_opens_static_page() {
        let app = app(Route::Faq);
        assert!(matches!(app.screen(), Screen::Info(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_result_dropped_after_leaving_page() {
        let mut app = app(Route::Register);
        // Empty passwords match; accept the terms and submit
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Tab)).await;
        }
        app.handle_key(key(KeyCode::Char(' '))).await;
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .await;

        app.handle_key(key(KeyCode::F(2))).await;
        assert!(app.process_next_task().await);
        assert!(app.toasts().is_empty());
    }
}
