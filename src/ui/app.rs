//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::controller::DashboardController;
use crate::controller::action::Action;
use crate::environment::Environment;
use crate::events::{Event as ActivityEvent, Source};
use crate::logging::LogLevel;
use crate::notification::Notification;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::input::{UiCommand, handle_key};
use crate::ui::splash::render_splash;
use crate::wallet::WalletSession;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// Wallet from the configuration file, connected on start.
    pub wallet_address: Option<String>,
}

impl UIConfig {
    pub fn new(with_background_color: bool, wallet_address: Option<String>) -> Self {
        Self {
            with_background_color,
            wallet_address,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The multi-signature dashboard.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    controller: DashboardController,

    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives actions from controller tasks.
    action_receiver: mpsc::Receiver<Action>,

    ui_config: UIConfig,
}

impl App {
    pub fn new(
        controller: DashboardController,
        environment: Environment,
        action_receiver: mpsc::Receiver<Action>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            controller,
            environment,
            current_screen: Screen::Splash,
            action_receiver,
            ui_config,
        }
    }

    /// Leaves the splash screen, connecting the configured wallet if any.
    fn enter_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.environment,
            self.controller.contract_address(),
            self.ui_config.with_background_color,
        );
        state.configured_wallet = self.ui_config.wallet_address.clone();
        self.current_screen = Screen::Dashboard(Box::new(state));
        self.connect();
    }

    fn state_mut(&mut self) -> Option<&mut DashboardState> {
        match &mut self.current_screen {
            Screen::Dashboard(state) => Some(state),
            Screen::Splash => None,
        }
    }

    fn apply(&mut self, action: Action) {
        if let Some(state) = self.state_mut() {
            state.apply(action, Instant::now());
        }
    }

    fn connect(&mut self) {
        let Some(address) = self.ui_config.wallet_address.clone() else {
            self.apply(Action::Notify(Notification::error(
                "No wallet configured. Run `fhe-multisig connect` first.",
            )));
            return;
        };
        match self.controller.connect_wallet(&address) {
            Ok(session) => {
                self.apply(Action::Log(ActivityEvent::success(
                    Source::Wallet,
                    format!("Connected {}", session.short_address()),
                )));
                self.apply(Action::WalletConnected(session));
            }
            Err(e) => {
                self.apply(Action::Log(ActivityEvent::error(
                    Source::Wallet,
                    e.to_string(),
                    LogLevel::Error,
                )));
                self.apply(Action::Notify(Notification::error(e.to_string())));
            }
        }
    }

    fn disconnect(&mut self) {
        let stale_through = self.controller.current_generation();
        self.apply(Action::WalletDisconnected { stale_through });
        self.apply(Action::Log(ActivityEvent::success(
            Source::Wallet,
            "Wallet disconnected",
        )));
    }

    fn session(&self) -> Option<WalletSession> {
        match &self.current_screen {
            Screen::Dashboard(state) => state.wallet.clone(),
            Screen::Splash => None,
        }
    }

    fn start_fhe_init(&mut self) {
        let Some(session) = self.session() else {
            return;
        };
        self.apply(Action::FheInitStarted);
        let controller = self.controller.clone();
        tokio::spawn(async move {
            let _ = controller.initialize_fhe(&session).await;
        });
    }

    /// Issues a refresh generation and loads under it.
    fn start_refresh(&mut self) {
        let Some(session) = self.session() else {
            return;
        };
        let generation = self.controller.next_generation();
        self.apply(Action::RefreshStarted {
            connection: session.connection(),
            generation,
        });
        let controller = self.controller.clone();
        tokio::spawn(async move {
            // Failures surface as a notification.
            let _ = controller.load_data(Some(&session), generation).await;
        });
    }

    /// Kicks off the work implied by the current state: encryption
    /// initialization after a connect, then the first load.
    fn schedule(&mut self) {
        let Screen::Dashboard(state) = &self.current_screen else {
            return;
        };
        if state.needs_fhe_init() {
            self.start_fhe_init();
        } else if state.fhe_status == crate::ui::dashboard::FheStatus::Ready
            && !state.has_loaded
            && !state.is_refreshing()
        {
            self.start_refresh();
        }
    }

    /// Carries out a command. Returns false when the app should exit.
    fn execute(&mut self, command: UiCommand) -> bool {
        let session = self.session();
        let controller = self.controller.clone();
        match command {
            UiCommand::Quit => return false,
            UiCommand::Apply(action) => self.apply(action),
            UiCommand::Connect => self.connect(),
            UiCommand::Disconnect => self.disconnect(),
            UiCommand::RetryFheInit => self.start_fhe_init(),
            UiCommand::Refresh => self.start_refresh(),
            UiCommand::CheckAvailability => {
                tokio::spawn(async move {
                    let _ = controller.check_availability().await;
                });
            }
            UiCommand::Create(form) => {
                // Applied now so a second Enter cannot submit twice.
                self.apply(Action::CreationStarted);
                tokio::spawn(async move {
                    let _ = controller.create_multisig(session.as_ref(), &form).await;
                });
            }
            UiCommand::Sign(id) => {
                tokio::spawn(async move {
                    let _ = controller.sign_multisig(session.as_ref(), &id).await;
                });
            }
            UiCommand::Decrypt(id) => {
                tokio::spawn(async move {
                    controller.decrypt_data(session.as_ref(), &id).await;
                });
            }
        }
        true
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Apply everything the controller tasks reported
        while let Ok(action) = app.action_receiver.try_recv() {
            app.apply(action);
        }

        if let Some(state) = app.state_mut() {
            state.update(Instant::now());
        }
        app.schedule();

        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.enter_dashboard();
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                // Any key press will skip the splash screen
                if let Screen::Splash = app.current_screen {
                    app.enter_dashboard();
                    continue;
                }

                let command = match &mut app.current_screen {
                    Screen::Dashboard(state) => handle_key(state, key),
                    Screen::Splash => None,
                };
                if let Some(command) = command {
                    if !app.execute(command) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
