//! Explicit application state and the single command transition function.

use std::sync::Arc;

use learn_core::Catalog;
use learn_core::model::{Course, Credentials, NavigationTarget, ProgressMap, Screen, Session};

use crate::error::CommandError;
use crate::ledger::ProgressLedger;
use crate::navigation::NavigationState;
use crate::session::SessionState;
use crate::simulator::SimulatorConfig;

/// Everything the command source can ask for.
#[derive(Debug, Clone)]
pub enum Command {
    Login(Credentials),
    Logout,
    OpenCourse(Course),
    Back,
    GoTo(Screen),
    MarkCompleted,
}

/// What a render sink reads after each state change.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub session: Session,
    pub navigation: NavigationTarget,
    pub selected_course: Option<Course>,
    pub progress: ProgressMap,
}

pub struct AppState {
    session: SessionState,
    navigation: NavigationState,
    ledger: Arc<ProgressLedger>,
    catalog: Arc<Catalog>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, ledger: Arc<ProgressLedger>, config: SimulatorConfig) -> Self {
        Self {
            session: SessionState::new(),
            navigation: NavigationState::new(Arc::clone(&ledger), config),
            ledger,
            catalog,
        }
    }

    /// Apply one command. On error the state is left as it was.
    ///
    /// # Errors
    ///
    /// - `CommandError::LoginRejected` for an empty credential field.
    /// - `CommandError::NotAuthenticated` for navigation while signed out.
    /// - `CommandError::InvalidTransition` for a command the current screen
    ///   does not accept.
    pub async fn dispatch(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Login(credentials) => {
                if self.session.login(&credentials)? {
                    self.navigation.reset().await;
                }
                Ok(())
            }
            Command::Logout => {
                // Stop the simulator before the session is considered closed.
                self.navigation.reset().await;
                self.session.logout();
                Ok(())
            }
            _ if !self.session.is_authenticated() => Err(CommandError::NotAuthenticated),
            Command::OpenCourse(course) => self.navigation.open_course(course),
            Command::Back => self.navigation.back().await,
            Command::GoTo(screen) => self.navigation.go_to(screen),
            Command::MarkCompleted => self.navigation.mark_completed().await.map(|_| ()),
        }
    }

    pub async fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            session: self.session.session(),
            navigation: self.navigation.target(),
            selected_course: self.navigation.selected_course().cloned(),
            progress: self.ledger.snapshot().await,
        }
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.session.session()
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn ledger(&self) -> &Arc<ProgressLedger> {
        &self.ledger
    }

    /// Process teardown: stop any live simulator and wait for it.
    pub async fn shutdown(mut self) {
        self.navigation.reset().await;
    }
}
