//! Shared error types for the services crate.

use thiserror::Error;

use learn_core::model::NavigationTarget;
use storage::sqlite::SqliteInitError;

/// Why a command left the application state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandError {
    /// Credentials were refused. Deliberately carries no detail.
    #[error("login did not succeed")]
    LoginRejected,
    #[error("sign in required")]
    NotAuthenticated,
    #[error("cannot {command} from {from}")]
    InvalidTransition {
        from: NavigationTarget,
        command: &'static str,
    },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

/// Rejected simulator settings.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum SimulatorConfigError {
    /// Progress only ever moves forward, so the increment must be a positive number.
    #[error("tick increment must be a finite positive number, got {0}")]
    InvalidIncrement(f64),
}
