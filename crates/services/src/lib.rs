#![forbid(unsafe_code)]

pub mod app_services;
pub mod app_state;
pub mod error;
pub mod ledger;
pub mod navigation;
pub mod projections;
pub mod session;
pub mod simulator;

pub use app_services::AppServices;
pub use app_state::{AppSnapshot, AppState, Command};
pub use error::{AppServicesError, CommandError, SimulatorConfigError};
pub use ledger::ProgressLedger;
pub use navigation::NavigationState;
pub use projections::{CourseCard, DashboardSummary, home_cards};
pub use session::SessionState;
pub use simulator::{ProgressSimulator, SimulatorConfig, SimulatorHandle};
