use std::sync::Arc;

use learn_core::model::{Course, NavigationTarget, Progress, Screen};

use crate::error::CommandError;
use crate::ledger::ProgressLedger;
use crate::simulator::{ProgressSimulator, SimulatorConfig, SimulatorHandle};

enum Route {
    Home,
    Dashboard,
    CourseDetail {
        course: Arc<Course>,
        simulator: SimulatorHandle,
    },
}

/// Screen router. Owns the single live simulator while a course is open.
///
/// Transitions:
/// - `Home -> CourseDetail` via [`open_course`](Self::open_course)
/// - `CourseDetail -> Home` via [`back`](Self::back) or
///   [`mark_completed`](Self::mark_completed)
/// - `Home <-> Dashboard` via [`go_to`](Self::go_to)
/// - anything `-> Home` via [`reset`](Self::reset)
///
/// The detail screen has no route to `Dashboard`.
pub struct NavigationState {
    route: Route,
    ledger: Arc<ProgressLedger>,
    config: SimulatorConfig,
}

impl NavigationState {
    #[must_use]
    pub fn new(ledger: Arc<ProgressLedger>, config: SimulatorConfig) -> Self {
        Self {
            route: Route::Home,
            ledger,
            config,
        }
    }

    #[must_use]
    pub fn target(&self) -> NavigationTarget {
        match &self.route {
            Route::Home => NavigationTarget::Home,
            Route::Dashboard => NavigationTarget::Dashboard,
            Route::CourseDetail { course, .. } => NavigationTarget::CourseDetail(course.id.clone()),
        }
    }

    #[must_use]
    pub fn selected_course(&self) -> Option<&Course> {
        match &self.route {
            Route::CourseDetail { course, .. } => Some(course.as_ref()),
            Route::Home | Route::Dashboard => None,
        }
    }

    #[must_use]
    pub fn simulator(&self) -> Option<&SimulatorHandle> {
        match &self.route {
            Route::CourseDetail { simulator, .. } => Some(simulator),
            Route::Home | Route::Dashboard => None,
        }
    }

    /// Show `course` and start simulating progress for it.
    ///
    /// The caller supplies a course taken from the catalog; no lookup happens here.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::InvalidTransition` unless the current screen is `Home`.
    pub fn open_course(&mut self, course: Course) -> Result<(), CommandError> {
        if !matches!(self.route, Route::Home) {
            return Err(self.invalid("open course"));
        }
        let simulator =
            ProgressSimulator::start(course.id.clone(), Arc::clone(&self.ledger), self.config);
        tracing::info!(course = %course.id, "opened course");
        self.route = Route::CourseDetail {
            course: Arc::new(course),
            simulator,
        };
        Ok(())
    }

    /// Leave the detail screen for `Home`, stopping its simulator first.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::InvalidTransition` unless a course is open.
    pub async fn back(&mut self) -> Result<(), CommandError> {
        if !matches!(self.route, Route::CourseDetail { .. }) {
            return Err(self.invalid("go back"));
        }
        self.leave_course().await;
        Ok(())
    }

    /// Switch between `Home` and `Dashboard`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::InvalidTransition` while a course is open.
    pub fn go_to(&mut self, screen: Screen) -> Result<(), CommandError> {
        if matches!(self.route, Route::CourseDetail { .. }) {
            return Err(self.invalid("switch screens"));
        }
        self.route = match screen {
            Screen::Home => Route::Home,
            Screen::Dashboard => Route::Dashboard,
        };
        tracing::info!(screen = ?screen, "navigated");
        Ok(())
    }

    /// Stop the simulator, pin the open course at 100 and return `Home`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::InvalidTransition` unless a course is open.
    pub async fn mark_completed(&mut self) -> Result<Progress, CommandError> {
        let Some(course) = self.leave_course().await else {
            return Err(self.invalid("mark completed"));
        };
        // The simulator has fully stopped, so nothing can overwrite this.
        let stored = self.ledger.update(&course.id, Progress::MAX).await;
        tracing::info!(course = %course.id, "marked completed");
        Ok(stored)
    }

    /// Force `Home` from any screen, stopping a live simulator.
    pub async fn reset(&mut self) {
        self.leave_course().await;
        self.route = Route::Home;
    }

    async fn leave_course(&mut self) -> Option<Arc<Course>> {
        if !matches!(self.route, Route::CourseDetail { .. }) {
            return None;
        }
        let Route::CourseDetail { course, simulator } =
            std::mem::replace(&mut self.route, Route::Home)
        else {
            return None;
        };
        simulator.shutdown().await;
        tracing::info!(course = %course.id, "left course");
        Some(course)
    }

    fn invalid(&self, command: &'static str) -> CommandError {
        CommandError::InvalidTransition {
            from: self.target(),
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::Catalog;
    use learn_core::model::CourseId;
    use std::time::Duration;
    use storage::{InMemoryRepository, PersistentStore};

    fn ledger() -> Arc<ProgressLedger> {
        let store = PersistentStore::new(Arc::new(InMemoryRepository::new()));
        Arc::new(ProgressLedger::new(store, Default::default()))
    }

    fn course(raw: &str) -> Course {
        let id = CourseId::new(raw).unwrap();
        Catalog::sample().get(&id).cloned().unwrap()
    }

    #[tokio::test]
    async fn open_course_starts_a_bound_simulator() {
        let mut nav = NavigationState::new(ledger(), SimulatorConfig::default());
        assert_eq!(nav.target(), NavigationTarget::Home);
        assert!(nav.simulator().is_none());

        nav.open_course(course("c2")).unwrap();
        let c2 = CourseId::new("c2").unwrap();
        assert_eq!(nav.target(), NavigationTarget::CourseDetail(c2.clone()));
        assert_eq!(nav.selected_course().map(|c| &c.id), Some(&c2));
        assert_eq!(nav.simulator().map(SimulatorHandle::course_id), Some(&c2));
    }

    #[tokio::test]
    async fn back_returns_home_and_drops_simulator() {
        let mut nav = NavigationState::new(ledger(), SimulatorConfig::default());
        nav.open_course(course("c1")).unwrap();
        nav.back().await.unwrap();

        assert_eq!(nav.target(), NavigationTarget::Home);
        assert!(nav.simulator().is_none());
        assert!(nav.selected_course().is_none());
    }

    #[tokio::test]
    async fn detail_screen_only_exits_home() {
        let mut nav = NavigationState::new(ledger(), SimulatorConfig::default());
        nav.open_course(course("c1")).unwrap();

        let err = nav.go_to(Screen::Dashboard).unwrap_err();
        assert!(matches!(err, CommandError::InvalidTransition { .. }));
        assert!(nav.go_to(Screen::Home).is_err());
        assert!(nav.open_course(course("c2")).is_err());
        assert_eq!(
            nav.target(),
            NavigationTarget::CourseDetail(CourseId::new("c1").unwrap())
        );
    }

    #[tokio::test]
    async fn home_and_dashboard_switch_freely() {
        let mut nav = NavigationState::new(ledger(), SimulatorConfig::default());
        nav.go_to(Screen::Dashboard).unwrap();
        assert_eq!(nav.target(), NavigationTarget::Dashboard);

        assert!(nav.open_course(course("c1")).is_err());
        assert!(nav.back().await.is_err());

        nav.go_to(Screen::Home).unwrap();
        assert_eq!(nav.target(), NavigationTarget::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn mark_completed_pins_at_full_progress() {
        let ledger = ledger();
        let mut nav = NavigationState::new(Arc::clone(&ledger), SimulatorConfig::default());
        nav.open_course(course("c3")).unwrap();
        tokio::time::sleep(Duration::from_millis(3_500)).await;

        let stored = nav.mark_completed().await.unwrap();
        assert_eq!(stored, Progress::COMPLETE);
        assert_eq!(nav.target(), NavigationTarget::Home);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let c3 = CourseId::new("c3").unwrap();
        assert_eq!(ledger.get(&c3).await, Progress::COMPLETE);
    }

    #[tokio::test]
    async fn mark_completed_requires_open_course() {
        let mut nav = NavigationState::new(ledger(), SimulatorConfig::default());
        assert!(nav.mark_completed().await.is_err());
    }

    #[tokio::test]
    async fn reset_from_any_screen() {
        let mut nav = NavigationState::new(ledger(), SimulatorConfig::default());
        nav.open_course(course("c1")).unwrap();
        nav.reset().await;
        assert_eq!(nav.target(), NavigationTarget::Home);
        assert!(nav.simulator().is_none());

        nav.go_to(Screen::Dashboard).unwrap();
        nav.reset().await;
        assert_eq!(nav.target(), NavigationTarget::Home);
    }
}
