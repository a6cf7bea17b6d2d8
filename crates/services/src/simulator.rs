//! Timer-driven progress increments for the course being viewed.
//!
//! The simulator does not look at playback at all: once started it adds a
//! fixed increment every period until cancelled. Clamping is left to the
//! ledger.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use learn_core::model::{CourseId, Progress};

use crate::error::SimulatorConfigError;
use crate::ledger::ProgressLedger;

/// Tick period and increment. The increment is always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    period: Duration,
    increment: f64,
}

impl SimulatorConfig {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);
    pub const DEFAULT_INCREMENT: f64 = 0.1;
    const MIN_PERIOD: Duration = Duration::from_millis(1);

    /// A zero `period` is raised to one millisecond when the simulator starts.
    pub fn new(period: Duration, increment: f64) -> Result<Self, SimulatorConfigError> {
        if !increment.is_finite() || increment <= 0.0 {
            return Err(SimulatorConfigError::InvalidIncrement(increment));
        }
        Ok(Self { period, increment })
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn increment(&self) -> f64 {
        self.increment
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            period: Self::DEFAULT_PERIOD,
            increment: Self::DEFAULT_INCREMENT,
        }
    }
}

/// One simulator bound to one course.
pub struct ProgressSimulator {
    course_id: CourseId,
    ledger: Arc<ProgressLedger>,
    increment: f64,
    last_known: Progress,
}

impl ProgressSimulator {
    /// Bind to `course_id`, seeding the last known value from the ledger.
    pub async fn bind(
        course_id: CourseId,
        ledger: Arc<ProgressLedger>,
        config: SimulatorConfig,
    ) -> Self {
        let last_known = ledger.get(&course_id).await;
        Self {
            course_id,
            ledger,
            increment: config.increment,
            last_known,
        }
    }

    #[must_use]
    pub fn last_known(&self) -> Progress {
        self.last_known
    }

    /// Apply one increment through the ledger and remember what it stored.
    pub async fn tick(&mut self) -> Progress {
        let proposed = self.last_known.value() + self.increment;
        self.last_known = self.ledger.update(&self.course_id, proposed).await;
        tracing::debug!(
            course = %self.course_id,
            progress = self.last_known.value(),
            "simulator tick"
        );
        self.last_known
    }

    /// Spawn the periodic task. The first tick fires one period after start.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn start(
        course_id: CourseId,
        ledger: Arc<ProgressLedger>,
        config: SimulatorConfig,
    ) -> SimulatorHandle {
        let token = CancellationToken::new();
        let period = config.period.max(SimulatorConfig::MIN_PERIOD);

        let task = tokio::spawn({
            let token = token.clone();
            let course_id = course_id.clone();
            async move {
                let mut simulator = Self::bind(course_id, ledger, config).await;
                let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        biased;
                        () = token.cancelled() => break,
                        _ = ticker.tick() => {
                            // A tick that has begun always finishes its update.
                            simulator.tick().await;
                        }
                    }
                }
                tracing::debug!(course = %simulator.course_id, "simulator stopped");
            }
        });

        tracing::debug!(course = %course_id, period = ?period, "simulator started");
        SimulatorHandle {
            course_id,
            token,
            task: Some(task),
        }
    }
}

/// Owner's side of a running simulator. Dropping it cancels the task.
pub struct SimulatorHandle {
    course_id: CourseId,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SimulatorHandle {
    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    /// Stop scheduling further ticks. A tick already in progress still lands.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel and wait for the task to exit; no tick can land afterwards.
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!(course = %self.course_id, error = %err, "simulator task failed");
            }
        }
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
