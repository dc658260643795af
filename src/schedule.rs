use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::controller::{DashboardController, LoadOutcome};
use crate::traits::Surface;

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(30);

/// Whether a refresh tick has anything to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    /// No date selected yet; ticks are no-ops.
    Idle,
    /// Ticks re-fetch this display date.
    Active(String),
}

/// Periodically re-fetches the currently displayed date.
///
/// The scheduler never touches the date catalog. It runs for as long as
/// the task returned by `spawn` is alive.
pub struct RefreshScheduler<S> {
    controller: DashboardController<S>,
    period: Duration,
}

impl<S> Clone for RefreshScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            period: self.period,
        }
    }
}

impl<S: Surface + 'static> RefreshScheduler<S> {
    pub fn new(controller: DashboardController<S>, period: Duration) -> Self {
        Self { controller, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> SchedulerState {
        match self.controller.selected_date() {
            Some(date) => SchedulerState::Active(date),
            None => SchedulerState::Idle,
        }
    }

    /// Run a single tick in the caller's task.
    pub async fn tick(&self) -> Option<LoadOutcome> {
        self.controller.refresh().await
    }

    /// Start ticking every period, first tick one period from now.
    ///
    /// Each tick runs in its own task so a slow fetch never delays the next
    /// tick, matching a user re-selecting the same date.
    pub fn spawn(self) -> JoinHandle<()> {
        tracing::info!("Starting refresh every {} seconds", self.period.as_secs());
        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;

                if let SchedulerState::Idle = self.state() {
                    tracing::debug!("Refresh tick while idle");
                    continue;
                }

                let controller = self.controller.clone();
                tokio::spawn(async move {
                    controller.refresh().await;
                });
            }
        })
    }
}
