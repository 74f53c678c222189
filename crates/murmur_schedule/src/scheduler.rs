//! The bounded polling loop.

use crate::{DailyTrigger, parse_time_of_day};
use async_trait::async_trait;
use derive_getters::Getters;
use murmur_interface::Clock;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Label used for the cycle run before the loop starts.
pub const IMMEDIATE_LABEL: &str = "immediate";

/// Runs one end-to-end cycle for a trigger.
#[async_trait]
pub trait CycleRunner: Send {
    /// Run a cycle, returning the published text on success.
    async fn run_cycle(&mut self, label: &str) -> Option<String>;
}

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ScheduleConfig {
    /// Local times of day, `HH:MM` or `HH:MM:SS`.
    #[serde(default = "default_times")]
    times: Vec<String>,

    /// Run one cycle before entering the loop.
    #[serde(default)]
    run_immediately: bool,

    /// Lifetime of one scheduling window, in hours.
    #[serde(default = "default_run_duration_hours")]
    run_duration_hours: f64,

    /// Seconds between checks for due triggers.
    #[serde(default = "default_poll_interval_secs")]
    poll_interval_secs: u64,
}

fn default_times() -> Vec<String> {
    vec!["07:00".into(), "13:00".into(), "19:00".into()]
}

fn default_run_duration_hours() -> f64 {
    5.0
}

fn default_poll_interval_secs() -> u64 {
    30
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            times: default_times(),
            run_immediately: false,
            run_duration_hours: default_run_duration_hours(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl ScheduleConfig {
    /// Create settings.
    pub fn new(
        times: Vec<String>,
        run_immediately: bool,
        run_duration_hours: f64,
        poll_interval_secs: u64,
    ) -> Self {
        Self {
            times,
            run_immediately,
            run_duration_hours,
            poll_interval_secs,
        }
    }

    /// Replace the times of day.
    pub fn with_times(mut self, times: Vec<String>) -> Self {
        self.times = times;
        self
    }

    /// Force or suppress the immediate cycle.
    pub fn with_run_immediately(mut self, run_immediately: bool) -> Self {
        self.run_immediately = run_immediately;
        self
    }

    /// Replace the window length.
    pub fn with_run_duration_hours(mut self, hours: f64) -> Self {
        self.run_duration_hours = hours;
        self
    }

    /// Window length as a duration. Negative or non-finite values are zero.
    pub fn max_run_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.run_duration_hours * 3600.0).unwrap_or_default()
    }

    /// Poll interval as a duration, at least one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// What a scheduling window did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct RunSummary {
    /// Cycles started, the immediate one included.
    cycles_run: u32,
    /// Texts published, in order.
    published: Vec<String>,
    /// Cycles that published nothing.
    failed: u32,
    /// Loop iterations.
    polls: u64,
}

impl RunSummary {
    fn record(&mut self, result: Option<String>) {
        self.cycles_run += 1;
        match result {
            Some(text) => self.published.push(text),
            None => self.failed += 1,
        }
    }
}

/// Polls daily triggers until the window closes or no trigger remains.
pub struct Scheduler<C: Clock> {
    config: ScheduleConfig,
    clock: C,
}

impl<C: Clock> Scheduler<C> {
    /// Create a scheduler.
    pub fn new(config: ScheduleConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Settings in use.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Register one trigger per valid time. Invalid times are logged and
    /// skipped.
    pub fn triggers(&self) -> Vec<DailyTrigger> {
        let now = self.clock.now();
        self.config
            .times
            .iter()
            .filter_map(|time| match parse_time_of_day(time) {
                Ok(parsed) => {
                    let trigger = DailyTrigger::new(time.trim(), parsed, now);
                    info!(time = %time, next_run = %trigger.next_run(), "Scheduled daily trigger");
                    Some(trigger)
                }
                Err(e) => {
                    error!(time = %time, error = %e.kind, "Skipping invalid schedule time");
                    None
                }
            })
            .collect()
    }

    /// Run one scheduling window.
    #[instrument(skip(self, runner), fields(times = ?self.config.times))]
    pub async fn run<R>(&self, runner: &mut R) -> RunSummary
    where
        R: CycleRunner + ?Sized,
    {
        let start = self.clock.now();
        let max_duration = self.config.max_run_duration();
        let poll_interval = self.config.poll_interval();
        let mut summary = RunSummary::default();

        if self.config.run_immediately {
            info!("Running immediate cycle");
            summary.record(runner.run_cycle(IMMEDIATE_LABEL).await);
        }

        let mut triggers = self.triggers();
        if triggers.is_empty() {
            warn!("No valid schedule times, nothing to wait for");
        }

        loop {
            let elapsed = (self.clock.now() - start).to_std().unwrap_or_default();
            if elapsed >= max_duration || triggers.is_empty() {
                break;
            }
            summary.polls += 1;

            for trigger in triggers.iter_mut() {
                if trigger.poll(self.clock.now()) {
                    info!(trigger = trigger.label(), "Trigger due, running cycle");
                    summary.record(runner.run_cycle(trigger.label()).await);
                }
            }

            let elapsed = (self.clock.now() - start).to_std().unwrap_or_default();
            let remaining = max_duration.saturating_sub(elapsed);
            if remaining.is_zero() {
                break;
            }
            self.clock.sleep(poll_interval.min(remaining)).await;
        }

        info!(
            cycles = summary.cycles_run,
            published = summary.published.len(),
            failed = summary.failed,
            polls = summary.polls,
            "Scheduling window closed"
        );
        summary
    }
}
