//! Daily time-of-day triggers.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use murmur_error::{ScheduleError, ScheduleErrorKind};

/// Result of checking if a trigger should fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCheck {
    /// Whether the trigger should fire now
    pub should_run: bool,
    /// When the trigger should fire next
    pub next_run: Option<NaiveDateTime>,
}

impl ScheduleCheck {
    /// Trigger should not fire yet.
    pub fn wait_until(next_run: NaiveDateTime) -> Self {
        Self {
            should_run: false,
            next_run: Some(next_run),
        }
    }

    /// Trigger should fire now and again at `next_run`.
    pub fn run_and_schedule(next_run: NaiveDateTime) -> Self {
        Self {
            should_run: true,
            next_run: Some(next_run),
        }
    }
}

/// Something that can say whether it is due.
pub trait Schedule {
    /// Check against the current time.
    fn check(&self, now: NaiveDateTime) -> ScheduleCheck;

    /// First firing strictly after `after`.
    fn next_execution(&self, after: NaiveDateTime) -> NaiveDateTime;
}

/// Parse `HH:MM` or `HH:MM:SS` (24-hour clock).
///
/// # Examples
///
/// ```
/// use murmur_schedule::parse_time_of_day;
///
/// assert!(parse_time_of_day("07:00").is_ok());
/// assert!(parse_time_of_day("19:30:15").is_ok());
/// assert!(parse_time_of_day("25:00").is_err());
/// ```
#[track_caller]
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ScheduleError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ScheduleError::new(ScheduleErrorKind::InvalidTime(value.to_string())))
}

/// Fires once a day at a fixed local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTrigger {
    label: String,
    time: NaiveTime,
    next_run: NaiveDateTime,
}

impl DailyTrigger {
    /// Register a trigger at `now`. A time already reached today first fires
    /// tomorrow.
    pub fn new(label: impl Into<String>, time: NaiveTime, now: NaiveDateTime) -> Self {
        let mut trigger = Self {
            label: label.into(),
            time,
            next_run: now,
        };
        trigger.next_run = trigger.next_execution(now);
        trigger
    }

    /// Label passed to the cycle when this trigger fires.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Configured time of day.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Next firing time.
    pub fn next_run(&self) -> NaiveDateTime {
        self.next_run
    }

    /// Fire if due, advancing to the next day.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        let check = self.check(now);
        if let Some(next) = check.next_run {
            self.next_run = next;
        }
        check.should_run
    }
}

impl Schedule for DailyTrigger {
    fn check(&self, now: NaiveDateTime) -> ScheduleCheck {
        if now >= self.next_run {
            ScheduleCheck::run_and_schedule(self.next_execution(now))
        } else {
            ScheduleCheck::wait_until(self.next_run)
        }
    }

    fn next_execution(&self, after: NaiveDateTime) -> NaiveDateTime {
        let today = after.date().and_time(self.time);
        if today > after {
            today
        } else {
            today + Duration::days(1)
        }
    }
}
