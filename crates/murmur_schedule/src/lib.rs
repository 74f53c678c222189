//! Scheduling for murmur.
//!
//! Time-of-day strings become [`DailyTrigger`]s and a [`Scheduler`] polls
//! them for a bounded window, running one cycle at a time through a
//! [`CycleRunner`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod scheduler;
mod trigger;

pub use scheduler::{CycleRunner, IMMEDIATE_LABEL, RunSummary, ScheduleConfig, Scheduler};
pub use trigger::{DailyTrigger, Schedule, ScheduleCheck, parse_time_of_day};
