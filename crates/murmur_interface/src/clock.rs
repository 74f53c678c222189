//! Wall-clock access.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use std::time::Duration;

/// Source of local time and the scheduler's only suspension point.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Suspend for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Clock that only moves when told to, or when something sleeps on it.
///
/// Sleeping advances the clock by the requested duration and returns
/// immediately, which lets a whole scheduling window run in a test.
#[derive(Debug)]
pub struct ManualClock {
    now: std::sync::Mutex<NaiveDateTime>,
}

impl ManualClock {
    /// Clock frozen at `start`.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: std::sync::Mutex::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        let advanced = chrono::TimeDelta::from_std(by)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta));
        if let Some(advanced) = advanced {
            *now = advanced;
        }
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[async_trait]
impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
