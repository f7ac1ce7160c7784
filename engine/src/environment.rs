use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// Ambient facts console commands may read.
///
/// Handlers never reach for the clock or the process start directly so tests
/// can pin both.
pub trait Environment {
    fn now(&self) -> DateTime<Local>;

    /// Time since the page was loaded.
    fn uptime(&self) -> Duration;

    /// Platform identifier, e.g. "linux".
    fn platform(&self) -> &'static str {
        std::env::consts::OS
    }

    /// CPU architecture, e.g. "x86_64".
    fn arch(&self) -> &'static str {
        std::env::consts::ARCH
    }
}

/// Wall clock plus uptime measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemEnvironment {
    started: Instant,
}

impl SystemEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for SystemEnvironment {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Frozen clock for tests and snapshots.
#[derive(Debug, Clone, Copy)]
pub struct FixedEnvironment {
    pub now: DateTime<Local>,
    pub uptime: Duration,
}

impl FixedEnvironment {
    #[must_use]
    pub fn new(now: DateTime<Local>, uptime: Duration) -> Self {
        Self { now, uptime }
    }
}

impl Environment for FixedEnvironment {
    fn now(&self) -> DateTime<Local> {
        self.now
    }

    fn uptime(&self) -> Duration {
        self.uptime
    }
}

/// `1h 2m 3s`, dropping leading zero units.
#[must_use]
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    match (hours, minutes) {
        (0, 0) => format!("{seconds}s"),
        (0, _) => format!("{minutes}m {seconds}s"),
        _ => format!("{hours}h {minutes}m {seconds}s"),
    }
}
