//! Timing helpers shared by all modes.
//!
//! Nothing here sleeps. Every check compares a caller-provided [`Instant`]
//! against a stored timestamp, so the same code runs on a hardware timer or a
//! simulated clock.

use embassy_time::{Duration, Instant};

/// Redraw cadence with an idle and an accelerated interval
#[derive(Debug, Clone, Copy)]
pub struct IntervalGate {
    normal: Duration,
    fast: Duration,
    current: Duration,
    last_update: Instant,
}

impl IntervalGate {
    pub const fn new(normal: Duration, fast: Duration) -> Self {
        Self {
            normal,
            fast,
            current: normal,
            last_update: Instant::from_millis(0),
        }
    }

    /// Back to the idle interval, counting from `now`
    pub fn reset(&mut self, now: Instant) {
        self.current = self.normal;
        self.last_update = now;
    }

    /// Switch to the accelerated interval
    pub fn accelerate(&mut self) {
        self.current = self.fast;
    }

    /// Switch back to the idle interval
    pub fn restore(&mut self) {
        self.current = self.normal;
    }

    /// Interval currently in force
    pub const fn interval(&self) -> Duration {
        self.current
    }

    pub fn is_accelerated(&self) -> bool {
        self.current == self.fast && self.fast != self.normal
    }

    /// Open the gate if a full interval elapsed since the last redraw
    ///
    /// Records `now` as the last redraw when it returns `true`.
    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_update) < self.current {
            return false;
        }
        self.last_update = now;
        true
    }
}

/// Donation effect window
///
/// Restarting a running window moves its start to the new donation.
#[derive(Debug, Clone, Copy)]
pub struct DonationEffect {
    active: bool,
    start_time: Instant,
    duration: Duration,
}

impl DonationEffect {
    pub const fn new(duration: Duration) -> Self {
        Self {
            active: false,
            start_time: Instant::from_millis(0),
            duration,
        }
    }

    /// Start the window, or restart it if it is already running
    pub fn start(&mut self, now: Instant) {
        self.active = true;
        self.start_time = now;
    }

    /// Stop the window without touching the duration
    pub fn end(&mut self) {
        self.active = false;
        self.start_time = Instant::from_millis(0);
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn start_time(&self) -> Instant {
        self.start_time
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Time spent inside the window, zero when idle
    pub fn elapsed(&self, now: Instant) -> Duration {
        if !self.active {
            return Duration::from_millis(0);
        }
        now.saturating_duration_since(self.start_time)
    }

    /// Whether a running window has used up its duration
    pub fn is_expired(&self, now: Instant) -> bool {
        self.active && self.elapsed(now) >= self.duration
    }
}
