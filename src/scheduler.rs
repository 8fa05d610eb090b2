//! Tick scheduling and timing utilities.
//!
//! Provides portable tick pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};
use log::warn;

use crate::{
    config::{self, DEFAULT_TICK_DURATION},
    controller::ModeController,
    error::ControllerError,
    event::{EventPublisher, TickEvents},
    surface::{AudioSurface, LightSurface, SensorInput},
};

/// Default capacity of the outbound event channel.
pub const DEFAULT_EVENT_CHANNEL_SIZE: usize = 8;

/// Result of a tick.
#[derive(Debug, Clone)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Events produced during this tick.
    pub events: TickEvents,
}

/// Portable tick scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks tick timing with drift correction
/// - Runs the controller (sensor, donation dispatch, mode update, rotation)
/// - Publishes the produced events when a channel is attached
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// static EVENTS: EventChannel<8> = EventChannel::new();
///
/// let mut scheduler = TickScheduler::new(controller).with_events(EVENTS.publisher());
/// scheduler.setup(Instant::now())?;
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     Timer::at(result.next_deadline).await;
/// }
/// ```
pub struct TickScheduler<
    'a,
    S,
    L,
    A,
    const MAX_MODES: usize = { config::MAX_MODES },
    const EVENT_CHANNEL_SIZE: usize = DEFAULT_EVENT_CHANNEL_SIZE,
> {
    controller: ModeController<S, L, A, MAX_MODES>,
    events: Option<EventPublisher<'a, EVENT_CHANNEL_SIZE>>,
    next_tick: Instant,
    tick_duration: Duration,
}

impl<'a, S, L, A, const MAX_MODES: usize, const EVENT_CHANNEL_SIZE: usize>
    TickScheduler<'a, S, L, A, MAX_MODES, EVENT_CHANNEL_SIZE>
where
    S: SensorInput,
    L: LightSurface,
    A: AudioSurface,
{
    /// Create a new tick scheduler.
    ///
    /// Uses `DEFAULT_TICK_DURATION` (10 ms) for tick timing.
    pub fn new(controller: ModeController<S, L, A, MAX_MODES>) -> Self {
        Self::with_tick_duration(controller, DEFAULT_TICK_DURATION)
    }

    /// Create a new tick scheduler with custom tick duration.
    pub fn with_tick_duration(
        controller: ModeController<S, L, A, MAX_MODES>,
        tick_duration: Duration,
    ) -> Self {
        Self {
            controller,
            events: None,
            next_tick: Instant::from_millis(0),
            tick_duration,
        }
    }

    /// Publish every produced event on a channel.
    #[must_use]
    pub fn with_events(mut self, publisher: EventPublisher<'a, EVENT_CHANNEL_SIZE>) -> Self {
        self.events = Some(publisher);
        self
    }

    /// Activate the first mode and start the schedule at `now`.
    pub fn setup(&mut self, now: Instant) -> Result<(), ControllerError> {
        self.next_tick = now;
        self.controller.setup(now)
    }

    /// Process one tick and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Runs the controller for this tick
    /// 3. Publishes the produced events
    /// 4. Returns the deadline for the next tick
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = self.tick_duration * 2;
        if now > self.next_tick + max_drift {
            self.next_tick = now;
        }

        let events = self.controller.tick(now);
        if let Some(publisher) = &self.events {
            for event in &events {
                if let Some(dropped) = publisher.publish(*event) {
                    warn!("scheduler: event channel full, dropped {}", dropped.kind());
                }
            }
        }

        self.next_tick += self.tick_duration;

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration: self.next_tick.saturating_duration_since(now),
            events,
        }
    }

    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Get a reference to the controller.
    pub fn controller(&self) -> &ModeController<S, L, A, MAX_MODES> {
        &self.controller
    }

    /// Get a mutable reference to the controller.
    pub fn controller_mut(&mut self) -> &mut ModeController<S, L, A, MAX_MODES> {
        &mut self.controller
    }

    /// Give the controller back, dropping the schedule.
    pub fn into_controller(self) -> ModeController<S, L, A, MAX_MODES> {
        self.controller
    }
}
