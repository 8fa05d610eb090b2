//! Events produced for the telemetry layer
//!
//! Every controller tick returns the events it produced. A runtime that hands
//! them to another task (network publisher, logger running on a different
//! executor) can push them through an [`EventChannel`]: a bounded queue built
//! on `critical-section` and `heapless::Deque`, safe to share with interrupt
//! handlers.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::{Deque, Vec};

const EVENT_KIND_DONATION: &str = "donation";
const EVENT_KIND_MODE_CHANGE: &str = "mode_change";

/// Something the outside world wants to hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// A donation was detected while `mode` owned the strip
    Donation { mode: &'static str, at: Instant },
    /// The controller rotated from one mode to the next
    ModeChanged {
        from: &'static str,
        to: &'static str,
    },
}

impl ModeEvent {
    /// Event key used by the telemetry payloads
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Donation { .. } => EVENT_KIND_DONATION,
            Self::ModeChanged { .. } => EVENT_KIND_MODE_CHANGE,
        }
    }
}

/// Events produced by a single tick
///
/// A tick yields at most a rotation followed by a donation.
pub type TickEvents = Vec<ModeEvent, 4>;

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded event queue shared between the tick loop and a consumer
///
/// The tick loop must never stall on a slow consumer, so a full queue
/// drops its oldest event to make room for the newest one.
pub struct EventChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<ModeEvent, SIZE>>>,
}

impl<const SIZE: usize> EventChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn publisher(&self) -> EventPublisher<'_, SIZE> {
        EventPublisher { channel: self }
    }

    pub const fn receiver(&self) -> EventReceiver<'_, SIZE> {
        EventReceiver { channel: self }
    }

    /// Queue an event
    ///
    /// Returns the evicted event when the queue was full.
    pub fn publish(&self, event: ModeEvent) -> Option<ModeEvent> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let evicted = if queue.is_full() {
                queue.pop_front()
            } else {
                None
            };
            // Cannot fail: a slot was freed above when the queue was full.
            let _ = queue.push_back(event);
            evicted
        })
    }

    /// Take the oldest queued event
    pub fn try_receive(&self) -> Result<ModeEvent, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for EventChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Publishing side of an [`EventChannel`]
#[derive(Clone, Copy)]
pub struct EventPublisher<'a, const SIZE: usize> {
    channel: &'a EventChannel<SIZE>,
}

impl<const SIZE: usize> EventPublisher<'_, SIZE> {
    /// Queue an event, returning the evicted one if the queue was full
    pub fn publish(&self, event: ModeEvent) -> Option<ModeEvent> {
        self.channel.publish(event)
    }
}

/// Consuming side of an [`EventChannel`]
#[derive(Clone, Copy)]
pub struct EventReceiver<'a, const SIZE: usize> {
    channel: &'a EventChannel<SIZE>,
}

impl<const SIZE: usize> EventReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<ModeEvent, TryReceiveError> {
        self.channel.try_receive()
    }

    /// Hand every queued event to `f`, oldest first
    pub fn drain(&self, mut f: impl FnMut(ModeEvent)) {
        while let Ok(event) = self.try_receive() {
            f(event);
        }
    }
}
