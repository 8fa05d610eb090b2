//! Edge-detecting donation sensor
//!
//! The sensor is sampled exactly once per tick. Transitions are latched into
//! one-shot flags that are cleared when read, so every edge is reported once.
//! There is no time-based debounce here; a donation arriving while an effect
//! is already running simply restarts the effect window.

use embedded_hal::digital::{Error as _, InputPin};
use log::{debug, trace, warn};

use crate::surface::SensorInput;

/// Latches rising/falling transitions of a [`SensorInput`]
#[derive(Debug)]
pub struct EdgeSensor<S> {
    input: S,
    current_state: bool,
    previous_state: bool,
    rising_edge_detected: bool,
    falling_edge_detected: bool,
}

impl<S: SensorInput> EdgeSensor<S> {
    /// Wrap an input; the line is assumed idle (inactive) until
    /// [`setup`](Self::setup) or the first sample
    pub const fn new(input: S) -> Self {
        Self {
            input,
            current_state: false,
            previous_state: false,
            rising_edge_detected: false,
            falling_edge_detected: false,
        }
    }

    /// Adopt the current input level without reporting an edge
    ///
    /// Clears any pending edge, so a sensor already covered at power-up does
    /// not count as a donation.
    pub fn setup(&mut self) {
        self.current_state = self.input.is_active();
        self.previous_state = self.current_state;
        self.rising_edge_detected = false;
        self.falling_edge_detected = false;
        debug!("sensor: initial level {}", self.current_state);
    }

    /// Sample the input once and latch any transition
    pub fn update(&mut self) {
        self.current_state = self.input.is_active();

        match (self.previous_state, self.current_state) {
            (false, true) => {
                trace!("sensor: rising edge");
                self.rising_edge_detected = true;
            }
            (true, false) => {
                trace!("sensor: falling edge");
                self.falling_edge_detected = true;
            }
            _ => {}
        }

        self.previous_state = self.current_state;
    }

    /// Consume a pending inactive→active transition
    pub fn rising_edge(&mut self) -> bool {
        core::mem::take(&mut self.rising_edge_detected)
    }

    /// Consume a pending active→inactive transition
    pub fn falling_edge(&mut self) -> bool {
        core::mem::take(&mut self.falling_edge_detected)
    }

    /// Level seen by the last [`update`](Self::update)
    pub const fn is_active(&self) -> bool {
        self.current_state
    }

    pub fn input_mut(&mut self) -> &mut S {
        &mut self.input
    }
}

/// Active-low GPIO input: a low level means an object is present
///
/// Matches a reflective IR sensor on a pulled-up pin. A failed read counts
/// as "nothing present" so a flaky line cannot fake a donation.
#[derive(Debug)]
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: InputPin> ActiveLow<P> {
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> SensorInput for ActiveLow<P> {
    fn is_active(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(err) => {
                warn!("sensor: pin read failed: {:?}", err.kind());
                false
            }
        }
    }
}
