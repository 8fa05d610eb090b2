//! Round-robin mode controller
//!
//! Owns the mode registry, the edge sensor and both output surfaces. Every
//! tick it samples the sensor, forwards a donation to the current mode, runs
//! the current mode and rotates to the next one once the current mode has
//! deactivated itself.

use embassy_time::Instant;
use heapless::Vec;
use log::{debug, info, warn};

use crate::{
    config,
    error::ControllerError,
    event::{ModeEvent, TickEvents},
    mode::{ModeContext, ModeId, ModeSlot},
    sensor::EdgeSensor,
    surface::{AudioSurface, LightSurface, SensorInput},
};

pub struct ModeController<S, L, A, const MAX_MODES: usize = { config::MAX_MODES }> {
    sensor: EdgeSensor<S>,
    light: L,
    audio: A,
    /// Registration order is rotation order
    modes: Vec<ModeSlot, MAX_MODES>,
    current_index: usize,
}

impl<S, L, A, const MAX_MODES: usize> ModeController<S, L, A, MAX_MODES>
where
    S: SensorInput,
    L: LightSurface,
    A: AudioSurface,
{
    pub const fn new(sensor: EdgeSensor<S>, light: L, audio: A) -> Self {
        Self {
            sensor,
            light,
            audio,
            modes: Vec::new(),
            current_index: 0,
        }
    }

    /// Append a mode to the rotation
    ///
    /// Must be called before [`setup`](Self::setup). A full registry is left
    /// untouched.
    pub fn add_mode(&mut self, mode: impl Into<ModeSlot>) -> Result<(), ControllerError> {
        let mode = mode.into();
        let name = mode.name();
        if self.modes.push(mode).is_err() {
            warn!("controller: cannot add \"{}\", registry is full", name);
            return Err(ControllerError::RegistryFull {
                capacity: MAX_MODES,
            });
        }
        debug!("controller: added \"{}\" at {}", name, self.modes.len() - 1);
        Ok(())
    }

    /// Seed the sensor and activate the first registered mode
    ///
    /// Calling it again restarts the rotation; whichever mode was running is
    /// deactivated first.
    pub fn setup(&mut self, now: Instant) -> Result<(), ControllerError> {
        self.sensor.setup();

        if self.modes.is_empty() {
            warn!("controller: setup without registered modes");
            return Err(ControllerError::EmptyRegistry);
        }

        info!("controller: starting with {} modes", self.modes.len());
        let Self {
            modes,
            light,
            audio,
            current_index,
            ..
        } = self;
        if let Some(current) = modes.get_mut(*current_index) {
            current.deactivate();
        }
        *current_index = 0;
        if let Some(first) = modes.first_mut() {
            first.activate(&mut ModeContext::new(now, light, audio));
        }
        Ok(())
    }

    /// Run one cooperative tick
    ///
    /// The sensor is sampled once, then a rising edge is forwarded to the
    /// current mode before that mode's own update. An edge that lands on a
    /// mode which already finished goes to the mode that replaces it.
    pub fn tick(&mut self, now: Instant) -> TickEvents {
        let mut events = TickEvents::new();
        self.sensor.update();

        if self.modes.is_empty() {
            return events;
        }

        if self.sensor.rising_edge() {
            if !self.current_is_active() {
                push_event(&mut events, self.rotate(now));
            }
            push_event(&mut events, self.dispatch_donation(now));
        }

        if self.current_is_active() {
            let Self {
                modes,
                light,
                audio,
                current_index,
                ..
            } = self;
            if let Some(mode) = modes.get_mut(*current_index) {
                mode.update(&mut ModeContext::new(now, light, audio));
            }
        } else {
            push_event(&mut events, self.rotate(now));
        }

        events
    }

    /// Force a rotation to the next mode
    pub fn switch_to_next_mode(&mut self, now: Instant) -> Result<ModeEvent, ControllerError> {
        self.rotate(now).ok_or(ControllerError::EmptyRegistry)
    }

    /// Jump straight to the mode at `index`
    pub fn switch_to(&mut self, index: usize, now: Instant) -> Result<ModeEvent, ControllerError> {
        let count = self.modes.len();
        if index >= count {
            warn!(
                "controller: invalid mode index {} (registered: {})",
                index, count
            );
            return Err(ControllerError::InvalidModeIndex { index, count });
        }
        self.activate_index(index, now)
            .ok_or(ControllerError::EmptyRegistry)
    }

    /// Registry position of the first mode with the given id
    pub fn find_mode(&self, id: ModeId) -> Option<usize> {
        self.modes.iter().position(|mode| mode.id() == id)
    }

    /// Name of the mode owning the strip, `None` before any mode is added
    pub fn current_mode_name(&self) -> Option<&'static str> {
        self.current_mode().map(ModeSlot::name)
    }

    pub fn current_mode(&self) -> Option<&ModeSlot> {
        self.modes.get(self.current_index)
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    pub fn modes(&self) -> &[ModeSlot] {
        &self.modes
    }

    pub const fn sensor(&self) -> &EdgeSensor<S> {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut EdgeSensor<S> {
        &mut self.sensor
    }

    pub const fn light(&self) -> &L {
        &self.light
    }

    pub fn light_mut(&mut self) -> &mut L {
        &mut self.light
    }

    pub const fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn current_is_active(&self) -> bool {
        self.current_mode().is_some_and(ModeSlot::is_active)
    }

    fn dispatch_donation(&mut self, now: Instant) -> Option<ModeEvent> {
        let Self {
            modes,
            light,
            audio,
            current_index,
            ..
        } = self;
        let mode = modes.get_mut(*current_index)?;
        info!("controller: donation detected in \"{}\"", mode.name());
        mode.donation_triggered(&mut ModeContext::new(now, light, audio));
        Some(ModeEvent::Donation {
            mode: mode.name(),
            at: now,
        })
    }

    fn rotate(&mut self, now: Instant) -> Option<ModeEvent> {
        let count = self.modes.len();
        if count == 0 {
            return None;
        }
        self.activate_index((self.current_index + 1) % count, now)
    }

    /// Deactivate the current mode and hand the strip to `index`
    fn activate_index(&mut self, index: usize, now: Instant) -> Option<ModeEvent> {
        let Self {
            modes,
            light,
            audio,
            current_index,
            ..
        } = self;

        let from = modes.get_mut(*current_index)?;
        from.deactivate();
        let from = from.name();

        let to = modes.get_mut(index)?;
        *current_index = index;
        to.activate(&mut ModeContext::new(now, light, audio));
        let to = to.name();

        info!("controller: switching \"{}\" -> \"{}\"", from, to);
        Some(ModeEvent::ModeChanged { from, to })
    }
}

fn push_event(events: &mut TickEvents, event: Option<ModeEvent>) {
    if let Some(event) = event {
        // A tick yields at most two events, well within capacity.
        let _ = events.push(event);
    }
}
