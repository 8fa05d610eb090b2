//! Breathing mode
//!
//! Fills the strip with white and ramps the global brightness up and down
//! between two bounds. A donation keeps the ramp but steps it eight times as
//! often.

use embassy_time::Duration;
use log::{debug, info};

use super::{Mode, ModeContext, ModeInfo, ModeState};
use crate::{
    color::WHITE,
    config::{MAX_BRIGHTNESS, MIN_BRIGHTNESS},
    surface::{AudioSurface, LightSurface},
    timing::{DonationEffect, IntervalGate},
};

const INFO: ModeInfo = ModeInfo::new("Static Breathing", "Gentle breathing effect with white LEDs");

const DEFAULT_STEP: u8 = 15;
const DEFAULT_NORMAL_INTERVAL_MS: u64 = 80;
const DEFAULT_FAST_INTERVAL_MS: u64 = 10;
const DEFAULT_EFFECT_DURATION_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy)]
pub struct BreathingConfig {
    pub min_brightness: u8,
    pub max_brightness: u8,
    /// Brightness change per redraw
    pub step: u8,
    pub normal_interval: Duration,
    pub fast_interval: Duration,
    pub effect_duration: Duration,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            min_brightness: MIN_BRIGHTNESS,
            max_brightness: MAX_BRIGHTNESS,
            step: DEFAULT_STEP,
            normal_interval: Duration::from_millis(DEFAULT_NORMAL_INTERVAL_MS),
            fast_interval: Duration::from_millis(DEFAULT_FAST_INTERVAL_MS),
            effect_duration: Duration::from_millis(DEFAULT_EFFECT_DURATION_MS),
        }
    }
}

impl BreathingConfig {
    #[must_use]
    pub fn with_bounds(mut self, min_brightness: u8, max_brightness: u8) -> Self {
        self.min_brightness = min_brightness.min(max_brightness);
        self.max_brightness = max_brightness.max(min_brightness);
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: u8) -> Self {
        self.step = step.max(1);
        self
    }

    #[must_use]
    pub fn with_effect_duration(mut self, duration: Duration) -> Self {
        self.effect_duration = duration;
        self
    }
}

#[derive(Debug, Clone)]
pub struct BreathingMode {
    state: ModeState,
    config: BreathingConfig,
    gate: IntervalGate,
    brightness: u8,
    rising: bool,
}

impl Default for BreathingMode {
    fn default() -> Self {
        Self::new(BreathingConfig::default())
    }
}

impl BreathingMode {
    pub const fn new(config: BreathingConfig) -> Self {
        Self {
            state: ModeState::new(INFO, DonationEffect::new(config.effect_duration)),
            gate: IntervalGate::new(config.normal_interval, config.fast_interval),
            brightness: config.min_brightness,
            rising: true,
            config,
        }
    }

    /// Brightness last pushed to the strip
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn is_rising(&self) -> bool {
        self.rising
    }

    pub const fn interval(&self) -> Duration {
        self.gate.interval()
    }

    /// Next level of the ramp, flipping direction at either bound
    fn next_brightness(&mut self) -> u8 {
        let BreathingConfig {
            min_brightness: min,
            max_brightness: max,
            step,
            ..
        } = self.config;

        if self.rising {
            if u16::from(self.brightness) + u16::from(step) >= u16::from(max) {
                self.rising = false;
                max
            } else {
                self.brightness + step
            }
        } else if self.brightness.saturating_sub(step) <= min {
            self.rising = true;
            min
        } else {
            self.brightness - step
        }
    }
}

impl Mode for BreathingMode {
    fn state(&self) -> &ModeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModeState {
        &mut self.state
    }

    fn setup<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        debug!("breathing: setup");
        ctx.light.setup();
        ctx.light.set_color(WHITE);
        ctx.light.set_brightness(self.config.min_brightness);
        ctx.light.show();

        self.brightness = self.config.min_brightness;
        self.rising = true;
        self.gate.reset(ctx.now);
    }

    fn update<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        if self.state.expire_effect(ctx.now) {
            self.gate.restore();
            info!("breathing: donation effect ended, releasing strip");
            return;
        }

        if !self.gate.ready(ctx.now) {
            return;
        }

        let next = self.next_brightness();
        if next != self.brightness {
            self.brightness = next;
            ctx.light.set_brightness(next);
            ctx.light.show();
        }
    }

    fn donation_triggered<L: LightSurface, A: AudioSurface>(
        &mut self,
        ctx: &mut ModeContext<'_, L, A>,
    ) {
        info!("breathing: donation, speeding up");
        self.state.start_effect(ctx.now);
        self.gate.accelerate();
        ctx.audio.play_donation_sound();
    }
}
