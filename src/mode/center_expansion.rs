//! Center expansion mode
//!
//! A lit radius grows outward from the middle of the strip and shrinks back,
//! bouncing between zero and half the strip length. Rings further from the
//! center are drawn dimmer, down to a floor.
//!
//! Radius zero lights the center: a single LED on odd strips, the two middle
//! LEDs on even strips. A donation restarts the expansion from the center at
//! a faster cadence.

use embassy_time::Duration;
use log::{debug, info};

use super::{Mode, ModeContext, ModeInfo, ModeState};
use crate::{
    bounds::{center_positions, max_radius, ring_positions},
    color::{WHITE, gray},
    math8::level8,
    surface::{AudioSurface, LightSurface},
    timing::{DonationEffect, IntervalGate},
};

const INFO: ModeInfo = ModeInfo::new("Center Expansion", "Light expanding from center outwards");

const DEFAULT_INNER_LEVEL: u8 = 255;
const DEFAULT_OUTER_LEVEL: u8 = 100;
const DEFAULT_LEVEL_FLOOR: u8 = 50;
const DEFAULT_NORMAL_INTERVAL_MS: u64 = 150;
const DEFAULT_FAST_INTERVAL_MS: u64 = 50;
const DEFAULT_EFFECT_DURATION_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy)]
pub struct CenterExpansionConfig {
    /// Level of the innermost ring
    pub inner_level: u8,
    /// Level the mapping heads toward at the current radius
    pub outer_level: u8,
    /// No ring is drawn dimmer than this
    pub level_floor: u8,
    pub normal_interval: Duration,
    pub fast_interval: Duration,
    pub effect_duration: Duration,
}

impl Default for CenterExpansionConfig {
    fn default() -> Self {
        Self {
            inner_level: DEFAULT_INNER_LEVEL,
            outer_level: DEFAULT_OUTER_LEVEL,
            level_floor: DEFAULT_LEVEL_FLOOR,
            normal_interval: Duration::from_millis(DEFAULT_NORMAL_INTERVAL_MS),
            fast_interval: Duration::from_millis(DEFAULT_FAST_INTERVAL_MS),
            effect_duration: Duration::from_millis(DEFAULT_EFFECT_DURATION_MS),
        }
    }
}

impl CenterExpansionConfig {
    #[must_use]
    pub fn with_intervals(mut self, normal: Duration, fast: Duration) -> Self {
        self.normal_interval = normal;
        self.fast_interval = fast;
        self
    }

    #[must_use]
    pub fn with_effect_duration(mut self, duration: Duration) -> Self {
        self.effect_duration = duration;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CenterExpansionMode {
    state: ModeState,
    config: CenterExpansionConfig,
    gate: IntervalGate,
    radius: usize,
    expanding: bool,
}

impl Default for CenterExpansionMode {
    fn default() -> Self {
        Self::new(CenterExpansionConfig::default())
    }
}

impl CenterExpansionMode {
    pub const fn new(config: CenterExpansionConfig) -> Self {
        Self {
            state: ModeState::new(INFO, DonationEffect::new(config.effect_duration)),
            gate: IntervalGate::new(config.normal_interval, config.fast_interval),
            radius: 0,
            expanding: true,
            config,
        }
    }

    pub const fn radius(&self) -> usize {
        self.radius
    }

    pub const fn is_expanding(&self) -> bool {
        self.expanding
    }

    pub const fn interval(&self) -> Duration {
        self.gate.interval()
    }

    /// Move the radius one ring, bouncing at zero and `max`
    fn step(&mut self, max: usize) {
        if self.expanding {
            self.radius += 1;
            if self.radius >= max {
                self.radius = max;
                self.expanding = false;
            }
        } else {
            self.radius = self.radius.saturating_sub(1);
            if self.radius == 0 {
                self.expanding = true;
            }
        }
    }

    /// Level of ring `ring` while the radius is `radius`
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn ring_level(&self, ring: usize, radius: usize) -> u8 {
        level8(
            ring as i32,
            0,
            radius as i32,
            self.config.inner_level,
            self.config.outer_level,
            self.config.level_floor,
            u8::MAX,
        )
    }

    fn draw<L: LightSurface>(&self, light: &mut L) {
        let len = light.len();
        light.clear();

        if self.radius == 0 {
            for index in center_positions(len).into_iter().flatten() {
                light.set_led_color(index, WHITE);
            }
        } else {
            for ring in 0..self.radius.min(max_radius(len)) {
                let color = gray(self.ring_level(ring, self.radius));
                for index in ring_positions(len, ring).into_iter().flatten() {
                    light.set_led_color(index, color);
                }
            }
        }
        light.show();
    }
}

impl Mode for CenterExpansionMode {
    fn state(&self) -> &ModeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModeState {
        &mut self.state
    }

    fn setup<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        debug!("center expansion: setup");
        ctx.light.clear();
        ctx.light.set_brightness(u8::MAX);
        ctx.light.show();

        self.radius = 0;
        self.expanding = true;
        self.gate.reset(ctx.now);
    }

    fn update<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        if self.state.expire_effect(ctx.now) {
            self.gate.restore();
            info!("center expansion: donation effect ended, releasing strip");
            return;
        }

        if !self.gate.ready(ctx.now) {
            return;
        }
        self.step(max_radius(ctx.light.len()));
        self.draw(ctx.light);
    }

    fn donation_triggered<L: LightSurface, A: AudioSurface>(
        &mut self,
        ctx: &mut ModeContext<'_, L, A>,
    ) {
        info!("center expansion: donation, expanding from the center");
        self.state.start_effect(ctx.now);
        self.gate.accelerate();
        self.radius = 0;
        self.expanding = true;
        ctx.audio.play_donation_sound();
    }
}
