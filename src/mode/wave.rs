//! Wave mode
//!
//! A short bright window slides over a dim white base, one LED per redraw,
//! wrapping at the end of the strip. The window fades along its width while
//! idle and is drawn at full brightness during a donation.

use embassy_time::Duration;
use log::{debug, info};

use super::{Mode, ModeContext, ModeInfo, ModeState};
use crate::{
    color::{WHITE, fade_to_black_by, scale_rgb},
    surface::{AudioSurface, LightSurface},
    timing::{DonationEffect, IntervalGate},
};

const INFO: ModeInfo = ModeInfo::new("Wave Motion", "Wave effect moving through LED strip");

const DEFAULT_WIDTH: usize = 2;
const DEFAULT_BASE_FADE: u8 = 200;
const DEFAULT_GRADIENT_STEP: u8 = 60;
const DEFAULT_NORMAL_INTERVAL_MS: u64 = 200;
const DEFAULT_FAST_INTERVAL_MS: u64 = 50;
const DEFAULT_EFFECT_DURATION_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy)]
pub struct WaveConfig {
    /// LEDs covered by the bright window
    pub width: usize,
    /// How far the base is faded toward black
    pub base_fade: u8,
    /// Brightness lost per LED along the window
    pub gradient_step: u8,
    pub normal_interval: Duration,
    pub fast_interval: Duration,
    pub effect_duration: Duration,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            base_fade: DEFAULT_BASE_FADE,
            gradient_step: DEFAULT_GRADIENT_STEP,
            normal_interval: Duration::from_millis(DEFAULT_NORMAL_INTERVAL_MS),
            fast_interval: Duration::from_millis(DEFAULT_FAST_INTERVAL_MS),
            effect_duration: Duration::from_millis(DEFAULT_EFFECT_DURATION_MS),
        }
    }
}

impl WaveConfig {
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_intervals(mut self, normal: Duration, fast: Duration) -> Self {
        self.normal_interval = normal;
        self.fast_interval = fast;
        self
    }
}

#[derive(Debug, Clone)]
pub struct WaveMode {
    state: ModeState,
    config: WaveConfig,
    gate: IntervalGate,
    position: usize,
}

impl Default for WaveMode {
    fn default() -> Self {
        Self::new(WaveConfig::default())
    }
}

impl WaveMode {
    pub const fn new(config: WaveConfig) -> Self {
        Self {
            state: ModeState::new(INFO, DonationEffect::new(config.effect_duration)),
            gate: IntervalGate::new(config.normal_interval, config.fast_interval),
            position: 0,
            config,
        }
    }

    /// First LED of the bright window
    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn interval(&self) -> Duration {
        self.gate.interval()
    }

    /// Brightness of the `offset`-th LED inside the window
    fn window_level(&self, offset: usize) -> u8 {
        if self.state.effect().is_active() {
            return u8::MAX;
        }
        let drop = u8::try_from(offset)
            .ok()
            .and_then(|offset| offset.checked_mul(self.config.gradient_step))
            .unwrap_or(u8::MAX);
        u8::MAX.saturating_sub(drop)
    }

    fn draw<L: LightSurface>(&self, light: &mut L) {
        let len = light.len();
        if len == 0 {
            return;
        }

        light.set_color(fade_to_black_by(WHITE, self.config.base_fade));
        for offset in 0..self.config.width {
            let index = (self.position + offset) % len;
            light.set_led_color(index, scale_rgb(WHITE, self.window_level(offset)));
        }
        light.show();
    }
}

impl Mode for WaveMode {
    fn state(&self) -> &ModeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModeState {
        &mut self.state
    }

    fn setup<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        debug!("wave: setup");
        ctx.light.setup();
        ctx.light.set_color(WHITE);
        ctx.light.set_brightness(u8::MAX);

        self.position = 0;
        self.gate.reset(ctx.now);
        self.draw(ctx.light);
    }

    fn update<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        if self.state.expire_effect(ctx.now) {
            self.gate.restore();
            info!("wave: donation effect ended, releasing strip");
            return;
        }

        if !self.gate.ready(ctx.now) {
            return;
        }

        let len = ctx.light.len();
        if len == 0 {
            return;
        }
        self.position = (self.position + 1) % len;
        self.draw(ctx.light);
    }

    fn donation_triggered<L: LightSurface, A: AudioSurface>(
        &mut self,
        ctx: &mut ModeContext<'_, L, A>,
    ) {
        info!("wave: donation, waves accelerate");
        self.state.start_effect(ctx.now);
        self.gate.accelerate();
        ctx.audio.play_donation_sound();
    }
}
