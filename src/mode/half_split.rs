//! Half split mode: lights the first or the second half of the strip,
//! alternating on a timer.

use embassy_time::Duration;
use log::{debug, info};

use super::{Mode, ModeContext, ModeInfo, ModeState};
use crate::{
    bounds::half_point,
    color::{BLACK, Rgb, WHITE},
    config::SOUND_SWITCH,
    surface::{AudioSurface, LightSurface},
    timing::{DonationEffect, IntervalGate},
};

const INFO: ModeInfo = ModeInfo::new(
    "Half Switch",
    "Alternating first and second half illumination",
);

const DEFAULT_NORMAL_INTERVAL_MS: u64 = 1_500;
const DEFAULT_FAST_INTERVAL_MS: u64 = 300;
const DEFAULT_EFFECT_DURATION_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy)]
pub struct HalfSplitConfig {
    pub color: Rgb,
    pub normal_interval: Duration,
    pub fast_interval: Duration,
    pub effect_duration: Duration,
}

impl Default for HalfSplitConfig {
    fn default() -> Self {
        Self {
            color: WHITE,
            normal_interval: Duration::from_millis(DEFAULT_NORMAL_INTERVAL_MS),
            fast_interval: Duration::from_millis(DEFAULT_FAST_INTERVAL_MS),
            effect_duration: Duration::from_millis(DEFAULT_EFFECT_DURATION_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HalfSplitMode {
    state: ModeState,
    config: HalfSplitConfig,
    gate: IntervalGate,
    first_half: bool,
}

impl Default for HalfSplitMode {
    fn default() -> Self {
        Self::new(HalfSplitConfig::default())
    }
}

impl HalfSplitMode {
    pub const fn new(config: HalfSplitConfig) -> Self {
        Self {
            state: ModeState::new(INFO, DonationEffect::new(config.effect_duration)),
            gate: IntervalGate::new(config.normal_interval, config.fast_interval),
            first_half: true,
            config,
        }
    }

    /// `true` while `[0, len/2)` is lit, `false` while `[len/2, len)` is
    pub const fn shows_first_half(&self) -> bool {
        self.first_half
    }

    pub const fn interval(&self) -> Duration {
        self.gate.interval()
    }

    fn draw<L: LightSurface>(&self, light: &mut L) {
        let len = light.len();
        let half = half_point(len);
        for index in 0..len {
            let lit = (index < half) == self.first_half;
            light.set_led_color(index, if lit { self.config.color } else { BLACK });
        }
        light.show();
    }
}

impl Mode for HalfSplitMode {
    fn state(&self) -> &ModeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModeState {
        &mut self.state
    }

    fn setup<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        debug!("half split: setup");
        ctx.light.setup();
        ctx.light.set_brightness(u8::MAX);

        self.first_half = true;
        self.gate.reset(ctx.now);
        self.draw(ctx.light);
    }

    fn update<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        if self.state.expire_effect(ctx.now) {
            self.gate.restore();
            info!("half split: donation effect ended, releasing strip");
            return;
        }

        if !self.gate.ready(ctx.now) {
            return;
        }
        self.first_half = !self.first_half;
        self.draw(ctx.light);
    }

    fn donation_triggered<L: LightSurface, A: AudioSurface>(
        &mut self,
        ctx: &mut ModeContext<'_, L, A>,
    ) {
        info!("half split: donation, rapid switching");
        self.state.start_effect(ctx.now);
        self.gate.accelerate();
        ctx.audio.play_sound(SOUND_SWITCH);
    }
}
