//! Random blink mode
//!
//! Every redraw picks a few random LEDs and toggles each of them with some
//! probability. Idle redraws touch a fixed handful of LEDs; during a donation
//! every pick covers the whole strip and toggles more eagerly.

use embassy_time::Duration;
use heapless::Vec;
use log::{debug, info};

use super::{Mode, ModeContext, ModeInfo, ModeState};
use crate::{
    color::{BLACK, WHITE},
    config::{MAX_STRIP_LEDS, SOUND_SPARKLE},
    surface::{AudioSurface, LightSurface},
    timing::{DonationEffect, IntervalGate},
};

const INFO: ModeInfo = ModeInfo::new("Random Blink", "Random blinking pattern with white LEDs");

const DEFAULT_IDLE_PICKS: usize = 3;
const DEFAULT_IDLE_TOGGLE_PERCENT: u8 = 60;
const DEFAULT_EFFECT_TOGGLE_PERCENT: u8 = 70;
const DEFAULT_NORMAL_INTERVAL_MS: u64 = 300;
const DEFAULT_FAST_INTERVAL_MS: u64 = 100;
const DEFAULT_EFFECT_DURATION_MS: u64 = 4_000;
const DEFAULT_SEED: u64 = 0x5eed_b1f7;

#[derive(Debug, Clone, Copy)]
pub struct RandomBlinkConfig {
    /// LEDs picked per idle redraw; effect redraws pick the strip length
    pub idle_picks: usize,
    /// Chance (0-100) that an idle pick toggles its LED
    pub idle_toggle_percent: u8,
    /// Chance (0-100) that an effect pick toggles its LED
    pub effect_toggle_percent: u8,
    pub normal_interval: Duration,
    pub fast_interval: Duration,
    pub effect_duration: Duration,
    pub seed: u64,
}

impl Default for RandomBlinkConfig {
    fn default() -> Self {
        Self {
            idle_picks: DEFAULT_IDLE_PICKS,
            idle_toggle_percent: DEFAULT_IDLE_TOGGLE_PERCENT,
            effect_toggle_percent: DEFAULT_EFFECT_TOGGLE_PERCENT,
            normal_interval: Duration::from_millis(DEFAULT_NORMAL_INTERVAL_MS),
            fast_interval: Duration::from_millis(DEFAULT_FAST_INTERVAL_MS),
            effect_duration: Duration::from_millis(DEFAULT_EFFECT_DURATION_MS),
            seed: DEFAULT_SEED,
        }
    }
}

impl RandomBlinkConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set both toggle chances (clamped to 100)
    #[must_use]
    pub fn with_toggle_percent(mut self, idle: u8, effect: u8) -> Self {
        self.idle_toggle_percent = idle.min(100);
        self.effect_toggle_percent = effect.min(100);
        self
    }
}

#[derive(Debug)]
pub struct RandomBlinkMode {
    state: ModeState,
    config: RandomBlinkConfig,
    gate: IntervalGate,
    rng: fastrand::Rng,
    /// On/off per LED, sized to the strip on setup
    leds: Vec<bool, MAX_STRIP_LEDS>,
}

impl Default for RandomBlinkMode {
    fn default() -> Self {
        Self::new(RandomBlinkConfig::default())
    }
}

impl RandomBlinkMode {
    pub fn new(config: RandomBlinkConfig) -> Self {
        Self {
            state: ModeState::new(INFO, DonationEffect::new(config.effect_duration)),
            gate: IntervalGate::new(config.normal_interval, config.fast_interval),
            rng: fastrand::Rng::with_seed(config.seed),
            leds: Vec::new(),
            config,
        }
    }

    /// Current on/off pattern
    pub fn led_states(&self) -> &[bool] {
        &self.leds
    }

    pub const fn interval(&self) -> Duration {
        self.gate.interval()
    }

    fn blink<L: LightSurface>(&mut self, light: &mut L) {
        let len = self.leds.len();
        if len == 0 {
            return;
        }

        let (picks, chance) = if self.state.effect().is_active() {
            (len, self.config.effect_toggle_percent)
        } else {
            (self.config.idle_picks, self.config.idle_toggle_percent)
        };

        for _ in 0..picks {
            let index = self.rng.usize(..len);
            if self.rng.u8(..100) >= chance {
                continue;
            }
            if let Some(on) = self.leds.get_mut(index) {
                *on = !*on;
                light.set_led_color(index, if *on { WHITE } else { BLACK });
            }
        }
        light.show();
    }
}

impl Mode for RandomBlinkMode {
    fn state(&self) -> &ModeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModeState {
        &mut self.state
    }

    fn setup<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        debug!("random blink: setup");
        ctx.light.setup();
        ctx.light.set_color(WHITE);
        ctx.light.set_brightness(u8::MAX);

        self.leds.clear();
        for index in 0..ctx.light.len().min(MAX_STRIP_LEDS) {
            let on = index % 2 == 0;
            // Cannot overflow: the range is capped at the capacity.
            let _ = self.leds.push(on);
            ctx.light.set_led_color(index, if on { WHITE } else { BLACK });
        }
        ctx.light.show();
        self.gate.reset(ctx.now);
    }

    fn update<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        if self.state.expire_effect(ctx.now) {
            self.gate.restore();
            info!("random blink: donation effect ended, releasing strip");
            return;
        }

        if self.gate.ready(ctx.now) {
            self.blink(ctx.light);
        }
    }

    fn donation_triggered<L: LightSurface, A: AudioSurface>(
        &mut self,
        ctx: &mut ModeContext<'_, L, A>,
    ) {
        info!("random blink: donation, rapid blinking");
        self.state.start_effect(ctx.now);
        self.gate.accelerate();
        ctx.audio.play_sound(SOUND_SPARKLE);
    }
}
