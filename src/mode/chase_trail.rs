//! Chase trail mode
//!
//! A single bright head runs along the strip and bounces off both ends,
//! dragging a tail that dims with distance. A donation reverses the head,
//! speeds it up and shows a faint preview of the next position.

use embassy_time::Duration;
use log::{debug, info};

use super::{Mode, ModeContext, ModeInfo, ModeState};
use crate::{
    bounds::signed_index,
    color::{WHITE, gray},
    math8::level8,
    surface::{AudioSurface, LightSurface},
    timing::{DonationEffect, IntervalGate},
};

const INFO: ModeInfo = ModeInfo::new("Chase Light", "Moving light with trailing tail effect");

const DEFAULT_TAIL_LENGTH: u8 = 3;
const DEFAULT_TAIL_HEAD_LEVEL: u8 = 180;
const DEFAULT_TAIL_END_LEVEL: u8 = 30;
const DEFAULT_PREVIEW_LEVEL: u8 = 80;
const DEFAULT_NORMAL_INTERVAL_MS: u64 = 120;
const DEFAULT_FAST_INTERVAL_MS: u64 = 40;
const DEFAULT_EFFECT_DURATION_MS: u64 = 2_500;

#[derive(Debug, Clone, Copy)]
pub struct ChaseTrailConfig {
    /// LEDs drawn behind the head
    pub tail_length: u8,
    /// Level right behind the head
    pub tail_head_level: u8,
    /// Level at the end of the tail
    pub tail_end_level: u8,
    /// Level of the lookahead LED drawn during a donation
    pub preview_level: u8,
    pub normal_interval: Duration,
    pub fast_interval: Duration,
    pub effect_duration: Duration,
}

impl Default for ChaseTrailConfig {
    fn default() -> Self {
        Self {
            tail_length: DEFAULT_TAIL_LENGTH,
            tail_head_level: DEFAULT_TAIL_HEAD_LEVEL,
            tail_end_level: DEFAULT_TAIL_END_LEVEL,
            preview_level: DEFAULT_PREVIEW_LEVEL,
            normal_interval: Duration::from_millis(DEFAULT_NORMAL_INTERVAL_MS),
            fast_interval: Duration::from_millis(DEFAULT_FAST_INTERVAL_MS),
            effect_duration: Duration::from_millis(DEFAULT_EFFECT_DURATION_MS),
        }
    }
}

impl ChaseTrailConfig {
    #[must_use]
    pub fn with_tail_length(mut self, tail_length: u8) -> Self {
        self.tail_length = tail_length;
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
pub struct ChaseTrailMode {
    state: ModeState,
    config: ChaseTrailConfig,
    gate: IntervalGate,
    position: i32,
    /// +1 toward the end of the strip, -1 toward the start
    direction: i32,
}

impl Default for ChaseTrailMode {
    fn default() -> Self {
        Self::new(ChaseTrailConfig::default())
    }
}

impl ChaseTrailMode {
    pub const fn new(config: ChaseTrailConfig) -> Self {
        Self {
            state: ModeState::new(INFO, DonationEffect::new(config.effect_duration)),
            gate: IntervalGate::new(config.normal_interval, config.fast_interval),
            position: 0,
            direction: 1,
            config,
        }
    }

    /// Index of the head
    pub const fn position(&self) -> i32 {
        self.position
    }

    pub const fn direction(&self) -> i32 {
        self.direction
    }

    pub const fn interval(&self) -> Duration {
        self.gate.interval()
    }

    /// Advance the head, bouncing off either end
    fn step(&mut self, len: usize) {
        let Ok(len) = i32::try_from(len) else {
            return;
        };
        if len == 0 {
            return;
        }

        self.position += self.direction;
        if self.position >= len {
            self.position = len - 1;
            self.direction = -1;
        } else if self.position < 0 {
            self.position = 0;
            self.direction = 1;
        }
    }

    fn tail_level(&self, distance: u8) -> u8 {
        let ChaseTrailConfig {
            tail_length,
            tail_head_level: head,
            tail_end_level: end,
            ..
        } = self.config;
        level8(
            i32::from(distance),
            1,
            i32::from(tail_length),
            head,
            end,
            head.min(end),
            head.max(end),
        )
    }

    fn draw<L: LightSurface>(&self, light: &mut L) {
        let len = light.len();
        light.clear();

        if let Some(head) = signed_index(len, self.position) {
            light.set_led_color(head, WHITE);
        }

        for distance in 1..=self.config.tail_length {
            let position = self.position - self.direction * i32::from(distance);
            if let Some(index) = signed_index(len, position) {
                light.set_led_color(index, gray(self.tail_level(distance)));
            }
        }

        if self.state.effect().is_active()
            && let Some(next) = signed_index(len, self.position + self.direction)
        {
            light.set_led_color(next, gray(self.config.preview_level));
        }

        light.show();
    }
}

impl Mode for ChaseTrailMode {
    fn state(&self) -> &ModeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModeState {
        &mut self.state
    }

    fn setup<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        debug!("chase trail: setup");
        ctx.light.clear();
        ctx.light.set_brightness(u8::MAX);
        ctx.light.show();

        self.position = 0;
        self.direction = 1;
        self.gate.reset(ctx.now);
    }

    fn update<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        if self.state.expire_effect(ctx.now) {
            self.gate.restore();
            info!("chase trail: donation effect ended, releasing strip");
            return;
        }

        if !self.gate.ready(ctx.now) {
            return;
        }
        self.step(ctx.light.len());
        self.draw(ctx.light);
    }

    fn donation_triggered<L: LightSurface, A: AudioSurface>(
        &mut self,
        ctx: &mut ModeContext<'_, L, A>,
    ) {
        info!("chase trail: donation, reversing direction");
        self.state.start_effect(ctx.now);
        self.gate.accelerate();
        self.direction = -self.direction;
        ctx.audio.play_donation_sound();
    }
}
