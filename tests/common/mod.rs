//! Shared test infrastructure for the integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use donation_light_composer::{
    AudioSurface, Instant, LightSurface, ModeController, OutputDriver, Rgb, SensorInput,
    color::{BLACK, WHITE},
    sensor::EdgeSensor,
};

pub const NUM_LEDS: usize = 6;

pub fn ms(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

// ============================================================================
// Mock light strip
// ============================================================================

/// Light surface that keeps the drawn buffer and counts calls
#[derive(Debug, Clone)]
pub struct RecordingLight {
    pub pixels: Vec<Rgb>,
    /// Buffer as it was at the last `show`
    pub shown: Vec<Rgb>,
    pub brightness: u8,
    pub setup_calls: usize,
    pub clear_calls: usize,
    pub show_calls: usize,
}

impl RecordingLight {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![BLACK; len],
            shown: vec![BLACK; len],
            brightness: u8::MAX,
            setup_calls: 0,
            clear_calls: 0,
            show_calls: 0,
        }
    }

    /// Indices whose shown color is not black
    pub fn lit(&self) -> Vec<usize> {
        self.shown
            .iter()
            .enumerate()
            .filter(|(_, color)| **color != BLACK)
            .map(|(index, _)| index)
            .collect()
    }
}

impl LightSurface for RecordingLight {
    fn setup(&mut self) {
        self.setup_calls += 1;
        self.pixels.fill(WHITE);
        self.show();
    }

    fn clear(&mut self) {
        self.clear_calls += 1;
        self.pixels.fill(BLACK);
    }

    fn set_color(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn set_led_color(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    fn show(&mut self) {
        self.show_calls += 1;
        self.shown.clone_from(&self.pixels);
    }

    fn len(&self) -> usize {
        self.pixels.len()
    }
}

// ============================================================================
// Mock audio
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub sounds: Vec<String>,
    pub donation_sounds: usize,
}

impl AudioSurface for RecordingAudio {
    fn play_sound(&mut self, sound: &str) {
        self.sounds.push(sound.to_owned());
    }

    fn play_donation_sound(&mut self) {
        self.donation_sounds += 1;
    }
}

// ============================================================================
// Mock sensor
// ============================================================================

/// Sensor whose level is set by the test
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedSensor {
    pub level: bool,
}

impl ScriptedSensor {
    pub fn set(&mut self, level: bool) {
        self.level = level;
    }
}

impl SensorInput for ScriptedSensor {
    fn is_active(&mut self) -> bool {
        self.level
    }
}

// ============================================================================
// Mock output driver
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    pub frames: Vec<Vec<Rgb>>,
}

impl OutputDriver for RecordingDriver {
    fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub type TestController<const MAX_MODES: usize = 10> =
    ModeController<ScriptedSensor, RecordingLight, RecordingAudio, MAX_MODES>;

pub fn controller<const MAX_MODES: usize>() -> TestController<MAX_MODES> {
    ModeController::new(
        EdgeSensor::new(ScriptedSensor::default()),
        RecordingLight::new(NUM_LEDS),
        RecordingAudio::default(),
    )
}

pub fn set_sensor<const MAX_MODES: usize>(controller: &mut TestController<MAX_MODES>, level: bool) {
    controller.sensor_mut().input_mut().set(level);
}

/// Gray level of an LED, asserting the channels agree
pub fn level(color: Rgb) -> u8 {
    assert_eq!(color.r, color.g);
    assert_eq!(color.g, color.b);
    color.r
}
