//! Device-wide defaults
//!
//! Per-mode tuning lives in each mode's `…Config`; this module holds what is
//! shared across modes and the runtime.

use embassy_time::Duration;

/// LEDs on the reference donation box strip
pub const DEFAULT_NUM_LEDS: usize = 6;

/// Longest strip the modes keep per-LED state for
pub const MAX_STRIP_LEDS: usize = 256;

/// Registry capacity of the mode controller
pub const MAX_MODES: usize = 10;

pub const MIN_BRIGHTNESS: u8 = 0;
pub const MAX_BRIGHTNESS: u8 = 255;

/// Period of one cooperative tick
pub const DEFAULT_TICK_DURATION: Duration = Duration::from_millis(10);

/// Cue played by the random blink mode on a donation
pub const SOUND_SPARKLE: &str = "sparkle";
/// Cue played by the half split mode on a donation
pub const SOUND_SWITCH: &str = "switch";

pub const MODE_AUTHOR: &str = "Friedjof";
pub const MODE_VERSION: &str = "v1.0.0";

/// Install the `esp-println` backend for the `log` facade
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
