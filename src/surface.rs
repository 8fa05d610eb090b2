//! Collaborator interfaces consumed by the modes
//!
//! The modes only ever talk to these traits. The LED transport, the audio
//! player and the sensor wiring live outside the crate.

use crate::{
    OutputDriver,
    color::{BLACK, Rgb, WHITE},
    math8::scale8,
};

/// Addressable light strip
pub trait LightSurface {
    /// Bring the strip into its baseline state (uniform white)
    fn setup(&mut self);

    /// Turn every LED off
    fn clear(&mut self);

    /// Fill the strip with one color
    fn set_color(&mut self, color: Rgb);

    /// Set a single LED. Out-of-range indices are ignored.
    fn set_led_color(&mut self, index: usize, color: Rgb);

    /// Global brightness (0-255)
    fn set_brightness(&mut self, level: u8);

    /// Commit the buffer to the hardware
    fn show(&mut self);

    /// Number of addressable LEDs
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fire-and-forget sound cues
pub trait AudioSurface {
    /// Play a named cue
    fn play_sound(&mut self, sound: &str);

    /// Play one cue picked from the donation pool
    fn play_donation_sound(&mut self);
}

/// Single binary input sampled once per tick
pub trait SensorInput {
    /// `true` while an object is in front of the sensor
    fn is_active(&mut self) -> bool;
}

/// Audio surface for builds without a speaker
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSurface for SilentAudio {
    fn play_sound(&mut self, _sound: &str) {}

    fn play_donation_sound(&mut self) {}
}

/// In-memory light surface that writes frames to an [`OutputDriver`]
///
/// Colors are kept at full scale; the global brightness is applied on
/// [`show`](LightSurface::show), the same way a hardware strip driver scales
/// its output.
pub struct FrameBuffer<D: OutputDriver, const N: usize> {
    driver: D,
    pixels: [Rgb; N],
    output: [Rgb; N],
    brightness: u8,
}

impl<D: OutputDriver, const N: usize> FrameBuffer<D, N> {
    pub const fn new(driver: D) -> Self {
        Self {
            driver,
            pixels: [BLACK; N],
            output: [BLACK; N],
            brightness: u8::MAX,
        }
    }

    /// Unscaled colors as last drawn
    pub const fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn apply_brightness(&mut self) {
        let level = self.brightness;
        for (out, pixel) in self.output.iter_mut().zip(self.pixels.iter()) {
            *out = match level {
                u8::MAX => *pixel,
                0 => BLACK,
                _ => Rgb {
                    r: scale8(pixel.r, level),
                    g: scale8(pixel.g, level),
                    b: scale8(pixel.b, level),
                },
            };
        }
    }
}

impl<D: OutputDriver, const N: usize> LightSurface for FrameBuffer<D, N> {
    fn setup(&mut self) {
        self.pixels = [WHITE; N];
        self.show();
    }

    fn clear(&mut self) {
        self.pixels = [BLACK; N];
    }

    fn set_color(&mut self, color: Rgb) {
        self.pixels = [color; N];
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
        self.apply_brightness();
        self.driver.write(&self.output);
    }

    fn len(&self) -> usize {
        N
    }
}
