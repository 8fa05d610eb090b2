#![no_std]

pub mod bounds;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod math8;
pub mod mode;
pub mod scheduler;
pub mod sensor;
pub mod surface;
pub mod timing;

pub use controller::ModeController;
pub use error::ControllerError;
pub use event::{EventChannel, EventPublisher, EventReceiver, ModeEvent, TickEvents};
pub use mode::{Mode, ModeContext, ModeId, ModeInfo, ModeSlot};
pub use scheduler::{TickResult, TickScheduler};
pub use sensor::{ActiveLow, EdgeSensor};
pub use surface::{AudioSurface, FrameBuffer, LightSurface, SensorInput, SilentAudio};
pub use timing::{DonationEffect, IntervalGate};

#[cfg(feature = "esp32-log")]
pub use config::init_logger;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// [`FrameBuffer`] is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
