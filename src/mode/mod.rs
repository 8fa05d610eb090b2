//! Mode system with compile-time known mode variants
//!
//! All modes are stored in an enum to avoid heap allocations.
//! Each mode implements the `Mode` trait.
//!
//! A mode runs its idle pattern until a donation arrives, then switches to an
//! accelerated pattern for a fixed window. When the window closes the mode
//! deactivates itself and the controller moves on to the next one.

mod breathing;
mod center_expansion;
mod chase_trail;
mod half_split;
mod random_blink;
mod wave;

use embassy_time::Instant;
use log::info;

pub use breathing::{BreathingConfig, BreathingMode};
pub use center_expansion::{CenterExpansionConfig, CenterExpansionMode};
pub use chase_trail::{ChaseTrailConfig, ChaseTrailMode};
pub use half_split::{HalfSplitConfig, HalfSplitMode};
pub use random_blink::{RandomBlinkConfig, RandomBlinkMode};
pub use wave::{WaveConfig, WaveMode};

use crate::{
    config::{MODE_AUTHOR, MODE_VERSION},
    surface::{AudioSurface, LightSurface},
    timing::DonationEffect,
};

const MODE_NAME_BREATHING: &str = "breathing";
const MODE_NAME_WAVE: &str = "wave";
const MODE_NAME_RANDOM_BLINK: &str = "random_blink";
const MODE_NAME_HALF_SPLIT: &str = "half_split";
const MODE_NAME_CENTER_EXPANSION: &str = "center_expansion";
const MODE_NAME_CHASE_TRAIL: &str = "chase_trail";

const MODE_ID_BREATHING: u8 = 0;
const MODE_ID_WAVE: u8 = 1;
const MODE_ID_RANDOM_BLINK: u8 = 2;
const MODE_ID_HALF_SPLIT: u8 = 3;
const MODE_ID_CENTER_EXPANSION: u8 = 4;
const MODE_ID_CHASE_TRAIL: u8 = 5;

/// Descriptive identity of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub version: &'static str,
}

impl ModeInfo {
    /// Identity with the default author and version
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            author: MODE_AUTHOR,
            version: MODE_VERSION,
        }
    }
}

/// Lifecycle fields every mode carries
#[derive(Debug, Clone, Copy)]
pub struct ModeState {
    info: ModeInfo,
    active: bool,
    effect: DonationEffect,
}

impl ModeState {
    pub const fn new(info: ModeInfo, effect: DonationEffect) -> Self {
        Self {
            info,
            active: false,
            effect,
        }
    }

    pub const fn effect(&self) -> &DonationEffect {
        &self.effect
    }

    /// Open (or reopen) the donation window at `now`
    pub fn start_effect(&mut self, now: Instant) {
        self.effect.start(now);
    }

    /// Close an expired donation window and deactivate
    ///
    /// Returns `true` when the window closed on this call.
    pub fn expire_effect(&mut self, now: Instant) -> bool {
        if !self.effect.is_expired(now) {
            return false;
        }
        self.effect.end();
        self.active = false;
        true
    }
}

/// Time and collaborators handed to a mode for one call
pub struct ModeContext<'a, L, A> {
    pub now: Instant,
    pub light: &'a mut L,
    pub audio: &'a mut A,
}

impl<'a, L: LightSurface, A: AudioSurface> ModeContext<'a, L, A> {
    pub fn new(now: Instant, light: &'a mut L, audio: &'a mut A) -> Self {
        Self { now, light, audio }
    }
}

pub trait Mode {
    fn state(&self) -> &ModeState;

    fn state_mut(&mut self) -> &mut ModeState;

    /// Reset private animation state and draw the idle baseline
    ///
    /// Called once per activation.
    fn setup<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>);

    /// Advance one tick
    ///
    /// Ends an expired donation effect (which deactivates the mode), otherwise
    /// redraws when the mode's own interval has elapsed.
    fn update<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>);

    /// Start (or restart) the accelerated donation effect
    fn donation_triggered<L: LightSurface, A: AudioSurface>(
        &mut self,
        ctx: &mut ModeContext<'_, L, A>,
    );

    fn info(&self) -> &ModeInfo {
        &self.state().info
    }

    /// Take over the strip
    fn activate<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        let state = self.state_mut();
        state.active = true;
        state.effect.end();
        let info = state.info;
        info!(
            "mode: activating \"{}\" {} by {} ({})",
            info.name, info.version, info.author, info.description
        );
        self.setup(ctx);
    }

    fn deactivate(&mut self) {
        self.state_mut().active = false;
    }

    fn is_active(&self) -> bool {
        self.state().active
    }

    fn is_effect_active(&self) -> bool {
        self.state().effect.is_active()
    }
}

/// Mode slot - enum containing all possible modes
#[derive(Debug)]
pub enum ModeSlot {
    /// Global brightness breathing
    Breathing(BreathingMode),
    /// Bright window sliding over a dim base
    Wave(WaveMode),
    /// Random on/off toggling
    RandomBlink(RandomBlinkMode),
    /// First and second half alternating
    HalfSplit(HalfSplitMode),
    /// Radius growing from the center and shrinking back
    CenterExpansion(CenterExpansionMode),
    /// Bouncing chaser with a dimming tail
    ChaseTrail(ChaseTrailMode),
}

/// Known mode ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ModeId {
    Breathing = MODE_ID_BREATHING,
    Wave = MODE_ID_WAVE,
    RandomBlink = MODE_ID_RANDOM_BLINK,
    HalfSplit = MODE_ID_HALF_SPLIT,
    CenterExpansion = MODE_ID_CENTER_EXPANSION,
    ChaseTrail = MODE_ID_CHASE_TRAIL,
}

impl ModeId {
    /// Every mode in its default rotation order
    pub const ALL: [Self; 6] = [
        Self::Breathing,
        Self::Wave,
        Self::RandomBlink,
        Self::HalfSplit,
        Self::CenterExpansion,
        Self::ChaseTrail,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_BREATHING => Self::Breathing,
            MODE_ID_WAVE => Self::Wave,
            MODE_ID_RANDOM_BLINK => Self::RandomBlink,
            MODE_ID_HALF_SPLIT => Self::HalfSplit,
            MODE_ID_CENTER_EXPANSION => Self::CenterExpansion,
            MODE_ID_CHASE_TRAIL => Self::ChaseTrail,
            _ => return None,
        })
    }

    /// Build the mode with its default tuning
    pub fn to_slot(self) -> ModeSlot {
        match self {
            Self::Breathing => ModeSlot::Breathing(BreathingMode::default()),
            Self::Wave => ModeSlot::Wave(WaveMode::default()),
            Self::RandomBlink => ModeSlot::RandomBlink(RandomBlinkMode::default()),
            Self::HalfSplit => ModeSlot::HalfSplit(HalfSplitMode::default()),
            Self::CenterExpansion => ModeSlot::CenterExpansion(CenterExpansionMode::default()),
            Self::ChaseTrail => ModeSlot::ChaseTrail(ChaseTrailMode::default()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breathing => MODE_NAME_BREATHING,
            Self::Wave => MODE_NAME_WAVE,
            Self::RandomBlink => MODE_NAME_RANDOM_BLINK,
            Self::HalfSplit => MODE_NAME_HALF_SPLIT,
            Self::CenterExpansion => MODE_NAME_CENTER_EXPANSION,
            Self::ChaseTrail => MODE_NAME_CHASE_TRAIL,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_BREATHING => Some(Self::Breathing),
            MODE_NAME_WAVE => Some(Self::Wave),
            MODE_NAME_RANDOM_BLINK => Some(Self::RandomBlink),
            MODE_NAME_HALF_SPLIT => Some(Self::HalfSplit),
            MODE_NAME_CENTER_EXPANSION => Some(Self::CenterExpansion),
            MODE_NAME_CHASE_TRAIL => Some(Self::ChaseTrail),
            _ => None,
        }
    }
}

impl From<ModeId> for ModeSlot {
    fn from(id: ModeId) -> Self {
        id.to_slot()
    }
}

macro_rules! impl_from_mode {
    ($($variant:ident($mode:ty)),* $(,)?) => {
        $(
            impl From<$mode> for ModeSlot {
                fn from(mode: $mode) -> Self {
                    Self::$variant(mode)
                }
            }
        )*
    };
}

impl_from_mode!(
    Breathing(BreathingMode),
    Wave(WaveMode),
    RandomBlink(RandomBlinkMode),
    HalfSplit(HalfSplitMode),
    CenterExpansion(CenterExpansionMode),
    ChaseTrail(ChaseTrailMode),
);

/// Forward a call to whichever mode the slot holds
macro_rules! dispatch {
    ($slot:expr, $mode:ident => $call:expr) => {
        match $slot {
            ModeSlot::Breathing($mode) => $call,
            ModeSlot::Wave($mode) => $call,
            ModeSlot::RandomBlink($mode) => $call,
            ModeSlot::HalfSplit($mode) => $call,
            ModeSlot::CenterExpansion($mode) => $call,
            ModeSlot::ChaseTrail($mode) => $call,
        }
    };
}

impl ModeSlot {
    /// Get the mode ID for external observation
    pub fn id(&self) -> ModeId {
        match self {
            Self::Breathing(_) => ModeId::Breathing,
            Self::Wave(_) => ModeId::Wave,
            Self::RandomBlink(_) => ModeId::RandomBlink,
            Self::HalfSplit(_) => ModeId::HalfSplit,
            Self::CenterExpansion(_) => ModeId::CenterExpansion,
            Self::ChaseTrail(_) => ModeId::ChaseTrail,
        }
    }

    pub fn info(&self) -> &ModeInfo {
        dispatch!(self, mode => Mode::info(mode))
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn activate<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        dispatch!(self, mode => Mode::activate(mode, ctx));
    }

    pub fn deactivate(&mut self) {
        dispatch!(self, mode => Mode::deactivate(mode));
    }

    pub fn update<L: LightSurface, A: AudioSurface>(&mut self, ctx: &mut ModeContext<'_, L, A>) {
        dispatch!(self, mode => Mode::update(mode, ctx));
    }

    pub fn donation_triggered<L: LightSurface, A: AudioSurface>(
        &mut self,
        ctx: &mut ModeContext<'_, L, A>,
    ) {
        dispatch!(self, mode => Mode::donation_triggered(mode, ctx));
    }

    pub fn is_active(&self) -> bool {
        dispatch!(self, mode => Mode::is_active(mode))
    }

    pub fn is_effect_active(&self) -> bool {
        dispatch!(self, mode => Mode::is_effect_active(mode))
    }

    /// Donation window of the held mode
    pub fn effect(&self) -> &DonationEffect {
        dispatch!(self, mode => Mode::state(mode).effect())
    }
}
