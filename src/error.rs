//! Controller configuration errors
//!
//! None of these are fatal. The controller logs them and keeps its previous
//! state, so the animation loop keeps running.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// The registry already holds `capacity` modes
    RegistryFull { capacity: usize },
    /// The operation needs at least one registered mode
    EmptyRegistry,
    /// `index` does not name a registered mode
    InvalidModeIndex { index: usize, count: usize },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryFull { capacity } => {
                write!(f, "mode registry is full ({capacity} modes)")
            }
            Self::EmptyRegistry => write!(f, "no modes registered"),
            Self::InvalidModeIndex { index, count } => {
                write!(f, "invalid mode index {index} (registered: {count})")
            }
        }
    }
}

impl core::error::Error for ControllerError {}
