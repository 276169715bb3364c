//! Obstacle Rush - an endless lane-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session flow, hazards, powerups, scoring)
//! - `tuning`: Data-driven game balance and variant presets
//! - `host`: Fixed-timestep driver for irregular frame times
//! - `autopilot`: Demo/idle controller

pub mod autopilot;
pub mod error;
pub mod host;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use host::FixedStepper;
pub use tuning::{Tuning, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the host will simulate; anything above is a hitch
    pub const MAX_FRAME_DT: f32 = 0.1;
}
