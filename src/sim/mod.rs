//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod events;
pub mod field;
pub mod input;
pub mod pool;
pub mod powerup;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{HazardOutcome, IgnoreReason, collect_pickup, resolve_hazards};
pub use difficulty::Difficulty;
pub use events::SimEvent;
pub use field::Field;
pub use input::{Control, InputEvent, handle_input};
pub use pool::{HazardPool, PickupSlot, Slot, SpawnTimer};
pub use powerup::{PowerupKind, PowerupManager, PowerupPhase};
pub use snapshot::Snapshot;
pub use state::{Character, EngineState, Player, Session, SessionPhase};
pub use tick::tick;
