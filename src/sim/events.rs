//! Discrete simulation events for audio/presentation collaborators

use serde::{Deserialize, Serialize};

use super::powerup::PowerupKind;
use super::state::{Character, SessionPhase};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    SessionStarted { run: u32, character: Character },
    PhaseChanged { from: SessionPhase, to: SessionPhase },
    /// A shield soaked up a hazard hit
    ShieldAbsorbed { slot: usize, remaining: u8 },
    /// The shield pickup was collected (count is post-cap)
    ShieldCollected { shields: u8 },
    PickupSpawned { lateral: f32 },
    PowerupOffered,
    PowerupActivated { kind: PowerupKind },
    PowerupExpired { kind: PowerupKind },
    PowerupOfferLapsed,
    SpeedIncreased { base_speed: f32 },
    SpawnRateIncreased { spawn_interval: f32 },
    GameOver { score: u64, elapsed: f32 },
}
