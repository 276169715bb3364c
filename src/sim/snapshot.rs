//! Read-only view of the engine for presentation
//!
//! A renderer or HUD gets everything it needs from a [`Snapshot`] without
//! touching [`EngineState`] internals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::Slot;
use super::powerup::PowerupKind;
use super::state::{Character, EngineState, SessionPhase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub elapsed: f32,
    pub effective_speed: f32,
    pub base_speed: f32,
    pub shields: u8,
    pub max_shields: u8,
    pub character: Option<Character>,
    /// Active powerup, if any
    pub powerup: Option<PowerupKind>,
    pub powerup_remaining: f32,
    /// The powerup menu is open
    pub powerup_offered: bool,
    /// Every pool slot, active or not, in slot order
    pub hazards: Vec<Slot>,
    pub pickup: Slot,
    pub player: Vec2,
    /// Lane under the player (lanes field only)
    pub player_lane: Option<usize>,
}

impl Snapshot {
    pub fn active_hazards(&self) -> impl Iterator<Item = &Slot> {
        self.hazards.iter().filter(|slot| slot.active)
    }
}

impl EngineState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.session.phase,
            score: self.session.score,
            elapsed: self.session.elapsed,
            effective_speed: self.difficulty.effective_speed,
            base_speed: self.difficulty.base_speed,
            shields: self.session.shields,
            max_shields: self.tuning.max_shields,
            character: self.session.character,
            powerup: self.powerups.active(),
            powerup_remaining: self.powerups.remaining(),
            powerup_offered: self.powerups.is_offered(),
            hazards: self.hazards.slots().to_vec(),
            pickup: self.pickup.slot,
            player: self.player.pos(),
            player_lane: self.tuning.field.lane_of(self.player.lateral),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_of_menu() {
        let state = EngineState::new(5);
        let snap = state.snapshot();
        assert_eq!(snap.phase, SessionPhase::Menu);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.hazards.len(), 40);
        assert_eq!(snap.active_hazards().count(), 0);
        assert_eq!(snap.player_lane, Some(2));
        assert_eq!(snap.character, None);
    }

    #[test]
    fn test_snapshot_tracks_play() {
        let mut state = EngineState::new(5);
        state.start_session(Character::Dino);
        tick(&mut state, 0.5);
        let snap = state.snapshot();
        assert_eq!(snap.phase, SessionPhase::Playing);
        assert_eq!(snap.elapsed, 0.5);
        assert_eq!(snap.effective_speed, 10.0);
        assert_eq!(snap.active_hazards().count(), 1);
        assert_eq!(snap.character, Some(Character::Dino));
        assert_eq!(snap.max_shields, 3);
        assert!(!snap.powerup_offered);
    }

    #[test]
    fn test_planar_snapshot_has_no_lane() {
        let state = EngineState::with_tuning(Tuning::planar(), 1);
        let snap = state.snapshot();
        assert_eq!(snap.player_lane, None);
        assert_eq!(snap.player, Vec2::new(400.0, -65.0));
        assert_eq!(snap.hazards.len(), 20);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = EngineState::new(5);
        state.start_session(Character::Car);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.snapshot());
    }
}
