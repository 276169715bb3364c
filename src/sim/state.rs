//! Engine state and core simulation types
//!
//! Everything the simulation mutates lives in one owned [`EngineState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::events::SimEvent;
use super::pool::{HazardPool, PickupSlot, SpawnTimer};
use super::powerup::PowerupManager;
use crate::tuning::Tuning;

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title menu
    Menu,
    /// Choosing a character
    CharacterSelect,
    /// Active gameplay
    Playing,
    /// Run ended by an unabsorbed hit
    GameOver,
}

/// Playable characters (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Character {
    Car,
    Dino,
    Cat,
}

impl Character {
    pub const ALL: [Character; 3] = [Character::Car, Character::Dino, Character::Cat];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(&self) -> u8 {
        match self {
            Character::Car => 0,
            Character::Dino => 1,
            Character::Cat => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Character::Car => "car",
            Character::Dino => "dino",
            Character::Cat => "cat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "car" => Some(Character::Car),
            "dino" | "dinosaur" => Some(Character::Dino),
            "cat" => Some(Character::Cat),
            _ => None,
        }
    }
}

/// Per-run session counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phase: SessionPhase,
    /// Seconds of Playing time in this run
    pub elapsed: f32,
    pub score: u64,
    pub shields: u8,
    pub character: Option<Character>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Menu,
            elapsed: 0.0,
            score: 0,
            shields: 0,
            character: None,
        }
    }
}

/// The player-controlled actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Lateral centre position
    pub lateral: f32,
    /// Fixed depth along the approach axis
    pub depth: f32,
    /// Collision half extents (x = lateral, y = depth)
    pub half_extent: Vec2,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lateral: tuning.field.start_position(),
            depth: tuning.player_depth,
            half_extent: tuning.player_half_extent,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.lateral, self.depth)
    }
}

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Seed for a given run so restarts don't replay the same hazard pattern
pub fn run_seed(seed: u64, run: u32) -> u64 {
    seed ^ (run as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct EngineState {
    pub tuning: Tuning,
    /// Base seed; each run derives its own stream from it
    pub seed: u64,
    /// Number of runs started so far
    pub run: u32,
    pub session: Session,
    pub difficulty: Difficulty,
    pub hazards: HazardPool,
    pub spawn_timer: SpawnTimer,
    pub pickup: PickupSlot,
    pub powerups: PowerupManager,
    pub player: Player,
    /// Elapsed time of the last shield-absorbed hit
    pub last_shield_hit: Option<f32>,
    rng: Pcg32,
    events: Vec<SimEvent>,
}

impl EngineState {
    /// New engine in the Menu phase with the default (lanes) tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            run: 0,
            session: Session::default(),
            difficulty: Difficulty::new(&tuning),
            hazards: HazardPool::new(tuning.hazard_capacity),
            spawn_timer: SpawnTimer::default(),
            pickup: PickupSlot::new(tuning.pickup_first_spawn),
            powerups: PowerupManager::new(&tuning),
            player: Player::new(&tuning),
            last_shield_hit: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// Reset every per-run value and enter Playing
    pub fn start_session(&mut self, character: Character) {
        self.run += 1;
        self.rng = Pcg32::seed_from_u64(run_seed(self.seed, self.run));

        self.session = Session {
            phase: self.session.phase,
            elapsed: 0.0,
            score: 0,
            shields: 0,
            character: Some(character),
        };
        self.difficulty = Difficulty::new(&self.tuning);
        self.hazards.clear();
        self.spawn_timer = SpawnTimer::default();
        self.pickup = PickupSlot::new(self.tuning.pickup_first_spawn);
        self.powerups = PowerupManager::new(&self.tuning);
        self.player = Player::new(&self.tuning);
        self.last_shield_hit = None;
        self.events.clear();

        log::info!(
            "Run {} started as {} (seed {})",
            self.run,
            character.as_str(),
            run_seed(self.seed, self.run)
        );
        self.push_event(SimEvent::SessionStarted {
            run: self.run,
            character,
        });
        self.set_phase(SessionPhase::Playing);
    }

    /// Change phase, recording the transition
    pub fn set_phase(&mut self, phase: SessionPhase) {
        let from = self.session.phase;
        if from == phase {
            return;
        }
        self.session.phase = phase;
        log::info!("Phase {:?} -> {:?}", from, phase);
        self.push_event(SimEvent::PhaseChanged { from, to: phase });
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Hand queued events to a presentation/audio collaborator.
    ///
    /// Hosts that only read snapshots may ignore events: the queue is cleared
    /// when a session starts and keeps at most [`MAX_PENDING_EVENTS`], oldest
    /// dropped first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_starts_in_menu() {
        let state = EngineState::new(1);
        assert_eq!(state.session.phase, SessionPhase::Menu);
        assert_eq!(state.hazards.capacity(), 40);
        assert_eq!(state.player.lateral, 0.0);
    }

    #[test]
    fn test_start_session_resets_everything() {
        let mut state = EngineState::new(1);
        state.session.score = 99;
        state.session.elapsed = 42.0;
        state.session.shields = 2;
        state.difficulty.base_speed = 30.0;
        state.hazards.spawn_at(Vec2::ZERO);
        state.last_shield_hit = Some(3.0);
        state.player.lateral = 8.0;

        state.start_session(Character::Dino);

        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.elapsed, 0.0);
        assert_eq!(state.session.shields, 0);
        assert_eq!(state.session.character, Some(Character::Dino));
        assert_eq!(state.difficulty.base_speed, 10.0);
        assert_eq!(state.difficulty.spawn_interval, 1.0);
        assert_eq!(state.hazards.active_count(), 0);
        assert_eq!(state.last_shield_hit, None);
        assert_eq!(state.player.lateral, 0.0);
        assert!(
            state
                .events()
                .iter()
                .any(|e| matches!(e, SimEvent::SessionStarted { run: 1, .. }))
        );
        assert_eq!(
            state.events().last(),
            Some(&SimEvent::PhaseChanged {
                from: SessionPhase::Menu,
                to: SessionPhase::Playing
            })
        );
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let mut state = EngineState::new(1);
        state.start_session(Character::Car);
        for _ in 0..(MAX_PENDING_EVENTS * 3) {
            state.push_event(SimEvent::PowerupOffered);
        }
        assert_eq!(state.events().len(), MAX_PENDING_EVENTS);

        // The next run starts with only its own events
        state.set_phase(SessionPhase::GameOver);
        state.set_phase(SessionPhase::CharacterSelect);
        state.start_session(Character::Cat);
        assert_eq!(
            state.events(),
            &[
                SimEvent::SessionStarted {
                    run: 2,
                    character: Character::Cat
                },
                SimEvent::PhaseChanged {
                    from: SessionPhase::CharacterSelect,
                    to: SessionPhase::Playing
                },
            ]
        );
    }

    #[test]
    fn test_character_ids() {
        for character in Character::ALL {
            assert_eq!(Character::from_id(character.id()), Some(character));
            assert_eq!(Character::from_str(character.as_str()), Some(character));
        }
        assert_eq!(Character::from_id(3), None);
    }

    #[test]
    fn test_run_seeds_differ() {
        assert_eq!(run_seed(7, 0), 7);
        assert_ne!(run_seed(7, 1), run_seed(7, 2));
    }
}
