//! Player-chosen temporary powerups
//!
//! Lifecycle: Idle → Offered → Active → Idle. An offer appears once elapsed
//! time reaches `next_offer_time`; the player picks one kind; it stays active
//! for a fixed duration; expiry starts the cooldown toward the next offer.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Score awards count double
    ScoreDouble,
    /// Hazards approach at half speed
    HalfSpeed,
    /// Hazard collisions are ignored
    Invincible,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::ScoreDouble,
        PowerupKind::HalfSpeed,
        PowerupKind::Invincible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::ScoreDouble => "x2 score",
            PowerupKind::HalfSpeed => "1/2 speed",
            PowerupKind::Invincible => "invincible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PowerupPhase {
    Idle,
    /// Waiting for the player to pick; `since` is when the offer appeared
    Offered { since: f32 },
    /// `timer` counts up from 0 toward the duration
    Active { kind: PowerupKind, timer: f32 },
}

/// Transition produced by [`PowerupManager::advance`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerupTransition {
    Offered,
    Expired(PowerupKind),
    OfferLapsed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupManager {
    pub phase: PowerupPhase,
    pub next_offer_time: f32,
    duration: f32,
    cooldown: f32,
    offer_window: Option<f32>,
}

impl PowerupManager {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: PowerupPhase::Idle,
            next_offer_time: tuning.powerup_first_offer,
            duration: tuning.powerup_duration,
            cooldown: tuning.powerup_cooldown,
            offer_window: tuning.powerup_offer_window,
        }
    }

    /// Advance timers. `elapsed` already includes this tick's `dt`.
    pub fn advance(&mut self, elapsed: f32, dt: f32) -> Option<PowerupTransition> {
        match self.phase {
            PowerupPhase::Idle => {
                if elapsed >= self.next_offer_time {
                    self.phase = PowerupPhase::Offered { since: elapsed };
                    return Some(PowerupTransition::Offered);
                }
            }
            PowerupPhase::Offered { since } => {
                if self.offer_window.is_some_and(|window| elapsed - since >= window) {
                    self.phase = PowerupPhase::Idle;
                    self.next_offer_time = elapsed + self.cooldown;
                    return Some(PowerupTransition::OfferLapsed);
                }
            }
            PowerupPhase::Active { kind, timer } => {
                let timer = timer + dt;
                if timer >= self.duration {
                    self.phase = PowerupPhase::Idle;
                    self.next_offer_time = elapsed + self.cooldown;
                    return Some(PowerupTransition::Expired(kind));
                }
                self.phase = PowerupPhase::Active { kind, timer };
            }
        }
        None
    }

    /// Accept the player's pick. Ignored unless an offer is open.
    pub fn select(&mut self, kind: PowerupKind) -> bool {
        if matches!(self.phase, PowerupPhase::Offered { .. }) {
            self.phase = PowerupPhase::Active { kind, timer: 0.0 };
            true
        } else {
            false
        }
    }

    pub fn is_offered(&self) -> bool {
        matches!(self.phase, PowerupPhase::Offered { .. })
    }

    pub fn active(&self) -> Option<PowerupKind> {
        match self.phase {
            PowerupPhase::Active { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Seconds left on the active powerup (0 when none)
    pub fn remaining(&self) -> f32 {
        match self.phase {
            PowerupPhase::Active { timer, .. } => (self.duration - timer).max(0.0),
            _ => 0.0,
        }
    }

    pub fn score_multiplier(&self) -> u64 {
        if self.active() == Some(PowerupKind::ScoreDouble) { 2 } else { 1 }
    }

    pub fn speed_multiplier(&self) -> f32 {
        if self.active() == Some(PowerupKind::HalfSpeed) { 0.5 } else { 1.0 }
    }

    pub fn suppresses_hazards(&self) -> bool {
        self.active() == Some(PowerupKind::Invincible)
    }
}
