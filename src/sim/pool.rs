//! Fixed-capacity slots for hazards and the shield pickup
//!
//! Slots are never allocated after construction. A retired slot is simply
//! marked inactive and becomes the next candidate for a first-fit spawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One reusable entity slot (x = lateral, y = depth)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Slot {
    pub pos: Vec2,
    pub active: bool,
}

impl Slot {
    /// Move toward (and past) the player, retiring once beyond `retire_depth`.
    /// Returns true if this call retired the slot.
    pub fn advance(&mut self, distance: f32, retire_depth: f32) -> bool {
        if !self.active {
            return false;
        }
        self.pos.y += distance;
        if self.pos.y > retire_depth {
            self.active = false;
            return true;
        }
        false
    }
}

/// Fixed-capacity hazard pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardPool {
    slots: Vec<Slot>,
}

impl HazardPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// All slots in scan order, active or not
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Active slots with their indices, in scan order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.active)
    }

    /// Deactivate every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    /// First-fit spawn. Returns the slot used, or None when saturated.
    pub fn spawn_at(&mut self, pos: Vec2) -> Option<usize> {
        let index = self.slots.iter().position(|s| !s.active)?;
        self.slots[index] = Slot { pos, active: true };
        Some(index)
    }

    /// Move every active hazard by `distance`; returns how many retired
    pub fn advance(&mut self, distance: f32, retire_depth: f32) -> usize {
        self.slots
            .iter_mut()
            .map(|slot| slot.advance(distance, retire_depth))
            .filter(|&retired| retired)
            .count()
    }

    pub fn retire(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.active = false;
        }
    }
}

/// Countdown that fires one spawn attempt per `spawn_interval`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub remaining: f32,
}

impl SpawnTimer {
    /// Count down by `dt`. When due, re-arm with the *current* interval so a
    /// faster spawn rate applies from the very next spawn.
    pub fn tick(&mut self, dt: f32, interval: f32) -> bool {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = interval;
            true
        } else {
            false
        }
    }
}

/// The single shield pickup and its randomized schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupSlot {
    pub slot: Slot,
    /// Elapsed time at which the pickup next appears (if inactive)
    pub next_spawn_time: f32,
}

impl PickupSlot {
    pub fn new(first_spawn: f32) -> Self {
        Self {
            slot: Slot::default(),
            next_spawn_time: first_spawn,
        }
    }

    pub fn is_due(&self, elapsed: f32) -> bool {
        !self.slot.active && elapsed >= self.next_spawn_time
    }

    pub fn spawn_at(&mut self, pos: Vec2) {
        self.slot = Slot { pos, active: true };
    }

    /// Retire (collected or missed) and schedule the next appearance
    pub fn retire(&mut self, next_spawn_time: f32) {
        self.slot.active = false;
        self.next_spawn_time = next_spawn_time;
    }
}
