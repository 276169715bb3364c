//! Collision detection and resolution
//!
//! An entity touches the player iff it shares the player's column (decided by
//! the [`Field`] strategy) and its depth interval overlaps the player's.
//! Intervals are `[centre - half, centre + half]`, endpoints inclusive.

use glam::Vec2;

use super::events::SimEvent;
use super::field::Field;
use super::state::{EngineState, Player};

/// Why an overlapping hazard was not resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Invincible,
    GracePeriod,
}

/// Result of this tick's hazard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardOutcome {
    /// Nothing overlaps the player
    Clear,
    /// An overlap was found but deliberately skipped
    Ignored { slot: usize, reason: IgnoreReason },
    /// A shield was spent and the hazard retired
    Absorbed { slot: usize },
    /// No shield left: the run is over
    Fatal { slot: usize },
}

/// Closed-interval overlap along one axis
#[inline]
pub fn intervals_overlap(a: f32, a_half: f32, b: f32, b_half: f32) -> bool {
    a - a_half <= b + b_half && b - b_half <= a + a_half
}

/// Column + depth test between the player and an entity
pub fn touches_player(field: &Field, player: &Player, pos: Vec2, half_extent: Vec2) -> bool {
    field.columns_match(player.lateral, player.half_extent.x, pos.x, half_extent.x)
        && intervals_overlap(player.depth, player.half_extent.y, pos.y, half_extent.y)
}

/// First active hazard touching the player, in slot order
pub fn first_hazard_hit(state: &EngineState) -> Option<usize> {
    let half = state.tuning.hazard_half_extent;
    state
        .hazards
        .iter_active()
        .find(|(_, slot)| touches_player(&state.tuning.field, &state.player, slot.pos, half))
        .map(|(index, _)| index)
}

/// Resolve at most one hazard collision for this tick.
///
/// Order: invincibility, then the grace window since the last absorbed hit,
/// then shields. A `Fatal` outcome leaves the phase change to the caller.
pub fn resolve_hazards(state: &mut EngineState) -> HazardOutcome {
    let Some(slot) = first_hazard_hit(state) else {
        return HazardOutcome::Clear;
    };

    if state.powerups.suppresses_hazards() {
        return HazardOutcome::Ignored {
            slot,
            reason: IgnoreReason::Invincible,
        };
    }

    let elapsed = state.session.elapsed;
    let grace = state.tuning.grace_period;
    if state.last_shield_hit.is_some_and(|last_hit| elapsed - last_hit < grace) {
        return HazardOutcome::Ignored {
            slot,
            reason: IgnoreReason::GracePeriod,
        };
    }

    if state.session.shields > 0 {
        state.session.shields -= 1;
        state.hazards.retire(slot);
        state.last_shield_hit = Some(elapsed);
        log::debug!(
            "Shield absorbed hazard {} at {:.2}s ({} left)",
            slot,
            elapsed,
            state.session.shields
        );
        state.push_event(SimEvent::ShieldAbsorbed {
            slot,
            remaining: state.session.shields,
        });
        return HazardOutcome::Absorbed { slot };
    }

    HazardOutcome::Fatal { slot }
}

/// Collect the shield pickup if the player touches it.
///
/// Unaffected by invincibility and the grace window. Returns true on pickup.
pub fn collect_pickup(state: &mut EngineState) -> bool {
    let pickup = state.pickup.slot;
    if !pickup.active
        || !touches_player(
            &state.tuning.field,
            &state.player,
            pickup.pos,
            state.tuning.pickup_half_extent,
        )
    {
        return false;
    }

    state.session.shields = (state.session.shields + 1).min(state.tuning.max_shields);
    let next = super::tick::roll_pickup_respawn(state);
    state.pickup.retire(next);

    log::debug!(
        "Shield collected ({} / {}), next pickup at {:.1}s",
        state.session.shields,
        state.tuning.max_shields,
        next
    );
    state.push_event(SimEvent::ShieldCollected {
        shields: state.session.shields,
    });
    true
}
