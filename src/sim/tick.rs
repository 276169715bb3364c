//! Simulation tick
//!
//! Advances a Playing session by `dt` seconds. Per tick:
//! difficulty → pool advance + spawns → collisions → powerups → score.

use glam::Vec2;
use rand::Rng;

use super::collision::{HazardOutcome, collect_pickup, resolve_hazards};
use super::events::SimEvent;
use super::powerup::PowerupTransition;
use super::state::{EngineState, SessionPhase};

/// Negative (backward clock) and non-finite deltas count as no time
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Advance the engine by one tick. No-op outside Playing.
pub fn tick(state: &mut EngineState, dt: f32) {
    if state.session.phase != SessionPhase::Playing {
        return;
    }

    let dt = sanitize_dt(dt);
    state.session.elapsed += dt;
    let elapsed = state.session.elapsed;

    // Difficulty staircases; effective speed honours HalfSpeed
    let speed_multiplier = state.powerups.speed_multiplier();
    let steps = state.difficulty.advance(elapsed, speed_multiplier);
    if steps.speed_steps > 0 {
        log::debug!("Speed up: base speed {}", state.difficulty.base_speed);
        state.push_event(SimEvent::SpeedIncreased {
            base_speed: state.difficulty.base_speed,
        });
    }
    if steps.spawn_steps > 0 {
        log::debug!("Spawn rate up: interval {:.3}s", state.difficulty.spawn_interval);
        state.push_event(SimEvent::SpawnRateIncreased {
            spawn_interval: state.difficulty.spawn_interval,
        });
    }

    // Move everything toward the player, retiring what has passed
    let distance = state.difficulty.effective_speed * dt;
    let retire_depth = state.tuning.retire_depth;
    state.hazards.advance(distance, retire_depth);
    if state.pickup.slot.advance(distance, retire_depth) {
        let next = roll_pickup_respawn(state);
        log::debug!("Shield pickup missed, next at {:.1}s", next);
        state.pickup.retire(next);
    }

    // Spawns
    if state.spawn_timer.tick(dt, state.difficulty.spawn_interval) {
        spawn_hazard(state);
    }
    if state.pickup.is_due(elapsed) {
        spawn_pickup(state);
    }

    // Collisions
    collect_pickup(state);
    if let HazardOutcome::Fatal { slot } = resolve_hazards(state) {
        log::info!(
            "Hit by hazard {} at {:.2}s, final score {}",
            slot,
            elapsed,
            state.session.score
        );
        state.set_phase(SessionPhase::GameOver);
        state.push_event(SimEvent::GameOver {
            score: state.session.score,
            elapsed,
        });
        return;
    }

    // Powerup lifecycle
    match state.powerups.advance(elapsed, dt) {
        Some(PowerupTransition::Offered) => {
            log::debug!("Powerup offered at {:.1}s", elapsed);
            state.push_event(SimEvent::PowerupOffered);
        }
        Some(PowerupTransition::Expired(kind)) => {
            log::debug!(
                "Powerup {} expired, next offer at {:.1}s",
                kind.as_str(),
                state.powerups.next_offer_time
            );
            state.push_event(SimEvent::PowerupExpired { kind });
        }
        Some(PowerupTransition::OfferLapsed) => {
            log::debug!("Powerup offer lapsed at {:.1}s", elapsed);
            state.push_event(SimEvent::PowerupOfferLapsed);
        }
        None => {}
    }

    // Score
    let per_award = state.powerups.score_multiplier();
    let earned = state.difficulty.award_score(elapsed, per_award);
    state.session.score = state.session.score.saturating_add(earned);
}

/// Pick the next shield pickup time: now + uniform(min, max)
pub(crate) fn roll_pickup_respawn(state: &mut EngineState) -> f32 {
    let (min, max) = (state.tuning.pickup_respawn_min, state.tuning.pickup_respawn_max);
    let delay = if max > min {
        state.rng_mut().random_range(min..=max)
    } else {
        min
    };
    state.session.elapsed + delay
}

/// First-fit hazard spawn in a random column at the far boundary
fn spawn_hazard(state: &mut EngineState) {
    let field = state.tuning.field;
    let half = state.tuning.hazard_half_extent.x;
    let lateral = field.random_lateral(state.rng_mut(), half);
    let pos = Vec2::new(lateral, state.tuning.spawn_depth);
    if state.hazards.spawn_at(pos).is_none() {
        log::trace!("Hazard pool saturated, spawn skipped");
    }
}

fn spawn_pickup(state: &mut EngineState) {
    let field = state.tuning.field;
    let half = state.tuning.pickup_half_extent.x;
    let lateral = field.random_lateral(state.rng_mut(), half);
    state
        .pickup
        .spawn_at(Vec2::new(lateral, state.tuning.spawn_depth));
    log::debug!("Shield pickup spawned at lateral {:.1}", lateral);
    state.push_event(SimEvent::PickupSpawned { lateral });
}
