//! Demo/idle controller
//!
//! Plans inputs from the current state the way a cautious player would:
//! take an offered powerup, dodge into the column with the most room, and
//! grab the shield pickup when that column is safe.

use crate::sim::{EngineState, Field, InputEvent, PowerupKind, SessionPhase};

/// A hazard this many seconds out in the player's column counts as danger
const DANGER_SECONDS: f32 = 0.75;
/// A column needs this much clear approach before chasing a pickup there
const SAFE_SECONDS: f32 = 1.5;

/// Candidate column: the value for `MoveToColumn` and its lateral centre
#[derive(Debug, Clone, Copy, PartialEq)]
struct Column {
    column: f32,
    lateral: f32,
}

fn candidate_columns(field: &Field, half_width: f32) -> Vec<Column> {
    match *field {
        Field::Lanes { count, .. } => (0..count)
            .map(|lane| Column {
                column: lane as f32,
                lateral: field.lane_center(lane),
            })
            .collect(),
        Field::Open { width } => {
            let stride = (half_width * 2.0).max(1.0);
            let span = (width - half_width * 2.0).max(0.0);
            let count = (span / stride).floor() as usize + 1;
            (0..count)
                .map(|i| {
                    let lateral = field.clamp_lateral(half_width + i as f32 * stride, half_width);
                    Column {
                        column: lateral,
                        lateral,
                    }
                })
                .collect()
        }
    }
}

/// Depth distance to the nearest hazard that can still reach a column
/// (`f32::INFINITY` when the column is clear)
fn clearance(state: &EngineState, lateral: f32) -> f32 {
    let field = &state.tuning.field;
    let player = &state.player;
    let hazard_half = state.tuning.hazard_half_extent;
    let reach = player.half_extent.y + hazard_half.y;

    state
        .hazards
        .iter_active()
        .filter(|(_, slot)| {
            field.columns_match(lateral, player.half_extent.x, slot.pos.x, hazard_half.x)
        })
        .filter(|(_, slot)| slot.pos.y - reach <= player.depth)
        .map(|(_, slot)| (player.depth - slot.pos.y - reach).max(0.0))
        .fold(f32::INFINITY, f32::min)
}

fn choose_powerup(state: &EngineState) -> PowerupKind {
    let danger = state.difficulty.effective_speed * DANGER_SECONDS;
    if clearance(state, state.player.lateral) <= danger {
        PowerupKind::Invincible
    } else {
        PowerupKind::ScoreDouble
    }
}

/// Inputs to apply before the next tick. Empty outside Playing.
pub fn plan(state: &EngineState) -> Vec<InputEvent> {
    let mut inputs = Vec::new();
    if state.session.phase != SessionPhase::Playing {
        return inputs;
    }

    if state.powerups.is_offered() {
        inputs.push(InputEvent::SelectPowerup(choose_powerup(state)));
    }
    // Nothing can hurt us while invincible, so only chase the pickup
    let invincible = state.powerups.active() == Some(PowerupKind::Invincible)
        || inputs.contains(&InputEvent::SelectPowerup(PowerupKind::Invincible));

    let field = &state.tuning.field;
    let half = state.player.half_extent.x;
    let current = state.player.lateral;
    let columns: Vec<(Column, f32)> = candidate_columns(field, half)
        .into_iter()
        .map(|c| (c, clearance(state, c.lateral)))
        .collect();

    // Most room first; ties go to the column nearest the player
    let safest = columns.iter().copied().max_by(|(a, a_room), (b, b_room)| {
        a_room
            .total_cmp(b_room)
            .then((b.lateral - current).abs().total_cmp(&(a.lateral - current).abs()))
    });

    let safe = state.difficulty.effective_speed * SAFE_SECONDS;
    let pickup = state.pickup.slot;
    let pickup_column = if pickup.active && pickup.pos.y <= state.player.depth {
        columns
            .iter()
            .copied()
            .filter(|(c, room)| {
                (invincible || *room >= safe)
                    && field.columns_match(
                        c.lateral,
                        half,
                        pickup.pos.x,
                        state.tuning.pickup_half_extent.x,
                    )
            })
            .min_by(|(a, _), (b, _)| {
                (a.lateral - pickup.pos.x)
                    .abs()
                    .total_cmp(&(b.lateral - pickup.pos.x).abs())
            })
    } else {
        None
    };

    let target = match pickup_column {
        Some((column, _)) => Some(column),
        None if invincible => None,
        // Stay put unless the move buys more room
        None => safest
            .filter(|(_, room)| *room > clearance(state, current))
            .map(|(column, _)| column),
    };

    if let Some(target) = target.filter(|t| t.lateral != current) {
        inputs.push(InputEvent::MoveToColumn(target.column));
    }
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FixedStepper;
    use crate::sim::{Character, handle_input};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn playing(tuning: Tuning) -> EngineState {
        let mut state = EngineState::with_tuning(tuning, 77);
        state.start_session(Character::Dino);
        state
    }

    fn apply(state: &mut EngineState) {
        for input in plan(state) {
            handle_input(state, input);
        }
    }

    #[test]
    fn test_idle_outside_playing() {
        let state = EngineState::new(1);
        assert!(plan(&state).is_empty());
    }

    #[test]
    fn test_stays_put_when_clear() {
        let state = playing(Tuning::lanes());
        assert!(plan(&state).is_empty());
    }

    #[test]
    fn test_dodges_hazard_in_lane() {
        let mut state = playing(Tuning::lanes());
        let pos = state.player.pos() - Vec2::new(0.0, 5.0);
        state.hazards.spawn_at(pos);
        apply(&mut state);
        assert_ne!(state.tuning.field.lane_of(state.player.lateral), Some(2));
        // Neighbouring lane is the nearest escape
        let lane = state.tuning.field.lane_of(state.player.lateral);
        assert!(lane == Some(1) || lane == Some(3));
    }

    #[test]
    fn test_picks_invincible_under_threat() {
        let mut state = playing(Tuning::lanes());
        state.powerups.advance(10.0, 0.0);
        let pos = state.player.pos() - Vec2::new(0.0, 3.0);
        state.hazards.spawn_at(pos);
        let inputs = plan(&state);
        assert_eq!(inputs, vec![InputEvent::SelectPowerup(PowerupKind::Invincible)]);
    }

    #[test]
    fn test_picks_score_double_when_safe() {
        let mut state = playing(Tuning::lanes());
        state.powerups.advance(10.0, 0.0);
        assert_eq!(
            plan(&state),
            vec![InputEvent::SelectPowerup(PowerupKind::ScoreDouble)]
        );
    }

    #[test]
    fn test_chases_safe_pickup() {
        let mut state = playing(Tuning::lanes());
        let lane_four = state.tuning.field.lane_center(4);
        state.pickup.spawn_at(Vec2::new(lane_four, -40.0));
        apply(&mut state);
        assert_eq!(state.tuning.field.lane_of(state.player.lateral), Some(4));

        // Not when a hazard is about to arrive in that lane
        let mut state = playing(Tuning::lanes());
        state.pickup.spawn_at(Vec2::new(lane_four, -40.0));
        state.hazards.spawn_at(Vec2::new(lane_four, -4.0));
        apply(&mut state);
        assert_eq!(state.tuning.field.lane_of(state.player.lateral), Some(2));
    }

    #[test]
    fn test_planar_dodge() {
        let mut state = playing(Tuning::planar());
        let pos = state.player.pos() - Vec2::new(0.0, 100.0);
        state.hazards.spawn_at(pos);
        apply(&mut state);
        assert!((state.player.lateral - pos.x).abs() >= 60.0);
    }

    #[test]
    fn test_autopilot_survives_lanes() {
        let mut state = playing(Tuning::lanes());
        let mut stepper = FixedStepper::default();
        for _ in 0..(40 * 60) {
            stepper.advance_with(&mut state, 1.0 / 60.0, apply);
        }
        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert!(state.session.elapsed > 39.0);
        assert!(state.session.score > 0);
    }
}
