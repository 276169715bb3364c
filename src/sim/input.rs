//! Discrete input events
//!
//! Inputs arrive between ticks. Each is checked against the current phase and
//! silently ignored when it does not apply. Moves take effect immediately, so
//! several moves before the next tick leave only the last position.

use serde::{Deserialize, Serialize};

use super::events::SimEvent;
use super::powerup::PowerupKind;
use super::state::{Character, EngineState, SessionPhase};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Menu: go to character select
    SelectStart,
    /// Menu / GameOver: quit
    SelectExit,
    /// CharacterSelect: pick a character by id and start a run
    SelectCharacter(u8),
    MoveLeft,
    MoveRight,
    /// Lane index (lanes) or lateral position (open field)
    MoveToColumn(f32),
    /// Accepted only while an offer is open
    SelectPowerup(PowerupKind),
    /// GameOver: back to character select
    Restart,
}

/// What the host should do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// The player asked to quit; tearing down the process is the host's job
    Exit,
}

pub fn handle_input(state: &mut EngineState, event: InputEvent) -> Control {
    use SessionPhase::*;

    match (state.session.phase, event) {
        (Menu, InputEvent::SelectStart) => state.set_phase(CharacterSelect),
        (Menu | GameOver, InputEvent::SelectExit) => {
            log::info!("Exit requested");
            return Control::Exit;
        }
        (CharacterSelect, InputEvent::SelectCharacter(id)) => match Character::from_id(id) {
            Some(character) => state.start_session(character),
            None => log::debug!("Ignoring unknown character id {}", id),
        },
        (Playing, InputEvent::MoveLeft) => move_player(state, -1),
        (Playing, InputEvent::MoveRight) => move_player(state, 1),
        (Playing, InputEvent::MoveToColumn(column)) => {
            if column.is_nan() {
                return Control::Continue;
            }
            let half = state.player.half_extent.x;
            state.player.lateral = state.tuning.field.column_position(column, half);
        }
        (Playing, InputEvent::SelectPowerup(kind)) => {
            if state.powerups.select(kind) {
                log::debug!(
                    "Powerup {} activated at {:.1}s",
                    kind.as_str(),
                    state.session.elapsed
                );
                state.push_event(SimEvent::PowerupActivated { kind });
            }
        }
        (GameOver, InputEvent::Restart) => state.set_phase(CharacterSelect),
        (phase, event) => log::trace!("Ignoring {:?} during {:?}", event, phase),
    }

    Control::Continue
}

fn move_player(state: &mut EngineState, direction: i32) {
    let half = state.player.half_extent.x;
    state.player.lateral =
        state
            .tuning
            .field
            .step(state.player.lateral, direction, state.tuning.lateral_step, half);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing() -> EngineState {
        let mut state = EngineState::new(11);
        handle_input(&mut state, InputEvent::SelectStart);
        handle_input(&mut state, InputEvent::SelectCharacter(0));
        state
    }

    #[test]
    fn test_full_session_loop() {
        let mut state = EngineState::new(11);
        assert_eq!(state.session.phase, SessionPhase::Menu);

        handle_input(&mut state, InputEvent::SelectStart);
        assert_eq!(state.session.phase, SessionPhase::CharacterSelect);

        handle_input(&mut state, InputEvent::SelectCharacter(2));
        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert_eq!(state.session.character, Some(Character::Cat));

        tick(&mut state, 2.0);
        assert!(state.session.score > 0);

        let pos = state.player.pos();
        state.hazards.spawn_at(pos);
        tick(&mut state, 1.0 / 60.0);
        assert_eq!(state.session.phase, SessionPhase::GameOver);

        handle_input(&mut state, InputEvent::Restart);
        assert_eq!(state.session.phase, SessionPhase::CharacterSelect);

        handle_input(&mut state, InputEvent::SelectCharacter(1));
        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.elapsed, 0.0);
        assert_eq!(state.hazards.active_count(), 0);
        assert_eq!(state.run, 2);
    }

    #[test]
    fn test_exit_only_from_menu_or_game_over() {
        let mut state = EngineState::new(1);
        assert_eq!(handle_input(&mut state, InputEvent::SelectExit), Control::Exit);

        let mut state = playing();
        assert_eq!(handle_input(&mut state, InputEvent::SelectExit), Control::Continue);
        assert_eq!(state.session.phase, SessionPhase::Playing);

        state.set_phase(SessionPhase::GameOver);
        assert_eq!(handle_input(&mut state, InputEvent::SelectExit), Control::Exit);
    }

    #[test]
    fn test_invalid_events_ignored() {
        let mut state = EngineState::new(1);
        let before = state.session.clone();
        handle_input(&mut state, InputEvent::SelectCharacter(0));
        handle_input(&mut state, InputEvent::MoveLeft);
        handle_input(&mut state, InputEvent::Restart);
        handle_input(&mut state, InputEvent::SelectPowerup(PowerupKind::Invincible));
        assert_eq!(state.session, before);

        handle_input(&mut state, InputEvent::SelectStart);
        handle_input(&mut state, InputEvent::SelectCharacter(7));
        assert_eq!(state.session.phase, SessionPhase::CharacterSelect);

        let mut state = playing();
        handle_input(&mut state, InputEvent::SelectPowerup(PowerupKind::Invincible));
        assert_eq!(state.powerups.active(), None);
        handle_input(&mut state, InputEvent::SelectStart);
        assert_eq!(state.session.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_move_to_column_clamps() {
        let mut state = playing();
        handle_input(&mut state, InputEvent::MoveToColumn(12.0));
        assert_eq!(state.tuning.field.lane_of(state.player.lateral), Some(4));
        handle_input(&mut state, InputEvent::MoveToColumn(-2.0));
        assert_eq!(state.tuning.field.lane_of(state.player.lateral), Some(0));
        handle_input(&mut state, InputEvent::MoveToColumn(f32::NAN));
        assert_eq!(state.tuning.field.lane_of(state.player.lateral), Some(0));
    }

    #[test]
    fn test_moves_are_last_write_wins() {
        let mut state = playing();
        handle_input(&mut state, InputEvent::MoveLeft);
        handle_input(&mut state, InputEvent::MoveLeft);
        handle_input(&mut state, InputEvent::MoveRight);
        assert_eq!(state.player.lateral, state.tuning.field.lane_center(1));

        // Edge lane absorbs extra moves
        for _ in 0..10 {
            handle_input(&mut state, InputEvent::MoveLeft);
        }
        assert_eq!(state.player.lateral, state.tuning.field.lane_center(0));
    }

    #[test]
    fn test_planar_moves() {
        let mut state = EngineState::with_tuning(Tuning::planar(), 2);
        handle_input(&mut state, InputEvent::SelectStart);
        handle_input(&mut state, InputEvent::SelectCharacter(0));
        assert_eq!(state.player.lateral, 400.0);

        handle_input(&mut state, InputEvent::MoveRight);
        assert_eq!(state.player.lateral, 415.0);
        handle_input(&mut state, InputEvent::MoveToColumn(2000.0));
        assert_eq!(state.player.pos(), Vec2::new(770.0, -65.0));
    }

    proptest! {
        #[test]
        fn prop_move_to_column_always_valid(column in -1.0e6f32..1.0e6) {
            let mut state = playing();
            handle_input(&mut state, InputEvent::MoveToColumn(column));
            let lane = state.tuning.field.lane_of(state.player.lateral).unwrap();
            prop_assert_eq!(state.player.lateral, state.tuning.field.lane_center(lane));

            let mut planar = EngineState::with_tuning(Tuning::planar(), 2);
            handle_input(&mut planar, InputEvent::SelectStart);
            handle_input(&mut planar, InputEvent::SelectCharacter(1));
            handle_input(&mut planar, InputEvent::MoveToColumn(column));
            prop_assert!(planar.player.lateral >= 30.0 && planar.player.lateral <= 770.0);
        }
    }
}
