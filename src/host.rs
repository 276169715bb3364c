//! Fixed-timestep host loop
//!
//! Frame times from the platform are irregular; the simulation wants small,
//! even steps. [`FixedStepper`] accumulates frame time and feeds the engine
//! whole `SIM_DT` steps, carrying the remainder to the next frame.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{EngineState, tick};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepper {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepper {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Run simulation ticks for one frame. Returns the number of ticks run.
    pub fn advance(&mut self, state: &mut EngineState, frame_dt: f32) -> u32 {
        self.advance_with(state, frame_dt, |_| {})
    }

    /// Like [`advance`](Self::advance), calling `before_step` ahead of every tick
    /// so inputs can be applied between ticks.
    pub fn advance_with<F>(&mut self, state: &mut EngineState, frame_dt: f32, mut before_step: F) -> u32
    where
        F: FnMut(&mut EngineState),
    {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            before_step(state);
            tick(state, self.step);
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}
