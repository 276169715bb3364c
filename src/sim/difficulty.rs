//! Time-driven difficulty staircases
//!
//! Speed, spawn rate and score rate each step up on a fixed period of elapsed
//! session time. Steps and score awards are counted arithmetically from the
//! gap since the last one, so a long tick (e.g. after a stall) fires all the
//! steps it skipped in one go and the bookkeeping never lags more than one
//! period behind. Bookkeeping is kept in f64 so tiny late-game score intervals
//! still advance it.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Deepest halving level; 2^-1022 is the smallest normal f64
const MAX_SCORE_LEVEL: f64 = 1022.0;

/// Whole periods between `last` and `elapsed` (0 when `elapsed` is behind)
fn whole_periods(elapsed: f64, last: f64, period: f64) -> f64 {
    let gap = elapsed - last;
    if gap < period { 0.0 } else { (gap / period).floor() }
}

/// Fixed-period step counter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Staircase {
    pub period: f64,
    pub last_step: f64,
}

impl Staircase {
    pub fn new(period: f32) -> Self {
        Self {
            period: period as f64,
            last_step: 0.0,
        }
    }

    /// Number of steps that became due by `elapsed`, consuming them
    pub fn steps_due(&mut self, elapsed: f32) -> u32 {
        let steps = whole_periods(elapsed as f64, self.last_step, self.period);
        self.last_step += steps * self.period;
        steps as u32
    }
}

/// Score award interval at a given elapsed time: `base / 2^floor(elapsed / period)`
pub fn score_interval_at(base: f32, period: f32, elapsed: f32) -> f64 {
    let level = (elapsed.max(0.0) as f64 / period as f64).floor();
    base as f64 * 0.5f64.powi(level.min(MAX_SCORE_LEVEL) as i32)
}

/// Result of advancing the staircases for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DifficultySteps {
    pub speed_steps: u32,
    pub spawn_steps: u32,
}

/// Difficulty bookkeeping for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Speed before powerup scaling
    pub base_speed: f32,
    /// Speed actually applied to hazards this tick
    pub effective_speed: f32,
    /// Current score award interval
    pub score_interval: f64,
    /// Current delay between hazard spawns
    pub spawn_interval: f32,
    /// Time accounted for by score awards so far
    pub last_score_time: f64,
    pub speed_stairs: Staircase,
    pub spawn_stairs: Staircase,

    speed_step: f32,
    spawn_decay: f32,
    min_spawn_interval: f32,
    score_base_interval: f32,
    score_period: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            base_speed: tuning.initial_speed,
            effective_speed: tuning.initial_speed,
            score_interval: tuning.score_base_interval as f64,
            spawn_interval: tuning.initial_spawn_interval,
            last_score_time: 0.0,
            speed_stairs: Staircase::new(tuning.speed_period),
            spawn_stairs: Staircase::new(tuning.spawn_period),
            speed_step: tuning.speed_step,
            spawn_decay: tuning.spawn_decay,
            min_spawn_interval: tuning.min_spawn_interval,
            score_base_interval: tuning.score_base_interval,
            score_period: tuning.score_period,
        }
    }

    /// Apply speed and spawn-rate steps due by `elapsed`, then recompute the
    /// effective speed from `speed_multiplier` (powerup scaling).
    pub fn advance(&mut self, elapsed: f32, speed_multiplier: f32) -> DifficultySteps {
        let speed_steps = self.speed_stairs.steps_due(elapsed);
        self.base_speed += self.speed_step * speed_steps as f32;

        let spawn_steps = self.spawn_stairs.steps_due(elapsed);
        for _ in 0..spawn_steps {
            self.spawn_interval = (self.spawn_interval / self.spawn_decay).max(self.min_spawn_interval);
        }

        self.effective_speed = self.base_speed * speed_multiplier;

        DifficultySteps {
            speed_steps,
            spawn_steps,
        }
    }

    /// Award score for every interval crossed since the last award.
    ///
    /// Returns the total points earned; each award is worth `per_award`.
    /// Saturates instead of overflowing once the interval gets absurdly small.
    pub fn award_score(&mut self, elapsed: f32, per_award: u64) -> u64 {
        self.score_interval =
            score_interval_at(self.score_base_interval, self.score_period, elapsed);

        let awards = whole_periods(elapsed as f64, self.last_score_time, self.score_interval);
        self.last_score_time += awards * self.score_interval;
        (awards as u64).saturating_mul(per_award)
    }
}
