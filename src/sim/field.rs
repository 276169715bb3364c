//! Lateral geometry of the playfield
//!
//! The two product variants differ only in how the lateral axis works:
//! - `Lanes`: a few discrete lanes, entities share a column iff they share a lane
//! - `Open`: a continuous strip, entities share a column iff their lateral
//!   intervals overlap
//!
//! Everything else (depth, speed, spawning) is identical, so the rest of the
//! simulation only talks to the field through the methods below.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Field {
    /// `count` lanes centred on x = 0, `spacing` world units apart
    Lanes { count: usize, spacing: f32 },
    /// Continuous strip from x = 0 to x = `width`
    Open { width: f32 },
}

impl Field {
    /// Lateral position of a lane's centre line
    pub fn lane_center(&self, lane: usize) -> f32 {
        match *self {
            Field::Lanes { count, spacing } => {
                let lane = lane.min(count.saturating_sub(1));
                (lane as f32 - (count as f32 - 1.0) / 2.0) * spacing
            }
            Field::Open { width } => width / 2.0,
        }
    }

    /// Lane containing a lateral position (nearest lane, clamped)
    pub fn lane_of(&self, x: f32) -> Option<usize> {
        match *self {
            Field::Lanes { count, spacing } => {
                let max = count.saturating_sub(1) as f32;
                let index = (x / spacing + max / 2.0).round();
                Some(if index.is_nan() { 0 } else { index.clamp(0.0, max) as usize })
            }
            Field::Open { .. } => None,
        }
    }

    /// Where a freshly reset player stands
    pub fn start_position(&self) -> f32 {
        match *self {
            Field::Lanes { count, .. } => self.lane_center(count / 2),
            Field::Open { width } => width / 2.0,
        }
    }

    /// Snap/clamp a lateral position so an entity of `half_width` is valid
    pub fn clamp_lateral(&self, x: f32, half_width: f32) -> f32 {
        match *self {
            Field::Lanes { .. } => self.lane_center(self.lane_of(x).unwrap_or(0)),
            Field::Open { width } => {
                let min = half_width.min(width / 2.0);
                x.clamp(min, width - min)
            }
        }
    }

    /// Resolve a requested column to a valid lateral position.
    ///
    /// With lanes, `column` is a lane index; in an open field it is the
    /// requested centre position. Either way out-of-range requests clamp to the
    /// nearest valid column.
    pub fn column_position(&self, column: f32, half_width: f32) -> f32 {
        match *self {
            Field::Lanes { count, .. } => {
                let max = count.saturating_sub(1) as f32;
                self.lane_center(column.round().clamp(0.0, max) as usize)
            }
            Field::Open { .. } => self.clamp_lateral(column, half_width),
        }
    }

    /// Move one step left (`direction < 0`) or right from `x`
    pub fn step(&self, x: f32, direction: i32, step: f32, half_width: f32) -> f32 {
        match *self {
            Field::Lanes { count, .. } => {
                let current = self.lane_of(x).unwrap_or(0) as i64;
                let max = count.saturating_sub(1) as i64;
                let target = (current + direction.signum() as i64).clamp(0, max);
                self.lane_center(target as usize)
            }
            Field::Open { .. } => {
                self.clamp_lateral(x + direction.signum() as f32 * step, half_width)
            }
        }
    }

    /// Uniformly random spawn column for an entity of `half_width`
    pub fn random_lateral<R: Rng>(&self, rng: &mut R, half_width: f32) -> f32 {
        match *self {
            Field::Lanes { count, .. } => self.lane_center(rng.random_range(0..count.max(1))),
            Field::Open { width } => {
                let min = half_width.min(width / 2.0);
                let max = width - min;
                if max > min {
                    rng.random_range(min..max)
                } else {
                    min
                }
            }
        }
    }

    /// Column test: do two entities occupy the same column?
    pub fn columns_match(&self, a: f32, a_half: f32, b: f32, b_half: f32) -> bool {
        match *self {
            Field::Lanes { .. } => self.lane_of(a) == self.lane_of(b),
            Field::Open { .. } => (a - b).abs() < a_half + b_half,
        }
    }
}
