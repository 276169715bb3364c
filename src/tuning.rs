//! Gameplay tuning
//!
//! Every constant the simulation reads lives in [`Tuning`]. Two presets exist,
//! one per product variant; JSON files can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Field;

/// Product variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Discrete lanes, obstacles approach along depth
    #[default]
    Lanes,
    /// Continuous horizontal position, obstacles fall down the screen
    Planar,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Lanes => "lanes",
            Variant::Planar => "planar",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lanes" | "lane" | "3d" => Some(Variant::Lanes),
            "planar" | "2d" => Some(Variant::Planar),
            _ => None,
        }
    }

    /// Hazard pool capacity for this variant
    pub fn hazard_capacity(&self) -> usize {
        match self {
            Variant::Lanes => 40,
            Variant::Planar => 20,
        }
    }
}

/// All gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lateral geometry (lanes or open field)
    pub field: Field,
    /// Fixed number of hazard slots
    pub hazard_capacity: usize,

    // === Depth axis (grows toward and past the player) ===
    /// Depth at which hazards and the pickup appear
    pub spawn_depth: f32,
    /// Entries deeper than this are retired
    pub retire_depth: f32,
    /// Player's fixed depth
    pub player_depth: f32,

    // === Extents (x = lateral, y = depth) ===
    pub player_half_extent: Vec2,
    pub hazard_half_extent: Vec2,
    pub pickup_half_extent: Vec2,
    /// Lateral distance of one MoveLeft/MoveRight in an open field
    pub lateral_step: f32,

    // === Difficulty ===
    pub initial_speed: f32,
    pub speed_step: f32,
    pub speed_period: f32,
    pub score_base_interval: f32,
    pub score_period: f32,
    pub initial_spawn_interval: f32,
    /// Spawn interval is divided by this every `spawn_period`
    pub spawn_decay: f32,
    pub spawn_period: f32,
    pub min_spawn_interval: f32,

    // === Shields ===
    pub max_shields: u8,
    /// Minimum time between two shield absorptions
    pub grace_period: f32,

    // === Powerups ===
    pub powerup_first_offer: f32,
    pub powerup_duration: f32,
    pub powerup_cooldown: f32,
    /// Unanswered offers lapse after this long (None = wait forever)
    pub powerup_offer_window: Option<f32>,

    // === Shield pickup schedule ===
    pub pickup_first_spawn: f32,
    pub pickup_respawn_min: f32,
    pub pickup_respawn_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::lanes()
    }
}

impl Tuning {
    /// Five-lane runway preset
    pub fn lanes() -> Self {
        Self {
            field: Field::Lanes {
                count: 5,
                spacing: 4.0,
            },
            hazard_capacity: Variant::Lanes.hazard_capacity(),

            spawn_depth: -80.0,
            retire_depth: 25.0,
            player_depth: 0.0,

            player_half_extent: Vec2::new(0.6, 0.6),
            hazard_half_extent: Vec2::new(1.0, 1.25),
            pickup_half_extent: Vec2::new(1.0, 0.75),
            lateral_step: 4.0,

            initial_speed: 10.0,
            speed_step: 2.0,
            speed_period: 15.0,
            score_base_interval: 1.0,
            score_period: 30.0,
            initial_spawn_interval: 1.0,
            spawn_decay: 1.5,
            spawn_period: 30.0,
            min_spawn_interval: 0.1,

            max_shields: 3,
            grace_period: 0.4,

            powerup_first_offer: 10.0,
            powerup_duration: 5.0,
            powerup_cooldown: 10.0,
            powerup_offer_window: None,

            pickup_first_spawn: 20.0,
            pickup_respawn_min: 20.0,
            pickup_respawn_max: 40.0,
        }
    }

    /// 800px-wide falling-blocks preset (screen y mapped to negative depth)
    pub fn planar() -> Self {
        Self {
            field: Field::Open { width: 800.0 },
            hazard_capacity: Variant::Planar.hazard_capacity(),

            // Top edge 600 + block height 30, centre at 645
            spawn_depth: -645.0,
            // Gone once the block's top edge drops below y = 0
            retire_depth: 15.0,
            // Player rect y = 40..90
            player_depth: -65.0,

            player_half_extent: Vec2::new(30.0, 25.0),
            hazard_half_extent: Vec2::new(30.0, 15.0),
            pickup_half_extent: Vec2::new(20.0, 20.0),
            lateral_step: 15.0,

            // Logical speed 5 (+2) at 40 px per unit
            initial_speed: 200.0,
            speed_step: 80.0,
            ..Self::lanes()
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Lanes => Self::lanes(),
            Variant::Planar => Self::planar(),
        }
    }

    /// Variant implied by the field geometry
    pub fn variant(&self) -> Variant {
        match self.field {
            Field::Lanes { .. } => Variant::Lanes,
            Field::Open { .. } => Variant::Planar,
        }
    }

    /// Parse a (possibly partial) tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        match self.field {
            Field::Lanes { count, spacing } => {
                if count == 0 {
                    return Err(ConfigError::Invalid {
                        field: "field.count",
                        reason: "need at least one lane",
                    });
                }
                positive("field.spacing", spacing)?;
            }
            Field::Open { width } => {
                positive("field.width", width)?;
                if self.player_half_extent.x * 2.0 > width {
                    return Err(ConfigError::Invalid {
                        field: "player_half_extent",
                        reason: "player is wider than the field",
                    });
                }
            }
        }

        if self.hazard_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "hazard_capacity",
                reason: "need at least one hazard slot",
            });
        }
        if self.retire_depth <= self.player_depth || self.spawn_depth >= self.player_depth {
            return Err(ConfigError::Invalid {
                field: "spawn_depth",
                reason: "expected spawn_depth < player_depth < retire_depth",
            });
        }

        positive("player_half_extent.x", self.player_half_extent.x)?;
        positive("player_half_extent.y", self.player_half_extent.y)?;
        positive("hazard_half_extent.x", self.hazard_half_extent.x)?;
        positive("hazard_half_extent.y", self.hazard_half_extent.y)?;
        positive("pickup_half_extent.x", self.pickup_half_extent.x)?;
        positive("pickup_half_extent.y", self.pickup_half_extent.y)?;
        positive("lateral_step", self.lateral_step)?;
        positive("initial_speed", self.initial_speed)?;
        positive("speed_period", self.speed_period)?;
        positive("score_base_interval", self.score_base_interval)?;
        positive("score_period", self.score_period)?;
        positive("initial_spawn_interval", self.initial_spawn_interval)?;
        positive("spawn_period", self.spawn_period)?;
        positive("min_spawn_interval", self.min_spawn_interval)?;
        positive("powerup_duration", self.powerup_duration)?;
        positive("powerup_cooldown", self.powerup_cooldown)?;
        positive("pickup_respawn_min", self.pickup_respawn_min)?;

        if self.speed_step < 0.0 {
            return Err(ConfigError::Invalid {
                field: "speed_step",
                reason: "speed must not decrease",
            });
        }
        if self.spawn_decay < 1.0 {
            return Err(ConfigError::Invalid {
                field: "spawn_decay",
                reason: "spawning must not slow down over time",
            });
        }
        if self.grace_period < 0.0 {
            return Err(ConfigError::Invalid {
                field: "grace_period",
                reason: "must not be negative",
            });
        }
        if let Some(window) = self.powerup_offer_window {
            positive("powerup_offer_window", window)?;
        }
        if self.pickup_respawn_max < self.pickup_respawn_min {
            return Err(ConfigError::Invalid {
                field: "pickup_respawn_max",
                reason: "must be at least pickup_respawn_min",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(Tuning::lanes().validate().is_ok());
        assert!(Tuning::planar().validate().is_ok());
        assert_eq!(Tuning::planar().hazard_capacity, 20);
        assert_eq!(Tuning::lanes().hazard_capacity, 40);
    }

    #[test]
    fn test_variant_follows_field() {
        assert_eq!(Tuning::lanes().variant(), Variant::Lanes);
        assert_eq!(Tuning::planar().variant(), Variant::Planar);

        // A tuning file decides the field no matter which preset it started from
        let tuning =
            Tuning::from_json(r#"{ "field": { "kind": "open", "width": 400.0 } }"#).unwrap();
        assert_eq!(tuning.variant(), Variant::Planar);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("Planar"), Some(Variant::Planar));
        assert_eq!(Variant::from_str("3d"), Some(Variant::Lanes));
        assert_eq!(Variant::from_str("hex"), None);
        assert_eq!(Variant::from_str(Variant::Lanes.as_str()), Some(Variant::Lanes));
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let tuning = Tuning::from_json(r#"{ "grace_period": 0.25, "max_shields": 5 }"#).unwrap();
        assert_eq!(tuning.grace_period, 0.25);
        assert_eq!(tuning.max_shields, 5);
        assert_eq!(tuning.initial_speed, 10.0);
    }

    #[test]
    fn test_json_roundtrip_preserves_field() {
        let planar = Tuning::planar();
        let json = planar.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), planar);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "hazard_capacity": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "hazard_capacity",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "spawn_decay": 0.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "spawn_decay", .. }));

        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
