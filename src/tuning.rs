//! Data-driven game balance
//!
//! Every gameplay constant that a designer might want to tweak lives here.
//! Defaults reproduce the shipped balance; a JSON document can override any
//! subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("`{field}` must be a probability in [0, 1] (got {value})")]
    NotProbability { field: &'static str, value: f32 },
    #[error("`cooldown_reduction_step` x `cooldown_reduction_cap` must stay below 1 (got {0})")]
    CooldownReductionTooStrong(f32),
}

/// Per-skill balance values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillTuning {
    /// Base cooldown in seconds before cooldown reduction
    pub cooldown: f32,
    /// Active duration in seconds (0 = instantaneous)
    pub duration: f32,
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics (per frame) ===
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Upward velocity applied by a jump
    pub jump_impulse: f32,
    /// Stamina consumed per jump
    pub jump_stamina_cost: f32,
    /// Stamina regained per frame while below max
    pub stamina_regen: f32,
    /// Starting max stamina
    pub base_max_stamina: f32,

    // === Pace ===
    /// Scroll speed with no upgrades (units per frame)
    pub base_speed: f32,
    /// Seconds of running between shop visits
    pub rest_interval: f32,
    /// Probability per frame that a coin spawns
    pub coin_spawn_chance: f32,
    /// Probability that a spawned obstacle is airborne
    pub airborne_chance: f32,
    /// Obstacle spawn period is floor(spawn_distance / speed) frames
    pub spawn_distance: f32,
    /// Currency per coin
    pub coin_value: u64,

    // === Skills ===
    pub time_slow: SkillTuning,
    pub invincible: SkillTuning,
    pub clear_ahead: SkillTuning,
    /// Speed multiplier while time-slow is active
    pub time_slow_factor: f32,
    /// Clear-ahead range at level 0
    pub clear_base_range: f32,
    /// Extra range per clear-ahead level
    pub clear_range_per_level: f32,

    // === Upgrades ===
    /// Speed bonus per speed level
    pub speed_per_level: f32,
    /// Max stamina per stamina level
    pub stamina_per_level: f32,
    /// Cooldown fraction removed per cooldown-reduction level
    pub cooldown_reduction_step: f32,
    /// Highest cooldown-reduction level
    pub cooldown_reduction_cap: u32,
    /// Seconds added per duration upgrade
    pub duration_per_level: f32,
    /// Price multiplier after each purchase
    pub price_growth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: 12.0,
            jump_stamina_cost: 20.0,
            // Reduced regen: a full bar takes 800 frames to refill
            stamina_regen: 0.125,
            base_max_stamina: 100.0,

            base_speed: 6.0,
            rest_interval: 180.0,
            coin_spawn_chance: 0.05,
            airborne_chance: 0.3,
            spawn_distance: 1000.0,
            coin_value: 10,

            time_slow: SkillTuning {
                cooldown: 60.0,
                duration: 5.0,
            },
            invincible: SkillTuning {
                cooldown: 120.0,
                duration: 5.0,
            },
            clear_ahead: SkillTuning {
                cooldown: 180.0,
                duration: 0.0,
            },
            time_slow_factor: 0.5,
            clear_base_range: 300.0,
            clear_range_per_level: 50.0,

            speed_per_level: 0.5,
            stamina_per_level: 20.0,
            cooldown_reduction_step: 0.05,
            cooldown_reduction_cap: 10,
            duration_per_level: 1.0,
            price_growth: 1.5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("base_max_stamina", self.base_max_stamina),
            ("base_speed", self.base_speed),
            ("rest_interval", self.rest_interval),
            ("spawn_distance", self.spawn_distance),
            ("time_slow_factor", self.time_slow_factor),
            ("price_growth - 1", self.price_growth - 1.0),
            ("time_slow.cooldown", self.time_slow.cooldown),
            ("invincible.cooldown", self.invincible.cooldown),
            ("clear_ahead.cooldown", self.clear_ahead.cooldown),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        // Negative values here would let stamina or speed leave their ranges
        let non_negative = [
            ("jump_stamina_cost", self.jump_stamina_cost),
            ("stamina_regen", self.stamina_regen),
            ("stamina_per_level", self.stamina_per_level),
            ("speed_per_level", self.speed_per_level),
            ("cooldown_reduction_step", self.cooldown_reduction_step),
            ("duration_per_level", self.duration_per_level),
            ("clear_base_range", self.clear_base_range),
            ("clear_range_per_level", self.clear_range_per_level),
            ("time_slow.duration", self.time_slow.duration),
            ("invincible.duration", self.invincible.duration),
            ("clear_ahead.duration", self.clear_ahead.duration),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        let probabilities = [
            ("coin_spawn_chance", self.coin_spawn_chance),
            ("airborne_chance", self.airborne_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::NotProbability { field, value });
            }
        }

        let max_reduction = self.cooldown_reduction_step * self.cooldown_reduction_cap as f32;
        if max_reduction >= 1.0 {
            return Err(TuningError::CooldownReductionTooStrong(max_reduction));
        }

        Ok(())
    }

    /// Cooldown multiplier for a cooldown-reduction level (level is capped)
    pub fn cooldown_multiplier(&self, cdr_level: u32) -> f32 {
        let level = cdr_level.min(self.cooldown_reduction_cap);
        1.0 - level as f32 * self.cooldown_reduction_step
    }

    /// Clear-ahead reach for a given clear level
    pub fn clear_range(&self, level: u32) -> f32 {
        self.clear_base_range + level as f32 * self.clear_range_per_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 8.0, "coin_value": 25 }"#).unwrap();
        assert_eq!(tuning.base_speed, 8.0);
        assert_eq!(tuning.coin_value, 25);
        // Untouched fields keep their defaults
        assert_eq!(tuning.gravity, Tuning::default().gravity);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "base_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NotPositive { field: "base_speed", .. }));

        let err = Tuning::from_json(r#"{ "coin_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NotProbability { .. }));

        let err = Tuning::from_json(r#"{ "cooldown_reduction_step": 0.2 }"#).unwrap_err();
        assert!(matches!(err, TuningError::CooldownReductionTooStrong(_)));

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_negative_rates() {
        for field in [
            "jump_stamina_cost",
            "stamina_regen",
            "stamina_per_level",
            "speed_per_level",
            "cooldown_reduction_step",
            "duration_per_level",
            "clear_range_per_level",
        ] {
            let json = format!(r#"{{ "{field}": -1.0 }}"#);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(
                matches!(err, TuningError::Negative { field: f, .. } if f == field),
                "{field}: {err}"
            );
        }

        let err = Tuning::from_json(r#"{ "invincible": { "cooldown": 120.0, "duration": -5.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Negative { field: "invincible.duration", .. }));

        // Zero is allowed: free jumps, no regen
        let tuning = Tuning::from_json(r#"{ "jump_stamina_cost": 0.0, "stamina_regen": 0.0 }"#);
        assert!(tuning.is_ok());
    }

    #[test]
    fn test_cooldown_multiplier_caps_at_half() {
        let tuning = Tuning::default();
        assert_eq!(tuning.cooldown_multiplier(0), 1.0);
        assert!((tuning.cooldown_multiplier(4) - 0.8).abs() < 1e-6);
        assert!((tuning.cooldown_multiplier(10) - 0.5).abs() < 1e-6);
        assert!((tuning.cooldown_multiplier(25) - 0.5).abs() < 1e-6);
    }
}
