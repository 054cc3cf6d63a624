//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here. The defaults are
//! the shipped balance; a JSON file may override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player movement ===
    /// Acceleration per held direction key (units/s²)
    pub acceleration: f32,
    /// Decay factor for an axis with no key held (`v -= v * decel * dt`)
    pub deceleration: f32,
    /// Speed cap without a speed boost
    pub max_speed: f32,
    /// Speed cap while a speed boost is active
    pub boosted_max_speed: f32,

    // === Weapons ===
    /// Seconds between shots
    pub shoot_interval: f32,
    /// Seconds between shots while a speed boost is active
    pub boosted_shoot_interval: f32,
    /// Bullet speed along +y
    pub bullet_speed: f32,
    /// Bullets leave the ship this far above its center
    pub muzzle_offset: f32,
    /// Horizontal offset of the outer bullets in a multi-shot fan
    pub spread_offset: f32,
    /// Horizontal velocity of the outer bullets in a multi-shot fan
    pub spread_drift: f32,

    // === Spawning ===
    pub enemy_spawn_interval: f32,
    pub power_up_spawn_interval: f32,
    pub collectible_spawn_interval: f32,
    /// Probability that a new enemy is a zigzag
    pub zigzag_chance: f32,
    pub zigzag_amplitude: f32,
    pub zigzag_frequency: f32,
    /// Straight enemies drift sideways with |vx| below this
    pub enemy_max_drift: f32,
    pub enemy_min_fall_speed: f32,
    pub enemy_max_fall_speed: f32,
    /// Probability of a speed pickup (checked first)
    pub speed_pickup_chance: f32,
    /// Probability of a shield pickup (checked second; the rest are multi-shot)
    pub shield_pickup_chance: f32,
    pub power_up_duration: f32,
    pub power_up_fall_speed: f32,
    pub collectible_fall_speed: f32,
    pub collectible_min_size: f32,
    pub collectible_max_size: f32,

    // === Scoring ===
    pub enemy_kill_points: f32,
    /// Collectible value is `floor(size * this)`
    pub collectible_points_per_size: f32,
    /// Passive score while alive
    pub survival_points_per_sec: f32,

    // === Markers ===
    /// Explosion marker lifetime (seconds)
    pub explosion_ttl: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acceleration: 30.0,
            deceleration: 20.0,
            max_speed: 6.0,
            boosted_max_speed: 8.0,

            shoot_interval: 0.15,
            boosted_shoot_interval: 0.05,
            bullet_speed: 10.0,
            muzzle_offset: 0.6,
            spread_offset: 0.3,
            spread_drift: 1.0,

            enemy_spawn_interval: 2.0,
            power_up_spawn_interval: 10.0,
            collectible_spawn_interval: 5.0,
            zigzag_chance: 0.3,
            zigzag_amplitude: 2.0,
            zigzag_frequency: 5.0,
            enemy_max_drift: 1.0,
            enemy_min_fall_speed: 3.0,
            enemy_max_fall_speed: 5.0,
            speed_pickup_chance: 0.33,
            shield_pickup_chance: 0.33,
            power_up_duration: 5.0,
            power_up_fall_speed: 2.0,
            collectible_fall_speed: 2.0,
            collectible_min_size: 0.3,
            collectible_max_size: 1.0,

            enemy_kill_points: 100.0,
            collectible_points_per_size: 100.0,
            survival_points_per_sec: 20.0,

            explosion_ttl: 5.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Lowest fixed-step rate at which idle-axis decay stays stable
    /// (`deceleration * dt <= 1`)
    pub fn min_stable_fps(&self) -> u32 {
        self.deceleration.ceil().max(1.0) as u32
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), LoadError> {
        let positive = [
            ("acceleration", self.acceleration),
            ("max_speed", self.max_speed),
            ("boosted_max_speed", self.boosted_max_speed),
            ("shoot_interval", self.shoot_interval),
            ("boosted_shoot_interval", self.boosted_shoot_interval),
            ("bullet_speed", self.bullet_speed),
            ("enemy_spawn_interval", self.enemy_spawn_interval),
            ("power_up_spawn_interval", self.power_up_spawn_interval),
            ("collectible_spawn_interval", self.collectible_spawn_interval),
            ("enemy_min_fall_speed", self.enemy_min_fall_speed),
            ("power_up_duration", self.power_up_duration),
            ("power_up_fall_speed", self.power_up_fall_speed),
            ("collectible_fall_speed", self.collectible_fall_speed),
            ("collectible_min_size", self.collectible_min_size),
            ("explosion_ttl", self.explosion_ttl),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LoadError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("deceleration", self.deceleration),
            ("muzzle_offset", self.muzzle_offset),
            ("spread_offset", self.spread_offset),
            ("spread_drift", self.spread_drift),
            ("zigzag_amplitude", self.zigzag_amplitude),
            ("zigzag_frequency", self.zigzag_frequency),
            ("enemy_max_drift", self.enemy_max_drift),
            ("enemy_kill_points", self.enemy_kill_points),
            ("collectible_points_per_size", self.collectible_points_per_size),
            ("survival_points_per_sec", self.survival_points_per_sec),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LoadError::invalid(field, format!("must be >= 0, got {value}")));
            }
        }

        let chances = [
            ("zigzag_chance", self.zigzag_chance),
            ("speed_pickup_chance", self.speed_pickup_chance),
            ("shield_pickup_chance", self.shield_pickup_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(LoadError::invalid(field, format!("must be in [0, 1], got {value}")));
            }
        }
        if self.speed_pickup_chance + self.shield_pickup_chance > 1.0 {
            return Err(LoadError::invalid(
                "shield_pickup_chance",
                "speed and shield chances sum past 1",
            ));
        }

        if self.enemy_max_fall_speed <= self.enemy_min_fall_speed {
            return Err(LoadError::invalid(
                "enemy_max_fall_speed",
                "must be greater than enemy_min_fall_speed",
            ));
        }
        if self.collectible_max_size <= self.collectible_min_size {
            return Err(LoadError::invalid(
                "collectible_max_size",
                "must be greater than collectible_min_size",
            ));
        }
        Ok(())
    }
}
