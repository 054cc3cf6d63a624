//! Power-up effect tracking
//!
//! Effects stack freely (no dedup). Expiry happens once per tick after
//! collisions; the queries below also check the clock so a stale effect
//! never applies between expiry passes.

use super::state::{ActivePowerUp, PowerUpKind, WorldState};
use crate::tuning::Tuning;

/// True if any unexpired effect of `kind` is active at `now`
pub fn is_active(active: &[ActivePowerUp], kind: PowerUpKind, now: f32) -> bool {
    active
        .iter()
        .any(|effect| effect.kind == kind && !effect.is_expired(now))
}

pub fn speed_boost_active(active: &[ActivePowerUp], now: f32) -> bool {
    is_active(active, PowerUpKind::Speed, now)
}

pub fn multi_shot_active(active: &[ActivePowerUp], now: f32) -> bool {
    is_active(active, PowerUpKind::MultiShot, now)
}

/// Shield is collected and tracked but nothing consults it yet
pub fn shield_active(active: &[ActivePowerUp], now: f32) -> bool {
    is_active(active, PowerUpKind::Shield, now)
}

pub fn max_speed(active: &[ActivePowerUp], tuning: &Tuning, now: f32) -> f32 {
    if speed_boost_active(active, now) {
        tuning.boosted_max_speed
    } else {
        tuning.max_speed
    }
}

pub fn shoot_interval(active: &[ActivePowerUp], tuning: &Tuning, now: f32) -> f32 {
    if speed_boost_active(active, now) {
        tuning.boosted_shoot_interval
    } else {
        tuning.shoot_interval
    }
}

/// Drop expired effects and explosion markers past their lifetime
pub fn expire(world: &mut WorldState, now: f32) {
    let before = world.active_power_ups.len();
    world.active_power_ups = std::mem::take(&mut world.active_power_ups)
        .into_iter()
        .filter(|effect| !effect.is_expired(now))
        .collect();
    let expired = before - world.active_power_ups.len();
    if expired > 0 {
        log::debug!("{expired} power-up effect(s) expired at {now:.2}s");
    }

    let ttl = world.tuning.explosion_ttl;
    world.explosions = std::mem::take(&mut world.explosions)
        .into_iter()
        .filter(|explosion| now - explosion.time < ttl)
        .collect();
}
