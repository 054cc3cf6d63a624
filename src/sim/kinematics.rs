//! Per-tick movement for the player and every falling/flying entity
//!
//! Enemies are evaluated from their spawn parameters each tick (no
//! accumulated drift). Everything else is Euler-integrated. Collections are
//! rebuilt by map + filter rather than edited in place.

use glam::Vec3;

use super::effects;
use super::state::{Enemy, EnemyKind, Player, WorldState};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Enemy position at `now`, a pure function of its spawn parameters
pub fn enemy_position(enemy: &Enemy, now: f32) -> Vec3 {
    let t = now - enemy.spawn_time;
    let offset = match enemy.kind {
        EnemyKind::Straight => Vec3::new(enemy.vel.x * t, enemy.vel.y * t, 0.0),
        EnemyKind::Zigzag => Vec3::new(
            enemy.amplitude * (enemy.frequency * t).sin(),
            enemy.vel.y * t,
            0.0,
        ),
    };
    enemy.initial_pos + offset
}

/// Apply input acceleration, speed cap, idle-axis decay, then move and clamp
pub fn integrate_player(
    player: &mut Player,
    input: &TickInput,
    tuning: &Tuning,
    max_speed: f32,
    dt: f32,
) {
    let accel_x = (input.right as i32 - input.left as i32) as f32 * tuning.acceleration;
    let accel_y = (input.up as i32 - input.down as i32) as f32 * tuning.acceleration;

    let mut vel = player.vel + Vec3::new(accel_x, accel_y, 0.0) * dt;

    let speed = vel.length();
    if speed > max_speed {
        vel *= max_speed / speed;
    }

    // Decay only axes with no key held (opposing keys still count as held)
    if !input.left && !input.right {
        vel.x -= vel.x * tuning.deceleration * dt;
    }
    if !input.up && !input.down {
        vel.y -= vel.y * tuning.deceleration * dt;
    }

    let pos = player.pos + vel * dt;
    player.pos = Vec3::new(
        pos.x.clamp(-PLAYFIELD_HALF, PLAYFIELD_HALF),
        pos.y.clamp(-PLAYFIELD_HALF, PLAYFIELD_HALF),
        pos.z,
    );
    player.vel = vel;
}

/// Rebuild every moving collection for this tick
pub fn integrate_entities(world: &mut WorldState, dt: f32, now: f32) {
    world.enemies = std::mem::take(&mut world.enemies)
        .into_iter()
        .map(|mut enemy| {
            enemy.pos = enemy_position(&enemy, now);
            enemy
        })
        .filter(|enemy| enemy.pos.y > -DESPAWN_Y)
        .collect();

    world.collectibles = std::mem::take(&mut world.collectibles)
        .into_iter()
        .map(|mut collectible| {
            collectible.pos += collectible.vel * dt;
            collectible
        })
        .filter(|collectible| collectible.pos.y > -DESPAWN_Y)
        .collect();

    world.power_ups = std::mem::take(&mut world.power_ups)
        .into_iter()
        .map(|mut pickup| {
            pickup.pos += pickup.vel * dt;
            pickup
        })
        .filter(|pickup| pickup.pos.y > -DESPAWN_Y)
        .collect();

    world.bullets = std::mem::take(&mut world.bullets)
        .into_iter()
        .map(|mut bullet| {
            bullet.pos += bullet.vel * dt;
            bullet
        })
        .filter(|bullet| bullet.pos.y < DESPAWN_Y)
        .collect();
}

/// Movement phase: player first (from input), then all entities
pub fn integrate(world: &mut WorldState, input: &TickInput, dt: f32, now: f32) {
    let max_speed = effects::max_speed(&world.active_power_ups, &world.tuning, now);
    integrate_player(&mut world.player, input, &world.tuning, max_speed, dt);
    integrate_entities(world, dt, now);
}
