//! Fire control: cooldown timer and shot patterns

use glam::Vec3;

use super::effects;
use super::state::{Bullet, SoundEvent, WorldState};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Bullet (offset from muzzle, velocity) pairs for one trigger pull
pub fn shot_pattern(tuning: &Tuning, multi_shot: bool) -> Vec<(Vec3, Vec3)> {
    let forward = Vec3::new(0.0, tuning.bullet_speed, 0.0);
    if multi_shot {
        let side = Vec3::new(tuning.spread_offset, 0.0, 0.0);
        let drift = Vec3::new(tuning.spread_drift, 0.0, 0.0);
        vec![
            (-side, forward - drift),
            (Vec3::ZERO, forward),
            (side, forward + drift),
        ]
    } else {
        vec![(Vec3::ZERO, forward)]
    }
}

/// Advance the cooldown and fire if the trigger is held and the gun is ready.
/// Returns the number of bullets emitted.
pub fn update(
    world: &mut WorldState,
    input: &TickInput,
    dt: f32,
    now: f32,
    events: &mut Vec<SoundEvent>,
) -> usize {
    world.player.shoot_timer += dt;

    let interval = effects::shoot_interval(&world.active_power_ups, &world.tuning, now);
    if !input.fire || world.player.shoot_timer < interval {
        return 0;
    }

    let multi_shot = effects::multi_shot_active(&world.active_power_ups, now);
    let muzzle = world.player.pos + Vec3::new(0.0, world.tuning.muzzle_offset, 0.0);
    let pattern = shot_pattern(&world.tuning, multi_shot);
    for &(offset, vel) in &pattern {
        let id = world.next_entity_id();
        world.add_bullet(Bullet {
            id,
            pos: muzzle + offset,
            vel,
        });
    }

    world.player.shoot_timer = 0.0;
    events.push(SoundEvent::Shoot);
    pattern.len()
}
