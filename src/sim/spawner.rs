//! Timed spawning of enemies, power-up pickups and collectibles
//!
//! Each timer accumulates delta and resets to zero when it fires; the
//! overflow is dropped, so spawns drift slightly late at coarse timesteps.

use glam::Vec3;
use rand::Rng;

use super::state::{Collectible, Enemy, EnemyKind, PowerUpKind, PowerUpPickup, WorldState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Advance a spawn timer; true when it fired (and was reset)
fn timer_fired(timer: &mut f32, dt: f32, interval: f32) -> bool {
    *timer += dt;
    if *timer >= interval {
        *timer = 0.0;
        true
    } else {
        false
    }
}

fn spawn_x(rng: &mut impl Rng) -> f32 {
    rng.random_range(-PLAYFIELD_HALF..PLAYFIELD_HALF)
}

/// Uniform roll in `min..max`. An empty range is a tuning bug: panic in
/// debug builds, spawn at `min` in release.
fn roll_between(rng: &mut impl Rng, field: &str, min: f32, max: f32) -> f32 {
    let valid = min < max;
    debug_assert!(valid, "empty spawn range {field}: {min}..{max}");
    if valid {
        rng.random_range(min..max)
    } else {
        log::warn!("Empty spawn range {field}={min}..{max}, using {min}");
        min
    }
}

/// Roll a new enemy at the top of the playfield (id assigned by caller)
pub fn roll_enemy(rng: &mut impl Rng, tuning: &Tuning, id: u32, now: f32) -> Enemy {
    let x = spawn_x(rng);
    let kind = if rng.random::<f32>() < tuning.zigzag_chance {
        EnemyKind::Zigzag
    } else {
        EnemyKind::Straight
    };
    let fall = -roll_between(
        rng,
        "enemy_fall_speed",
        tuning.enemy_min_fall_speed,
        tuning.enemy_max_fall_speed,
    );
    let (vel, amplitude, frequency) = match kind {
        EnemyKind::Straight => {
            let max_drift = tuning.enemy_max_drift.abs();
            let drift = rng.random_range(-max_drift..=max_drift);
            (Vec3::new(drift, fall, 0.0), 0.0, 0.0)
        }
        EnemyKind::Zigzag => (
            Vec3::new(0.0, fall, 0.0),
            tuning.zigzag_amplitude,
            tuning.zigzag_frequency,
        ),
    };
    let pos = Vec3::new(x, SPAWN_Y, 0.0);
    Enemy {
        id,
        kind,
        pos,
        initial_pos: pos,
        vel,
        amplitude,
        frequency,
        spawn_time: now,
    }
}

/// Single roll split across speed / shield / multi-shot
pub fn roll_power_up_kind(rng: &mut impl Rng, tuning: &Tuning) -> PowerUpKind {
    let roll = rng.random::<f32>();
    if roll < tuning.speed_pickup_chance {
        PowerUpKind::Speed
    } else if roll < tuning.speed_pickup_chance + tuning.shield_pickup_chance {
        PowerUpKind::Shield
    } else {
        PowerUpKind::MultiShot
    }
}

pub fn roll_power_up(rng: &mut impl Rng, tuning: &Tuning, id: u32) -> PowerUpPickup {
    let x = spawn_x(rng);
    PowerUpPickup {
        id,
        kind: roll_power_up_kind(rng, tuning),
        pos: Vec3::new(x, SPAWN_Y, 0.0),
        vel: Vec3::new(0.0, -tuning.power_up_fall_speed, 0.0),
        duration: tuning.power_up_duration,
    }
}

pub fn roll_collectible(rng: &mut impl Rng, tuning: &Tuning, id: u32, now: f32) -> Collectible {
    let x = spawn_x(rng);
    let size = roll_between(
        rng,
        "collectible_size",
        tuning.collectible_min_size,
        tuning.collectible_max_size,
    );
    Collectible {
        id,
        pos: Vec3::new(x, SPAWN_Y, 0.0),
        vel: Vec3::new(0.0, -tuning.collectible_fall_speed, 0.0),
        size,
        spawn_time: now,
    }
}

/// Spawn phase: advance all three timers and inject whatever fired
pub fn update(world: &mut WorldState, dt: f32, now: f32) {
    if timer_fired(
        &mut world.spawn_timers.enemy,
        dt,
        world.tuning.enemy_spawn_interval,
    ) {
        let id = world.next_entity_id();
        let enemy = roll_enemy(&mut world.rng, &world.tuning, id, now);
        log::debug!("Spawned {:?} enemy at x={:.2}", enemy.kind, enemy.pos.x);
        world.add_enemy(enemy);
    }

    if timer_fired(
        &mut world.spawn_timers.power_up,
        dt,
        world.tuning.power_up_spawn_interval,
    ) {
        let id = world.next_entity_id();
        let pickup = roll_power_up(&mut world.rng, &world.tuning, id);
        log::debug!("Spawned {:?} pickup at x={:.2}", pickup.kind, pickup.pos.x);
        world.add_power_up(pickup);
    }

    if timer_fired(
        &mut world.spawn_timers.collectible,
        dt,
        world.tuning.collectible_spawn_interval,
    ) {
        let id = world.next_entity_id();
        let collectible = roll_collectible(&mut world.rng, &world.tuning, id, now);
        log::debug!(
            "Spawned collectible (size {:.2}) at x={:.2}",
            collectible.size,
            collectible.pos.x
        );
        world.add_collectible(collectible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_timer_fires_every_two_seconds() {
        let mut world = WorldState::new(42);
        let dt = 0.25;
        let mut now = 0.0;
        for _ in 0..7 {
            now += dt;
            update(&mut world, dt, now);
        }
        assert!(world.enemies.is_empty(), "1.75s: nothing yet");

        now += dt;
        update(&mut world, dt, now);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.spawn_timers.enemy, 0.0, "timer resets to zero");
        assert_eq!(world.enemies[0].spawn_time, now);
    }

    #[test]
    fn test_timers_are_independent() {
        let mut world = WorldState::new(42);
        // One 10 second step fires all three exactly once
        update(&mut world, 10.0, 10.0);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.power_ups.len(), 1);
        assert_eq!(world.collectibles.len(), 1);
        assert_eq!(world.spawn_timers.power_up, 0.0);

        update(&mut world, 5.0, 15.0);
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.power_ups.len(), 1);
        assert_eq!(world.collectibles.len(), 2);
    }

    #[test]
    fn test_enemy_rolls_stay_in_range() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut zigzags = 0;
        for i in 0..2000 {
            let enemy = roll_enemy(&mut rng, &tuning, i, 1.5);
            assert!((-8.0..8.0).contains(&enemy.pos.x));
            assert_eq!(enemy.pos.y, SPAWN_Y);
            assert_eq!(enemy.pos, enemy.initial_pos);
            assert!(enemy.vel.y <= -3.0 && enemy.vel.y > -5.0);
            match enemy.kind {
                EnemyKind::Straight => {
                    assert!((-1.0..=1.0).contains(&enemy.vel.x));
                    assert_eq!(enemy.amplitude, 0.0);
                    assert_eq!(enemy.frequency, 0.0);
                }
                EnemyKind::Zigzag => {
                    zigzags += 1;
                    assert_eq!(enemy.vel.x, 0.0);
                    assert_eq!(enemy.amplitude, 2.0);
                    assert_eq!(enemy.frequency, 5.0);
                }
            }
        }
        // ~30% zigzag
        assert!((450..750).contains(&zigzags), "zigzags = {zigzags}");
    }

    #[test]
    fn test_power_up_split() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut counts = [0usize; 3];
        for i in 0..3000 {
            let pickup = roll_power_up(&mut rng, &tuning, i);
            assert_eq!(pickup.duration, 5.0);
            assert_eq!(pickup.vel, Vec3::new(0.0, -2.0, 0.0));
            match pickup.kind {
                PowerUpKind::Speed => counts[0] += 1,
                PowerUpKind::Shield => counts[1] += 1,
                PowerUpKind::MultiShot => counts[2] += 1,
            }
        }
        for count in counts {
            assert!((850..1150).contains(&count), "counts = {counts:?}");
        }
    }

    #[test]
    fn test_collectible_rolls() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for i in 0..500 {
            let c = roll_collectible(&mut rng, &tuning, i, 4.0);
            assert!((0.3..1.0).contains(&c.size));
            assert_eq!(c.vel, Vec3::new(0.0, -2.0, 0.0));
            assert_eq!(c.spawn_time, 4.0);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "enemy_fall_speed")]
    fn test_empty_fall_range_is_a_bug() {
        let mut world = WorldState::new(1);
        world.tuning.enemy_min_fall_speed = 4.0;
        world.tuning.enemy_max_fall_speed = 4.0;
        world.start_game();
        update(&mut world, 2.0, 2.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = WorldState::new(99);
        let mut b = WorldState::new(99);
        for i in 1..=200 {
            let now = i as f32 * 0.1;
            update(&mut a, 0.1, now);
            update(&mut b, 0.1, now);
        }
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.power_ups, b.power_ups);
        assert_eq!(a.collectibles, b.collectibles);
    }
}
