use glam::Vec3;

use star_strike::Autopilot;
use star_strike::consts::{PLAYER_START, SIM_DT, STARTING_LIVES};
use star_strike::sim::{
    Enemy, EnemyKind, FrameTime, GamePhase, PowerUpKind, PowerUpPickup, SimClock, SoundEvent,
    TickInput, WorldState, enemy_position, tick,
};

fn parked_enemy(world: &mut WorldState, x: f32, y: f32, now: f32) {
    let id = world.next_entity_id();
    let pos = Vec3::new(x, y, 0.0);
    world.add_enemy(Enemy {
        id,
        kind: EnemyKind::Straight,
        pos,
        initial_pos: pos,
        vel: Vec3::ZERO,
        amplitude: 0.0,
        frequency: 0.0,
        spawn_time: now,
    });
}

#[test]
fn straight_enemy_one_second_after_spawn() {
    let t = 7.25;
    let pos = Vec3::new(0.0, 10.0, 0.0);
    let enemy = Enemy {
        id: 1,
        kind: EnemyKind::Straight,
        pos,
        initial_pos: pos,
        vel: Vec3::new(0.0, -4.0, 0.0),
        amplitude: 0.0,
        frequency: 0.0,
        spawn_time: t,
    };
    let at = enemy_position(&enemy, t + 1.0);
    assert!((at - Vec3::new(0.0, 6.0, 0.0)).length() < 1e-5);
}

#[test]
fn holding_up_reaches_cap_on_second_tick() {
    let mut world = WorldState::new(1);
    world.start_game();
    assert_eq!(world.player.pos, PLAYER_START);

    let up = TickInput {
        up: true,
        ..Default::default()
    };
    tick(&mut world, &up, FrameTime::new(0.1, 0.1));
    assert!((world.player.vel.y - 3.0).abs() < 1e-5);

    tick(&mut world, &up, FrameTime::new(0.2, 0.1));
    assert!((world.player.vel.y - 6.0).abs() < 1e-5);
    // 0.3 after tick 1 plus 0.6 after tick 2
    assert!((world.player.pos.y - (-8.0 + 0.9)).abs() < 1e-4);
}

#[test]
fn three_simultaneous_hits_end_the_run_in_one_tick() {
    let mut world = WorldState::new(1);
    world.start_game();
    let now = 0.5;
    parked_enemy(&mut world, 0.0, -8.0, now);
    parked_enemy(&mut world, 0.3, -7.8, now);
    parked_enemy(&mut world, -0.3, -7.7, now);

    tick(&mut world, &TickInput::default(), FrameTime::new(now, 0.5));
    assert_eq!(world.lives, 0);
    assert!(world.game_over);
    assert_eq!(world.phase(), GamePhase::GameOver);
    assert!(world.enemies.is_empty());

    // Frozen until restart
    let score = world.score;
    tick(&mut world, &TickInput::default(), FrameTime::new(10.0, 9.5));
    assert_eq!(world.score, score);

    assert!(world.restart());
    assert_eq!(world.lives, STARTING_LIVES);
    assert_eq!(world.phase(), GamePhase::Playing);
}

#[test]
fn start_game_twice_equals_once() {
    let mut once = WorldState::new(4);
    once.start_game();

    let mut twice = WorldState::new(4);
    twice.start_game();
    twice.start_game();

    let a = serde_json::to_value(&once).unwrap();
    let b = serde_json::to_value(&twice).unwrap();
    assert_eq!(a, b);
}

#[test]
fn speed_pickup_changes_fire_rate() {
    let mut world = WorldState::new(2);
    world.start_game();
    let id = world.next_entity_id();
    world.add_power_up(PowerUpPickup {
        id,
        kind: PowerUpKind::Speed,
        pos: PLAYER_START,
        vel: Vec3::new(0.0, -2.0, 0.0),
        duration: 5.0,
    });

    let fire = TickInput {
        fire: true,
        ..Default::default()
    };
    let dt = 0.05;
    let events = tick(&mut world, &fire, FrameTime::new(dt, dt));
    assert!(events.contains(&SoundEvent::PowerUp));
    assert_eq!(world.active_power_ups.len(), 1);

    // Boosted interval is one tick at this dt
    let mut shots = 0;
    for i in 2..=11 {
        let events = tick(&mut world, &fire, FrameTime::new(i as f32 * dt, dt));
        shots += events.iter().filter(|e| **e == SoundEvent::Shoot).count();
    }
    assert_eq!(shots, 10);

    // After the effect lapses the rate falls back to every third tick
    let mut shots = 0;
    for i in 200..212 {
        let events = tick(&mut world, &fire, FrameTime::new(i as f32 * dt, dt));
        shots += events.iter().filter(|e| **e == SoundEvent::Shoot).count();
    }
    assert!(world.active_power_ups.is_empty());
    assert_eq!(shots, 4);
}

#[test]
fn autopilot_run_keeps_invariants() {
    let mut world = WorldState::new(2024);
    world.start_game();
    let pilot = Autopilot::default();
    let mut clock = SimClock::new(SIM_DT);

    let mut last_score = 0.0;
    while world.is_running() && clock.elapsed() < 90.0 {
        let input = pilot.input(&world);
        tick(&mut world, &input, clock.tick());

        assert!(world.score >= last_score);
        assert!(world.player.pos.x.abs() <= 8.0);
        assert!(world.player.pos.y.abs() <= 8.0);
        assert!(world.bullets.iter().all(|b| b.pos.y < 12.0));
        assert!(world.enemies.iter().all(|e| e.pos.y > -12.0));
        last_score = world.score;
    }

    assert!(clock.elapsed() > 2.0);
    assert!(world.score > 0.0);
}
