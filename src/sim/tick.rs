//! Simulation tick
//!
//! Core game loop step. Phases always run in the same order:
//! spawn, move, fire, collide, expire.

use serde::{Deserialize, Serialize};

use super::clock::FrameTime;
use super::state::{SoundEvent, WorldState};
use super::{collision, effects, kinematics, spawner, weapons};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Advance the world by one tick and return the sound cues it produced.
///
/// Does nothing before `start_game` or after game over.
pub fn tick(world: &mut WorldState, input: &TickInput, time: FrameTime) -> Vec<SoundEvent> {
    let mut events = Vec::new();
    if !world.is_running() {
        return events;
    }

    let FrameTime { elapsed: now, delta: dt } = time;
    world.elapsed = now;

    world.add_score(world.tuning.survival_points_per_sec * dt);

    spawner::update(world, dt, now);
    kinematics::integrate(world, input, dt, now);
    weapons::update(world, input, dt, now, &mut events);
    collision::resolve(world, now, &mut events);
    effects::expire(world, now);

    events
}
