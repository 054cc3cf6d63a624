//! Autopilot for demo mode and headless runs
//!
//! Reads the post-tick snapshot and produces the next tick's input, the same
//! way a keyboard would. Never touches the world directly.

use std::cmp::Ordering;

use glam::Vec3;

use crate::consts::PLAYFIELD_HALF;
use crate::planar_distance;
use crate::sim::{TickInput, WorldState};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Enemies closer than this trigger evasive steering
    pub danger_radius: f32,
    /// Horizontal slack before steering toward a target
    pub dead_zone: f32,
    /// Highest y the pilot will climb to chase a pickup
    pub ceiling: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            danger_radius: 2.5,
            dead_zone: 0.2,
            ceiling: -3.0,
        }
    }
}

fn nearest(from: Vec3, points: impl Iterator<Item = Vec3>) -> Option<Vec3> {
    points.min_by(|a, b| {
        planar_distance(*a, from)
            .partial_cmp(&planar_distance(*b, from))
            .unwrap_or(Ordering::Equal)
    })
}

impl Autopilot {
    pub fn input(&self, world: &WorldState) -> TickInput {
        let player = world.player.pos;
        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };

        // Dodge first: sidestep away from the closest enemy in range
        let threat = nearest(player, world.enemies.iter().map(|e| e.pos))
            .filter(|pos| planar_distance(*pos, player) < self.danger_radius);
        if let Some(enemy) = threat {
            let margin = 0.5;
            let go_right = if player.x <= -PLAYFIELD_HALF + margin {
                true
            } else if player.x >= PLAYFIELD_HALF - margin {
                false
            } else {
                enemy.x <= player.x
            };
            input.right = go_right;
            input.left = !go_right;
            input.down = enemy.y > player.y && player.y > -PLAYFIELD_HALF + margin;
            return input;
        }

        // Then grab pickups and collectibles, else line up under an enemy
        let loot = world
            .power_ups
            .iter()
            .map(|p| p.pos)
            .chain(world.collectibles.iter().map(|c| c.pos));
        let target = nearest(player, loot)
            .map(|pos| Vec3::new(pos.x, pos.y.min(self.ceiling), 0.0))
            .or_else(|| {
                nearest(player, world.enemies.iter().map(|e| e.pos))
                    .map(|pos| Vec3::new(pos.x, -PLAYFIELD_HALF, 0.0))
            });

        if let Some(target) = target {
            let dx = target.x - player.x;
            let dy = target.y - player.y;
            input.right = dx > self.dead_zone;
            input.left = dx < -self.dead_zone;
            input.up = dy > self.dead_zone;
            input.down = dy < -self.dead_zone;
        }
        input
    }
}
