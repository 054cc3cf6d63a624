//! Collision detection and resolution
//!
//! Detection is a pure scan over the just-moved snapshot and produces a
//! `Contacts` list of indices. Resolution then applies every outcome at
//! once, so nothing removed this tick can influence another check in the
//! same tick.

use glam::Vec3;

use super::state::{ActivePowerUp, Explosion, SoundEvent, WorldState};
use crate::consts::*;
use crate::{box_overlap, planar_distance};

/// Everything that touched this tick, as indices into the snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    /// Enemies overlapping the player
    pub player_enemies: Vec<usize>,
    /// (enemy, bullet) pairs; each enemy and each bullet appears at most once
    pub kills: Vec<(usize, usize)>,
    /// Power-up pickups overlapping the player
    pub power_ups: Vec<usize>,
    /// Collectibles within pickup radius
    pub collectibles: Vec<usize>,
}

impl Contacts {
    pub fn is_empty(&self) -> bool {
        self.player_enemies.is_empty()
            && self.kills.is_empty()
            && self.power_ups.is_empty()
            && self.collectibles.is_empty()
    }
}

/// Collectibles use a circle test: player half-width plus half their size
pub fn collectible_in_reach(player_pos: Vec3, collectible_pos: Vec3, size: f32) -> bool {
    planar_distance(player_pos, collectible_pos) < PLAYER_RADIUS + size / 2.0
}

/// Scan the snapshot for every contact
///
/// An enemy touching the player is consumed by that collision and cannot
/// also be shot in the same tick. A bullet is spent by its first kill, and
/// each enemy takes at most one bullet, so no kill is ever credited twice.
pub fn detect(world: &WorldState) -> Contacts {
    let player = world.player.pos;
    let mut contacts = Contacts::default();

    for (enemy_idx, enemy) in world.enemies.iter().enumerate() {
        if box_overlap(enemy.pos, player, HIT_HALF_EXTENT) {
            contacts.player_enemies.push(enemy_idx);
        }
    }

    let mut spent = vec![false; world.bullets.len()];
    for (enemy_idx, enemy) in world.enemies.iter().enumerate() {
        if contacts.player_enemies.contains(&enemy_idx) {
            continue;
        }
        let hit = world
            .bullets
            .iter()
            .enumerate()
            .find(|(bullet_idx, bullet)| {
                !spent[*bullet_idx] && box_overlap(enemy.pos, bullet.pos, HIT_HALF_EXTENT)
            })
            .map(|(bullet_idx, _)| bullet_idx);
        if let Some(bullet_idx) = hit {
            spent[bullet_idx] = true;
            contacts.kills.push((enemy_idx, bullet_idx));
        }
    }

    for (idx, pickup) in world.power_ups.iter().enumerate() {
        if box_overlap(pickup.pos, player, HIT_HALF_EXTENT) {
            contacts.power_ups.push(idx);
        }
    }

    for (idx, collectible) in world.collectibles.iter().enumerate() {
        if collectible_in_reach(player, collectible.pos, collectible.size) {
            contacts.collectibles.push(idx);
        }
    }

    contacts
}

/// Apply every outcome in `contacts`, emitting sound events in scan order
pub fn apply(world: &mut WorldState, contacts: &Contacts, now: f32, events: &mut Vec<SoundEvent>) {
    if contacts.is_empty() {
        return;
    }

    // Read everything needed from the snapshot before any removal
    for &(enemy_idx, _) in &contacts.kills {
        let pos = world.enemies[enemy_idx].pos;
        world.add_explosion(Explosion { pos, time: now });
        world.add_score(world.tuning.enemy_kill_points);
        events.push(SoundEvent::EnemyHit);
    }

    for &idx in &contacts.power_ups {
        let pickup = &world.power_ups[idx];
        let effect = ActivePowerUp {
            kind: pickup.kind,
            start_time: now,
            duration: pickup.duration,
        };
        world.activate_power_up(effect);
        events.push(SoundEvent::PowerUp);
    }

    for &idx in &contacts.collectibles {
        let points = world.collectibles[idx].points(world.tuning.collectible_points_per_size);
        world.add_score(points);
        events.push(SoundEvent::Collect);
    }

    let mut dead_enemies = contacts.player_enemies.clone();
    dead_enemies.extend(contacts.kills.iter().map(|&(enemy_idx, _)| enemy_idx));
    let spent_bullets: Vec<usize> = contacts
        .kills
        .iter()
        .map(|&(_, bullet_idx)| bullet_idx)
        .collect();

    world.remove_enemies(&dead_enemies);
    world.remove_bullets(&spent_bullets);
    world.remove_power_ups(&contacts.power_ups);
    world.remove_collectibles(&contacts.collectibles);

    if !contacts.player_enemies.is_empty() {
        world.lose_lives(contacts.player_enemies.len() as u32);
    }
}

/// Collision phase: detect on the current snapshot, then resolve atomically
pub fn resolve(world: &mut WorldState, now: f32, events: &mut Vec<SoundEvent>) -> Contacts {
    let contacts = detect(world);
    apply(world, &contacts, now, events);
    contacts
}
