//! World state and core simulation types
//!
//! Everything the presentation layer reads after a tick lives here, and
//! `WorldState` is the only place the registry and game-state bookkeeping
//! are mutated.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LoadError;
use crate::tuning::Tuning;

/// Current phase of the run, derived from the started/over flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start_game`
    Title,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Named sound cues emitted during a tick (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundEvent {
    /// Bullet destroyed an enemy
    EnemyHit,
    /// Power-up pickup collected
    PowerUp,
    /// Collectible picked up
    Collect,
    /// Player fired
    Shoot,
}

impl SoundEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::EnemyHit => "enemyHit",
            SoundEvent::PowerUp => "powerUp",
            SoundEvent::Collect => "collect",
            SoundEvent::Shoot => "shoot",
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds accumulated since the last shot
    pub shoot_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: PLAYER_START,
            vel: Vec3::ZERO,
            shoot_timer: 0.0,
        }
    }
}

impl Player {
    /// Banking angles (pitch, roll) in radians for the renderer; no gameplay effect
    pub fn tilt(&self) -> Vec2 {
        Vec2::new(self.vel.y * 0.05, -self.vel.x * 0.1)
    }
}

/// A player bullet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
}

/// Enemy movement pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnemyKind {
    /// Linear drift on both axes
    Straight,
    /// Linear fall with a sinusoidal sway on x
    Zigzag,
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec3,
    /// Position at spawn time; never changes
    pub initial_pos: Vec3,
    pub vel: Vec3,
    /// Zigzag sway amplitude (0 for straight enemies)
    pub amplitude: f32,
    /// Zigzag sway frequency in rad/s (0 for straight enemies)
    pub frequency: f32,
    /// Elapsed time when spawned
    pub spawn_time: f32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpKind {
    /// Raises max speed and fire rate
    Speed,
    /// Tracked only; has no gameplay effect yet
    Shield,
    /// Three-bullet fan
    MultiShot,
}

/// A falling power-up pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpPickup {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec3,
    pub vel: Vec3,
    /// How long the effect lasts once collected (seconds)
    pub duration: f32,
}

/// A falling score collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Visual scale and point value
    pub size: f32,
    pub spawn_time: f32,
}

impl Collectible {
    /// Pickup distance: player half-width plus half the collectible size
    pub fn pickup_radius(&self) -> f32 {
        PLAYER_RADIUS + self.size / 2.0
    }

    pub fn points(&self, points_per_size: f32) -> f32 {
        (self.size * points_per_size).floor()
    }
}

/// A power-up effect currently applied to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub start_time: f32,
    pub duration: f32,
}

impl ActivePowerUp {
    pub fn is_expired(&self, now: f32) -> bool {
        now - self.start_time >= self.duration
    }
}

/// Explosion marker for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec3,
    pub time: f32,
}

/// Seconds accumulated toward each spawn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy: f32,
    pub power_up: f32,
    pub collectible: f32,
}

/// Complete world state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance numbers for this run
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Clock time of the last tick (seconds)
    pub elapsed: f32,
    pub score: f32,
    pub lives: u32,
    pub game_started: bool,
    pub game_over: bool,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUpPickup>,
    pub collectibles: Vec<Collectible>,
    pub active_power_ups: Vec<ActivePowerUp>,
    pub explosions: Vec<Explosion>,
    pub spawn_timers: SpawnTimers,
    /// Next entity ID
    next_id: u32,
}

impl WorldState {
    /// Create a new world with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new world with custom tuning, rejecting values the
    /// simulation cannot run with
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, LoadError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            elapsed: 0.0,
            score: 0.0,
            lives: STARTING_LIVES,
            game_started: false,
            game_over: false,
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            collectibles: Vec::new(),
            active_power_ups: Vec::new(),
            explosions: Vec::new(),
            spawn_timers: SpawnTimers::default(),
            next_id: 1,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.game_started {
            GamePhase::Playing
        } else {
            GamePhase::Title
        }
    }

    /// True while ticks should advance the world
    pub fn is_running(&self) -> bool {
        self.game_started && !self.game_over
    }

    /// Reset every collection and counter and begin simulating.
    /// Idempotent; the only way out of game over besides `restart`.
    pub fn start_game(&mut self) {
        self.score = 0.0;
        self.lives = STARTING_LIVES;
        self.game_started = true;
        self.game_over = false;
        self.player = Player::default();
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.collectibles.clear();
        self.active_power_ups.clear();
        self.explosions.clear();
        self.spawn_timers = SpawnTimers::default();
        log::info!("Game started (seed {})", self.seed);
    }

    /// Full reset, RNG included. Only accepted from game over.
    pub fn restart(&mut self) -> bool {
        if !self.game_over {
            log::warn!("Ignoring restart outside game over ({:?})", self.phase());
            return false;
        }
        let tuning = self.tuning.clone();
        *self = Self::build(self.seed, tuning);
        self.start_game();
        true
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // --- Game state controller ---

    /// Add a non-negative amount to the score
    pub fn add_score(&mut self, points: f32) {
        let valid = points.is_finite() && points >= 0.0;
        debug_assert!(valid, "score delta must be non-negative, got {points}");
        if valid {
            self.score += points;
        }
    }

    /// Set lives (clamped at zero); reaching zero ends the run
    pub fn set_lives(&mut self, lives: i64) {
        self.lives = lives.clamp(0, u32::MAX as i64) as u32;
        if self.lives == 0 && !self.game_over {
            self.game_over = true;
            log::info!("Game over - final score {}", self.score.floor());
        }
    }

    pub fn lose_lives(&mut self, count: u32) {
        self.set_lives(self.lives as i64 - count as i64);
    }

    // --- Registry: insertion ---

    pub fn add_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub fn add_enemy(&mut self, mut enemy: Enemy) {
        let amplitude = enemy.amplitude;
        enemy.amplitude = checked_param("enemy.amplitude", amplitude, amplitude >= 0.0, 0.0);
        let frequency = enemy.frequency;
        enemy.frequency = checked_param("enemy.frequency", frequency, frequency >= 0.0, 0.0);
        enemy.initial_pos = checked_pos("enemy.initial_pos", enemy.initial_pos);
        enemy.pos = checked_pos("enemy.pos", enemy.pos);
        self.enemies.push(enemy);
    }

    pub fn add_power_up(&mut self, mut pickup: PowerUpPickup) {
        let fallback = self.tuning.power_up_duration;
        pickup.duration = checked_param(
            "power_up.duration",
            pickup.duration,
            pickup.duration > 0.0,
            fallback,
        );
        pickup.pos = checked_pos("power_up.pos", pickup.pos);
        self.power_ups.push(pickup);
    }

    pub fn add_collectible(&mut self, mut collectible: Collectible) {
        let min = self.tuning.collectible_min_size;
        let max = self.tuning.collectible_max_size;
        collectible.size = checked_param(
            "collectible.size",
            collectible.size,
            (min..=max).contains(&collectible.size),
            min,
        );
        collectible.pos = checked_pos("collectible.pos", collectible.pos);
        self.collectibles.push(collectible);
    }

    pub fn add_explosion(&mut self, explosion: Explosion) {
        self.explosions.push(explosion);
    }

    pub fn activate_power_up(&mut self, mut effect: ActivePowerUp) {
        let fallback = self.tuning.power_up_duration;
        effect.duration = checked_param(
            "active_power_up.duration",
            effect.duration,
            effect.duration > 0.0,
            fallback,
        );
        log::debug!("Power-up {:?} active for {}s", effect.kind, effect.duration);
        self.active_power_ups.push(effect);
    }

    // --- Registry: removal by index (indices refer to the current contents) ---

    pub fn remove_bullets(&mut self, indices: &[usize]) {
        remove_indices(&mut self.bullets, indices, "bullet");
    }

    pub fn remove_enemies(&mut self, indices: &[usize]) {
        remove_indices(&mut self.enemies, indices, "enemy");
    }

    pub fn remove_power_ups(&mut self, indices: &[usize]) {
        remove_indices(&mut self.power_ups, indices, "power-up");
    }

    pub fn remove_collectibles(&mut self, indices: &[usize]) {
        remove_indices(&mut self.collectibles, indices, "collectible");
    }

    pub fn remove_explosions(&mut self, indices: &[usize]) {
        remove_indices(&mut self.explosions, indices, "explosion");
    }

    pub fn remove_active_power_ups(&mut self, indices: &[usize]) {
        remove_indices(&mut self.active_power_ups, indices, "active power-up");
    }
}

/// Remove several entries at once, highest index first so earlier removals
/// never shift later ones. Out-of-range or repeated indices are bugs.
fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize], what: &str) {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let requested = sorted.len();
    sorted.dedup();
    debug_assert_eq!(requested, sorted.len(), "duplicate {what} index in removal");

    for idx in sorted {
        assert!(
            idx < items.len(),
            "{what} index {idx} out of range (len {})",
            items.len()
        );
        items.remove(idx);
    }
}

/// Spawn parameters out of range are programming errors: panic in debug
/// builds, fall back to a safe value in release.
fn checked_param(field: &str, value: f32, in_range: bool, fallback: f32) -> f32 {
    let valid = value.is_finite() && in_range;
    debug_assert!(valid, "invalid spawn parameter {field}: {value}");
    if valid {
        value
    } else {
        log::warn!("Invalid spawn parameter {field}={value}, using {fallback}");
        fallback
    }
}

fn checked_pos(field: &str, pos: Vec3) -> Vec3 {
    let valid = pos.is_finite();
    debug_assert!(valid, "invalid spawn position {field}: {pos}");
    if valid {
        pos
    } else {
        log::warn!("Invalid spawn position {field}={pos}, using origin");
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explosion_at(x: f32) -> Explosion {
        Explosion {
            pos: Vec3::new(x, 0.0, 0.0),
            time: 0.0,
        }
    }

    #[test]
    fn test_new_world_waits_on_title() {
        let world = WorldState::new(1);
        assert_eq!(world.phase(), GamePhase::Title);
        assert!(!world.is_running());
        assert_eq!(world.lives, STARTING_LIVES);
        assert_eq!(world.player.pos, PLAYER_START);
    }

    #[test]
    fn test_with_tuning_rejects_empty_spawn_ranges() {
        let flat_fall = Tuning {
            enemy_min_fall_speed: 4.0,
            enemy_max_fall_speed: 4.0,
            ..Tuning::default()
        };
        assert!(matches!(
            WorldState::with_tuning(1, flat_fall),
            Err(LoadError::Invalid { field: "enemy_max_fall_speed", .. })
        ));

        let inverted_size = Tuning {
            collectible_min_size: 1.0,
            collectible_max_size: 0.5,
            ..Tuning::default()
        };
        assert!(WorldState::with_tuning(1, inverted_size).is_err());

        let slow = Tuning {
            max_speed: 4.0,
            ..Tuning::default()
        };
        let world = WorldState::with_tuning(1, slow).unwrap();
        assert_eq!(world.tuning.max_speed, 4.0);
    }

    #[test]
    fn test_start_game_is_idempotent() {
        let mut once = WorldState::new(7);
        once.start_game();

        let mut twice = WorldState::new(7);
        twice.add_explosion(explosion_at(1.0));
        twice.add_score(250.0);
        twice.start_game();
        twice.start_game();

        assert_eq!(twice.phase(), GamePhase::Playing);
        assert_eq!(once.score, twice.score);
        assert_eq!(once.lives, twice.lives);
        assert_eq!(once.player, twice.player);
        assert!(twice.explosions.is_empty());
        assert!(twice.bullets.is_empty() && twice.enemies.is_empty());
        assert!(twice.power_ups.is_empty() && twice.collectibles.is_empty());
        assert!(twice.active_power_ups.is_empty());
        assert!(!twice.game_over);
    }

    #[test]
    fn test_lives_clamp_and_game_over() {
        let mut world = WorldState::new(1);
        world.start_game();

        world.lose_lives(1);
        assert_eq!(world.lives, 2);
        assert!(!world.game_over);

        world.lose_lives(5);
        assert_eq!(world.lives, 0);
        assert!(world.game_over);
        assert_eq!(world.phase(), GamePhase::GameOver);

        world.set_lives(-3);
        assert_eq!(world.lives, 0);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut world = WorldState::new(3);
        world.start_game();
        world.add_score(40.0);
        assert!(!world.restart());
        assert_eq!(world.score, 40.0);

        world.set_lives(0);
        assert!(world.restart());
        assert_eq!(world.phase(), GamePhase::Playing);
        assert_eq!(world.score, 0.0);
        assert_eq!(world.lives, STARTING_LIVES);
    }

    #[test]
    fn test_remove_indices_descending() {
        let mut world = WorldState::new(1);
        for x in 0..5 {
            world.add_explosion(explosion_at(x as f32));
        }
        // Ascending request order must not shift later removals
        world.remove_explosions(&[1, 3]);
        let xs: Vec<f32> = world.explosions.iter().map(|e| e.pos.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_remove_out_of_range_panics() {
        let mut world = WorldState::new(1);
        world.add_explosion(explosion_at(0.0));
        world.remove_explosions(&[1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "non-negative")]
    fn test_negative_score_is_a_bug() {
        let mut world = WorldState::new(1);
        world.add_score(-1.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "power_up.duration")]
    fn test_negative_duration_is_a_bug() {
        let mut world = WorldState::new(1);
        let id = world.next_entity_id();
        world.add_power_up(PowerUpPickup {
            id,
            kind: PowerUpKind::Speed,
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            duration: -5.0,
        });
    }

    #[test]
    fn test_collectible_points_and_radius() {
        let c = Collectible {
            id: 1,
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            size: 0.75,
            spawn_time: 0.0,
        };
        assert_eq!(c.points(100.0), 75.0);
        assert!((c.pickup_radius() - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_sound_event_names() {
        let json = serde_json::to_string(&SoundEvent::EnemyHit).unwrap();
        assert_eq!(json, "\"enemyHit\"");
        assert_eq!(SoundEvent::PowerUp.as_str(), "powerUp");
        let kind = serde_json::to_string(&PowerUpKind::MultiShot).unwrap();
        assert_eq!(kind, "\"multi-shot\"");
    }
}
