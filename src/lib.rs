//! Star Strike - A top-down arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Top-10 leaderboard persisted as JSON
//! - `pilot`: Autopilot that plays the game (demo mode / headless runs)

pub mod error;
pub mod highscores;
pub mod pilot;
pub mod sim;
pub mod tuning;

pub use error::LoadError;
pub use highscores::HighScores;
pub use pilot::Autopilot;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep for headless runs (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will feed into the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player is clamped to [-PLAYFIELD_HALF, PLAYFIELD_HALF] on x and y
    pub const PLAYFIELD_HALF: f32 = 8.0;
    /// Enemies, pickups and collectibles enter at this height
    pub const SPAWN_Y: f32 = 10.0;
    /// Entities past this distance from the origin on y are discarded
    pub const DESPAWN_Y: f32 = 12.0;
    /// Player start position (bottom center)
    pub const PLAYER_START: Vec3 = Vec3::new(0.0, -8.0, 0.0);

    /// Half-extent of the axis-aligned hit box used for enemies and pickups
    pub const HIT_HALF_EXTENT: f32 = 0.6;
    /// Player half-width used for collectible pickup radius
    pub const PLAYER_RADIUS: f32 = 0.5;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 3;
}

/// True when `a` and `b` overlap on both x and y within `half_extent`
#[inline]
pub fn box_overlap(a: Vec3, b: Vec3, half_extent: f32) -> bool {
    (a.x - b.x).abs() < half_extent && (a.y - b.y).abs() < half_extent
}

/// Planar (x/y) distance between two points, ignoring z
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.truncate().distance(b.truncate())
}
