//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock values come in through `FrameTime`, never from the system
//! - Seeded RNG only
//! - Stable iteration order (collections keep insertion order)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod effects;
pub mod kinematics;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod weapons;

pub use clock::{FrameTime, SimClock};
pub use collision::{Contacts, detect};
pub use kinematics::enemy_position;
pub use state::{
    ActivePowerUp, Bullet, Collectible, Enemy, EnemyKind, Explosion, GamePhase, Player,
    PowerUpKind, PowerUpPickup, SoundEvent, SpawnTimers, WorldState,
};
pub use tick::{TickInput, tick};
