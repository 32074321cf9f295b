//! Buffered spawn requests.
//!
//! The weapon writes intent; the projectile spawner is the single consumer that
//! creates entities. Producers never touch projectile entities.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub ttl: f32,
    pub destroy_on_hit: bool,
    pub owner: Entity,
}
