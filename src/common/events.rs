//! Outbound notifications.
//!
//! Everything the simulation wants to tell the outside world (UI, audio,
//! cosmetics, logging) goes through this one message type. Writers never wait
//! for an answer; readers drain the buffer once per frame.

use bevy::prelude::*;

#[derive(Message, Clone, Debug, PartialEq)]
pub enum CombatEvent {
    HealthChanged { entity: Entity, current: i32, max: i32 },
    DamageTaken { entity: Entity, amount: i32 },
    Death { entity: Entity },
    ShotFired { charge_fraction: f32, bullet_count: u32, recoil: f32 },
    ChargeStarted,
    ChargeCancelled,
    WaveStarted { wave: u32, enemy_count: u32 },
    EnemySpawned { position: Vec2 },
    ScoreChanged { score: u32 },
    GameOver { final_score: u32, high_score: u32 },
    GamePaused(bool),
}
