//! Pursue/attack decision for a single enemy.
//!
//! ```text
//!             distance <= attack_range
//!  Pursuing ---------------------------> Attacking
//!     ^                                      |
//!     +--------------------------------------+
//!             distance > attack_range
//! ```
//!
//! `think` is pure: it reads positions and the clock and returns the velocity
//! to apply and whether an attack lands this tick.

use bevy::prelude::*;

use crate::common::config::EnemyConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AiState {
    #[default]
    Pursuing,
    Attacking,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct EnemyAi {
    state: AiState,
    next_attack_at: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub velocity: Vec2,
    pub attack: bool,
}

impl AiDecision {
    const HOLD: Self = Self { velocity: Vec2::ZERO, attack: false };
}

impl EnemyAi {
    #[inline]
    pub fn state(&self) -> AiState {
        self.state
    }

    #[inline]
    pub fn next_attack_at(&self) -> f32 {
        self.next_attack_at
    }

    pub fn think(&mut self, pos: Vec2, target: Option<Vec2>, now: f32, cfg: &EnemyConfig) -> AiDecision {
        let Some(target) = target else {
            self.state = AiState::Pursuing;
            return AiDecision::HOLD;
        };

        let to_target = target - pos;
        let distance = to_target.length();

        if cfg.follow_range.is_some_and(|range| distance > range) {
            self.state = AiState::Pursuing;
            return AiDecision::HOLD;
        }

        if distance > cfg.attack_range {
            self.state = AiState::Pursuing;
            return AiDecision {
                velocity: to_target.normalize_or_zero() * cfg.move_speed,
                attack: false,
            };
        }

        self.state = AiState::Attacking;
        let attack = now >= self.next_attack_at;
        if attack {
            self.next_attack_at = now + cfg.attack_cooldown;
        }
        AiDecision { velocity: Vec2::ZERO, attack }
    }
}

/// Angle from `pos` to `target`, radians. Cosmetic only.
pub fn facing(pos: Vec2, target: Vec2) -> Option<f32> {
    let dir = target - pos;
    (dir.length_squared() > f32::EPSILON).then(|| dir.to_angle())
}
