use bevy::prelude::*;

use crate::common::layers::Layer;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Active,
    /// Expired or consumed by a hit. Waiting for despawn.
    Spent,
}

/// Damage payload plus remaining lifetime.
///
/// Position is integrated by the physics step from the velocity assigned at
/// spawn; this component only owns the gameplay half.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub damage: i32,
    pub ttl: f32,
    pub destroy_on_hit: bool,
    pub owner: Entity,
    state: ProjectileState,
}

/// What a contact means for the projectile and the thing it touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResolution {
    /// Apply `damage` to the other entity.
    Damage(i32),
    /// Stopped by the world. No damage.
    Blocked,
    Ignore,
}

impl Projectile {
    pub fn new(damage: i32, ttl: f32, destroy_on_hit: bool, owner: Entity) -> Self {
        Self { damage, ttl, destroy_on_hit, owner, state: ProjectileState::Active }
    }

    #[inline]
    pub fn state(&self) -> ProjectileState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == ProjectileState::Active
    }

    /// Count down the lifetime. Returns `true` on the tick it expires.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.ttl = (self.ttl - dt.max(0.0)).max(0.0);
        if self.ttl == 0.0 {
            self.state = ProjectileState::Spent;
            return true;
        }
        false
    }

    pub fn on_collision(&mut self, other: Layer) -> HitResolution {
        if !self.is_active() {
            return HitResolution::Ignore;
        }
        match other {
            Layer::Enemy => {
                if self.destroy_on_hit {
                    self.state = ProjectileState::Spent;
                }
                HitResolution::Damage(self.damage)
            }
            Layer::World => {
                self.state = ProjectileState::Spent;
                HitResolution::Blocked
            }
            Layer::Default | Layer::Player | Layer::PlayerBullet => HitResolution::Ignore,
        }
    }
}
