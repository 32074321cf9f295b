//! Projectiles plugin: message-based spawning, lifetime, and hit resolution.
//!
//! # Data flow
//! ```text
//!   FixedPostUpdate, after avian has written CollisionStart
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ CombatSet::Weapon                                                    │
//! │   drive_charge_weapon  ──writes──▶ SpawnProjectileRequest            │
//! │                                                                      │
//! │ CombatSet::Projectiles (chained)                                     │
//! │   (A) advance_projectiles        ttl -= dt, Active -> Spent at 0     │
//! │   (B) resolve_projectile_hits    CollisionStart -> damage / Spent    │
//! │   (C) retire_spent_projectiles   zero velocity, inert layers,        │
//! │                                  PendingDespawn                      │
//! │   (D) spawn_requested_projectiles  requests -> entities              │
//! └──────────────────────────────────────────────────────────────────────┘
//!   PostUpdate: PendingDespawn entities are despawned (core plugin)
//! ```
//!
//! Spawning last means a projectile never ages in the tick it was fired.

pub mod collision;
pub mod components;
pub mod lifetime;
pub mod messages;

use bevy::prelude::*;

use crate::common::sets::CombatSet;

pub use components::{HitResolution, Projectile, ProjectileState};

pub fn plugin(app: &mut App) {
    app.add_message::<messages::SpawnProjectileRequest>();

    app.add_systems(
        FixedPostUpdate,
        (
            lifetime::advance_projectiles,
            collision::resolve_projectile_hits,
            lifetime::retire_spent_projectiles,
            lifetime::spawn_requested_projectiles,
        )
            .chain()
            .in_set(CombatSet::Projectiles),
    );
}
