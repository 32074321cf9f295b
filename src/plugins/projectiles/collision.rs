//! Projectile contact resolution.
//!
//! Avian reports `CollisionStart` for every projectile contact (projectiles opt
//! in with `CollisionEventsEnabled`). The firer's own category is never in a
//! projectile's collision filter, so friendly contacts are not reported at all.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::clock::CombatClock;
use crate::common::events::CombatEvent;
use crate::common::layers::{is_in_layer, Layer};
use crate::plugins::health::{self, Health};

use super::components::{HitResolution, Projectile};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: ev.collider1, body: ev.body1 },
        CollisionTarget { collider: ev.collider2, body: ev.body2 },
    )
}

/// Category of a collider, by layer membership.
pub fn category(layers: &CollisionLayers) -> Layer {
    [Layer::World, Layer::Enemy, Layer::Player, Layer::PlayerBullet]
        .into_iter()
        .find(|&layer| is_in_layer(layers, layer))
        .unwrap_or_default()
}

pub fn resolve_projectile_hits(
    clock: Res<CombatClock>,
    mut started: MessageReader<CollisionStart>,
    mut q_projectiles: Query<&mut Projectile>,
    q_layers: Query<&CollisionLayers>,
    mut q_health: Query<&mut Health, Without<Projectile>>,
    mut events: MessageWriter<CombatEvent>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.gameplay_owner());
        let p2 = q_projectiles.contains(t2.gameplay_owner());
        if !(p1 ^ p2) {
            continue; // exactly one side must be a projectile
        }
        let (projectile_side, other_side) = if p1 { (t1, t2) } else { (t2, t1) };

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            debug!("Projectile contact with {} which has no layers", other_side.collider);
            continue;
        };
        let other_category = category(other_layers);
        let target = other_side.gameplay_owner();

        // A corpse awaiting despawn does not stop bullets.
        if other_category == Layer::Enemy
            && q_health.get(target).is_ok_and(|h| h.is_dead())
        {
            continue;
        }

        let Ok(mut projectile) = q_projectiles.get_mut(projectile_side.gameplay_owner()) else {
            continue;
        };

        match projectile.on_collision(other_category) {
            HitResolution::Damage(amount) => {
                let Ok(mut hp) = q_health.get_mut(target) else {
                    debug!("Enemy {target} hit without Health");
                    continue;
                };
                health::damage(target, &mut hp, amount, clock.now(), &mut events);
            }
            HitResolution::Blocked | HitResolution::Ignore => {}
        }
    }
}
