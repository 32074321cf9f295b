//! Collision layers.
//!
//! Layers are the closed set of entity categories. They are assigned when an
//! entity is spawned and decide both what the physics step reports and how a
//! projectile hit is resolved.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    PlayerBullet,
}

/// Membership test against a layer set read from a collider.
#[inline]
pub fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}
