use bevy::prelude::SystemSet;

/// Fixed-step combat ordering. Configured as a chain in the core plugin.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum CombatSet {
    Clock,
    Weapon,
    Projectiles,
    Enemies,
    Waves,
    Resolve,
}
