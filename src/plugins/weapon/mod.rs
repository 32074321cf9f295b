//! Weapon plugin: turns the held fire input into charged shotgun blasts.
//!
//! Pipeline (fixed step, `CombatSet::Weapon`):
//! - read `PlayerInput { fire_held, aim }`
//! - step the `ChargeWeapon` state machine
//! - apply recoil to the firer's `LinearVelocity`
//! - write one `SpawnProjectileRequest` per bullet (spawned in `CombatSet::Projectiles`)
//!
//! The weapon never touches projectile entities directly.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::clock::CombatClock;
use crate::common::config::CombatConfig;
use crate::common::events::CombatEvent;
use crate::common::sets::CombatSet;
use crate::common::state::SessionPhase;
use crate::plugins::player::{Player, PlayerInput};
use crate::plugins::projectiles::messages::SpawnProjectileRequest;

pub mod charge;

pub use charge::{ChargeState, ChargeWeapon, ShotPattern, WeaponAction};

pub fn plugin(app: &mut App) {
    app.add_systems(FixedPostUpdate, drive_charge_weapon.in_set(CombatSet::Weapon))
        .add_systems(OnExit(SessionPhase::Paused), discard_suppressed_release);
}

/// Velocity change for an impulse on a body of `mass`.
#[inline]
fn impulse_to_velocity(impulse: Vec2, mass: f32) -> Vec2 {
    impulse / mass
}

pub fn drive_charge_weapon(
    config: Res<CombatConfig>,
    clock: Res<CombatClock>,
    input: Res<PlayerInput>,
    mut q: Query<(Entity, &Transform, &mut ChargeWeapon, &mut LinearVelocity), With<Player>>,
    mut requests: MessageWriter<SpawnProjectileRequest>,
    mut events: MessageWriter<CombatEvent>,
) {
    let weapon_cfg = &config.weapon;

    for (owner, tf, mut weapon, mut vel) in &mut q {
        match weapon.update(input.fire_held, input.aim, clock.delta(), weapon_cfg) {
            WeaponAction::Idle | WeaponAction::Charging => {}
            WeaponAction::Started { recoil } => {
                vel.0 += impulse_to_velocity(recoil, config.player.mass);
                events.write(CombatEvent::ChargeStarted);
            }
            WeaponAction::Fizzled => {
                events.write(CombatEvent::ChargeCancelled);
            }
            WeaponAction::Fired { shot, recoil } => {
                vel.0 += impulse_to_velocity(recoil, config.player.mass);

                let origin = tf.translation.truncate();
                for dir in shot.directions(input.aim) {
                    requests.write(SpawnProjectileRequest {
                        pos: origin + dir * weapon_cfg.muzzle_offset,
                        vel: dir * shot.speed,
                        damage: config.projectile.damage,
                        ttl: config.projectile.ttl,
                        destroy_on_hit: config.projectile.destroy_on_hit,
                        owner,
                    });
                }

                debug!(
                    "Fired shotgun: charge {:.2}, bullets {}, recoil {:.1}",
                    shot.charge_fraction, shot.bullet_count, shot.recoil
                );
                events.write(CombatEvent::ShotFired {
                    charge_fraction: shot.charge_fraction,
                    bullet_count: shot.bullet_count,
                    recoil: shot.recoil,
                });
            }
        }
    }
}

/// A release that happened while the session was paused must not fire on resume.
pub fn discard_suppressed_release(
    input: Res<PlayerInput>,
    mut q: Query<&mut ChargeWeapon>,
    mut events: MessageWriter<CombatEvent>,
) {
    if input.fire_held {
        return;
    }
    for mut weapon in &mut q {
        if weapon.is_charging() {
            weapon.cancel();
            events.write(CombatEvent::ChargeCancelled);
        }
    }
}
