//! Charge weapon state machine and shot shaping.
//!
//! ```text
//!            held (press)                 released, charge >= threshold
//!   Idle ---------------------> Charging ------------------------------> Idle + Fired
//!    ^                           |  ^  |
//!    |                           |  +--+ held: charge += dt (capped)
//!    +---------------------------+
//!       released, charge < threshold (Fizzled)
//! ```
//!
//! Edges are derived from the held level each tick, so a press or release that
//! lands between two fixed steps is never lost.

use bevy::prelude::*;

use crate::common::config::WeaponConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChargeState {
    #[default]
    Idle,
    Charging,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ChargeWeapon {
    state: ChargeState,
    charge_elapsed: f32,
}

/// What one tick of the weapon produced.
#[derive(Debug, Clone, PartialEq)]
pub enum WeaponAction {
    Idle,
    /// Press edge. `recoil` is the impulse to apply to the firer (zero when not aiming).
    Started { recoil: Vec2 },
    Charging,
    /// Released without firing: too short a charge, or no aim direction.
    Fizzled,
    Fired { shot: ShotPattern, recoil: Vec2 },
}

impl ChargeWeapon {
    #[inline]
    pub fn state(&self) -> ChargeState {
        self.state
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.state == ChargeState::Charging
    }

    #[inline]
    pub fn charge_elapsed(&self) -> f32 {
        self.charge_elapsed
    }

    /// Charge fraction in `[0, 1]`.
    pub fn charge_fraction(&self, config: &WeaponConfig) -> f32 {
        (self.charge_elapsed / config.max_charge_time).clamp(0.0, 1.0)
    }

    /// Drop any charge without firing.
    pub fn cancel(&mut self) {
        self.state = ChargeState::Idle;
        self.charge_elapsed = 0.0;
    }

    pub fn update(&mut self, fire_held: bool, aim: Vec2, dt: f32, config: &WeaponConfig) -> WeaponAction {
        match (self.state, fire_held) {
            (ChargeState::Idle, false) => WeaponAction::Idle,
            (ChargeState::Idle, true) => {
                self.state = ChargeState::Charging;
                self.charge_elapsed = 0.0;
                WeaponAction::Started { recoil: recoil_impulse(aim, 0.5 * config.base_recoil) }
            }
            (ChargeState::Charging, true) => {
                self.charge_elapsed = (self.charge_elapsed + dt.max(0.0)).clamp(0.0, config.max_charge_time);
                WeaponAction::Charging
            }
            (ChargeState::Charging, false) => {
                let t = self.charge_fraction(config);
                let held_for = self.charge_elapsed;
                self.cancel();

                if held_for < config.minimum_fire_threshold || aim.length_squared() <= f32::EPSILON {
                    return WeaponAction::Fizzled;
                }

                let shot = ShotPattern::for_charge(t, config);
                let recoil = recoil_impulse(aim, shot.recoil);
                WeaponAction::Fired { shot, recoil }
            }
        }
    }
}

/// Impulse opposite the aim direction. Zero aim gives zero impulse.
pub fn recoil_impulse(aim: Vec2, magnitude: f32) -> Vec2 {
    -aim.normalize_or_zero() * magnitude
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Charge-scaled shot parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPattern {
    pub charge_fraction: f32,
    pub bullet_count: u32,
    /// Total fan width in degrees.
    pub spread: f32,
    pub speed: f32,
    pub recoil: f32,
}

impl ShotPattern {
    pub fn for_charge(t: f32, config: &WeaponConfig) -> Self {
        let t = t.clamp(0.0, 1.0);
        let count = lerp(config.base_bullet_count as f32, config.max_bullet_count as f32, t).round();
        Self {
            charge_fraction: t,
            bullet_count: count as u32,
            spread: lerp(config.base_spread, config.max_spread, t),
            speed: lerp(config.base_speed, config.max_speed, t),
            recoil: config.base_recoil + t * (config.charge_multiplier * config.base_recoil),
        }
    }

    /// Unit directions fanned evenly across `[-spread/2, +spread/2]` around `aim`.
    /// A single bullet flies straight along `aim`.
    pub fn directions(&self, aim: Vec2) -> impl Iterator<Item = Vec2> + use<> {
        let base = aim.to_angle();
        let n = self.bullet_count;
        let half = self.spread * 0.5;

        (0..n).map(move |i| {
            let offset = if n > 1 { lerp(-half, half, i as f32 / (n - 1) as f32) } else { 0.0 };
            Vec2::from_angle(base + offset.to_radians())
        })
    }
}
