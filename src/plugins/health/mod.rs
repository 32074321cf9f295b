//! Shared damage model for the player and enemies.
//!
//! `Health` is the only place hit points change. The methods are pure state
//! transitions over a timestamp from [`CombatClock`](crate::common::clock::CombatClock);
//! [`damage`] and [`heal`] wrap them and publish the matching [`CombatEvent`]s.
//!
//! Invariants:
//! - `0 <= current <= max` at all times.
//! - `current == 0` is terminal: no further damage or healing is accepted,
//!   so the death outcome is reported exactly once.

use bevy::prelude::*;

use crate::common::events::CombatEvent;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    current: i32,
    max: i32,
    invulnerable_until: f32,
    invulnerability_duration: f32,
}

/// Result of a damage attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was dead or inside its invulnerability window.
    Ignored,
    /// Target survived with `current` hit points.
    Wounded { current: i32 },
    /// This hit brought the target to zero.
    Killed,
}

impl Health {
    /// Full health. A zero `invulnerability_duration` disables the window.
    pub fn new(max: i32, invulnerability_duration: f32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            invulnerable_until: 0.0,
            invulnerability_duration: invulnerability_duration.max(0.0),
        }
    }

    #[inline]
    pub fn current(&self) -> i32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    #[inline]
    pub fn is_invulnerable(&self, now: f32) -> bool {
        now < self.invulnerable_until
    }

    pub fn invulnerable_until(&self) -> f32 {
        self.invulnerable_until
    }

    pub fn apply_damage(&mut self, amount: i32, now: f32) -> DamageOutcome {
        if self.is_dead() || self.is_invulnerable(now) {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount.max(0)).max(0);

        if self.current == 0 {
            return DamageOutcome::Killed;
        }

        if self.invulnerability_duration > 0.0 {
            self.invulnerable_until = now + self.invulnerability_duration;
        }
        DamageOutcome::Wounded { current: self.current }
    }

    /// Returns the new hit points, or `None` if the target is dead.
    pub fn heal(&mut self, amount: i32) -> Option<i32> {
        if self.is_dead() {
            return None;
        }
        self.current = (self.current + amount.max(0)).min(self.max);
        Some(self.current)
    }
}

/// Apply damage and publish `DamageTaken`, `HealthChanged` and (once) `Death`.
pub fn damage(
    entity: Entity,
    health: &mut Health,
    amount: i32,
    now: f32,
    events: &mut MessageWriter<CombatEvent>,
) -> DamageOutcome {
    let outcome = health.apply_damage(amount, now);
    if outcome == DamageOutcome::Ignored {
        return outcome;
    }

    events.write(CombatEvent::DamageTaken { entity, amount: amount.max(0) });
    events.write(CombatEvent::HealthChanged {
        entity,
        current: health.current(),
        max: health.max(),
    });
    if outcome == DamageOutcome::Killed {
        debug!("{entity} died");
        events.write(CombatEvent::Death { entity });
    }
    outcome
}

/// Heal and publish `HealthChanged`. Dead targets are left untouched.
pub fn heal(
    entity: Entity,
    health: &mut Health,
    amount: i32,
    events: &mut MessageWriter<CombatEvent>,
) -> Option<i32> {
    let current = health.heal(amount)?;
    events.write(CombatEvent::HealthChanged { entity, current, max: health.max() });
    Some(current)
}
