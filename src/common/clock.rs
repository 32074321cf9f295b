//! Gameplay clock.
//!
//! `Time<Fixed>` keeps counting before the session starts and after it ends, so
//! action timers read this clock instead. It only advances inside the combat tick.

use bevy::prelude::*;

/// Seconds of gameplay time since the session began.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CombatClock {
    elapsed: f32,
    delta: f32,
}

impl CombatClock {
    /// Advance by `dt` seconds. Negative deltas are treated as zero.
    pub fn tick(&mut self, dt: f32) {
        self.delta = dt.max(0.0);
        self.elapsed += self.delta;
    }

    #[inline]
    pub fn now(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// First link of the combat chain.
pub fn advance_clock(time: Res<Time>, mut clock: ResMut<CombatClock>) {
    clock.tick(time.delta_secs());
}
