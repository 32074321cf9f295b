//! Wave pacing.
//!
//! ```text
//!  start_wave(n) --> Spawning --(spawned == to_spawn)--> Waiting
//!                       ^                                   |
//!                       +---- live == 0 and timer <= 0 -----+  (n + 1)
//! ```
//!
//! The director owns no entities. [`WaveDirector::step`] reports what the tick
//! asked for and the plugin system carries it out.

use bevy::prelude::*;

use crate::common::config::WaveConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WavePhase {
    #[default]
    Spawning,
    Waiting,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct WaveDirector {
    wave: u32,
    spawned: u32,
    to_spawn: u32,
    spawn_timer: f32,
    inter_wave_timer: f32,
    phase: WavePhase,
}

/// Result of one director step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveTick {
    /// `(wave, enemy_count)` when a new wave began this tick.
    pub started: Option<(u32, u32)>,
    /// One enemy should be spawned this tick.
    pub spawn: bool,
}

/// `round(base * multiplier^(wave - 1))`.
pub fn enemies_for_wave(wave: u32, cfg: &WaveConfig) -> u32 {
    let exponent = wave.saturating_sub(1) as i32;
    let count = cfg.base_enemies_per_wave as f32 * cfg.wave_multiplier.powi(exponent);
    count.round().max(0.0) as u32
}

impl WaveDirector {
    #[inline]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    #[inline]
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    #[inline]
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    #[inline]
    pub fn to_spawn(&self) -> u32 {
        self.to_spawn
    }

    #[inline]
    pub fn inter_wave_timer(&self) -> f32 {
        self.inter_wave_timer
    }

    /// Begin wave `n`. The first enemy is due immediately.
    pub fn start_wave(&mut self, n: u32, cfg: &WaveConfig) -> u32 {
        self.wave = n.max(1);
        self.to_spawn = enemies_for_wave(self.wave, cfg);
        self.spawned = 0;
        self.spawn_timer = 0.0;
        self.phase = WavePhase::Spawning;
        if self.to_spawn == 0 {
            self.enter_waiting(cfg);
        }
        self.to_spawn
    }

    fn enter_waiting(&mut self, cfg: &WaveConfig) {
        self.phase = WavePhase::Waiting;
        self.inter_wave_timer = cfg.time_between_waves;
    }

    pub fn step(&mut self, dt: f32, live_enemies: usize, cfg: &WaveConfig) -> WaveTick {
        let dt = dt.max(0.0);
        let mut tick = WaveTick::default();

        if self.phase == WavePhase::Waiting {
            if live_enemies > 0 {
                return tick;
            }
            self.inter_wave_timer = (self.inter_wave_timer - dt).max(0.0);
            if self.inter_wave_timer > 0.0 {
                return tick;
            }
            let next = self.wave + 1;
            let count = self.start_wave(next, cfg);
            tick.started = Some((next, count));
            if self.phase == WavePhase::Waiting {
                return tick;
            }
        }

        self.spawn_timer -= dt;
        if self.spawn_timer > 0.0 {
            return tick;
        }

        tick.spawn = true;
        self.spawned += 1;
        self.spawn_timer = cfg.enemy_spawn_delay;
        if self.spawned >= self.to_spawn {
            self.enter_waiting(cfg);
        }
        tick
    }
}
