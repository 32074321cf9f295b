//! Combat tuning loaded once per app.
//!
//! All lengths are in pixels, all durations in seconds. The defaults are the
//! stock game tuning at 20 pixels per world unit.
//!
//! Range checks happen here, before the resource is inserted. Systems assume a
//! validated config and never re-check it per tick.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must not exceed {limit_field}")]
    OutOfOrder { field: &'static str, limit_field: &'static str },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub pixels_per_meter: f32,
    /// Seed for spawn placement.
    pub seed: u64,
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    pub projectile: ProjectileConfig,
    pub enemy: EnemyConfig,
    pub waves: WaveConfig,
    pub arena: ArenaConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            seed: 0x5EED_0001,
            player: PlayerConfig::default(),
            weapon: WeaponConfig::default(),
            projectile: ProjectileConfig::default(),
            enemy: EnemyConfig::default(),
            waves: WaveConfig::default(),
            arena: ArenaConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: i32,
    pub invulnerability_duration: f32,
    pub mass: f32,
    pub linear_damping: f32,
    pub max_speed: f32,
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 5,
            invulnerability_duration: 1.0,
            mass: 1.0,
            linear_damping: 2.0,
            max_speed: 300.0,
            radius: 13.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub base_recoil: f32,
    /// Extra recoil at full charge, as a multiple of `base_recoil`.
    pub charge_multiplier: f32,
    pub max_charge_time: f32,
    pub minimum_fire_threshold: f32,
    pub base_bullet_count: u32,
    pub max_bullet_count: u32,
    /// Degrees.
    pub base_spread: f32,
    /// Degrees.
    pub max_spread: f32,
    pub base_speed: f32,
    pub max_speed: f32,
    /// Distance from the firer's center where projectiles appear.
    pub muzzle_offset: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            base_recoil: 200.0,
            charge_multiplier: 3.0,
            max_charge_time: 2.0,
            minimum_fire_threshold: 0.1,
            base_bullet_count: 1,
            max_bullet_count: 8,
            base_spread: 10.0,
            max_spread: 45.0,
            base_speed: 400.0,
            max_speed: 500.0,
            muzzle_offset: 18.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub damage: i32,
    pub ttl: f32,
    pub destroy_on_hit: bool,
    pub radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self { damage: 1, ttl: 3.0, destroy_on_hit: true, radius: 4.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: i32,
    /// Zero disables the window.
    pub invulnerability_duration: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub attack_damage: i32,
    pub score_value: u32,
    /// `None` pursues at any distance.
    pub follow_range: Option<f32>,
    pub radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            invulnerability_duration: 0.0,
            move_speed: 40.0,
            attack_range: 30.0,
            attack_cooldown: 1.0,
            attack_damage: 1,
            score_value: 10,
            follow_range: None,
            radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_enemies_per_wave: u32,
    pub wave_multiplier: f32,
    pub enemy_spawn_delay: f32,
    pub time_between_waves: f32,
    /// Explicit spawn positions. Empty means "top edge of the arena".
    pub spawn_points: Vec<[f32; 2]>,
    /// Inset from the arena walls for edge spawns.
    pub edge_margin: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_enemies_per_wave: 3,
            wave_multiplier: 1.2,
            enemy_spawn_delay: 1.0,
            time_between_waves: 5.0,
            spawn_points: Vec::new(),
            edge_margin: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub half_width: f32,
    pub half_height: f32,
    pub wall_thickness: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { half_width: 640.0, half_height: 360.0, wall_thickness: 30.0 }
    }
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() { Ok(value) } else { Err(ConfigError::NotFinite { field }) }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

impl CombatConfig {
    /// Parse RON text and validate the result.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("pixels_per_meter", self.pixels_per_meter)?;

        let p = &self.player;
        positive("player.max_health", p.max_health as f32)?;
        non_negative("player.invulnerability_duration", p.invulnerability_duration)?;
        positive("player.mass", p.mass)?;
        non_negative("player.linear_damping", p.linear_damping)?;
        positive("player.max_speed", p.max_speed)?;
        positive("player.radius", p.radius)?;

        let w = &self.weapon;
        non_negative("weapon.base_recoil", w.base_recoil)?;
        non_negative("weapon.charge_multiplier", w.charge_multiplier)?;
        positive("weapon.max_charge_time", w.max_charge_time)?;
        non_negative("weapon.minimum_fire_threshold", w.minimum_fire_threshold)?;
        if w.minimum_fire_threshold > w.max_charge_time {
            return Err(ConfigError::OutOfOrder {
                field: "weapon.minimum_fire_threshold",
                limit_field: "weapon.max_charge_time",
            });
        }
        positive("weapon.base_bullet_count", w.base_bullet_count as f32)?;
        if w.base_bullet_count > w.max_bullet_count {
            return Err(ConfigError::OutOfOrder {
                field: "weapon.base_bullet_count",
                limit_field: "weapon.max_bullet_count",
            });
        }
        non_negative("weapon.base_spread", w.base_spread)?;
        non_negative("weapon.max_spread", w.max_spread)?;
        if w.base_spread > w.max_spread {
            return Err(ConfigError::OutOfOrder {
                field: "weapon.base_spread",
                limit_field: "weapon.max_spread",
            });
        }
        positive("weapon.base_speed", w.base_speed)?;
        positive("weapon.max_speed", w.max_speed)?;
        if w.base_speed > w.max_speed {
            return Err(ConfigError::OutOfOrder {
                field: "weapon.base_speed",
                limit_field: "weapon.max_speed",
            });
        }
        non_negative("weapon.muzzle_offset", w.muzzle_offset)?;

        let pr = &self.projectile;
        non_negative("projectile.damage", pr.damage as f32)?;
        positive("projectile.ttl", pr.ttl)?;
        positive("projectile.radius", pr.radius)?;

        let e = &self.enemy;
        positive("enemy.max_health", e.max_health as f32)?;
        non_negative("enemy.invulnerability_duration", e.invulnerability_duration)?;
        non_negative("enemy.move_speed", e.move_speed)?;
        non_negative("enemy.attack_range", e.attack_range)?;
        non_negative("enemy.attack_cooldown", e.attack_cooldown)?;
        non_negative("enemy.attack_damage", e.attack_damage as f32)?;
        if let Some(range) = e.follow_range {
            positive("enemy.follow_range", range)?;
        }
        positive("enemy.radius", e.radius)?;

        let wv = &self.waves;
        positive("waves.wave_multiplier", wv.wave_multiplier)?;
        non_negative("waves.enemy_spawn_delay", wv.enemy_spawn_delay)?;
        non_negative("waves.time_between_waves", wv.time_between_waves)?;
        non_negative("waves.edge_margin", wv.edge_margin)?;
        for [x, y] in &wv.spawn_points {
            finite("waves.spawn_points", *x)?;
            finite("waves.spawn_points", *y)?;
        }

        let a = &self.arena;
        positive("arena.half_width", a.half_width)?;
        positive("arena.half_height", a.half_height)?;
        non_negative("arena.wall_thickness", a.wall_thickness)?;
        if wv.edge_margin >= a.half_width || wv.edge_margin >= a.half_height {
            return Err(ConfigError::OutOfOrder {
                field: "waves.edge_margin",
                limit_field: "arena.half_width / arena.half_height",
            });
        }

        Ok(())
    }
}
