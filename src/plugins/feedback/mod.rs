//! Feedback plugin (render-only): hit flash and enemy facing.
//!
//! Reads `CombatEvent`s and derived state only; nothing here feeds back into
//! the simulation.

use bevy::color::Mix;
use bevy::prelude::*;

use crate::common::events::CombatEvent;
use crate::plugins::enemies::{ai, Enemy};
use crate::plugins::health::Health;
use crate::plugins::player::Player;

/// Seconds for a full-intensity flash to fade out.
pub const FLASH_DURATION: f32 = 0.15;

/// Flash intensity in `[0, 1]`, decaying linearly.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct HitFlash {
    intensity: f32,
}

impl HitFlash {
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn trigger(&mut self) {
        self.intensity = 1.0;
    }

    pub fn decay(&mut self, dt: f32, duration: f32) {
        if duration <= 0.0 {
            self.intensity = 0.0;
            return;
        }
        self.intensity = (self.intensity - dt.max(0.0) / duration).max(0.0);
    }
}

/// Sprite color before any tint.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseColor(pub Color);

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            attach_hit_flash,
            trigger_hit_flash,
            tint_flashing_sprites,
            face_player,
        )
            .chain(),
    );
}

pub fn attach_hit_flash(
    mut commands: Commands,
    q_new: Query<(Entity, &Sprite), (Added<Health>, Without<HitFlash>)>,
) {
    for (e, sprite) in &q_new {
        commands.entity(e).insert((HitFlash::default(), BaseColor(sprite.color)));
    }
}

pub fn trigger_hit_flash(mut reader: MessageReader<CombatEvent>, mut q: Query<&mut HitFlash>) {
    for event in reader.read() {
        let CombatEvent::DamageTaken { entity, .. } = event else {
            continue;
        };
        if let Ok(mut flash) = q.get_mut(*entity) {
            flash.trigger();
        }
    }
}

pub fn tint_flashing_sprites(
    time: Res<Time>,
    mut q: Query<(&mut HitFlash, &BaseColor, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (mut flash, base, mut sprite) in &mut q {
        if flash.intensity() <= 0.0 {
            continue;
        }
        flash.decay(dt, FLASH_DURATION);
        let tinted = LinearRgba::from(base.0).mix(&LinearRgba::WHITE, flash.intensity());
        sprite.color = tinted.into();
    }
}

/// Enemies look toward the player by mirroring their sprite.
pub fn face_player(
    q_player: Query<&Transform, With<Player>>,
    mut q_enemies: Query<(&Transform, &mut Sprite), (With<Enemy>, Without<Player>)>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let target = player_tf.translation.truncate();

    for (tf, mut sprite) in &mut q_enemies {
        if let Some(angle) = ai::facing(tf.translation.truncate(), target) {
            sprite.flip_x = angle.cos() < 0.0;
        }
    }
}
