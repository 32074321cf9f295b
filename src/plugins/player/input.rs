//! Input provider: mouse/keyboard sampling into [`PlayerInput`].
//!
//! Runs in `Update` of interactive apps only. Headless apps (and tests) write
//! `PlayerInput` directly. Every source is optional; a missing window, camera
//! or device leaves the previous value in place.

use bevy::prelude::*;

use crate::common::state::SessionPhase;
use crate::plugins::camera::MainCamera;
use crate::plugins::session::SessionCommand;

use super::Player;

/// Latest input snapshot read by the fixed-step weapon.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub fire_held: bool,
    /// Unit aim direction, or zero when there is nothing to aim at.
    pub aim: Vec2,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            gather_fire,
            gather_aim.run_if(in_state(SessionPhase::Playing)),
            gather_session_keys,
        ),
    );
}

/// Fire is sampled in every phase so a release during pause is seen on resume.
pub fn gather_fire(buttons: Option<Res<ButtonInput<MouseButton>>>, mut input: ResMut<PlayerInput>) {
    let Some(buttons) = buttons else { return; };
    input.fire_held = buttons.pressed(MouseButton::Left);
}

/// Cursor aiming, with the keyboard axis as fallback when no cursor is available.
pub fn gather_aim(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    q_player: Query<&Transform, With<Player>>,
    mut input: ResMut<PlayerInput>,
) {
    let Ok(player_tf) = q_player.single() else { return; };
    let origin = player_tf.translation.truncate();

    let cursor_world = windows
        .single()
        .ok()
        .and_then(Window::cursor_position)
        .zip(q_camera.single().ok())
        .and_then(|(cursor, (camera, camera_tf))| camera.viewport_to_world_2d(camera_tf, cursor).ok());

    if let Some(world_cursor) = cursor_world {
        input.aim = (world_cursor - origin).normalize_or_zero();
        return;
    }

    let Some(keys) = keys else { return; };
    let axis = keyboard_axis(&keys);
    // The keyboard keeps the last direction while no key is held.
    if axis != Vec2::ZERO {
        input.aim = axis.normalize();
    }
}

fn keyboard_axis(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axis = Vec2::ZERO;

    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }
    axis
}

/// Escape toggles pause, Enter starts, R restarts.
pub fn gather_session_keys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut commands: MessageWriter<SessionCommand>,
) {
    let Some(keys) = keys else { return; };

    if keys.just_pressed(KeyCode::Escape) {
        commands.write(SessionCommand::TogglePause);
    }
    if keys.just_pressed(KeyCode::Enter) {
        commands.write(SessionCommand::Start);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        commands.write(SessionCommand::Restart);
    }
}
