//! Waves plugin: paces enemy creation into escalating waves.
//!
//! - `BeginSession`: [`reset_waves`] reseeds the spawn RNG and starts wave 1.
//! - `CombatSet::Waves`: [`run_waves`] steps the [`WaveDirector`] with the
//!   live-enemy count and spawns what it asks for.
//!
//! Deaths are applied in the same tick before this set reads the live count,
//! and enemies spawned here are only counted from the next tick on. A wave can
//! therefore be seen as cleared one tick late, never early.

use bevy::prelude::*;

use crate::common::clock::CombatClock;
use crate::common::config::CombatConfig;
use crate::common::events::CombatEvent;
use crate::common::sets::CombatSet;
use crate::plugins::enemies::{live_enemy_count, spawn_enemy, Enemy};
use crate::plugins::health::Health;
use crate::plugins::session::BeginSession;

pub mod director;
pub mod spawn_position;

pub use director::{enemies_for_wave, WaveDirector, WavePhase, WaveTick};
pub use spawn_position::{pick_spawn_position, SpawnRng};

pub fn plugin(app: &mut App) {
    app.init_resource::<WaveDirector>()
        .init_resource::<SpawnRng>()
        .add_systems(BeginSession, reset_waves)
        .add_systems(FixedPostUpdate, run_waves.in_set(CombatSet::Waves));
}

pub fn reset_waves(
    config: Res<CombatConfig>,
    mut director: ResMut<WaveDirector>,
    mut rng: ResMut<SpawnRng>,
    mut events: MessageWriter<CombatEvent>,
) {
    *rng = SpawnRng::seeded(config.seed);
    *director = WaveDirector::default();

    let count = director.start_wave(1, &config.waves);
    info!("Starting wave 1 with {count} enemies");
    events.write(CombatEvent::WaveStarted { wave: 1, enemy_count: count });
}

pub fn run_waves(
    mut commands: Commands,
    config: Res<CombatConfig>,
    clock: Res<CombatClock>,
    mut director: ResMut<WaveDirector>,
    mut rng: ResMut<SpawnRng>,
    q_enemies: Query<&Health, With<Enemy>>,
    mut events: MessageWriter<CombatEvent>,
) {
    let live = live_enemy_count(&q_enemies);
    let tick = director.step(clock.delta(), live, &config.waves);

    if let Some((wave, enemy_count)) = tick.started {
        info!("Starting wave {wave} with {enemy_count} enemies");
        events.write(CombatEvent::WaveStarted { wave, enemy_count });
    }

    if tick.spawn {
        let position = pick_spawn_position(&mut rng.0, &config.waves, &config.arena);
        let e = spawn_enemy(&mut commands, &config.enemy, position);
        debug!(
            "Spawned enemy {e} at {position} ({}/{} of wave {})",
            director.spawned(),
            director.to_spawn(),
            director.wave()
        );
        events.write(CombatEvent::EnemySpawned { position });
    }
}
