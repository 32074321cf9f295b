//! Session plugin: phase control, score, game over.
//!
//! ```text
//!   Start                     Pause / Resume / TogglePause
//! NotStarted ----> Playing <------------------------------> Paused
//!                    |  ^                                      |
//!    player death    |  |  Restart (fresh session)             |
//!                    v  |                                      |
//!                 GameOver <-------------- Restart ------------+
//! ```
//!
//! A fresh session is built by running the [`BeginSession`] schedule. Other
//! plugins add their own reset/spawn systems to it; this plugin only owns the
//! score and the clock reset.
//!
//! Session entities carry `DespawnOnExit(SessionPhase::GameOver)`: they stay on
//! screen, frozen, while the game-over phase lasts and are cleared on restart.

use avian2d::prelude::*;
use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::clock::CombatClock;
use crate::common::events::CombatEvent;
use crate::common::sets::CombatSet;
use crate::common::state::SessionPhase;
use crate::plugins::enemies::{resolve_enemy_deaths, Enemy};
use crate::plugins::health::Health;
use crate::plugins::player::Player;
use crate::plugins::projectiles::Projectile;

pub mod high_score;

pub use high_score::{FileHighScoreStore, HighScoreError, HighScoreStore, HighScores, MemoryHighScoreStore};

/// Runs once per fresh session, after the previous session's entities are gone.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeginSession;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    current: u32,
    high: u32,
}

impl Score {
    pub fn new(high: u32) -> Self {
        Self { current: 0, high }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn high(&self) -> u32 {
        self.high
    }

    /// Add `points`, returning the new total.
    pub fn award(&mut self, points: u32) -> u32 {
        self.current = self.current.saturating_add(points);
        self.current
    }

    /// Fold the current score into the high score.
    pub fn finish(&mut self) -> u32 {
        self.high = self.high.max(self.current);
        self.high
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Resume,
    TogglePause,
    Restart,
}

pub fn plugin(app: &mut App) {
    app.init_schedule(BeginSession)
        .init_resource::<Score>()
        .init_resource::<HighScores>()
        .add_message::<SessionCommand>()
        .add_systems(BeginSession, (reset_score, reset_clock))
        .add_systems(Update, (apply_session_commands, log_combat_events))
        .add_systems(
            OnTransition { exited: SessionPhase::NotStarted, entered: SessionPhase::Playing },
            begin_session,
        )
        .add_systems(
            OnTransition { exited: SessionPhase::GameOver, entered: SessionPhase::Playing },
            begin_session,
        )
        .add_systems(
            FixedPostUpdate,
            detect_player_death
                .in_set(CombatSet::Resolve)
                .after(resolve_enemy_deaths),
        )
        .add_systems(OnEnter(SessionPhase::GameOver), (enter_game_over, freeze_time))
        .add_systems(OnExit(SessionPhase::GameOver), thaw_time)
        .add_systems(OnEnter(SessionPhase::Paused), pause_time)
        .add_systems(OnExit(SessionPhase::Paused), resume_time);
}

pub fn begin_session(world: &mut World) {
    info!("Starting a new session");
    if let Err(err) = world.try_run_schedule(BeginSession) {
        warn!("Session start failed: {err}");
    }
}

/// Restart without passing through `GameOver`: clear the live session by hand.
fn restart_live_session(world: &mut World) {
    let mut q = world.query_filtered::<Entity, With<DespawnOnExit<SessionPhase>>>();
    let doomed: Vec<Entity> = q.iter(world).collect();
    for e in doomed {
        world.despawn(e);
    }
    begin_session(world);
}

pub fn reset_score(mut score: ResMut<Score>, high_scores: Res<HighScores>) {
    *score = Score::new(high_scores.load_or_zero());
}

pub fn reset_clock(mut clock: ResMut<CombatClock>) {
    clock.reset();
}

pub fn apply_session_commands(
    mut commands: Commands,
    mut reader: MessageReader<SessionCommand>,
    state: Res<State<SessionPhase>>,
    mut next: ResMut<NextState<SessionPhase>>,
    q_player: Query<&Health, With<Player>>,
) {
    let current = *state.get();

    // A dead player's GameOver is already pending; it must land first.
    if current != SessionPhase::GameOver && q_player.iter().any(Health::is_dead) {
        for command in reader.read() {
            debug!("Ignoring {command:?}: game over pending");
        }
        return;
    }

    let mut phase = current;

    for command in reader.read() {
        phase = match (*command, phase) {
            (SessionCommand::Start | SessionCommand::Restart, SessionPhase::NotStarted) => {
                SessionPhase::Playing
            }
            (SessionCommand::Pause | SessionCommand::TogglePause, SessionPhase::Playing) => {
                SessionPhase::Paused
            }
            (SessionCommand::Resume | SessionCommand::TogglePause, SessionPhase::Paused) => {
                SessionPhase::Playing
            }
            (SessionCommand::Restart, SessionPhase::GameOver) => SessionPhase::Playing,
            (SessionCommand::Restart, SessionPhase::Playing | SessionPhase::Paused) => {
                info!("Restarting session");
                commands.queue(restart_live_session);
                SessionPhase::Playing
            }
            (_, phase) => phase,
        };
    }

    if phase != current {
        next.set(phase);
    }
}

/// The player's death ends the session.
pub fn detect_player_death(
    q_player: Query<&Health, With<Player>>,
    mut next: ResMut<NextState<SessionPhase>>,
) {
    if q_player.iter().any(Health::is_dead) {
        next.set(SessionPhase::GameOver);
    }
}

pub fn enter_game_over(
    mut score: ResMut<Score>,
    high_scores: Res<HighScores>,
    mut q_bodies: Query<&mut LinearVelocity, Or<(With<Player>, With<Enemy>, With<Projectile>)>>,
    mut events: MessageWriter<CombatEvent>,
) {
    for mut vel in &mut q_bodies {
        vel.0 = Vec2::ZERO;
    }

    let previous_high = score.high();
    let high = score.finish();
    let final_score = score.current();
    if final_score > previous_high {
        high_scores.save_or_warn(final_score);
    }

    info!("Game over: score {final_score}, high score {high}");
    events.write(CombatEvent::GameOver { final_score, high_score: high });
}

/// Stop physics for the game-over screen so the arena stays where it died.
pub fn freeze_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

pub fn thaw_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

pub fn pause_time(mut time: ResMut<Time<Virtual>>, mut events: MessageWriter<CombatEvent>) {
    time.pause();
    info!("Paused");
    events.write(CombatEvent::GamePaused(true));
}

pub fn resume_time(mut time: ResMut<Time<Virtual>>, mut events: MessageWriter<CombatEvent>) {
    time.unpause();
    info!("Resumed");
    events.write(CombatEvent::GamePaused(false));
}

/// Default consumer.
pub fn log_combat_events(mut reader: MessageReader<CombatEvent>) {
    for event in reader.read() {
        debug!("{event:?}");
    }
}

#[cfg(test)]
mod tests;
