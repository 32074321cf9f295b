use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use super::*;
use crate::common::config::CombatConfig;
use crate::common::test_utils::{combat_world, drain_events, run_system_once};

// -----------------------------------------------------------------------------
// Score
// -----------------------------------------------------------------------------

#[test]
fn award_accumulates_and_finish_keeps_the_best() {
    let mut score = Score::new(25);
    assert_eq!(score.award(10), 10);
    assert_eq!(score.award(10), 20);
    assert_eq!(score.finish(), 25);

    score.award(10);
    assert_eq!(score.finish(), 30);
    assert_eq!(score.high(), 30);
}

#[test]
fn award_saturates() {
    let mut score = Score::new(0);
    score.award(u32::MAX);
    assert_eq!(score.award(5), u32::MAX);
}

// -----------------------------------------------------------------------------
// Stores
// -----------------------------------------------------------------------------

#[test]
fn memory_store_shares_its_value() {
    let store = MemoryHighScoreStore::with_value(3);
    let handle = store.clone();
    store.save(40).unwrap();
    assert_eq!(handle.get(), 40);
    assert_eq!(handle.load().unwrap(), 40);
}

fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("recoil-gunner-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn file_store_round_trips_and_defaults_to_zero() {
    let path = scratch_path("round_trip/high_score.txt");
    let _ = std::fs::remove_file(&path);
    let store = FileHighScoreStore::new(&path);

    assert_eq!(store.load().unwrap(), 0);
    store.save(1234).unwrap();
    assert_eq!(store.load().unwrap(), 1234);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_file_is_an_error_and_reads_as_zero() {
    let path = scratch_path("corrupt/high_score.txt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "lots").unwrap();

    let store = FileHighScoreStore::new(&path);
    assert!(matches!(store.load(), Err(HighScoreError::Parse { .. })));
    assert_eq!(HighScores::new(store).load_or_zero(), 0);

    let _ = std::fs::remove_file(&path);
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

#[test]
fn reset_score_loads_the_stored_high_score() {
    let mut world = World::new();
    world.insert_resource(Score::new(0));
    world.insert_resource(HighScores::new(MemoryHighScoreStore::with_value(70)));
    world.resource_mut::<Score>().award(15);

    run_system_once(&mut world, reset_score);

    assert_eq!(*world.resource::<Score>(), Score::new(70));
}

fn game_over_world(stored_high: u32) -> (World, MemoryHighScoreStore) {
    let store = MemoryHighScoreStore::with_value(stored_high);
    let mut world = combat_world(CombatConfig::default());
    world.insert_resource(Score::new(stored_high));
    world.insert_resource(HighScores::new(store.clone()));
    (world, store)
}

#[test]
fn game_over_freezes_bodies_and_records_a_new_best() {
    let (mut world, store) = game_over_world(20);
    world.resource_mut::<Score>().award(30);
    let enemy = world.spawn((Enemy { score_value: 10 }, LinearVelocity(Vec2::X))).id();
    let bullet = world
        .spawn((
            Projectile::new(1, 1.0, true, Entity::PLACEHOLDER),
            LinearVelocity(Vec2::Y),
        ))
        .id();
    let player = world.spawn((Player, LinearVelocity(Vec2::NEG_X))).id();
    let bystander = world.spawn(LinearVelocity(Vec2::ONE)).id();

    run_system_once(&mut world, enter_game_over);

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
    assert_eq!(world.get::<LinearVelocity>(enemy).unwrap().0, Vec2::ZERO);
    assert_eq!(world.get::<LinearVelocity>(bullet).unwrap().0, Vec2::ZERO);
    assert_eq!(world.get::<LinearVelocity>(bystander).unwrap().0, Vec2::ONE);
    assert_eq!(store.get(), 30);
    assert_eq!(
        drain_events(&mut world),
        vec![CombatEvent::GameOver { final_score: 30, high_score: 30 }]
    );
}

#[test]
fn game_over_below_the_best_saves_nothing() {
    let (mut world, store) = game_over_world(50);
    world.resource_mut::<Score>().award(10);

    run_system_once(&mut world, enter_game_over);

    assert_eq!(store.get(), 50);
    assert_eq!(
        drain_events(&mut world),
        vec![CombatEvent::GameOver { final_score: 10, high_score: 50 }]
    );
}

// -----------------------------------------------------------------------------
// Phase control
// -----------------------------------------------------------------------------

fn session_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<SessionPhase>();
    app.init_resource::<CombatClock>();
    app.add_message::<CombatEvent>();
    plugin(&mut app);
    app.update();
    app
}

fn send(app: &mut App, command: SessionCommand) {
    app.world_mut().write_message(command);
    app.update();
    app.update();
}

fn phase(app: &App) -> SessionPhase {
    *app.world().resource::<State<SessionPhase>>().get()
}

fn paused_events(app: &mut App) -> Vec<bool> {
    app.world_mut()
        .resource_mut::<Messages<CombatEvent>>()
        .drain()
        .filter_map(|e| match e {
            CombatEvent::GamePaused(p) => Some(p),
            _ => None,
        })
        .collect()
}

#[test]
fn start_enters_playing_and_runs_begin() {
    let mut app = session_app();
    app.world_mut().resource_mut::<Score>().award(99);

    send(&mut app, SessionCommand::Start);

    assert_eq!(phase(&app), SessionPhase::Playing);
    assert_eq!(app.world().resource::<Score>().current(), 0);
}

#[test]
fn pause_commands_are_ignored_before_start() {
    let mut app = session_app();
    send(&mut app, SessionCommand::Pause);
    send(&mut app, SessionCommand::TogglePause);
    assert_eq!(phase(&app), SessionPhase::NotStarted);
}

#[test]
fn pausing_twice_equals_pausing_once() {
    let mut app = session_app();
    send(&mut app, SessionCommand::Start);
    paused_events(&mut app);

    send(&mut app, SessionCommand::Pause);
    assert_eq!(paused_events(&mut app), vec![true]);
    let clock_once = *app.world().resource::<CombatClock>();

    send(&mut app, SessionCommand::Pause);

    assert_eq!(phase(&app), SessionPhase::Paused);
    assert!(app.world().resource::<Time<Virtual>>().is_paused());
    assert_eq!(*app.world().resource::<CombatClock>(), clock_once);
    assert!(paused_events(&mut app).is_empty());
}

#[test]
fn toggle_pause_flips_and_resume_unpauses_time() {
    let mut app = session_app();
    send(&mut app, SessionCommand::Start);

    send(&mut app, SessionCommand::TogglePause);
    assert_eq!(phase(&app), SessionPhase::Paused);
    send(&mut app, SessionCommand::TogglePause);
    assert_eq!(phase(&app), SessionPhase::Playing);
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());

    send(&mut app, SessionCommand::Pause);
    send(&mut app, SessionCommand::Resume);
    assert_eq!(phase(&app), SessionPhase::Playing);
}

#[test]
fn restart_from_game_over_begins_a_fresh_session() {
    let mut app = session_app();
    send(&mut app, SessionCommand::Start);
    app.world_mut().resource_mut::<Score>().award(40);
    app.world_mut()
        .resource_mut::<NextState<SessionPhase>>()
        .set(SessionPhase::GameOver);
    app.update();
    assert_eq!(phase(&app), SessionPhase::GameOver);
    assert!(app.world().resource::<Time<Virtual>>().is_paused());

    send(&mut app, SessionCommand::Restart);

    assert_eq!(phase(&app), SessionPhase::Playing);
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());
    let score = *app.world().resource::<Score>();
    assert_eq!(score.current(), 0);
    // The memory store remembers the best score of the last session.
    assert_eq!(score.high(), 40);
}

#[test]
fn restart_while_paused_clears_session_entities() {
    let mut app = session_app();
    send(&mut app, SessionCommand::Start);
    let leftover = app
        .world_mut()
        .spawn(DespawnOnExit(SessionPhase::GameOver))
        .id();
    send(&mut app, SessionCommand::Pause);

    send(&mut app, SessionCommand::Restart);

    assert_eq!(phase(&app), SessionPhase::Playing);
    assert!(app.world().get_entity(leftover).is_err());
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());
}

#[test]
fn player_death_ends_the_session() {
    let mut app = session_app();
    send(&mut app, SessionCommand::Start);
    let mut hp = Health::new(1, 0.0);
    hp.apply_damage(1, 0.0);
    app.world_mut().spawn((Player, hp));

    run_system_once(app.world_mut(), detect_player_death);
    app.update();

    assert_eq!(phase(&app), SessionPhase::GameOver);
    let over = app
        .world_mut()
        .resource_mut::<Messages<CombatEvent>>()
        .drain()
        .any(|e| matches!(e, CombatEvent::GameOver { .. }));
    assert!(over);
}

#[test]
fn commands_wait_for_a_pending_game_over() {
    let mut app = session_app();
    send(&mut app, SessionCommand::Start);
    let mut hp = Health::new(1, 0.0);
    hp.apply_damage(1, 0.0);
    app.world_mut().spawn((Player, hp));

    app.world_mut().write_message(SessionCommand::Pause);
    app.update();
    assert_ne!(phase(&app), SessionPhase::Paused);

    run_system_once(app.world_mut(), detect_player_death);
    app.update();
    assert_eq!(phase(&app), SessionPhase::GameOver);
}
