mod common;

use recoil_gunner::common::config::CombatConfig;
use recoil_gunner::common::state::SessionPhase;
use recoil_gunner::plugins::enemies::Enemy;
use recoil_gunner::plugins::player::Player;
use recoil_gunner::plugins::session::SessionCommand;
use recoil_gunner::plugins::waves::WaveDirector;
use recoil_gunner::plugins::world::Wall;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();
    common::tick(&mut app, 3);
    assert_eq!(common::phase(&app), SessionPhase::NotStarted);
    assert_eq!(common::count::<Player>(&mut app), 0);
}

#[test]
fn start_builds_the_session() {
    let mut app = common::app_headless();
    common::command(&mut app, SessionCommand::Start);

    assert_eq!(common::phase(&app), SessionPhase::Playing);
    assert_eq!(common::count::<Player>(&mut app), 1);
    assert_eq!(common::count::<Wall>(&mut app), 4);
    assert_eq!(app.world().resource::<WaveDirector>().wave(), 1);

    // The first enemy of wave 1 is due on the first combat tick.
    common::tick(&mut app, 3);
    assert!(common::count::<Enemy>(&mut app) >= 1);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = CombatConfig::default();
    config.weapon.max_charge_time = 0.0;

    let mut app = bevy::prelude::App::new();
    assert!(recoil_gunner::game::configure_headless_with(&mut app, config).is_err());
}
