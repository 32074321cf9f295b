//! Core plugin: shared resources, the combat tick chain, and deferred despawn.
//!
//! Every gameplay system registers into one of the [`CombatSet`] links. The
//! links run in a fixed order once per fixed step, after avian has reported
//! this step's contacts:
//!
//! ```text
//! Clock -> Weapon -> Projectiles -> Enemies -> Waves -> Resolve
//! ```
//!
//! The simulation links are gated separately, so a player death in `Enemies`
//! stops `Waves` in the same tick. `Resolve` only needs the session to be
//! playing: it is where that death is turned into the game-over transition.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::clock::{advance_clock, CombatClock};
use crate::common::config::CombatConfig;
use crate::common::events::CombatEvent;
use crate::common::sets::CombatSet;
use crate::common::state::SessionPhase;
use crate::plugins::health::Health;
use crate::plugins::player::Player;

/// Marker: entity is finished and will be despawned after the fixed step.
///
/// Physics entities are not despawned inside the fixed step; other systems may
/// still hold queued work for them.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.init_resource::<CombatConfig>()
        .init_resource::<CombatClock>()
        .add_message::<CombatEvent>()
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    let links = [
        CombatSet::Clock,
        CombatSet::Weapon,
        CombatSet::Projectiles,
        CombatSet::Enemies,
        CombatSet::Waves,
    ];
    for link in links {
        app.configure_sets(
            FixedPostUpdate,
            link.after(CollisionEventSystems).run_if(combat_running),
        );
    }
    app.configure_sets(
        FixedPostUpdate,
        CombatSet::Resolve
            .after(CollisionEventSystems)
            .run_if(in_state(SessionPhase::Playing)),
    );
    app.configure_sets(
        FixedPostUpdate,
        (
            CombatSet::Clock,
            CombatSet::Weapon,
            CombatSet::Projectiles,
            CombatSet::Enemies,
            CombatSet::Waves,
            CombatSet::Resolve,
        )
            .chain(),
    );

    app.add_systems(FixedPostUpdate, advance_clock.in_set(CombatSet::Clock))
        .add_systems(PostUpdate, despawn_pending);
}

/// Run condition for every combat link: the session is live and the player
/// (when present) has not died earlier in this tick.
pub fn combat_running(
    phase: Option<Res<State<SessionPhase>>>,
    q_player: Query<&Health, With<Player>>,
) -> bool {
    let Some(phase) = phase else {
        return false;
    };
    *phase.get() == SessionPhase::Playing && q_player.iter().all(Health::is_alive)
}

pub fn despawn_pending(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
