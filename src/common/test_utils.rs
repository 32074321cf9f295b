//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; a schedule applies them at
//! sync points. `run_system_once` flushes the world afterwards so spawns and despawns
//! are visible to assertions.

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::clock::CombatClock;
use crate::common::config::CombatConfig;
use crate::common::events::CombatEvent;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// World with the resources every combat system reads.
pub fn combat_world(config: CombatConfig) -> World {
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(CombatClock::default());
    world.init_resource::<Messages<CombatEvent>>();
    world
}

/// Advance the gameplay clock by `dt`.
pub fn tick_clock(world: &mut World, dt: f32) {
    world.resource_mut::<CombatClock>().tick(dt);
}

/// Take every combat event written so far.
pub fn drain_events(world: &mut World) -> Vec<CombatEvent> {
    world.resource_mut::<Messages<CombatEvent>>().drain().collect()
}

/// Tiny deterministic PRNG for property-style tests (xorshift64*).
#[derive(Clone, Copy)]
pub struct TestRng(u64);

impl TestRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // 24 random bits -> float in [0,1)
        let v = (self.next_u64() >> 40) as u32;
        (v as f32) / ((1u32 << 24) as f32)
    }

    #[inline]
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        debug_assert!(hi >= lo);
        lo + (hi - lo) * self.next_f32()
    }

    #[inline]
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(hi >= lo);
        lo + (self.next_u64() % ((hi - lo) as u64 + 1)) as i32
    }
}
