//! Where the next enemy appears.
//!
//! Configured spawn points win; one is picked at random. Without them the
//! enemy drops in along the top edge of the arena, inset by `edge_margin`.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::config::{ArenaConfig, WaveConfig};

/// Seeded RNG for spawn placement, so a given seed replays the same session.
#[derive(Resource, Debug, Clone)]
pub struct SpawnRng(pub ChaCha8Rng);

impl SpawnRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for SpawnRng {
    fn default() -> Self {
        Self::seeded(0)
    }
}

pub fn pick_spawn_position(rng: &mut impl Rng, waves: &WaveConfig, arena: &ArenaConfig) -> Vec2 {
    if !waves.spawn_points.is_empty() {
        let [x, y] = waves.spawn_points[rng.gen_range(0..waves.spawn_points.len())];
        return Vec2::new(x, y);
    }

    let half_x = (arena.half_width - waves.edge_margin).max(0.0);
    let y = (arena.half_height - waves.edge_margin).max(0.0);
    let x = if half_x > 0.0 { rng.gen_range(-half_x..=half_x) } else { 0.0 };
    Vec2::new(x, y)
}
