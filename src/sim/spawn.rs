//! Time-driven enemy spawner
//!
//! Enemies appear on a ring around the player at an interval that shrinks
//! with survival time, with stats escalating open-endedly. The curve has no
//! cap; every constant here is a balance contract value.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState};
use crate::consts::*;

/// Milliseconds between spawns at a given survival time
///
/// `max(200, 1000 - 15 * elapsed)` - non-increasing, floored.
pub fn spawn_interval_ms(elapsed: f32) -> f32 {
    (SPAWN_INTERVAL_BASE_MS - elapsed * SPAWN_INTERVAL_SHRINK_MS).max(SPAWN_INTERVAL_FLOOR_MS)
}

/// Spawn one enemy if the accumulated timer has passed the interval
///
/// Returns true when an enemy was introduced. The timer is accumulated by
/// the tick; it resets here on spawn.
pub fn maybe_spawn(state: &mut GameState) -> bool {
    if state.spawn_timer_ms <= spawn_interval_ms(state.elapsed) {
        return false;
    }
    state.spawn_timer_ms = 0.0;

    let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
    let distance = state.viewport.x.max(state.viewport.y) * SPAWN_DISTANCE_FACTOR;
    let pos = state.player_pos + crate::dir_from_angle(angle) * distance;

    let difficulty = 1.0 + state.elapsed / DIFFICULTY_RAMP_SECS;
    let hp = ENEMY_BASE_HP * difficulty;
    let speed = (ENEMY_BASE_SPEED + state.rng.random_range(0.0..ENEMY_SPEED_JITTER))
        * (1.0 + state.elapsed / SPEED_RAMP_SECS);
    let radius = ENEMY_MIN_RADIUS + state.rng.random_range(0.0..ENEMY_RADIUS_JITTER);
    let hue = state.rng.random_range(340.0..380.0);

    let id = state.next_entity_id();
    log::debug!("spawn enemy {id} at {pos:?} (difficulty {difficulty:.2})");
    state.enemies.push(Enemy {
        id,
        pos,
        vel: Vec2::ZERO,
        radius,
        hp,
        max_hp: hp,
        speed,
        damage: ENEMY_CONTACT_DAMAGE,
        hue,
    });
    true
}
