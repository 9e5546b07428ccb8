//! The per-tick simulation step
//!
//! Advances one frame of gameplay given a time delta and the sampled input
//! intents. Phase order matters: each phase reads state the previous phase
//! already mutated, in a single deterministic pass.

use glam::Vec2;
use rand::Rng;

use super::collision::{knockback_impulse, segment_circle_hit};
use super::spawn::maybe_spawn;
use super::state::{GamePhase, GameState, Particle, PlayerStats};
use crate::consts::*;
use crate::normalize_or_x;

use super::input::TickInput;

/// A kill registered during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyKilled {
    pub xp_award: u32,
}

/// Events emitted by one tick, consumed by the progression controller and
/// the top-level session driver
#[derive(Debug, Clone, Default)]
pub struct TickEvents {
    /// Total contact damage taken this tick
    pub player_damaged: f32,
    /// Kills registered this tick, in store order
    pub kills: Vec<EnemyKilled>,
    /// Raised at most once per tick when xp reaches the level threshold;
    /// resolution is deferred to the progression controller
    pub level_threshold_crossed: bool,
    /// Survival time at the moment hp reached zero; fires once per session
    pub player_died: Option<f32>,
    /// Enemies introduced this tick
    pub spawned: u32,
}

/// Advance the simulation by one tick
///
/// `dt` is milliseconds since the previous tick; it advances the clock and
/// the spawn timer, while motion constants stay per-tick (the presentation
/// loop is frame-rate dependent by design).
///
/// No-op outside `Playing`: ticks arriving in Start, Upgrade, or GameOver
/// leave every position, stat, and timer unchanged.
pub fn step(
    state: &mut GameState,
    stats: &mut PlayerStats,
    input: &TickInput,
    dt: f32,
) -> TickEvents {
    let mut events = TickEvents::default();
    if state.phase != GamePhase::Playing {
        return events;
    }

    // 1. Advance the survival clock
    state.elapsed += dt / 1000.0;

    // 2. Move the player; sub-unit intent is not renormalized
    let mv = input.move_intent;
    let mag = mv.length();
    if mag > MOVE_DEADZONE {
        state.player_pos += mv / mag.max(1.0) * stats.move_speed;
    }

    // 3. Camera follow
    state.camera += (state.player_pos - state.camera) * CAMERA_LERP;

    // 4. Blade orientation, held while aim intent is idle
    if input.aim_intent.length() > AIM_DEADZONE {
        state.blade_angle = input.aim_intent.y.atan2(input.aim_intent.x);
    }

    // 5. Stab machine; a lunge request overrides mid-decay
    if input.lunge {
        state.stabbing = true;
    }
    if state.stabbing {
        state.stab_offset += STAB_EXTEND;
        if state.stab_offset > STAB_MAX {
            state.stabbing = false;
        }
    } else {
        state.stab_offset = (state.stab_offset - STAB_RETRACT).max(0.0);
    }

    // 6. Spawn check
    state.spawn_timer_ms += dt;
    if maybe_spawn(state) {
        events.spawned += 1;
    }

    // 7. Enemy pass: chase, contact damage, blade hits, deaths.
    // Dead enemies are marked (hp <= 0) and filtered after the loop; the
    // store is never spliced while being iterated.
    let player = state.player_pos;
    let blade_tip = state.blade_tip(stats);
    let stabbing = state.stabbing;
    let elapsed = state.elapsed;
    let hit_damage =
        stats.attack_power * if stabbing { STAB_DAMAGE_MULT } else { 1.0 } / DAMAGE_DIVISOR;

    let enemies = &mut state.enemies;
    let particles = &mut state.particles;
    let rng = &mut state.rng;

    for enemy in enemies.iter_mut() {
        // Chase movement plus knockback carry, then knockback friction
        let to_player = player - enemy.pos;
        let dist = to_player.length();
        enemy.pos += normalize_or_x(to_player) * enemy.speed + enemy.vel;
        enemy.vel *= KNOCKBACK_FRICTION;

        // Contact damage, applied every overlapping tick
        if dist < enemy.radius + PLAYER_RADIUS {
            stats.hp = (stats.hp - enemy.damage).max(0.0);
            events.player_damaged += enemy.damage;
            if stats.hp <= 0.0 && events.player_died.is_none() {
                events.player_died = Some(elapsed);
            }
        }

        // Blade hit: clamped projection onto the segment, padded by width
        let hit = segment_circle_hit(player, blade_tip, enemy.pos, enemy.radius, stats.blade_width);
        if hit.hit {
            enemy.hp -= hit_damage;
            burst(particles, rng, enemy.pos, enemy.hue, HIT_PARTICLES);
            enemy.vel += knockback_impulse(enemy.pos, hit.closest, enemy.radius, stabbing);

            if enemy.hp <= 0.0 {
                burst(particles, rng, enemy.pos, enemy.hue, DEATH_PARTICLES);
                stats.xp += XP_PER_KILL;
                stats.kill_count += 1;
                events.kills.push(EnemyKilled {
                    xp_award: XP_PER_KILL,
                });
                if stats.xp >= stats.next_level_xp {
                    events.level_threshold_crossed = true;
                }
            }
        }
    }
    enemies.retain(|e| e.hp > 0.0);

    // 8. Particle integration
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);

    // 9. Population cap: over the cap, cull only distant enemies
    if enemies.len() > ENEMY_CAP {
        let before = enemies.len();
        enemies.retain(|e| (e.pos - player).length() < CULL_DISTANCE);
        log::debug!("culled {} distant enemies", before - enemies.len());
    }

    // Terminal transition; nothing this tick can resurrect the player
    if let Some(at) = events.player_died {
        log::info!("player died after {at:.1}s, {} kills", stats.kill_count);
        state.phase = GamePhase::GameOver;
    }

    events
}

/// Emit a burst of particles inheriting the enemy's hue
fn burst(particles: &mut Vec<Particle>, rng: &mut impl Rng, pos: Vec2, hue: f32, count: u32) {
    for _ in 0..count {
        let half = PARTICLE_SPREAD / 2.0;
        particles.push(Particle {
            pos,
            vel: Vec2::new(
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            ),
            life: 1.0,
            hue,
        });
    }
}
