//! Neon Blade - simulation core for a top-down melee survival game
//!
//! A player fends off ever-faster waves of enemies with a blade, earns xp
//! per kill, and picks one of three upgrades on each level-up. This crate is
//! the per-tick simulation only; rendering, raw input capture, and UI chrome
//! are external collaborators.
//!
//! Core modules:
//! - `sim`: per-tick state advance (movement, spawning, collisions, knockback)
//! - `progression`: upgrade catalog and level/xp state machine
//!
//! Wiring per frame: accumulate raw events into [`sim::InputState`], call
//! [`sim::InputState::sample`] once, pass the result to [`sim::step`], then
//! feed the returned [`sim::TickEvents`] to [`progression::Progression`] and
//! hand a [`sim::RenderSnapshot`] to the renderer.

pub mod progression;
pub mod sim;

pub use progression::{Progression, UpgradeKind};
pub use sim::{GamePhase, GameState, InputState, PlayerStats, TickEvents, TickInput, step};

use glam::Vec2;

/// Game balance constants
///
/// These are contract values, not tunables: the spawn curve, damage divisor,
/// and knockback formula define the game's difficulty curve.
pub mod consts {
    /// Player body radius, used for enemy contact checks
    pub const PLAYER_RADIUS: f32 = 15.0;

    /// Movement intent below this magnitude is ignored
    pub const MOVE_DEADZONE: f32 = 0.05;
    /// Aim intent below this magnitude holds the previous blade angle
    pub const AIM_DEADZONE: f32 = 0.1;
    /// Virtual joystick max throw in surface pixels
    pub const JOYSTICK_THROW: f32 = 50.0;

    /// Camera follow lerp factor per tick (frame-rate dependent by design)
    pub const CAMERA_LERP: f32 = 0.1;

    /// Stab extension per tick while lunging
    pub const STAB_EXTEND: f32 = 12.0;
    /// Stab offset above which the lunge ends and retraction begins
    pub const STAB_MAX: f32 = 40.0;
    /// Stab retraction per tick, floored at zero
    pub const STAB_RETRACT: f32 = 3.0;
    /// Damage multiplier while the stab is extending
    pub const STAB_DAMAGE_MULT: f32 = 3.0;
    /// All blade damage is divided by this
    pub const DAMAGE_DIVISOR: f32 = 10.0;

    /// Base spawn interval at elapsed = 0, in milliseconds
    pub const SPAWN_INTERVAL_BASE_MS: f32 = 1000.0;
    /// Spawn interval shrink per elapsed second, in milliseconds
    pub const SPAWN_INTERVAL_SHRINK_MS: f32 = 15.0;
    /// Spawn interval floor, in milliseconds
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 200.0;
    /// Spawn ring distance as a fraction of the larger viewport dimension
    pub const SPAWN_DISTANCE_FACTOR: f32 = 0.7;

    /// Enemy base hp before difficulty scaling
    pub const ENEMY_BASE_HP: f32 = 15.0;
    /// Seconds of survival per +1.0 difficulty
    pub const DIFFICULTY_RAMP_SECS: f32 = 45.0;
    /// Seconds of survival per +100% enemy speed
    pub const SPEED_RAMP_SECS: f32 = 180.0;
    /// Enemy base speed per tick
    pub const ENEMY_BASE_SPEED: f32 = 1.2;
    /// Random additional enemy speed, [0, this)
    pub const ENEMY_SPEED_JITTER: f32 = 0.6;
    /// Minimum enemy radius
    pub const ENEMY_MIN_RADIUS: f32 = 12.0;
    /// Random additional enemy radius, [0, this)
    pub const ENEMY_RADIUS_JITTER: f32 = 8.0;
    /// Damage dealt to the player per overlapping tick
    pub const ENEMY_CONTACT_DAMAGE: f32 = 0.15;

    /// Knockback velocity decay per tick
    pub const KNOCKBACK_FRICTION: f32 = 0.85;
    /// Base knockback impulse for a regular hit
    pub const KNOCKBACK_SLASH: f32 = 4.0;
    /// Base knockback impulse for a stab hit
    pub const KNOCKBACK_STAB: f32 = 12.0;
    /// Reference radius for the inverse-mass factor: impulse scales by 20/radius
    pub const KNOCKBACK_MASS_REF: f32 = 20.0;

    /// Particles emitted per blade hit
    pub const HIT_PARTICLES: u32 = 1;
    /// Particles emitted per enemy death
    pub const DEATH_PARTICLES: u32 = 15;
    /// Particle life decay per tick
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Particle velocity spread: each axis in [-spread/2, spread/2)
    pub const PARTICLE_SPREAD: f32 = 8.0;

    /// Enemy population above which distance culling kicks in
    pub const ENEMY_CAP: usize = 200;
    /// Cull enemies farther than this from the player once over the cap
    pub const CULL_DISTANCE: f32 = 2500.0;

    /// Experience awarded per kill
    pub const XP_PER_KILL: u32 = 10;
    /// Level threshold growth per level
    pub const XP_CURVE_MULT: f32 = 1.3;
}

/// Unit vector for an angle in radians
#[inline]
pub fn dir_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalize, falling back to +X for near-zero vectors
///
/// Division-by-zero guard required wherever a direction is derived from a
/// possibly-degenerate difference (knockback, chase movement).
#[inline]
pub fn normalize_or_x(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > f32::EPSILON { v / len } else { Vec2::X }
}
