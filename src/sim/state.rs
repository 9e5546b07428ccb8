//! Game state and core simulation types
//!
//! `GameState` owns everything the tick mutates except `PlayerStats`, which
//! belongs to the progression controller and is passed into `step` each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::JoystickView;
use crate::consts::*;

/// Current phase of a session
///
/// Transitions are total: the phase helpers below accept any current phase
/// and `step` discards ticks arriving outside `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no run in progress
    Start,
    /// Active gameplay
    Playing,
    /// Upgrade choice pending; simulation is held
    Upgrade,
    /// Run ended on hp depletion
    GameOver,
}

/// Player stat block, owned by the progression controller
///
/// The tick reads it every frame and writes hp/xp/kill_count; upgrades and
/// level-ups rewrite the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: f32,
    pub max_hp: f32,
    pub attack_power: f32,
    pub blade_length: f32,
    pub blade_width: f32,
    /// Player displacement per tick at full intent
    pub move_speed: f32,
    pub xp: u32,
    pub level: u32,
    pub next_level_xp: u32,
    pub kill_count: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            hp: 100.0,
            max_hp: 100.0,
            attack_power: 10.0,
            blade_length: 60.0,
            blade_width: 4.0,
            move_speed: 3.0,
            xp: 0,
            level: 1,
            next_level_xp: 50,
            kill_count: 0,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Knockback velocity only; chase movement is computed fresh each tick
    pub vel: Vec2,
    pub radius: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Chase speed per tick
    pub speed: f32,
    /// Damage dealt per overlapping tick
    pub damage: f32,
    /// HSL hue, cosmetic; inherited by particles this enemy emits
    pub hue: f32,
}

/// A cosmetic particle emitted on blade hits and deaths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in (0, 1], decays linearly each tick
    pub life: f32,
    pub hue: f32,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Survival time in seconds
    pub elapsed: f32,
    /// Milliseconds accumulated since the last spawn
    pub spawn_timer_ms: f32,
    /// Player world position
    pub player_pos: Vec2,
    /// Smoothed camera position (render-space translation only)
    pub camera: Vec2,
    /// Blade orientation in radians, held when aim intent is idle
    pub blade_angle: f32,
    /// Current lunge extension added to blade length
    pub stab_offset: f32,
    /// Whether the lunge is in its extending phase
    pub stabbing: bool,
    /// Input surface size; drives spawn distance and the aim center
    pub viewport: Vec2,
    /// Live enemies, store order
    pub enemies: Vec<Enemy>,
    /// Live particles
    pub particles: Vec<Particle>,
    /// Run RNG (spawner variety, upgrade rolls)
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create state for a new session on the title screen
    pub fn new(viewport: Vec2, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Start,
            elapsed: 0.0,
            spawn_timer_ms: 0.0,
            player_pos: Vec2::ZERO,
            camera: Vec2::ZERO,
            blade_angle: 0.0,
            stab_offset: 0.0,
            stabbing: false,
            viewport,
            enemies: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start (or restart) a run: clear entities and timers, enter Playing
    ///
    /// The caller resets the progression controller alongside this.
    pub fn begin_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.elapsed = 0.0;
        self.spawn_timer_ms = 0.0;
        self.player_pos = Vec2::ZERO;
        self.camera = Vec2::ZERO;
        self.blade_angle = 0.0;
        self.stab_offset = 0.0;
        self.stabbing = false;
        self.enemies.clear();
        self.particles.clear();
        log::info!("run started (seed {})", self.seed);
    }

    /// Hold the simulation while an upgrade choice is pending
    pub fn request_upgrade(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Upgrade;
        }
    }

    /// Resume after an upgrade has been committed
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Upgrade {
            self.phase = GamePhase::Playing;
        }
    }

    /// Terminal transition on hp depletion
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
    }

    /// Effective blade reach this tick (base length plus lunge extension)
    pub fn blade_reach(&self, stats: &PlayerStats) -> f32 {
        stats.blade_length + self.stab_offset
    }

    /// World position of the blade tip
    pub fn blade_tip(&self, stats: &PlayerStats) -> Vec2 {
        self.player_pos + crate::dir_from_angle(self.blade_angle) * self.blade_reach(stats)
    }

    /// Read-only view for the renderer
    pub fn snapshot<'a>(
        &'a self,
        stats: &PlayerStats,
        joysticks: [JoystickView; 2],
    ) -> RenderSnapshot<'a> {
        RenderSnapshot {
            player_pos: self.player_pos,
            player_radius: PLAYER_RADIUS,
            camera: self.camera,
            blade_angle: self.blade_angle,
            blade_reach: self.blade_reach(stats),
            blade_width: stats.blade_width,
            stabbing: self.stabbing,
            enemies: &self.enemies,
            particles: &self.particles,
            joysticks,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderSnapshot<'a> {
    pub player_pos: Vec2,
    pub player_radius: f32,
    pub camera: Vec2,
    pub blade_angle: f32,
    pub blade_reach: f32,
    pub blade_width: f32,
    pub stabbing: bool,
    pub enemies: &'a [Enemy],
    pub particles: &'a [Particle],
    /// Movement joystick first, aim joystick second
    pub joysticks: [JoystickView; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions_are_total() {
        let mut state = GameState::new(Vec2::new(800.0, 600.0), 7);
        assert_eq!(state.phase, GamePhase::Start);

        // request_upgrade outside Playing is discarded
        state.request_upgrade();
        assert_eq!(state.phase, GamePhase::Start);

        state.begin_run();
        assert_eq!(state.phase, GamePhase::Playing);

        state.request_upgrade();
        assert_eq!(state.phase, GamePhase::Upgrade);

        // resume only applies from Upgrade
        state.resume();
        assert_eq!(state.phase, GamePhase::Playing);
        state.resume();
        assert_eq!(state.phase, GamePhase::Playing);

        state.end_run();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_begin_run_resets_state() {
        let mut state = GameState::new(Vec2::new(800.0, 600.0), 7);
        state.begin_run();
        state.elapsed = 99.0;
        state.player_pos = Vec2::new(50.0, 50.0);
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 12.0,
            hp: 15.0,
            max_hp: 15.0,
            speed: 1.2,
            damage: 0.15,
            hue: 350.0,
        });

        state.begin_run();
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.player_pos, Vec2::ZERO);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_blade_tip_uses_stab_offset() {
        let mut state = GameState::new(Vec2::new(800.0, 600.0), 7);
        let stats = PlayerStats::default();

        state.blade_angle = 0.0;
        state.stab_offset = 40.0;
        let tip = state.blade_tip(&stats);
        assert!((tip.x - 100.0).abs() < 1e-4); // 60 base + 40 stab
        assert!(tip.y.abs() < 1e-4);
    }
}
