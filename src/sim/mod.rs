//! Per-tick simulation
//!
//! All gameplay logic lives here. The tick is pure over its inputs:
//! - Single-threaded, one pass per display refresh
//! - Seeded RNG only, owned by the state
//! - Event handlers write `InputState` between ticks; `step` reads a snapshot
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{SegmentHit, closest_point_on_segment, knockback_impulse, segment_circle_hit};
pub use input::{InputState, JoystickView, MoveKey, TickInput};
pub use spawn::{maybe_spawn, spawn_interval_ms};
pub use state::{Enemy, GamePhase, GameState, Particle, PlayerStats, RenderSnapshot};
pub use tick::{EnemyKilled, TickEvents, step};
