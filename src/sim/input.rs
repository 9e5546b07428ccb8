//! Input normalization
//!
//! Event handlers (keyboard, pointer, touch) write into `InputState` between
//! ticks; the tick calls `sample()` exactly once to get a consistent
//! `TickInput` snapshot. Producer and consumer share a thread, so no locking
//! is involved - callbacks never interleave with a tick in progress.
//!
//! Touch input runs two virtual joysticks: the first touch on the left half
//! of the surface drives movement, the first touch on the right half drives
//! aim (and requests a lunge).

use glam::Vec2;

use crate::consts::JOYSTICK_THROW;

/// Discrete directional keys, additive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

/// Intent snapshot consumed by one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Combined movement intent; magnitude clamped to 1 only when it
    /// exceeds 1, so sub-unit analog input keeps its throw
    pub move_intent: Vec2,
    /// Aim intent; zero magnitude means "hold the previous blade angle"
    pub aim_intent: Vec2,
    /// Edge-triggered lunge request, cleared by sampling
    pub lunge: bool,
}

/// One virtual joystick
#[derive(Debug, Clone, Default)]
struct Joystick {
    active: bool,
    base: Vec2,
    knob: Vec2,
    /// Throw vector normalized to [0, 1] by the max-throw radius
    vector: Vec2,
    touch_id: Option<u64>,
}

impl Joystick {
    fn claim(&mut self, id: u64, pos: Vec2) {
        self.active = true;
        self.base = pos;
        self.knob = pos;
        self.vector = Vec2::ZERO;
        self.touch_id = Some(id);
    }

    fn drag(&mut self, id: u64, pos: Vec2) {
        if !self.active || self.touch_id != Some(id) {
            return;
        }
        let offset = pos - self.base;
        let dist = offset.length();
        if dist > f32::EPSILON {
            let clamped = offset * (dist.min(JOYSTICK_THROW) / dist);
            self.knob = self.base + clamped;
            self.vector = clamped / JOYSTICK_THROW;
        }
    }

    fn release(&mut self, id: u64) {
        if self.touch_id == Some(id) {
            self.active = false;
            self.vector = Vec2::ZERO;
            self.touch_id = None;
        }
    }

    fn view(&self) -> JoystickView {
        JoystickView {
            active: self.active,
            base: self.base,
            knob: self.knob,
        }
    }
}

/// Joystick visual state for the renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct JoystickView {
    pub active: bool,
    pub base: Vec2,
    pub knob: Vec2,
}

/// Accumulated raw input state
#[derive(Debug, Clone)]
pub struct InputState {
    // Up, Down, Left, Right
    keys: [bool; 4],
    move_stick: Joystick,
    aim_stick: Joystick,
    pointer: Vec2,
    last_pointer: Vec2,
    lunge_pending: bool,
    viewport: Vec2,
}

impl InputState {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            keys: [false; 4],
            move_stick: Joystick::default(),
            aim_stick: Joystick::default(),
            pointer: Vec2::ZERO,
            last_pointer: Vec2::ZERO,
            lunge_pending: false,
            viewport,
        }
    }

    /// Update the input surface size (on resize)
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn key(&mut self, key: MoveKey, pressed: bool) {
        self.keys[key as usize] = pressed;
    }

    /// Absolute pointer position in surface coordinates
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Primary pointer press requests a lunge
    pub fn pointer_pressed(&mut self) {
        self.lunge_pending = true;
    }

    /// First touch per surface half claims the matching joystick
    pub fn touch_start(&mut self, id: u64, pos: Vec2) {
        if pos.x < self.viewport.x / 2.0 {
            if !self.move_stick.active {
                self.move_stick.claim(id, pos);
            }
        } else if !self.aim_stick.active {
            self.aim_stick.claim(id, pos);
            // A tap on the aim half doubles as a lunge
            self.lunge_pending = true;
        }
    }

    pub fn touch_move(&mut self, id: u64, pos: Vec2) {
        self.move_stick.drag(id, pos);
        self.aim_stick.drag(id, pos);
    }

    pub fn touch_end(&mut self, id: u64) {
        self.move_stick.release(id);
        self.aim_stick.release(id);
    }

    /// Produce the intent snapshot for one tick
    ///
    /// Consumes the lunge edge and the pointer-moved condition, so call this
    /// exactly once per tick.
    pub fn sample(&mut self) -> TickInput {
        let mut mv = Vec2::ZERO;
        if self.keys[MoveKey::Up as usize] {
            mv.y -= 1.0;
        }
        if self.keys[MoveKey::Down as usize] {
            mv.y += 1.0;
        }
        if self.keys[MoveKey::Left as usize] {
            mv.x -= 1.0;
        }
        if self.keys[MoveKey::Right as usize] {
            mv.x += 1.0;
        }
        mv += self.move_stick.vector;

        // Clamp overshoot from combined sources; never renormalize sub-unit input
        let mag = mv.length();
        if mag > 1.0 {
            mv /= mag;
        }

        let aim = if self.aim_stick.active {
            self.aim_stick.vector
        } else {
            let delta = self.pointer - self.last_pointer;
            let pointer_moved = delta.x.abs() > 1.0 || delta.y.abs() > 1.0;
            if pointer_moved {
                self.last_pointer = self.pointer;
                (self.pointer - self.viewport / 2.0).normalize_or_zero()
            } else {
                Vec2::ZERO
            }
        };

        let lunge = self.lunge_pending;
        self.lunge_pending = false;

        TickInput {
            move_intent: mv,
            aim_intent: aim,
            lunge,
        }
    }

    /// Joystick visual states, movement first
    pub fn joystick_views(&self) -> [JoystickView; 2] {
        [self.move_stick.view(), self.aim_stick.view()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::new(Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_diagonal_keys_clamped_to_unit() {
        let mut input = input();
        input.key(MoveKey::Right, true);
        input.key(MoveKey::Down, true);

        let tick = input.sample();
        assert!((tick.move_intent.length() - 1.0).abs() < 1e-5);
        assert!(tick.move_intent.x > 0.0 && tick.move_intent.y > 0.0);
    }

    #[test]
    fn test_sub_unit_joystick_not_renormalized() {
        let mut input = input();
        // Left-half touch, dragged half throw to the right
        input.touch_start(1, Vec2::new(100.0, 300.0));
        input.touch_move(1, Vec2::new(100.0 + JOYSTICK_THROW / 2.0, 300.0));

        let tick = input.sample();
        assert!((tick.move_intent.x - 0.5).abs() < 1e-5);
        assert!(tick.move_intent.y.abs() < 1e-5);
    }

    #[test]
    fn test_joystick_throw_clamped() {
        let mut input = input();
        input.touch_start(1, Vec2::new(100.0, 300.0));
        input.touch_move(1, Vec2::new(100.0 + JOYSTICK_THROW * 4.0, 300.0));

        let tick = input.sample();
        assert!((tick.move_intent.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_aim_pointer_fallback_requires_movement() {
        let mut input = input();

        // Pointer has never moved: aim holds
        let tick = input.sample();
        assert_eq!(tick.aim_intent, Vec2::ZERO);

        // Pointer right of center: aim points +X
        input.pointer_moved(Vec2::new(700.0, 300.0));
        let tick = input.sample();
        assert!((tick.aim_intent.x - 1.0).abs() < 1e-5);

        // No further movement: aim goes idle again (angle held downstream)
        let tick = input.sample();
        assert_eq!(tick.aim_intent, Vec2::ZERO);
    }

    #[test]
    fn test_aim_joystick_overrides_pointer() {
        let mut input = input();
        input.pointer_moved(Vec2::new(700.0, 300.0));

        // Right-half touch claims the aim stick and requests a lunge
        input.touch_start(2, Vec2::new(600.0, 300.0));
        input.touch_move(2, Vec2::new(600.0, 300.0 + JOYSTICK_THROW));

        let tick = input.sample();
        assert!(tick.lunge);
        assert!((tick.aim_intent.y - 1.0).abs() < 1e-5);
        assert!(tick.aim_intent.y.abs() > crate::consts::AIM_DEADZONE);
    }

    #[test]
    fn test_lunge_is_edge_triggered() {
        let mut input = input();
        input.pointer_pressed();

        assert!(input.sample().lunge);
        assert!(!input.sample().lunge);
    }

    #[test]
    fn test_touch_release_zeroes_vector() {
        let mut input = input();
        input.touch_start(1, Vec2::new(100.0, 300.0));
        input.touch_move(1, Vec2::new(150.0, 300.0));
        input.touch_end(1);

        let tick = input.sample();
        assert_eq!(tick.move_intent, Vec2::ZERO);
        assert!(!input.joystick_views()[0].active);
    }
}
