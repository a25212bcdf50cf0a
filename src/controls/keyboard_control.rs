use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::input::{ButtonState, Key, KeyEvent, KeyState, LogicalKey};

/// Forward speed above which a full-lock turn starts bleeding speed.
pub const CORNER_SPEED_THRESHOLD: f32 = 0.3;
/// Per-tick forward multiplier applied while cornering.
pub const CORNER_SPEED_FACTOR: f32 = 0.8;

pub type MoveCallback<O> = Box<dyn FnMut(&mut O, f32, f32)>;
pub type ViewToggleCallback<O> = Box<dyn FnMut(&mut O, bool)>;

/// Tuning for [`KeyboardControls`].
///
/// Any non-finite or non-positive value falls back to its default when the
/// controller is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardControlOptions {
    /// Lateral increment per tick while left/right is held.
    pub rotation_damping: f32,
    /// Forward increment per tick while forward/backward is held.
    pub move_damping: f32,
    pub max_forward: f32,
    pub max_lateral: f32,
}

impl Default for KeyboardControlOptions {
    fn default() -> Self {
        Self {
            rotation_damping: 0.06,
            move_damping: 0.01,
            max_forward: 0.6,
            max_lateral: 1.0,
        }
    }
}

impl KeyboardControlOptions {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn sanitized(self) -> Self {
        fn or_default(value: f32, default: f32) -> f32 {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                default
            }
        }

        let defaults = Self::default();
        Self {
            rotation_damping: or_default(self.rotation_damping, defaults.rotation_damping),
            move_damping: or_default(self.move_damping, defaults.move_damping),
            max_forward: or_default(self.max_forward, defaults.max_forward),
            max_lateral: or_default(self.max_lateral, defaults.max_lateral),
        }
    }
}

/// Smoothed 2-axis motion derived from held keys.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MotionVector {
    pub forward: f32,
    pub lateral: f32,
}

impl MotionVector {
    pub const ZERO: Self = Self {
        forward: 0.0,
        lateral: 0.0,
    };

    /// `(lateral, forward)` as a vector.
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.lateral, self.forward)
    }
}

/// Keyboard-driven motion controller.
///
/// Translates held `w/s/a/d` keys into a damped, clamped [`MotionVector`] and reports
/// it every tick through the move callback. Releasing `c` fires the view-toggle
/// callback. The `owner` is handed to both callbacks.
///
/// ```rust,ignore
/// let mut controls = KeyboardControls::new(player, KeyboardControlOptions::default())
///     .with_on_move(|player, forward, lateral| player.drive(forward, lateral))
///     .with_on_view_toggle(|player, _| player.cycle_camera());
///
/// // event loop
/// controls.handle_event(&event);
/// // each frame
/// controls.update();
/// ```
pub struct KeyboardControls<O> {
    owner: O,
    options: KeyboardControlOptions,
    keys: KeyState,
    motion: MotionVector,
    attached: bool,

    on_move: Option<MoveCallback<O>>,
    on_view_toggle: Option<ViewToggleCallback<O>>,
}

impl<O> KeyboardControls<O> {
    #[must_use]
    pub fn new(owner: O, options: KeyboardControlOptions) -> Self {
        Self {
            owner,
            options: options.sanitized(),
            keys: KeyState::new(),
            motion: MotionVector::ZERO,
            attached: true,
            on_move: None,
            on_view_toggle: None,
        }
    }

    #[must_use]
    pub fn with_on_move(mut self, callback: impl FnMut(&mut O, f32, f32) + 'static) -> Self {
        self.set_on_move(callback);
        self
    }

    #[must_use]
    pub fn with_on_view_toggle(mut self, callback: impl FnMut(&mut O, bool) + 'static) -> Self {
        self.set_on_view_toggle(callback);
        self
    }

    /// Like [`with_on_move`](Self::with_on_move), with the reported motion packed as
    /// `Vec2(lateral, forward)`. The lateral axis is negated as in the scalar callback.
    #[must_use]
    pub fn with_on_move_vec(mut self, callback: impl FnMut(&mut O, Vec2) + 'static) -> Self {
        self.set_on_move_vec(callback);
        self
    }

    pub fn set_on_move(&mut self, callback: impl FnMut(&mut O, f32, f32) + 'static) {
        self.on_move = Some(Box::new(callback));
    }

    /// Replaces the move callback with one taking a `Vec2`.
    pub fn set_on_move_vec(&mut self, mut callback: impl FnMut(&mut O, Vec2) + 'static) {
        self.set_on_move(move |owner: &mut O, forward, lateral| {
            callback(owner, MotionVector { forward, lateral }.as_vec2());
        });
    }

    pub fn set_on_view_toggle(&mut self, callback: impl FnMut(&mut O, bool) + 'static) {
        self.on_view_toggle = Some(Box::new(callback));
    }

    // ========== Event ingestion ==========

    /// Key-down by raw identifier (`"w"`, `"enter"`, ...). Unknown identifiers are ignored.
    pub fn handle_key_down(&mut self, id: &str) {
        match LogicalKey::from_identifier(id) {
            Some(key) => self.press(key),
            None => log::trace!("Ignoring key down for unmapped key {id:?}"),
        }
    }

    /// Key-up by raw identifier. Unknown identifiers are ignored.
    pub fn handle_key_up(&mut self, id: &str) {
        match LogicalKey::from_identifier(id) {
            Some(key) => self.release(key),
            None => log::trace!("Ignoring key up for unmapped key {id:?}"),
        }
    }

    pub fn handle_key(&mut self, key: Key, state: ButtonState) {
        let Some(logical) = LogicalKey::from_key(key) else {
            log::trace!("Ignoring unmapped key {key:?}");
            return;
        };

        match state {
            ButtonState::Pressed => self.press(logical),
            ButtonState::Released => self.release(logical),
        }
    }

    pub fn handle_event(&mut self, event: &KeyEvent) {
        self.handle_key(event.key, event.state);
    }

    pub fn press(&mut self, key: LogicalKey) {
        if !self.attached {
            return;
        }
        self.keys.set(key, true);
    }

    pub fn release(&mut self, key: LogicalKey) {
        if !self.attached {
            return;
        }
        self.keys.set(key, false);

        match key {
            LogicalKey::Forward | LogicalKey::Backward => self.motion.forward = 0.0,
            LogicalKey::Left | LogicalKey::Right => self.motion.lateral = 0.0,
            LogicalKey::ToggleView => {
                if let Some(callback) = self.on_view_toggle.as_mut() {
                    callback(&mut self.owner, true);
                }
            }
            LogicalKey::Secondary | LogicalKey::Confirm | LogicalKey::Action => {}
        }
    }

    // ========== Per-tick update ==========

    /// Advances the motion vector by one tick and reports it to the move callback.
    ///
    /// Call once per simulation frame. The callback receives the lateral axis negated.
    #[allow(clippy::float_cmp)]
    pub fn update(&mut self) {
        let KeyboardControlOptions {
            rotation_damping,
            move_damping,
            max_forward,
            max_lateral,
        } = self.options;
        let motion = &mut self.motion;

        // Opposing keys both apply; they are not resolved against each other.
        if self.keys.is_held(LogicalKey::Forward) {
            motion.forward += move_damping;
        }
        if self.keys.is_held(LogicalKey::Backward) {
            motion.forward -= move_damping;
        }
        if self.keys.is_held(LogicalKey::Left) {
            motion.lateral += rotation_damping;
        }
        if self.keys.is_held(LogicalKey::Right) {
            motion.lateral -= rotation_damping;
        }

        motion.forward = motion.forward.clamp(-max_forward, max_forward);
        motion.lateral = motion.lateral.clamp(-max_lateral, max_lateral);

        // Exact compare: the clamp above pins the value to the bound.
        if motion.lateral.abs() == max_lateral && motion.forward.abs() > CORNER_SPEED_THRESHOLD {
            motion.forward *= CORNER_SPEED_FACTOR;
        }

        let MotionVector { forward, lateral } = *motion;
        if let Some(callback) = self.on_move.as_mut() {
            callback(&mut self.owner, forward, -lateral);
        }
    }

    // ========== Teardown ==========

    /// Stops reacting to key events. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.attached {
            log::debug!("Keyboard controls detached");
        }
        self.attached = false;
    }

    // ========== Queries ==========

    #[must_use]
    pub fn motion(&self) -> MotionVector {
        self.motion
    }

    #[must_use]
    pub fn is_held(&self, key: LogicalKey) -> bool {
        self.keys.is_held(key)
    }

    #[must_use]
    pub fn key_state(&self) -> &KeyState {
        &self.keys
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn options(&self) -> &KeyboardControlOptions {
        &self.options
    }

    #[must_use]
    pub fn owner(&self) -> &O {
        &self.owner
    }

    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    #[must_use]
    pub fn into_owner(self) -> O {
        self.owner
    }
}
