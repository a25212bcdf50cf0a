//! Platform-agnostic keyboard vocabulary
//!
//! Defines the key types consumed by the controllers without depending on any
//! windowing library. Platform adapters (see [`winit_adapter`], behind the `winit`
//! feature) translate native events into these types.
//!
//! Two layers exist:
//! - [`Key`] / [`ButtonState`] / [`KeyEvent`]: physical keys as delivered by the host.
//! - [`LogicalKey`]: the fixed set of gameplay keys the motion controller reacts to.

#[cfg(feature = "winit")]
pub mod winit_adapter;

/// Keyboard key enumeration (platform-agnostic)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Control keys
    Space,
    Enter,
    Escape,
    Tab,

    // Modifier keys
    ShiftLeft,
    ShiftRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A single key transition delivered by the host input layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: ButtonState,
}

impl KeyEvent {
    #[must_use]
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: ButtonState::Pressed,
        }
    }

    #[must_use]
    pub fn released(key: Key) -> Self {
        Self {
            key,
            state: ButtonState::Released,
        }
    }
}

/// Gameplay keys tracked by [`KeyboardControls`](crate::controls::KeyboardControls).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Forward,
    Backward,
    Left,
    Right,
    Secondary,
    ToggleView,
    Confirm,
    Action,
}

impl LogicalKey {
    /// Every logical key, in key-state table order.
    pub const ALL: [LogicalKey; 8] = [
        LogicalKey::Forward,
        LogicalKey::Backward,
        LogicalKey::Left,
        LogicalKey::Right,
        LogicalKey::Secondary,
        LogicalKey::ToggleView,
        LogicalKey::Confirm,
        LogicalKey::Action,
    ];

    /// Maps a raw key identifier (`"w"`, `"enter"`, `"space"`, ...) to its logical key.
    ///
    /// Identifiers are matched exactly; anything else yields `None`.
    #[must_use]
    pub fn from_identifier(id: &str) -> Option<Self> {
        let key = match id {
            "w" => LogicalKey::Forward,
            "s" => LogicalKey::Backward,
            "a" => LogicalKey::Left,
            "d" => LogicalKey::Right,
            "e" => LogicalKey::Secondary,
            "c" => LogicalKey::ToggleView,
            "enter" => LogicalKey::Confirm,
            "space" => LogicalKey::Action,
            _ => return None,
        };
        Some(key)
    }

    /// Maps a platform-agnostic key to its logical key.
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        let key = match key {
            Key::W => LogicalKey::Forward,
            Key::S => LogicalKey::Backward,
            Key::A => LogicalKey::Left,
            Key::D => LogicalKey::Right,
            Key::E => LogicalKey::Secondary,
            Key::C => LogicalKey::ToggleView,
            Key::Enter => LogicalKey::Confirm,
            Key::Space => LogicalKey::Action,
            _ => return None,
        };
        Some(key)
    }

    /// Raw identifier this key is bound to.
    #[must_use]
    pub fn identifier(self) -> &'static str {
        match self {
            LogicalKey::Forward => "w",
            LogicalKey::Backward => "s",
            LogicalKey::Left => "a",
            LogicalKey::Right => "d",
            LogicalKey::Secondary => "e",
            LogicalKey::ToggleView => "c",
            LogicalKey::Confirm => "enter",
            LogicalKey::Action => "space",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Held/released flag per [`LogicalKey`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    held: [bool; LogicalKey::ALL.len()],
}

impl KeyState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_held(&self, key: LogicalKey) -> bool {
        self.held[key.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, key: LogicalKey, held: bool) {
        self.held[key.index()] = held;
    }

    /// Iterates over the keys currently held.
    pub fn held_keys(&self) -> impl Iterator<Item = LogicalKey> + '_ {
        LogicalKey::ALL
            .into_iter()
            .filter(move |key| self.is_held(*key))
    }
}
