//! Gameplay Controls
//!
//! - [`KeyboardControls`]: keyboard-driven motion controller with damped, clamped axes

pub mod keyboard_control;

pub use keyboard_control::{KeyboardControlOptions, KeyboardControls, MotionVector};
