#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod controls;
pub mod errors;
pub mod input;

pub use animation::{
    ActionTable, AnimationAction, AnimationActionManager, AnimationClip, AnimationMixer,
    LoopMode, MixerAction, ModelAsset, PlayableAction,
};
pub use controls::{KeyboardControlOptions, KeyboardControls, MotionVector};
pub use errors::{Error, Result};
pub use input::{ButtonState, Key, KeyEvent, LogicalKey};
