//! Animation Actions
//!
//! - [`AnimationActionManager`] / [`ActionTable`]: per-model action tables with crossfaded switching
//! - [`traits`]: the capabilities the manager needs from an animation backend
//! - [`AnimationMixer`] / [`AnimationAction`] / [`AnimationClip`] / [`ModelAsset`]: a
//!   single-threaded backend implementing those capabilities

pub mod action;
pub mod clip;
pub mod manager;
pub mod mixer;
pub mod model;
pub mod traits;

pub use action::{AnimationAction, Fade, LoopMode, MixerAction};
pub use clip::AnimationClip;
pub use manager::{ActionTable, AnimationActionManager, CROSSFADE_DURATION};
pub use mixer::AnimationMixer;
pub use model::ModelAsset;
pub use traits::{ActionMixer, ClipSource, NamedClip, PlayableAction};
