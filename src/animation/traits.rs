//! Capabilities the action manager needs from an animation backend.
//!
//! The crate's own [`AnimationMixer`](crate::animation::AnimationMixer) implements
//! these, but any host animation system can plug in instead.

/// A handle bound to one clip, supporting play/fade/reset controls.
///
/// Fades are non-blocking: they are progressed by the owning mixer's per-tick update.
pub trait PlayableAction {
    /// Rewinds playback to the start and clears any pending fade.
    fn reset(&mut self);
    fn set_effective_weight(&mut self, weight: f32);
    fn play(&mut self);
    /// Ramps the blend weight from 0 to 1 over `duration` seconds.
    fn fade_in(&mut self, duration: f32);
    /// Ramps the blend weight from 1 to 0 over `duration` seconds.
    fn fade_out(&mut self, duration: f32);
}

/// Runtime that creates actions for clips and blends them over time.
pub trait ActionMixer {
    type Clip;
    type Action: PlayableAction;

    fn clip_action(&mut self, clip: &Self::Clip) -> Self::Action;
}

/// A clip that may carry a name.
pub trait NamedClip {
    /// The clip's name; `None` or an empty string means unnamed.
    fn name(&self) -> Option<&str>;
}

/// A loaded model asset: a scene root plus its animation clips.
pub trait ClipSource {
    type Clip: NamedClip;
    type Mixer: ActionMixer<Clip = Self::Clip>;

    /// Creates a mixer bound to this asset's scene root.
    fn create_mixer(&self) -> Self::Mixer;

    /// Animation clips in asset order.
    fn clips(&self) -> &[Self::Clip];
}

impl<T: NamedClip + ?Sized> NamedClip for std::sync::Arc<T> {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}
