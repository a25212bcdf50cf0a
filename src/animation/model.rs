use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::animation::mixer::AnimationMixer;
use crate::animation::traits::ClipSource;

/// A loaded model as handed over by the asset loader: scene root plus clips.
#[derive(Debug, Clone, Default)]
pub struct ModelAsset {
    pub root: String,
    pub animations: Vec<Arc<AnimationClip>>,
}

impl ModelAsset {
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            animations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clip(mut self, clip: AnimationClip) -> Self {
        self.animations.push(Arc::new(clip));
        self
    }
}

impl ClipSource for ModelAsset {
    type Clip = Arc<AnimationClip>;
    type Mixer = AnimationMixer;

    fn create_mixer(&self) -> AnimationMixer {
        AnimationMixer::new(self.root.clone())
    }

    fn clips(&self) -> &[Arc<AnimationClip>] {
        &self.animations
    }
}
