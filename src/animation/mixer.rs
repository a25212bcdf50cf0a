use std::sync::Arc;

use crate::animation::action::{AnimationAction, MixerAction};
use crate::animation::clip::AnimationClip;
use crate::animation::traits::ActionMixer;

/// Advances and blends the actions bound to one model's scene root.
pub struct AnimationMixer {
    root: String,
    actions: Vec<MixerAction>,

    pub time: f32,
    pub time_scale: f32,
}

impl AnimationMixer {
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            actions: Vec::new(),
            time: 0.0,
            time_scale: 1.0,
        }
    }

    /// Name of the scene root this mixer animates.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the action bound to `clip`, creating it on first request.
    ///
    /// Actions are keyed by clip identity, so two distinct clips sharing a name get
    /// separate actions.
    pub fn clip_action(&mut self, clip: &Arc<AnimationClip>) -> MixerAction {
        if let Some(existing) = self
            .actions
            .iter()
            .find(|action| Arc::ptr_eq(action.state().clip(), clip))
        {
            return existing.clone();
        }

        let action = MixerAction::new(AnimationAction::new(Arc::clone(clip)));
        self.actions.push(action.clone());
        action
    }

    /// First action whose clip is named `clip_name`.
    #[must_use]
    pub fn existing_action(&self, clip_name: &str) -> Option<MixerAction> {
        self.actions
            .iter()
            .find(|action| action.state().clip().name == clip_name)
            .cloned()
    }

    pub fn actions(&self) -> impl Iterator<Item = &MixerAction> {
        self.actions.iter()
    }

    /// Actions that have been started and not stopped.
    pub fn running_actions(&self) -> impl Iterator<Item = &MixerAction> {
        self.actions.iter().filter(|action| action.state().is_running())
    }

    /// Advances all running actions by `dt * time_scale`.
    ///
    /// An action whose state is borrowed elsewhere is left untouched for this tick.
    pub fn update(&mut self, dt: f32) {
        let dt = dt * self.time_scale;
        self.time += dt;

        for action in &self.actions {
            let Some(mut state) = action.try_state_mut() else {
                log::trace!("Skipping borrowed action in mixer '{}'", self.root);
                continue;
            };
            if state.is_running() {
                state.update(dt);
            }
        }
    }

    pub fn stop_all_action(&mut self) {
        for action in &self.actions {
            action.state_mut().stop();
        }
    }
}

impl ActionMixer for AnimationMixer {
    type Clip = Arc<AnimationClip>;
    type Action = MixerAction;

    fn clip_action(&mut self, clip: &Self::Clip) -> Self::Action {
        AnimationMixer::clip_action(self, clip)
    }
}
