use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::animation::traits::PlayableAction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// Linear weight ramp scheduled by `fade_in` / `fade_out`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl Fade {
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Playback state of one clip inside a mixer.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    running: bool,
    fade: Option<Fade>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
            running: false,
            fade: None,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn fade(&self) -> Option<&Fade> {
        self.fade.as_ref()
    }

    /// Blend weight after the enabled flag and any active fade are applied.
    #[must_use]
    pub fn effective_weight(&self) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        let fade = self.fade.as_ref().map_or(1.0, Fade::value);
        self.weight * fade
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.paused = false;
        self.enabled = true;
        self.fade = None;
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.fade = None;
    }

    pub fn set_effective_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    pub fn fade_in(&mut self, duration: f32) {
        self.schedule_fade(duration, 0.0, 1.0);
    }

    pub fn fade_out(&mut self, duration: f32) {
        self.schedule_fade(duration, 1.0, 0.0);
    }

    fn schedule_fade(&mut self, duration: f32, from: f32, to: f32) {
        self.fade = Some(Fade {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        });
    }

    /// Advances the fade, then playback time.
    pub fn update(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }

        // A fade that lands on zero disables the action
        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            if fade.is_finished() {
                let end = fade.to;
                self.fade = None;
                if end <= 0.0 {
                    self.enabled = false;
                    return;
                }
            }
        }

        if self.paused {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;
        self.wrap_time(duration);
    }

    /// Folds `time` back into `[0, duration]` according to the loop mode.
    fn wrap_time(&mut self, duration: f32) {
        let time = self.time;
        self.time = match self.loop_mode {
            LoopMode::Once => {
                if !(0.0..duration).contains(&time) {
                    self.paused = true;
                }
                time.clamp(0.0, duration)
            }
            LoopMode::Loop => time.rem_euclid(duration),
            LoopMode::PingPong => {
                let cycle = duration * 2.0;
                let phase = time.rem_euclid(cycle);
                if phase > duration { cycle - phase } else { phase }
            }
        };
    }
}

/// Shared handle to an [`AnimationAction`] owned by an [`AnimationMixer`](crate::animation::AnimationMixer).
///
/// Cloning the handle does not clone the action; all clones drive the same playback.
#[derive(Debug, Clone)]
pub struct MixerAction(Rc<RefCell<AnimationAction>>);

impl MixerAction {
    pub(crate) fn new(action: AnimationAction) -> Self {
        Self(Rc::new(RefCell::new(action)))
    }

    /// Read access to the action.
    ///
    /// While a guard is alive, [`AnimationMixer::update`](crate::animation::AnimationMixer::update)
    /// skips this action for that tick.
    #[must_use]
    pub fn state(&self) -> Ref<'_, AnimationAction> {
        self.0.borrow()
    }

    /// Write access to the action. Panics if another guard for it is alive.
    #[must_use]
    pub fn state_mut(&self) -> RefMut<'_, AnimationAction> {
        self.0.borrow_mut()
    }

    /// Write access, or `None` while another guard for this action is alive.
    #[must_use]
    pub fn try_state_mut(&self) -> Option<RefMut<'_, AnimationAction>> {
        self.0.try_borrow_mut().ok()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PlayableAction for MixerAction {
    fn reset(&mut self) {
        self.0.borrow_mut().reset();
    }

    fn set_effective_weight(&mut self, weight: f32) {
        self.0.borrow_mut().set_effective_weight(weight);
    }

    fn play(&mut self) {
        self.0.borrow_mut().play();
    }

    fn fade_in(&mut self, duration: f32) {
        self.0.borrow_mut().fade_in(duration);
    }

    fn fade_out(&mut self, duration: f32) {
        self.0.borrow_mut().fade_out(duration);
    }
}
