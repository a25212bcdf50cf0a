use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::animation::traits::{ActionMixer, ClipSource, NamedClip, PlayableAction};
use crate::errors::{Error, Result};

/// Default crossfade duration, in seconds of mixer time.
pub const CROSSFADE_DURATION: f32 = 0.3;

/// Playable actions of one model instance, keyed by lowercased clip name.
#[derive(Debug, Clone)]
pub struct ActionTable<A> {
    actions: FxHashMap<String, A>,
    last_action: String,
    fade_duration: f32,
}

impl<A> ActionTable<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_fade_duration(CROSSFADE_DURATION)
    }

    #[must_use]
    pub fn with_fade_duration(fade_duration: f32) -> Self {
        Self {
            actions: FxHashMap::default(),
            last_action: String::new(),
            fade_duration,
        }
    }

    /// Registers `action` under the lowercased `name`, replacing any previous entry.
    pub fn insert(&mut self, name: &str, action: A) {
        self.actions.insert(name.to_lowercase(), action);
    }

    /// Name of the currently active action, or `""` if none has been played.
    #[must_use]
    pub fn last_action(&self) -> &str {
        &self.last_action
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&A> {
        self.actions.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut A> {
        self.actions.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }
}

impl<A> Default for ActionTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PlayableAction> ActionTable<A> {
    /// Crossfades from the current action to `target`.
    ///
    /// Does nothing if `target` is already the active action. The fades themselves are
    /// driven by the mixer's per-tick update. A missing `target` leaves the table untouched.
    pub fn toggle(&mut self, target: &str) -> Result<()> {
        if target == self.last_action {
            return Ok(());
        }

        if !self.actions.contains_key(target) {
            log::warn!("Cannot switch to action '{target}': no such action");
            return Err(Error::ActionNotFound {
                name: target.to_string(),
            });
        }

        let duration = self.fade_duration;
        if !self.last_action.is_empty()
            && let Some(current) = self.actions.get_mut(&self.last_action)
        {
            current.fade_out(duration);
        }

        if let Some(next) = self.actions.get_mut(target) {
            next.reset();
            next.set_effective_weight(1.0);
            next.play();
            next.fade_in(duration);
        }

        self.last_action = target.to_string();
        Ok(())
    }
}

/// Builds and tracks per-model action tables.
///
/// ```rust,ignore
/// let mut manager = AnimationActionManager::new();
/// let (mut mixer, actions) = manager.create_actions("robot", &asset);
/// actions.toggle("wave")?;
///
/// // each frame
/// mixer.update(dt * 1.5);
/// ```
pub struct AnimationActionManager<A> {
    registry: FxHashMap<String, ActionTable<A>>,
    fade_duration: f32,
}

impl<A> AnimationActionManager<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_fade_duration(CROSSFADE_DURATION)
    }

    #[must_use]
    pub fn with_fade_duration(fade_duration: f32) -> Self {
        Self {
            registry: FxHashMap::default(),
            fade_duration: fade_duration.max(0.0),
        }
    }

    /// Extracts the named clips of `source` into a fresh action table stored under
    /// `instance_name`, replacing any table previously stored there.
    ///
    /// Returns the mixer bound to the source's scene root together with the table.
    /// Clips without a name are skipped.
    pub fn create_actions<S>(
        &mut self,
        instance_name: &str,
        source: &S,
    ) -> (S::Mixer, &mut ActionTable<A>)
    where
        S: ClipSource,
        S::Mixer: ActionMixer<Action = A>,
    {
        let mut mixer = source.create_mixer();
        let mut table = ActionTable::with_fade_duration(self.fade_duration);

        for clip in source.clips() {
            match clip.name() {
                Some(name) if !name.is_empty() => table.insert(name, mixer.clip_action(clip)),
                _ => log::trace!("Skipping unnamed clip on '{instance_name}'"),
            }
        }

        log::debug!(
            "Created {} actions for model instance '{instance_name}'",
            table.len()
        );

        let slot = match self.registry.entry(instance_name.to_string()) {
            Entry::Occupied(mut entry) => {
                log::debug!("Replacing action table for model instance '{instance_name}'");
                entry.insert(table);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(table),
        };

        (mixer, slot)
    }

    /// Returns the action table stored under `instance_name`, if any.
    #[must_use]
    pub fn get_actions(&self, instance_name: &str) -> Option<&ActionTable<A>> {
        self.registry.get(instance_name)
    }

    pub fn get_actions_mut(&mut self, instance_name: &str) -> Option<&mut ActionTable<A>> {
        self.registry.get_mut(instance_name)
    }

    pub fn remove_actions(&mut self, instance_name: &str) -> Option<ActionTable<A>> {
        self.registry.remove(instance_name)
    }

    pub fn instance_names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Drops every registered table. Mixer playback is left to the host.
    pub fn destroy(&mut self) {
        log::debug!("Clearing {} action tables", self.registry.len());
        self.registry.clear();
    }
}

impl<A: PlayableAction> AnimationActionManager<A> {
    /// Crossfades the model instance `instance_name` to `target`.
    pub fn toggle(&mut self, instance_name: &str, target: &str) -> Result<()> {
        self.registry
            .get_mut(instance_name)
            .ok_or_else(|| Error::InstanceNotFound(instance_name.to_string()))?
            .toggle(target)
    }

    /// Crossfades `table` to `target`; see [`ActionTable::toggle`].
    pub fn toggle_action<'t>(
        table: &'t mut ActionTable<A>,
        target: &str,
    ) -> Result<&'t mut ActionTable<A>> {
        table.toggle(target)?;
        Ok(table)
    }
}

impl<A> Default for AnimationActionManager<A> {
    fn default() -> Self {
        Self::new()
    }
}
