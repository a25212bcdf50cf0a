//! Animation Action Tests
//!
//! Tests for:
//! - Action table extraction (name folding, unnamed clips, replacement)
//! - Crossfade call sequencing through the capability traits
//! - Missing-action and missing-instance errors
//! - Registry lookup and teardown
//! - End-to-end crossfade on the built-in mixer

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use pawn_control::animation::{
    ActionMixer, ActionTable, AnimationActionManager, AnimationClip, ClipSource, LoopMode,
    ModelAsset, NamedClip, PlayableAction,
};
use pawn_control::Error;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Recording backend
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Reset(String),
    Weight(String, f32),
    Play(String),
    FadeIn(String, f32),
    FadeOut(String, f32),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

struct RecordingAction {
    clip: String,
    log: CallLog,
}

impl PlayableAction for RecordingAction {
    fn reset(&mut self) {
        self.log.borrow_mut().push(Call::Reset(self.clip.clone()));
    }

    fn set_effective_weight(&mut self, weight: f32) {
        self.log
            .borrow_mut()
            .push(Call::Weight(self.clip.clone(), weight));
    }

    fn play(&mut self) {
        self.log.borrow_mut().push(Call::Play(self.clip.clone()));
    }

    fn fade_in(&mut self, duration: f32) {
        self.log
            .borrow_mut()
            .push(Call::FadeIn(self.clip.clone(), duration));
    }

    fn fade_out(&mut self, duration: f32) {
        self.log
            .borrow_mut()
            .push(Call::FadeOut(self.clip.clone(), duration));
    }
}

struct Clip(Option<&'static str>);

impl NamedClip for Clip {
    fn name(&self) -> Option<&str> {
        self.0
    }
}

struct RecordingMixer {
    log: CallLog,
    bound: Vec<String>,
}

impl ActionMixer for RecordingMixer {
    type Clip = Clip;
    type Action = RecordingAction;

    fn clip_action(&mut self, clip: &Clip) -> RecordingAction {
        let name = clip.0.unwrap_or_default().to_string();
        self.bound.push(name.clone());
        RecordingAction {
            clip: name,
            log: Rc::clone(&self.log),
        }
    }
}

struct Gltf {
    clips: Vec<Clip>,
    log: CallLog,
}

impl Gltf {
    fn new(names: &[Option<&'static str>]) -> Self {
        Self {
            clips: names.iter().map(|name| Clip(*name)).collect(),
            log: CallLog::default(),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl ClipSource for Gltf {
    type Clip = Clip;
    type Mixer = RecordingMixer;

    fn create_mixer(&self) -> RecordingMixer {
        RecordingMixer {
            log: Rc::clone(&self.log),
            bound: Vec::new(),
        }
    }

    fn clips(&self) -> &[Clip] {
        &self.clips
    }
}

fn sorted_names<A>(table: &ActionTable<A>) -> Vec<&str> {
    let mut names: Vec<_> = table.names().collect();
    names.sort_unstable();
    names
}

// ============================================================================
// create_actions
// ============================================================================

#[test]
fn create_actions_folds_clip_names() {
    let asset = Gltf::new(&[Some("Idle"), Some("Wave")]);
    let mut manager = AnimationActionManager::new();

    let (mixer, table) = manager.create_actions("robot", &asset);

    assert_eq!(sorted_names(table), vec!["idle", "wave"]);
    assert_eq!(table.last_action(), "");
    assert_eq!(mixer.bound, vec!["Idle", "Wave"]);
    assert!(asset.calls().is_empty());
}

#[test]
fn create_actions_skips_unnamed_clips() {
    let asset = Gltf::new(&[None, Some(""), Some("Run")]);
    let mut manager = AnimationActionManager::new();

    let (mixer, table) = manager.create_actions("robot", &asset);

    assert_eq!(sorted_names(table), vec!["run"]);
    assert_eq!(mixer.bound, vec!["Run"]);
}

#[test]
fn create_actions_replaces_previous_table() {
    init_logger();
    let mut manager = AnimationActionManager::new();
    manager.create_actions("robot", &Gltf::new(&[Some("Idle")]));
    manager.create_actions("robot", &Gltf::new(&[Some("Jump"), Some("Dance")]));

    let table = manager.get_actions("robot").expect("table registered");
    assert_eq!(sorted_names(table), vec!["dance", "jump"]);
    assert_eq!(manager.len(), 1);
}

// ============================================================================
// toggle
// ============================================================================

#[test]
fn first_toggle_fades_in_without_fade_out() {
    let asset = Gltf::new(&[Some("Idle"), Some("Wave")]);
    let mut manager = AnimationActionManager::new();
    let (_mixer, table) = manager.create_actions("robot", &asset);

    table.toggle("wave").unwrap();

    let wave = "Wave".to_string();
    assert_eq!(
        asset.calls(),
        vec![
            Call::Reset(wave.clone()),
            Call::Weight(wave.clone(), 1.0),
            Call::Play(wave.clone()),
            Call::FadeIn(wave, 0.3),
        ]
    );
    assert_eq!(table.last_action(), "wave");
}

#[test]
fn toggle_crossfades_from_previous_action() {
    let asset = Gltf::new(&[Some("Idle"), Some("Wave")]);
    let mut manager = AnimationActionManager::new();
    let (_mixer, table) = manager.create_actions("robot", &asset);
    table.toggle("idle").unwrap();
    asset.clear();

    table.toggle("wave").unwrap();

    let calls = asset.calls();
    assert_eq!(calls[0], Call::FadeOut("Idle".to_string(), 0.3));
    assert_eq!(calls[4], Call::FadeIn("Wave".to_string(), 0.3));
    assert_eq!(calls.len(), 5);
    assert_eq!(table.last_action(), "wave");
}

#[test]
fn toggle_to_current_action_is_noop() {
    let asset = Gltf::new(&[Some("Idle"), Some("Wave")]);
    let mut manager = AnimationActionManager::new();
    let (_mixer, table) = manager.create_actions("robot", &asset);

    table.toggle("wave").unwrap();
    asset.clear();
    table.toggle("wave").unwrap();

    assert!(asset.calls().is_empty());
    assert_eq!(table.last_action(), "wave");
}

#[test]
fn toggle_missing_action_fails_and_leaves_table() {
    init_logger();
    let asset = Gltf::new(&[Some("Idle")]);
    let mut manager = AnimationActionManager::new();
    let (_mixer, table) = manager.create_actions("robot", &asset);
    table.toggle("idle").unwrap();
    asset.clear();

    let err = table.toggle("missingClip").unwrap_err();

    assert!(matches!(err, Error::ActionNotFound { ref name } if name == "missingClip"));
    assert!(asset.calls().is_empty());
    assert_eq!(table.last_action(), "idle");
}

#[test]
fn toggle_action_returns_the_table() {
    let asset = Gltf::new(&[Some("Wave")]);
    let mut manager = AnimationActionManager::new();
    let (_mixer, table) = manager.create_actions("robot", &asset);

    let table = AnimationActionManager::toggle_action(table, "wave").unwrap();

    assert_eq!(table.last_action(), "wave");
}

#[test]
fn toggle_by_instance_name() {
    let asset = Gltf::new(&[Some("Wave")]);
    let mut manager = AnimationActionManager::with_fade_duration(0.5);
    manager.create_actions("robot", &asset);

    manager.toggle("robot", "wave").unwrap();
    assert_eq!(asset.calls().last(), Some(&Call::FadeIn("Wave".to_string(), 0.5)));

    let err = manager.toggle("ghost", "wave").unwrap_err();
    assert!(matches!(err, Error::InstanceNotFound(ref name) if name == "ghost"));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn get_actions_for_unknown_instance_is_none() {
    let manager: AnimationActionManager<pawn_control::MixerAction> = AnimationActionManager::new();
    assert!(manager.get_actions("robot").is_none());
    assert!(manager.is_empty());
}

#[test]
fn destroy_clears_every_table() {
    let mut manager = AnimationActionManager::new();
    manager.create_actions("robot", &Gltf::new(&[Some("Idle")]));
    manager.create_actions("soldier", &Gltf::new(&[Some("Walk")]));
    assert_eq!(manager.len(), 2);

    manager.destroy();

    assert!(manager.get_actions("robot").is_none());
    assert!(manager.get_actions("soldier").is_none());
    assert_eq!(manager.instance_names().count(), 0);
}

#[test]
fn remove_actions_returns_table() {
    let mut manager = AnimationActionManager::new();
    manager.create_actions("robot", &Gltf::new(&[Some("Idle")]));

    let table = manager.remove_actions("robot").expect("table registered");

    assert!(table.contains("idle"));
    assert!(manager.get_actions("robot").is_none());
}

// ============================================================================
// Built-in mixer
// ============================================================================

fn robot() -> ModelAsset {
    ModelAsset::new("Robot")
        .with_clip(AnimationClip::new("Idle", 2.0))
        .with_clip(AnimationClip::new("Wave", 1.0))
        .with_clip(AnimationClip::new("", 1.0))
}

#[test]
fn mixer_crossfade_blends_then_settles() {
    init_logger();
    let mut manager = AnimationActionManager::new();
    let (mut mixer, table) = manager.create_actions("robot", &robot());
    assert_eq!(mixer.root(), "Robot");
    assert_eq!(table.len(), 2);

    table.toggle("idle").unwrap();
    mixer.update(1.0);

    table.toggle("wave").unwrap();
    let idle = table.get("idle").unwrap().clone();
    let wave = table.get("wave").unwrap().clone();
    assert!(approx(wave.state().effective_weight(), 0.0));
    assert!(approx(idle.state().effective_weight(), 1.0));

    mixer.update(0.15);
    assert!(approx(wave.state().effective_weight(), 0.5));
    assert!(approx(idle.state().effective_weight(), 0.5));

    mixer.update(0.2);
    assert!(approx(wave.state().effective_weight(), 1.0));
    assert!(approx(idle.state().effective_weight(), 0.0));
    assert!(!idle.state().enabled);
    assert!(wave.state().enabled);
}

#[test]
fn switching_back_restarts_the_action() {
    let mut manager = AnimationActionManager::new();
    let (mut mixer, table) = manager.create_actions("robot", &robot());

    table.toggle("idle").unwrap();
    mixer.update(0.5);
    table.toggle("wave").unwrap();
    mixer.update(0.5);
    table.toggle("idle").unwrap();

    let idle = table.get("idle").unwrap().clone();
    let idle = idle.state();
    assert_eq!(idle.time, 0.0);
    assert!(idle.enabled);
    assert!(idle.is_running());
}

#[test]
fn once_mode_pauses_at_clip_end() {
    let mut manager = AnimationActionManager::new();
    let (mut mixer, table) = manager.create_actions("robot", &robot());
    let wave = table.get("wave").unwrap().clone();
    wave.state_mut().loop_mode = LoopMode::Once;

    table.toggle("wave").unwrap();
    mixer.update(0.5);
    mixer.update(0.75);

    let wave = wave.state();
    assert!(approx(wave.time, 1.0));
    assert!(wave.paused);
}

#[test]
fn ping_pong_reverses_in_second_half() {
    let clip = Arc::new(AnimationClip::new("Swing", 1.0));
    let mut action = pawn_control::AnimationAction::new(clip);
    action.loop_mode = LoopMode::PingPong;

    action.update(1.25);

    assert!(approx(action.time, 0.75));
}
