#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::float_cmp)]

pub mod animation;
pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod scene;
pub mod utils;
pub mod world;

pub use animation::{
    Action, AnimationKind, AnimatorState, Phase, RotationAnimator, StepOutcome, TransformAnimator,
    TranslationAnimator,
};
pub use config::{AnimationSettings, ControllerConfig, NetworkRole, TransitionSettings};
pub use controller::{Controller, ControllerAnimator, ControllerHandle};
pub use errors::{AnimatorError, Result};
pub use events::{EventBus, ReceiverBinding, parse_receivers};
pub use scene::{Node, NodeHandle, Scene, Transform};
pub use utils::{Clock, ManualClock, SystemClock, TimerQueue};
pub use world::World;
