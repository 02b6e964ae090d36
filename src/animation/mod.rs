//! Transform animation.
//!
//! - [`axis`]: angle/distance math and the [`AxisMath`] strategy
//! - [`params`]: the dynamic parameter overlay
//! - [`state`]: per-entity flags
//! - [`action`]: typed actions and payloads
//! - [`schedule`]: latency-compensated start delays
//! - [`offset`]: physics proxy offset capture
//! - [`animator`]: dispatcher and per-frame stepper

pub mod action;
pub mod animator;
pub mod axis;
pub mod offset;
pub mod params;
pub mod schedule;
pub mod state;

pub use action::{Action, ActionPayload, ContinuousUpdate, TargetUpdate};
pub use animator::{RotationAnimator, StepOutcome, TransformAnimator, TranslationAnimator};
pub use axis::{AnimationKind, Angular, Axis, AxisMath, AxisStep, Linear};
pub use params::{DynamicParams, ParamKey};
pub use schedule::PendingStart;
pub use state::{AnimatorState, Phase};
