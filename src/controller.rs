use slotmap::new_key_type;

use crate::animation::{
    Action, AnimationKind, AnimatorState, PendingStart, Phase, RotationAnimator, StepOutcome,
    TranslationAnimator,
};
use crate::config::ControllerConfig;
use crate::events::ReceiverBinding;
use crate::scene::{NodeHandle, Scene};

new_key_type! {
    pub struct ControllerHandle;
}

/// The animator a controller owns.
#[derive(Debug, Clone)]
pub enum ControllerAnimator {
    Rotation(RotationAnimator),
    Translation(TranslationAnimator),
}

impl ControllerAnimator {
    /// Builds the animator matching `kind`.
    #[must_use]
    pub fn build(
        config: &ControllerConfig,
        scene: &Scene,
        node: NodeHandle,
        proxy: Option<NodeHandle>,
    ) -> Self {
        match config.kind {
            AnimationKind::Rotation => {
                Self::Rotation(RotationAnimator::new(&config.animation, scene, node, proxy))
            }
            AnimationKind::Translation => {
                Self::Translation(TranslationAnimator::new(&config.animation, scene, node, proxy))
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> AnimationKind {
        match self {
            Self::Rotation(_) => AnimationKind::Rotation,
            Self::Translation(_) => AnimationKind::Translation,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AnimatorState {
        match self {
            Self::Rotation(a) => a.state(),
            Self::Translation(a) => a.state(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state().phase()
    }

    pub fn dispatch(&mut self, action: Action, now_ms: f64) -> Option<PendingStart> {
        match self {
            Self::Rotation(a) => a.dispatch(action, now_ms),
            Self::Translation(a) => a.dispatch(action, now_ms),
        }
    }

    pub fn begin_targeting(&mut self, generation: u64) -> bool {
        match self {
            Self::Rotation(a) => a.begin_targeting(generation),
            Self::Translation(a) => a.begin_targeting(generation),
        }
    }

    pub fn defer_start(&mut self) -> u64 {
        match self {
            Self::Rotation(a) => a.defer_start(),
            Self::Translation(a) => a.defer_start(),
        }
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        match self {
            Self::Rotation(a) => a.is_current(generation),
            Self::Translation(a) => a.is_current(generation),
        }
    }

    pub fn step(&self, scene: &mut Scene) -> StepOutcome {
        match self {
            Self::Rotation(a) => a.step(scene),
            Self::Translation(a) => a.step(scene),
        }
    }
}

/// One animated entity: its configuration, animator and receivers.
#[derive(Debug, Clone)]
pub struct Controller {
    pub(crate) config: ControllerConfig,
    pub(crate) animator: ControllerAnimator,
    pub(crate) receivers: Vec<ReceiverBinding>,

    pub(crate) last_accepted_ms: Option<f64>,
    pub(crate) last_outcome: StepOutcome,
}

impl Controller {
    #[must_use]
    pub fn new(
        config: ControllerConfig,
        animator: ControllerAnimator,
        receivers: Vec<ReceiverBinding>,
    ) -> Self {
        Self {
            config,
            animator,
            receivers,
            last_accepted_ms: None,
            last_outcome: StepOutcome::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn animator(&self) -> &ControllerAnimator {
        &self.animator
    }

    #[inline]
    #[must_use]
    pub fn receivers(&self) -> &[ReceiverBinding] {
        &self.receivers
    }

    /// Outcome of the most recent frame step.
    #[inline]
    #[must_use]
    pub fn last_outcome(&self) -> StepOutcome {
        self.last_outcome
    }

    /// Applies the cooldown window. Returns `false` when the action arrived
    /// too soon after the previously accepted one.
    pub(crate) fn accept_at(&mut self, now_ms: f64) -> bool {
        let window_ms = self.config.cooldown * 1000.0;
        if window_ms > 0.0
            && let Some(last) = self.last_accepted_ms
            && now_ms - last < window_ms
        {
            return false;
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }

    /// Event ids this controller listens on, deduplicated, in config order.
    pub(crate) fn channels(&self) -> Vec<&str> {
        let mut channels: Vec<&str> = Vec::new();
        for binding in &self.receivers {
            if !channels.contains(&binding.event_id.as_str()) {
                channels.push(&binding.event_id);
            }
        }
        channels
    }
}
