use std::marker::PhantomData;

use glam::Vec3;

use crate::animation::action::{Action, ContinuousUpdate, TargetUpdate};
use crate::animation::axis::{Angular, Axis, AxisMath, Linear};
use crate::animation::offset::capture_proxy_offset;
use crate::animation::params::ParamKey;
use crate::animation::schedule::{PendingStart, compensated_delay_ms};
use crate::animation::state::{AnimatorState, Phase};
use crate::config::AnimationSettings;
use crate::scene::{NodeHandle, Scene};

pub type RotationAnimator = TransformAnimator<Angular>;
pub type TranslationAnimator = TransformAnimator<Linear>;

/// What the stepper did on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not animating or the channel is disabled.
    Idle,
    /// Animating, but neither seeking nor spinning.
    Armed,
    Spinning,
    /// `converged` is true once every animated axis sits inside the dead zone.
    Seeking { converged: bool },
}

/// Drives one channel (rotation or translation) of a visual node, and of its
/// physics proxy if it has one, towards runtime-supplied targets.
///
/// Actions mutate flags and the parameter overlay; only [`step`](Self::step)
/// ever writes to the scene.
#[derive(Debug, Clone)]
pub struct TransformAnimator<A: AxisMath> {
    state: AnimatorState,

    node: NodeHandle,
    proxy: Option<NodeHandle>,

    // Static configuration, already in internal units.
    enabled: bool,
    target: Vec3,
    speed: f32,
    delay: f64,
    continuous_speed: Vec3,

    _math: PhantomData<A>,
}

impl<A: AxisMath> TransformAnimator<A> {
    /// Captures the node's initial channel value and the proxy offset.
    ///
    /// Pass `proxy: None` when proxy support is disabled.
    #[must_use]
    pub fn new(
        settings: &AnimationSettings,
        scene: &Scene,
        node: NodeHandle,
        proxy: Option<NodeHandle>,
    ) -> Self {
        let initial = scene
            .get_node(node)
            .map_or(Vec3::ZERO, |n| A::channel(&n.transform));
        let offset = capture_proxy_offset(scene, node, proxy);

        let t = settings.target;
        Self {
            state: AnimatorState::new(initial, offset),
            node,
            proxy,
            enabled: settings.enabled,
            target: Vec3::new(
                A::from_user_units(t.x),
                A::from_user_units(t.y),
                A::from_user_units(t.z),
            ),
            speed: settings.speed.unwrap_or(A::DEFAULT_SPEED),
            delay: settings.delay,
            continuous_speed: settings.continuous_speed,
            _math: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    #[inline]
    #[must_use]
    pub fn proxy(&self) -> Option<NodeHandle> {
        self.proxy
    }

    // ========================================================================
    // Action dispatch
    // ========================================================================

    /// Applies an action. Returns the delayed start the host must schedule,
    /// if any.
    pub fn dispatch(&mut self, action: Action, now_ms: f64) -> Option<PendingStart> {
        match action {
            Action::Start(update) => self.start(&update, now_ms),
            Action::Pause => {
                self.pause();
                None
            }
            Action::Resume => {
                self.resume();
                None
            }
            Action::Reset { speed } => {
                self.reset(speed);
                None
            }
            Action::Continuous(update) => {
                self.start_continuous(&update);
                None
            }
            Action::Stop => {
                self.stop();
                None
            }
            Action::SetState {
                is_animating,
                update,
            } => self.set_state(is_animating, &update, now_ms),
        }
    }

    /// Writes the update into the overlay and arms the animator. When the
    /// channel is enabled, target seeking begins after the configured delay,
    /// less the time the event spent in transit.
    pub fn start(&mut self, update: &TargetUpdate, now_ms: f64) -> Option<PendingStart> {
        for axis in Axis::ALL {
            if let Some(value) = update.axis(axis) {
                self.state.params.set_target(axis, A::from_user_units(value));
            }
        }
        if let Some(speed) = update.speed {
            self.state.params.set_speed(speed);
        }

        self.state.is_animating = true;
        let generation = self.state.bump_generation();

        if !self.enabled {
            log::debug!("{} animation disabled; start only arms", A::KIND);
            return None;
        }

        let delay_ms = compensated_delay_ms(self.delay, update.timestamp, now_ms);
        log::debug!("{} start scheduled in {delay_ms:.0}ms (gen {generation})", A::KIND);
        Some(PendingStart {
            delay_ms,
            generation,
        })
    }

    /// Fires a delayed start. Stale generations and starts that land while
    /// spinning are ignored; returns whether seeking began.
    pub fn begin_targeting(&mut self, generation: u64) -> bool {
        if generation != self.state.generation {
            log::debug!(
                "{} dropping superseded start (gen {generation}, current {})",
                A::KIND,
                self.state.generation
            );
            return false;
        }
        if !self.state.is_animating {
            return false;
        }
        if self.state.is_continuous {
            log::debug!("{} is spinning; target start ignored", A::KIND);
            return false;
        }

        self.state.is_target_animating = true;
        true
    }

    /// Claims a generation for a start the host is holding back. Anything
    /// that bumps the generation before the start is dispatched (stop,
    /// reset, another start) supersedes it.
    pub fn defer_start(&mut self) -> u64 {
        self.state.bump_generation()
    }

    /// Whether a start deferred under `generation` may still be dispatched.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.state.generation
    }

    pub fn pause(&mut self) {
        self.state.is_target_animating = false;
    }

    /// Re-enters target seeking. A no-op, reported as a warning, unless the
    /// animator was started before.
    pub fn resume(&mut self) -> bool {
        if !self.state.is_animating {
            log::warn!("resume-{} ignored: animator was never started", A::KIND);
            return false;
        }
        if self.state.is_continuous {
            log::warn!("resume-{} ignored: animator is spinning", A::KIND);
            return false;
        }

        self.state.is_target_animating = true;
        true
    }

    /// Seeks back to the channel value captured at construction.
    pub fn reset(&mut self, speed: Option<f32>) {
        let initial = self.state.initial;
        for axis in Axis::ALL {
            self.state.params.set_target(axis, initial[axis.index()]);
        }
        self.state
            .params
            .set_speed(speed.unwrap_or(A::DEFAULT_RESET_SPEED));

        self.state.bump_generation();
        self.state.is_animating = true;
        self.state.is_continuous = false;
        self.state.is_target_animating = true;
    }

    /// Enters unbounded spin. Only meaningful for channels that support it.
    pub fn start_continuous(&mut self, update: &ContinuousUpdate) {
        if !A::SUPPORTS_CONTINUOUS {
            log::warn!("continuous mode is not supported for {}", A::KIND);
            return;
        }

        for axis in Axis::ALL {
            if let Some(speed) = update.axis(axis) {
                self.state.params.set_continuous_speed(axis, speed);
            }
        }

        self.state.is_animating = true;
        self.state.is_target_animating = false;
        self.state.is_continuous = true;
    }

    /// Clears all motion flags and the continuous overlay. Targets and speed
    /// stay in the overlay. Pending delayed starts are invalidated.
    pub fn stop(&mut self) {
        self.state.is_animating = false;
        self.state.is_target_animating = false;
        self.state.is_continuous = false;
        self.state.params.clear_continuous();
        self.state.bump_generation();
    }

    pub fn set_state(
        &mut self,
        is_animating: Option<bool>,
        update: &TargetUpdate,
        now_ms: f64,
    ) -> Option<PendingStart> {
        if is_animating.unwrap_or(self.state.is_animating) {
            self.start(update, now_ms)
        } else {
            self.stop();
            None
        }
    }

    // ========================================================================
    // Per-frame stepping
    // ========================================================================

    /// Advances the visual node and proxy by one frame.
    ///
    /// Missing nodes are skipped silently.
    pub fn step(&self, scene: &mut Scene) -> StepOutcome {
        if !self.state.is_animating || !self.enabled {
            return StepOutcome::Idle;
        }

        if self.state.is_continuous {
            self.spin(scene);
            StepOutcome::Spinning
        } else if self.state.is_target_animating {
            StepOutcome::Seeking {
                converged: self.seek(scene),
            }
        } else {
            StepOutcome::Armed
        }
    }

    fn spin(&self, scene: &mut Scene) {
        let params = &self.state.params;
        let rate = Vec3::new(
            params.get(ParamKey::ContinuousSpeed(Axis::X), self.continuous_speed.x),
            params.get(ParamKey::ContinuousSpeed(Axis::Y), self.continuous_speed.y),
            params.get(ParamKey::ContinuousSpeed(Axis::Z), self.continuous_speed.z),
        );
        if rate == Vec3::ZERO {
            return;
        }

        for handle in std::iter::once(self.node).chain(self.proxy) {
            if let Some(node) = scene.get_node_mut(handle) {
                *A::channel_mut(&mut node.transform) += rate;
            }
        }
    }

    fn seek(&self, scene: &mut Scene) -> bool {
        let params = &self.state.params;
        let speed = params.get(ParamKey::Speed, self.speed);
        let mut converged = true;

        for axis in Axis::ALL {
            let i = axis.index();
            let key = ParamKey::Target(axis);
            let configured = self.target[i];

            // A zero configured target disables the axis unless overridden.
            if configured == 0.0 && !params.contains(key) {
                continue;
            }
            let target = params.get(key, configured);

            if let Some(node) = scene.get_node_mut(self.node) {
                let channel = A::channel_mut(&mut node.transform);
                if let Some(value) = A::step(channel[i], target, speed).value() {
                    channel[i] = value;
                }
                converged &= A::is_settled(channel[i], target);
            }

            if let Some(proxy) = self.proxy.and_then(|h| scene.get_node_mut(h)) {
                let proxy_target = if A::COMPENSATES_PROXY_OFFSET {
                    target + self.state.proxy_offset[i]
                } else {
                    target
                };
                let channel = A::channel_mut(&mut proxy.transform);
                if let Some(value) = A::step(channel[i], proxy_target, speed).value() {
                    channel[i] = value;
                }
            }
        }

        if converged {
            log::trace!("{} converged", A::KIND);
        }
        converged
    }
}
