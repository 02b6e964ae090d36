use glam::Vec3;

use crate::animation::params::DynamicParams;

/// Coarse view of the animator's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not animating; the stepper does nothing.
    Idle,
    /// Animating but neither seeking nor spinning: paused, or waiting for a
    /// delayed start.
    Armed,
    /// Interpolating towards a finite target.
    Seeking,
    /// Spinning indefinitely at a constant rate.
    Continuous,
}

/// Per-entity animation state.
///
/// `is_target_animating` and `is_continuous` are never both set; all
/// transitions go through [`TransformAnimator`](crate::animation::TransformAnimator)
/// which keeps that invariant.
#[derive(Debug, Clone)]
pub struct AnimatorState {
    pub(crate) is_animating: bool,
    pub(crate) is_target_animating: bool,
    pub(crate) is_continuous: bool,

    pub(crate) params: DynamicParams,

    pub(crate) initial: Vec3,
    pub(crate) proxy_offset: Vec3,

    /// Bumped whenever a pending delayed start must be invalidated.
    pub(crate) generation: u64,
}

impl AnimatorState {
    #[must_use]
    pub fn new(initial: Vec3, proxy_offset: Vec3) -> Self {
        Self {
            is_animating: false,
            is_target_animating: false,
            is_continuous: false,
            params: DynamicParams::new(),
            initial,
            proxy_offset,
            generation: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if !self.is_animating {
            Phase::Idle
        } else if self.is_continuous {
            Phase::Continuous
        } else if self.is_target_animating {
            Phase::Seeking
        } else {
            Phase::Armed
        }
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    #[inline]
    #[must_use]
    pub fn is_target_animating(&self) -> bool {
        self.is_target_animating
    }

    #[inline]
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        self.is_continuous
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &DynamicParams {
        &self.params
    }

    /// Channel value captured at construction; the `reset` target.
    #[inline]
    #[must_use]
    pub fn initial(&self) -> Vec3 {
        self.initial
    }

    #[inline]
    #[must_use]
    pub fn proxy_offset(&self) -> Vec3 {
        self.proxy_offset
    }

    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn bump_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
