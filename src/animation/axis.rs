//! Per-axis math for the two animator flavours.
//!
//! Rotation and translation share the same stepping loop and only differ
//! in how a delta between two axis values is measured, which transform
//! channel they drive, and what units their inputs arrive in. That
//! difference is captured by [`AxisMath`], implemented by [`Angular`] and
//! [`Linear`].

use std::f32::consts::{PI, TAU};
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::Transform;

/// Values closer than this to their target are left alone.
pub const DEAD_ZONE: f32 = 0.01;

#[inline]
#[must_use]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Signed modulo by a full turn.
///
/// Negative angles stay negative: `-3π` becomes `-π`, not `π`.
#[inline]
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    angle % TAU
}

/// Delta from `current` to `target` along the shorter rotational direction.
///
/// Deltas within a half turn are returned unchanged; anything larger is
/// wrapped by whole turns, so the result never exceeds π in magnitude.
#[must_use]
pub fn shortest_delta(current: f32, target: f32) -> f32 {
    let delta = target - current;
    if delta.abs() > PI {
        delta - TAU * (delta / TAU).round()
    } else {
        delta
    }
}

/// Result of advancing one axis by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisStep {
    /// Zero speed: jump straight to the target.
    Snapped(f32),
    /// Incremental move towards the target.
    Moved(f32),
    /// Nothing to write this frame.
    Settled,
}

impl AxisStep {
    /// The value to write back, if any.
    #[inline]
    #[must_use]
    pub fn value(self) -> Option<f32> {
        match self {
            Self::Snapped(v) | Self::Moved(v) => Some(v),
            Self::Settled => None,
        }
    }
}

/// Single-axis step.
///
/// `delta` is the already-measured distance from `current` to `target`
/// (linear or shortest-angular). A zero `speed` snaps, but only when the
/// value actually differs. Otherwise the axis moves by at most `speed`
/// unless it is already inside [`DEAD_ZONE`]. Negative speeds are not
/// rejected; they drive the axis away from the target.
#[must_use]
pub fn step_axis(current: f32, target: f32, speed: f32, delta: f32) -> AxisStep {
    if speed == 0.0 {
        return if current == target {
            AxisStep::Settled
        } else {
            AxisStep::Snapped(target)
        };
    }

    let distance = delta.abs();
    if distance > DEAD_ZONE {
        AxisStep::Moved(current + delta.signum() * speed.min(distance))
    } else {
        AxisStep::Settled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Which transform channel an animator drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    #[default]
    Rotation,
    Translation,
}

impl AnimationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationKind::Rotation => "rotation",
            AnimationKind::Translation => "translation",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy trait covering everything that differs between rotation and
/// translation animators.
pub trait AxisMath {
    const KIND: AnimationKind;
    /// Per-frame speed used when neither config nor overlay supplies one.
    const DEFAULT_SPEED: f32;
    /// Per-frame speed used by `reset` when the action carries none.
    const DEFAULT_RESET_SPEED: f32;
    const SUPPORTS_CONTINUOUS: bool;
    /// Whether proxy targets are shifted by the captured proxy offset.
    const COMPENSATES_PROXY_OFFSET: bool;

    fn channel(transform: &Transform) -> Vec3;

    fn channel_mut(transform: &mut Transform) -> &mut Vec3;

    /// Converts a payload/config value into internal units.
    fn from_user_units(value: f32) -> f32;

    /// Canonicalizes the current axis value before stepping.
    fn prepare(current: f32) -> f32;

    fn delta(current: f32, target: f32) -> f32;

    /// Advances `current` one frame towards `target`.
    #[inline]
    fn step(current: f32, target: f32, speed: f32) -> AxisStep {
        let current = Self::prepare(current);
        step_axis(current, target, speed, Self::delta(current, target))
    }

    /// Whether `current` already counts as arrived at `target`.
    #[inline]
    fn is_settled(current: f32, target: f32) -> bool {
        let current = Self::prepare(current);
        Self::delta(current, target).abs() <= DEAD_ZONE
    }
}

/// Rotation: degrees in, radians inside, shortest-path deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Angular;

impl AxisMath for Angular {
    const KIND: AnimationKind = AnimationKind::Rotation;
    const DEFAULT_SPEED: f32 = 0.01;
    const DEFAULT_RESET_SPEED: f32 = 0.05;
    const SUPPORTS_CONTINUOUS: bool = true;
    const COMPENSATES_PROXY_OFFSET: bool = false;

    #[inline]
    fn channel(transform: &Transform) -> Vec3 {
        transform.rotation
    }

    #[inline]
    fn channel_mut(transform: &mut Transform) -> &mut Vec3 {
        &mut transform.rotation
    }

    #[inline]
    fn from_user_units(value: f32) -> f32 {
        to_radians(value)
    }

    #[inline]
    fn prepare(current: f32) -> f32 {
        normalize_angle(current)
    }

    #[inline]
    fn delta(current: f32, target: f32) -> f32 {
        shortest_delta(current, target)
    }
}

/// Translation: plain units, plain deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl AxisMath for Linear {
    const KIND: AnimationKind = AnimationKind::Translation;
    const DEFAULT_SPEED: f32 = 0.1;
    const DEFAULT_RESET_SPEED: f32 = 2.0;
    const SUPPORTS_CONTINUOUS: bool = false;
    const COMPENSATES_PROXY_OFFSET: bool = true;

    #[inline]
    fn channel(transform: &Transform) -> Vec3 {
        transform.position
    }

    #[inline]
    fn channel_mut(transform: &mut Transform) -> &mut Vec3 {
        &mut transform.position
    }

    #[inline]
    fn from_user_units(value: f32) -> f32 {
        value
    }

    #[inline]
    fn prepare(current: f32) -> f32 {
        current
    }

    #[inline]
    fn delta(current: f32, target: f32) -> f32 {
        target - current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn to_radians_quarter_turn() {
        assert!((to_radians(90.0) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn normalize_keeps_sign() {
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!((normalize_angle(-TAU - 1.0) + 1.0).abs() < 1e-5);
        assert!(normalize_angle(-1.0) < 0.0);
    }

    #[test]
    fn step_moves_at_most_speed() {
        assert_eq!(step_axis(0.0, 1.0, 0.25, 1.0), AxisStep::Moved(0.25));
        assert_eq!(step_axis(0.9, 1.0, 0.25, 0.1), AxisStep::Moved(1.0));
        assert_eq!(step_axis(1.0, 0.0, 0.25, -1.0), AxisStep::Moved(0.75));
    }

    #[test]
    fn step_dead_zone_is_noop() {
        assert_eq!(step_axis(0.995, 1.0, 0.1, 0.005), AxisStep::Settled);
    }

    #[test]
    fn zero_speed_snaps_once() {
        assert_eq!(step_axis(0.0, 2.0, 0.0, 2.0), AxisStep::Snapped(2.0));
        assert_eq!(step_axis(2.0, 2.0, 0.0, 0.0), AxisStep::Settled);
    }

    #[test]
    fn angular_step_crosses_wraparound() {
        // From just below a full turn to just above zero: go forward, not back.
        let current = TAU - 0.1;
        let step = Angular::step(current, 0.1, 0.05);
        let v = step.value().unwrap();
        assert!(v > current, "expected forward motion, got {v}");
    }

    #[test]
    fn linear_step_ignores_wraparound() {
        let step = Linear::step(10.0, 0.0, 1.0);
        assert_eq!(step, AxisStep::Moved(9.0));
    }
}
