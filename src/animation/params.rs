use rustc_hash::FxHashMap;

use crate::animation::axis::{AnimationKind, Axis};

/// Key into the dynamic parameter overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// Per-axis target, in internal units.
    Target(Axis),
    /// Per-frame seeking speed.
    Speed,
    /// Per-axis continuous spin rate (rotation only).
    ContinuousSpeed(Axis),
}

impl ParamKey {
    /// Wire name of the key, e.g. `rotationY`, `translationSpeed`,
    /// `continuousSpeedZ`.
    #[must_use]
    pub fn name(self, kind: AnimationKind) -> String {
        match self {
            ParamKey::Target(axis) => format!("{}{}", kind.as_str(), axis.suffix()),
            ParamKey::Speed => format!("{}Speed", kind.as_str()),
            ParamKey::ContinuousSpeed(axis) => format!("continuousSpeed{}", axis.suffix()),
        }
    }
}

/// Sparse overlay of runtime values that shadow static configuration.
///
/// A missing key means "use the configured value". Values are not range
/// checked.
#[derive(Debug, Clone, Default)]
pub struct DynamicParams {
    values: FxHashMap<ParamKey, f32>,
}

impl DynamicParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay value for `key`, or `fallback` when none is set.
    #[inline]
    #[must_use]
    pub fn get(&self, key: ParamKey, fallback: f32) -> f32 {
        self.values.get(&key).copied().unwrap_or(fallback)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: ParamKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn set(&mut self, key: ParamKey, value: f32) {
        self.values.insert(key, value);
    }

    pub fn set_target(&mut self, axis: Axis, value: f32) {
        self.set(ParamKey::Target(axis), value);
    }

    pub fn set_speed(&mut self, value: f32) {
        self.set(ParamKey::Speed, value);
    }

    pub fn set_continuous_speed(&mut self, axis: Axis, value: f32) {
        self.set(ParamKey::ContinuousSpeed(axis), value);
    }

    /// Drops the continuous-speed keys. Targets and speed survive.
    pub fn clear_continuous(&mut self) {
        self.values
            .retain(|key, _| !matches!(key, ParamKey::ContinuousSpeed(_)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_falls_back_to_config() {
        let mut params = DynamicParams::new();
        assert_eq!(params.get(ParamKey::Speed, 0.5), 0.5);

        params.set_speed(0.2);
        assert_eq!(params.get(ParamKey::Speed, 0.5), 0.2);
    }

    #[test]
    fn clear_continuous_keeps_targets() {
        let mut params = DynamicParams::new();
        params.set_target(Axis::Y, 1.0);
        params.set_speed(0.1);
        params.set_continuous_speed(Axis::X, 0.3);
        params.set_continuous_speed(Axis::Z, 0.3);

        params.clear_continuous();

        assert_eq!(params.len(), 2);
        assert!(params.contains(ParamKey::Target(Axis::Y)));
        assert!(!params.contains(ParamKey::ContinuousSpeed(Axis::X)));
    }

    #[test]
    fn wire_names() {
        assert_eq!(ParamKey::Target(Axis::Y).name(AnimationKind::Rotation), "rotationY");
        assert_eq!(ParamKey::Speed.name(AnimationKind::Translation), "translationSpeed");
        assert_eq!(
            ParamKey::ContinuousSpeed(Axis::Z).name(AnimationKind::Rotation),
            "continuousSpeedZ"
        );
    }
}
