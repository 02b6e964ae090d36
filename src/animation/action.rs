//! Typed animator actions.
//!
//! Inbound events arrive as loose JSON maps (receiver params merged with
//! the event data). They are turned into an [`ActionPayload`] once, at the
//! dispatch boundary, and then into an [`Action`] whose variant only carries
//! the fields that action actually reads.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::animation::axis::{AnimationKind, Axis};
use crate::errors::{AnimatorError, Result};

/// Every field an inbound action may carry. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionPayload {
    /// Degrees.
    pub rotation_x: Option<f32>,
    pub rotation_y: Option<f32>,
    pub rotation_z: Option<f32>,
    /// Radians per frame.
    pub rotation_speed: Option<f32>,

    pub translation_x: Option<f32>,
    pub translation_y: Option<f32>,
    pub translation_z: Option<f32>,
    /// Units per frame.
    pub translation_speed: Option<f32>,

    pub continuous_speed_x: Option<f32>,
    pub continuous_speed_y: Option<f32>,
    pub continuous_speed_z: Option<f32>,

    /// Seconds; overrides the configured transition delay.
    pub delay: Option<f64>,
    pub reset_speed: Option<f32>,
    /// Emission time, milliseconds since the Unix epoch.
    pub timestamp: Option<f64>,
    pub is_animating: Option<bool>,
}

impl ActionPayload {
    /// Merges receiver `params` with inbound `data` (data wins) and parses
    /// the result. Non-object `data` contributes nothing.
    pub fn merged(action: &str, params: &Map<String, Value>, data: &Value) -> Result<Self> {
        let mut merged = params.clone();
        if let Value::Object(data) = data {
            merged.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self::from_value(action, Value::Object(merged))
    }

    pub fn from_value(action: &str, value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|source| AnimatorError::InvalidPayload {
            action: action.to_owned(),
            source,
        })
    }

    /// Target fields for the given channel, in user units.
    #[must_use]
    pub fn target_update(&self, kind: AnimationKind) -> TargetUpdate {
        let (target, speed) = match kind {
            AnimationKind::Rotation => (
                [self.rotation_x, self.rotation_y, self.rotation_z],
                self.rotation_speed,
            ),
            AnimationKind::Translation => (
                [self.translation_x, self.translation_y, self.translation_z],
                self.translation_speed,
            ),
        };
        TargetUpdate {
            target,
            speed,
            timestamp: self.timestamp,
        }
    }

    #[must_use]
    pub fn continuous_update(&self) -> ContinuousUpdate {
        ContinuousUpdate {
            speed: [
                self.continuous_speed_x,
                self.continuous_speed_y,
                self.continuous_speed_z,
            ],
        }
    }
}

/// Overlay writes carried by a start.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetUpdate {
    /// Per-axis targets in user units (degrees for rotation).
    pub target: [Option<f32>; 3],
    pub speed: Option<f32>,
    pub timestamp: Option<f64>,
}

impl TargetUpdate {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> Option<f32> {
        self.target[axis.index()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContinuousUpdate {
    pub speed: [Option<f32>; 3],
}

impl ContinuousUpdate {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> Option<f32> {
        self.speed[axis.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Start(TargetUpdate),
    Pause,
    Resume,
    Reset { speed: Option<f32> },
    Continuous(ContinuousUpdate),
    Stop,
    SetState {
        is_animating: Option<bool>,
        update: TargetUpdate,
    },
}

impl Action {
    /// Resolves an action name for an animator of the given kind.
    ///
    /// Accepts kind-suffixed names (`set-rotation`, `pause-translation`, ...)
    /// and the bare `start`, `stop`, `pause`, `resume`, `reset`, `set-state`.
    pub fn parse(kind: AnimationKind, name: &str, payload: &ActionPayload) -> Result<Self> {
        let suffix = format!("-{kind}");
        let (base, suffixed) = match name.strip_suffix(suffix.as_str()) {
            Some(base) => (base, true),
            None => (name, false),
        };
        let rotation = kind == AnimationKind::Rotation;

        let action = match base {
            "set" if suffixed => Action::Start(payload.target_update(kind)),
            "start" => Action::Start(payload.target_update(kind)),
            "pause" => Action::Pause,
            "resume" => Action::Resume,
            "reset" => Action::Reset {
                speed: payload.reset_speed,
            },
            "stop" => Action::Stop,
            "continuous" if suffixed && rotation => {
                Action::Continuous(payload.continuous_update())
            }
            "stop-continuous" if suffixed && rotation => Action::Stop,
            "set-state" if !suffixed => Action::SetState {
                is_animating: payload.is_animating,
                update: payload.target_update(kind),
            },
            _ => {
                return Err(AnimatorError::UnknownAction {
                    name: name.to_owned(),
                    kind: kind.as_str(),
                });
            }
        };

        Ok(action)
    }

    /// Whether the transition delay gate applies to this action.
    #[must_use]
    pub fn is_start_like(&self) -> bool {
        matches!(self, Action::Start(_) | Action::SetState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inbound_data_overrides_params() {
        let params = json!({ "rotationY": 90.0, "rotationSpeed": 0.02 });
        let data = json!({ "rotationY": 45.0 });

        let payload =
            ActionPayload::merged("set-rotation", params.as_object().unwrap(), &data).unwrap();

        assert_eq!(payload.rotation_y, Some(45.0));
        assert_eq!(payload.rotation_speed, Some(0.02));
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let err = ActionPayload::from_value("set-rotation", json!({ "rotationY": "ninety" }))
            .unwrap_err();
        assert!(matches!(err, AnimatorError::InvalidPayload { .. }));
    }

    #[test]
    fn parse_suffixed_and_bare_names() {
        let payload = ActionPayload::default();
        let rot = AnimationKind::Rotation;

        assert!(matches!(Action::parse(rot, "set-rotation", &payload), Ok(Action::Start(_))));
        assert!(matches!(Action::parse(rot, "start", &payload), Ok(Action::Start(_))));
        assert!(matches!(Action::parse(rot, "pause-rotation", &payload), Ok(Action::Pause)));
        assert!(matches!(
            Action::parse(rot, "continuous-rotation", &payload),
            Ok(Action::Continuous(_))
        ));
        assert!(matches!(
            Action::parse(rot, "stop-continuous-rotation", &payload),
            Ok(Action::Stop)
        ));
        assert!(matches!(Action::parse(rot, "set-state", &payload), Ok(Action::SetState { .. })));
    }

    #[test]
    fn rotation_only_actions_unknown_for_translation() {
        let payload = ActionPayload::default();
        let err = Action::parse(AnimationKind::Translation, "continuous-translation", &payload);
        assert!(matches!(err, Err(AnimatorError::UnknownAction { .. })));

        let err = Action::parse(AnimationKind::Translation, "set-rotation", &payload);
        assert!(matches!(err, Err(AnimatorError::UnknownAction { .. })));
    }

    #[test]
    fn target_update_picks_channel_fields() {
        let payload = ActionPayload {
            rotation_y: Some(90.0),
            translation_x: Some(3.0),
            translation_speed: Some(0.5),
            ..Default::default()
        };

        let update = payload.target_update(AnimationKind::Translation);
        assert_eq!(update.axis(Axis::X), Some(3.0));
        assert_eq!(update.axis(Axis::Y), None);
        assert_eq!(update.speed, Some(0.5));
    }
}
