//! Controller Configuration
//!
//! Static, per-controller settings. Everything here can be loaded from a
//! camelCase JSON document and every field has a default, so a config only
//! needs to spell out what differs.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use transform_animator::config::ControllerConfig;
//!
//! let config = ControllerConfig::from_json(r#"{
//!     "id": "door-1",
//!     "nodeName": "door",
//!     "kind": "rotation",
//!     "animation": { "target": [0, 90, 0], "speed": 0.02 },
//!     "receivers": "[{\"id\":\"open\",\"actions\":[{\"type\":\"set-rotation\"}]}]"
//! }"#)?;
//! ```
//!
//! Values coming from the dynamic parameter overlay always take precedence
//! over what is configured here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::axis::AnimationKind;
use crate::errors::Result;

/// Static animation values for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationSettings {
    /// When false, starts only arm the animator and the stepper never runs.
    pub enabled: bool,
    /// Per-axis target (degrees for rotation). An axis whose configured
    /// target is exactly zero is skipped unless the overlay sets it.
    pub target: Vec3,
    /// Per-frame speed; `None` means the channel default.
    pub speed: Option<f32>,
    /// Seconds between a start and the actual begin of target seeking,
    /// measured from the emitter's timestamp.
    pub delay: f64,
    /// Radians per frame, rotation only.
    pub continuous_speed: Vec3,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            target: Vec3::ZERO,
            speed: None,
            delay: 0.0,
            continuous_speed: Vec3::ZERO,
        }
    }
}

/// Outer delay gate applied before a start is even dispatched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionSettings {
    pub use_delay: bool,
    /// Seconds; an inbound `delay` field overrides it.
    pub delay: f64,
}

/// Where this controller sits in a server/client split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkRole {
    /// Single process: broadcast-any events are applied directly.
    #[default]
    Standalone,
    /// Relays broadcast-any events to the server-to-client channel.
    Server,
    /// Applies relayed server-to-client events addressed to it.
    Client,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerConfig {
    /// Controller identifier, also the broadcast-any channel.
    pub id: String,
    pub node_name: String,
    pub proxy_name: Option<String>,
    pub use_proxy: bool,

    pub kind: AnimationKind,
    pub animation: AnimationSettings,
    pub transition: TransitionSettings,

    /// JSON receiver list, see [`crate::events::receivers`].
    pub receivers: String,
    pub broadcast_any: bool,
    pub role: NetworkRole,

    /// Seconds during which further routed actions are dropped after one is
    /// accepted. Zero disables it.
    pub cooldown: f64,
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn new(id: impl Into<String>, node_name: impl Into<String>, kind: AnimationKind) -> Self {
        Self {
            id: id.into(),
            node_name: node_name.into(),
            kind,
            ..Default::default()
        }
    }

    /// Proxy node name, if proxy support is on and a name was given.
    #[must_use]
    pub fn active_proxy_name(&self) -> Option<&str> {
        if self.use_proxy {
            self.proxy_name.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_fills_defaults() {
        let config = ControllerConfig::from_json(
            r#"{ "id": "door-1", "nodeName": "door", "animation": { "target": [0, 90, 0] } }"#,
        )
        .unwrap();

        assert_eq!(config.kind, AnimationKind::Rotation);
        assert!(config.animation.enabled);
        assert_eq!(config.animation.target, Vec3::new(0.0, 90.0, 0.0));
        assert_eq!(config.animation.speed, None);
        assert!(!config.transition.use_delay);
        assert_eq!(config.role, NetworkRole::Standalone);
    }

    #[test]
    fn proxy_requires_toggle() {
        let mut config = ControllerConfig::new("lift", "platform", AnimationKind::Translation);
        config.proxy_name = Some("platform-body".into());
        assert_eq!(config.active_proxy_name(), None);

        config.use_proxy = true;
        assert_eq!(config.active_proxy_name(), Some("platform-body"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(ControllerConfig::from_json("{ not json").is_err());
    }
}
