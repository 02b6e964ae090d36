//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`AnimatorError`] covers the failure modes that can
//! surface from configuration and event handling:
//! - Controller configuration errors (unparsable JSON, missing scene node)
//! - Action dispatch errors (unknown action name, malformed payload)
//! - Controller lookup errors
//!
//! The per-frame stepper has no error path: missing nodes and zero speeds
//! simply produce no motion.
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, AnimatorError>`.
//!
//! ```rust,ignore
//! use transform_animator::errors::Result;
//! use transform_animator::config::ControllerConfig;
//!
//! fn load(json: &str) -> Result<ControllerConfig> {
//!     ControllerConfig::from_json(json)
//! }
//! ```

use thiserror::Error;

/// The main error type for the animator crate.
#[derive(Error, Debug)]
pub enum AnimatorError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The scene node the controller should drive does not exist.
    #[error("Scene node not found: {0}")]
    NodeNotFound(String),

    /// JSON parsing error (controller config or payload).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Action Dispatch Errors
    // ========================================================================
    /// The action name is not understood by this animator kind.
    #[error("Unknown action '{name}' for {kind} animator")]
    UnknownAction {
        /// Action name as received
        name: String,
        /// Animator kind the action was routed to
        kind: &'static str,
    },

    /// The action payload could not be converted to its typed form.
    #[error("Invalid payload for action '{action}': {source}")]
    InvalidPayload {
        /// Action name as received
        action: String,
        /// Underlying deserialization error
        source: serde_json::Error,
    },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// The controller handle is stale or was never issued.
    #[error("Controller not found")]
    ControllerNotFound,
}

/// Alias for `Result<T, AnimatorError>`.
pub type Result<T> = std::result::Result<T, AnimatorError>;
