//! Event routing collaborators.
//!
//! - [`bus`]: in-process publish/subscribe bus
//! - [`receivers`]: JSON receiver configuration normalizer

pub mod bus;
pub mod receivers;

pub use bus::{Delivery, EventBus};
pub use receivers::{ReceiverBinding, parse_receivers};

/// Channel used by a server to relay broadcast-any events to clients.
pub const SERVER_TO_CLIENT_CHANNEL: &str = "server-to-client";
