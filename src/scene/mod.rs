//! Scene Module
//!
//! The minimal host-side scene the animators drive:
//! - Node: a named node carrying a transform
//! - Transform: position and Euler rotation
//! - Scene: slot-map node storage with name lookup

pub mod node;
pub mod scene;
pub mod transform;

pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
