use glam::Vec3;

use crate::scene::{NodeHandle, Scene};

/// Fixed positional offset from the visual node to its physics proxy.
///
/// Captured once when the animator is built and never recomputed. Zero when
/// there is no proxy or either node cannot be resolved.
#[must_use]
pub fn capture_proxy_offset(scene: &Scene, node: NodeHandle, proxy: Option<NodeHandle>) -> Vec3 {
    let Some(proxy) = proxy else {
        return Vec3::ZERO;
    };

    match (scene.get_node(node), scene.get_node(proxy)) {
        (Some(visual), Some(proxy)) => proxy.transform.position - visual.transform.position,
        _ => Vec3::ZERO,
    }
}
