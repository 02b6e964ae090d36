use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Flat scene container.
///
/// Stores nodes in a slot map and keeps a name index so controllers can
/// resolve their visual node and physics proxy by name at spawn time.
/// Names are unique; adding a node under an existing name re-points the
/// index to the newest node.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    names: FxHashMap<String, NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            names: FxHashMap::default(),
        }
    }

    /// Adds a node and indexes it by name.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let name = node.name.clone();
        let handle = self.nodes.insert(node);
        if let Some(previous) = self.names.insert(name, handle) {
            log::warn!("Node name collision: {previous:?} is shadowed by {handle:?}");
        }
        handle
    }

    /// Removes a node. Handles held by animators become dangling and the
    /// stepper treats them as missing.
    pub fn remove_node(&mut self, handle: NodeHandle) -> Option<Node> {
        let node = self.nodes.remove(handle)?;
        if self.names.get(&node.name) == Some(&handle) {
            self.names.remove(&node.name);
        }
        Some(node)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.names.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transform;
    use glam::Vec3;

    #[test]
    fn find_by_name_resolves_handles() {
        let mut scene = Scene::new();
        let door = scene.add_node(Node::new("door"));
        let _ = scene.add_node(Node::new("door-collider"));

        assert_eq!(scene.find_by_name("door"), Some(door));
        assert!(scene.find_by_name("window").is_none());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn remove_node_drops_name_index() {
        let mut scene = Scene::new();
        let door = scene.add_node(Node::new("door"));

        assert!(scene.remove_node(door).is_some());
        assert!(scene.find_by_name("door").is_none());
        assert!(scene.get_node(door).is_none());
    }

    #[test]
    fn name_collision_points_at_newest_node() {
        let mut scene = Scene::new();
        let old = scene.add_node(Node::new("door"));
        let new = scene.add_node(
            Node::new("door").with_transform(
                Transform::from_position(Vec3::new(0.0, 1.0, 0.0))
                    .with_rotation(Vec3::new(0.0, 0.5, 0.0)),
            ),
        );

        assert_eq!(scene.find_by_name("door"), Some(new));
        let transform = scene.get_node(new).unwrap().transform;
        assert_eq!(transform.position, Vec3::Y);
        assert_eq!(transform.rotation, Vec3::new(0.0, 0.5, 0.0));

        // Removing the shadowed node leaves the index alone.
        assert!(scene.remove_node(old).is_some());
        assert_eq!(scene.find_by_name("door"), Some(new));
    }
}
