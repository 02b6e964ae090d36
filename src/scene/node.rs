use crate::scene::transform::Transform;

/// A named scene node.
///
/// Animators only ever touch [`Node::transform`]. A physics proxy is a node
/// like any other; it is simply not attached to the visual node and is kept
/// in step by the animator instead of by the hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,

    /// Transform component (hot data accessed every frame)
    pub transform: Transform,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
