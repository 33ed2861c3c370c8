//! Node transforms for the scene graph.

use glam::{Mat4, Quat, Vec3};

use crate::graph::SubNode;

/// Index of a node inside the graph arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TransformInternal {
    pub disp: Vec3,
    pub rot: Quat,
    pub scale: f32,
}

impl TransformInternal {
    pub(crate) fn one() -> Self {
        Self {
            disp: Vec3::ZERO,
            rot: Quat::IDENTITY,
            scale: 1.0,
        }
    }

    pub(crate) fn concat(&self, other: Self) -> Self {
        Self {
            scale: self.scale * other.scale,
            rot: self.rot * other.rot,
            disp: self.disp + self.rot * (other.disp * self.scale),
        }
    }

    pub(crate) fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rot, self.disp)
    }
}

// Fat node of the scene graph. Client code never touches this directly;
// it speaks through `object::Base` handles instead.
#[derive(Debug)]
pub(crate) struct NodeInternal {
    /// `true` if this node (and its subnodes) are visible to cameras.
    pub(crate) visible: bool,
    /// Visibility combined over the ancestor chain, refreshed by `sync`.
    pub(crate) world_visible: bool,
    /// The transform relative to the node's parent.
    pub(crate) transform: TransformInternal,
    /// The transform relative to the world origin, refreshed by `sync`.
    pub(crate) world_transform: TransformInternal,
    /// Context-specific data: group links, mesh visual, or camera marker.
    pub(crate) sub_node: SubNode,
    /// Pointer to the next sibling.
    pub(crate) next_sibling: Option<NodeId>,
}

impl From<SubNode> for NodeInternal {
    fn from(sub: SubNode) -> Self {
        NodeInternal {
            visible: true,
            world_visible: false,
            transform: TransformInternal::one(),
            world_transform: TransformInternal::one(),
            sub_node: sub,
            next_sibling: None,
        }
    }
}

/// Position, rotation, and scale of a scene node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position.
    pub position: Vec3,
    /// Orientation.
    pub orientation: Quat,
    /// Uniform scale.
    pub scale: f32,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl From<TransformInternal> for Transform {
    fn from(tf: TransformInternal) -> Self {
        Transform {
            position: tf.disp,
            orientation: tf.rot,
            scale: tf.scale,
        }
    }
}

/// General information about a scene node, as resolved by
/// [`Scene::resolve`](crate::scene::Scene::resolve).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// Transform relative to the parent.
    pub transform: Transform,
    /// Transform relative to the world origin.
    pub world_transform: Transform,
    /// Is the node itself marked visible?
    pub visible: bool,
    /// Visibility combined over the ancestor chain.
    pub world_visible: bool,
}

impl From<&NodeInternal> for Node {
    fn from(node: &NodeInternal) -> Self {
        Node {
            transform: node.transform.into(),
            world_transform: node.world_transform.into(),
            visible: node.visible,
            world_visible: node.world_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn concat_applies_parent_then_child() {
        let parent = TransformInternal {
            disp: Vec3::new(1.0, 0.0, 0.0),
            rot: Quat::from_rotation_z(FRAC_PI_2),
            scale: 2.0,
        };
        let child = TransformInternal {
            disp: Vec3::new(1.0, 0.0, 0.0),
            rot: Quat::IDENTITY,
            scale: 1.0,
        };
        let world = parent.concat(child);
        // Child offset of +X is scaled by 2 and rotated onto +Y.
        assert_relative_eq!(world.disp.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(world.disp.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(world.scale, 2.0);
    }

    #[test]
    fn concat_with_identity_is_noop() {
        let tf = TransformInternal {
            disp: Vec3::new(3.0, -1.0, 0.5),
            rot: Quat::from_rotation_y(0.3),
            scale: 1.5,
        };
        let out = tf.concat(TransformInternal::one());
        assert_relative_eq!((out.disp - tf.disp).length(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(out.scale, tf.scale);
    }

    #[test]
    fn matrix_matches_components() {
        let tf = TransformInternal {
            disp: Vec3::new(0.0, 2.0, 0.0),
            rot: Quat::from_rotation_z(FRAC_PI_2),
            scale: 1.0,
        };
        let p = tf.matrix().transform_point3(Vec3::X);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-6);
    }
}
