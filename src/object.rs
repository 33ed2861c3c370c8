//! Items in the scene hierarchy.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::mpsc;

use glam::{Mat3, Quat, Vec3};

use crate::graph::{Message, Operation};
use crate::node::NodeId;

// Note: no local state lives here, only the link into the graph. Handles are
// cheap to clone and stay valid for the lifetime of their `Scene`.
/// `Base` represents a concrete entity that can be added to the scene.
///
/// One cannot construct `Base` directly. Wrapper types such as
/// [`Camera`](crate::camera::Camera), [`Mesh`](crate::mesh::Mesh), and
/// [`Group`](crate::group::Group) are provided instead.
#[derive(Clone)]
pub struct Base {
    pub(crate) node: NodeId,
    pub(crate) tx: mpsc::Sender<Message>,
}

/// Marks data structures that are able to be added to the scene graph.
pub trait Object: AsRef<Base> {
    /// Converts into the base type.
    fn upcast(&self) -> Base {
        self.as_ref().clone()
    }

    /// Invisible objects are not rendered by cameras.
    fn set_visible(&self, visible: bool) {
        self.as_ref().set_visible(visible)
    }

    /// Rotates the object so that its -Z axis points at `target` from `eye`.
    fn look_at(&self, eye: Vec3, target: Vec3, up: Option<Vec3>) {
        self.as_ref().look_at(eye, target, up)
    }

    /// Set position, orientation and scale at once.
    fn set_transform(&self, pos: Vec3, rot: Quat, scale: f32) {
        self.as_ref().set_transform(pos, rot, scale)
    }

    /// Set position.
    fn set_position(&self, pos: Vec3) {
        self.as_ref().set_position(pos)
    }

    /// Set orientation.
    fn set_orientation(&self, rot: Quat) {
        self.as_ref().set_orientation(rot)
    }

    /// Set scale.
    fn set_scale(&self, scale: f32) {
        self.as_ref().set_scale(scale)
    }
}

impl Base {
    /// Pass a message to the graph. A send error means the scene is gone,
    /// in which case there is nothing left to mutate anyway.
    pub(crate) fn send(&self, operation: Operation) {
        let _ = self.tx.send((self.node, operation));
    }

    /// Invisible objects are not rendered by cameras.
    pub fn set_visible(&self, visible: bool) {
        self.send(Operation::SetVisible(visible));
    }

    /// Rotates the object so that its -Z axis points at `target` from `eye`.
    pub fn look_at(&self, eye: Vec3, target: Vec3, up: Option<Vec3>) {
        let dir = (eye - target).normalize();
        let up = match up {
            Some(v) => v.normalize(),
            None if dir.dot(Vec3::Y).abs() < 0.99 => Vec3::Y,
            None => Vec3::Z,
        };
        let right = up.cross(dir).normalize();
        let adjusted_up = dir.cross(right);
        let rot = Quat::from_mat3(&Mat3::from_cols(right, adjusted_up, dir));
        self.set_transform(eye, rot, 1.0);
    }

    /// Set position, orientation and scale at once.
    pub fn set_transform(&self, pos: Vec3, rot: Quat, scale: f32) {
        self.send(Operation::SetTransform(Some(pos), Some(rot), Some(scale)));
    }

    /// Set position.
    pub fn set_position(&self, pos: Vec3) {
        self.send(Operation::SetTransform(Some(pos), None, None));
    }

    /// Set orientation.
    pub fn set_orientation(&self, rot: Quat) {
        self.send(Operation::SetTransform(None, Some(rot), None));
    }

    /// Set scale.
    pub fn set_scale(&self, scale: f32) {
        self.send(Operation::SetTransform(None, None, Some(scale)));
    }
}

impl PartialEq for Base {
    fn eq(&self, other: &Base) -> bool {
        self.node == other.node
    }
}

impl Eq for Base {}

impl Hash for Base {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl AsRef<Base> for Base {
    fn as_ref(&self) -> &Base {
        self
    }
}

impl Object for Base {}

/// Derives `AsRef<Base>` and `Object` for a handle wrapping a `Base` field.
macro_rules! object_type {
    ($name:ident::$field:ident) => {
        impl AsRef<$crate::object::Base> for $name {
            fn as_ref(&self) -> &$crate::object::Base {
                &self.$field
            }
        }

        impl $crate::object::Object for $name {}
    };
}

pub(crate) use object_type;
