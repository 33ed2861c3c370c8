use crate::graph::{Graph, Operation, SubNode};
use crate::object::{object_type, Base, Object};

/// Groups are used to combine several other objects or groups to work with
/// them as with a single entity. Rotating a group rotates all of its
/// children about the group origin, which makes groups natural pivots.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group {
    pub(crate) object: Base,
}

impl Group {
    pub(crate) fn new(graph: &mut Graph) -> Self {
        Group {
            object: graph.spawn(SubNode::Group { first_child: None }),
        }
    }

    /// Add new [`Object`](crate::object::Object) to the group.
    pub fn add<T: Object>(&self, child: &T) {
        self.object
            .send(Operation::AddChild(child.as_ref().node));
    }

    /// Removes a child [`Object`](crate::object::Object) from the group.
    pub fn remove<T: Object>(&self, child: &T) {
        self.object
            .send(Operation::RemoveChild(child.as_ref().node));
    }
}

object_type!(Group::object);
