use crate::graph::Operation;
use crate::material::Material;
use crate::object::{object_type, Base};

/// A renderable piece of geometry paired with a material.
///
/// Created by [`Scene::mesh`](crate::scene::Scene::mesh). The geometry is
/// immutable once spawned; the material can be swapped at any time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mesh {
    pub(crate) object: Base,
}

impl Mesh {
    /// Set mesh material.
    pub fn set_material<M: Into<Material>>(&self, material: M) {
        self.object.send(Operation::SetMaterial(material.into()));
    }
}

object_type!(Mesh::object);
