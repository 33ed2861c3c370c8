//! `Scene` structure: the root of the node tree plus global shading state.

use std::mem;
use std::sync::Arc;

use glam::Vec3;
use log::error;

use crate::camera::{Camera, Projection, ZRange};
use crate::color::{self, Color};
use crate::geometry::Geometry;
use crate::graph::{Graph, SubNode, VisualData};
use crate::group::Group;
use crate::material::Material;
use crate::mesh::Mesh;
use crate::node::{Node, NodeId, TransformInternal};
use crate::object::Object;
use crate::texture::Texture;

/// Background type.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    /// Basic solid color background.
    Color(Color),
    /// Texture background, stretched over the whole viewport.
    Texture(Texture),
}

/// Uniform illumination applied to every surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// A single distant light. Only the direction of `position` matters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

/// The root node of a tree of objects rendered from a
/// [`Camera`](crate::camera::Camera) viewpoint.
///
/// `Scene` is also the factory for everything living in the tree: groups
/// (pivots), meshes, and cameras are all spawned here and manipulated
/// through their cloned handles afterwards.
pub struct Scene {
    pub(crate) graph: Graph,
    pub(crate) first_child: Option<NodeId>,

    /// See [`Background`].
    pub background: Background,
    /// Uniform fill light.
    pub ambient_light: AmbientLight,
    /// Key light.
    pub directional_light: DirectionalLight,
}

impl Scene {
    /// An empty scene with a white background and neutral lighting.
    pub fn new() -> Self {
        Scene {
            graph: Graph::new(),
            first_child: None,
            background: Background::Color(color::WHITE),
            ambient_light: AmbientLight {
                color: color::WHITE,
                intensity: 0.6,
            },
            directional_light: DirectionalLight {
                color: color::WHITE,
                intensity: 0.8,
                position: Vec3::new(3.0, 5.0, 5.0),
            },
        }
    }

    /// Spawns an empty group, usable as a pivot for its children.
    pub fn group(&mut self) -> Group {
        Group::new(&mut self.graph)
    }

    /// Spawns a mesh with the given geometry and material.
    pub fn mesh<M: Into<Material>>(&mut self, geometry: Geometry, material: M) -> Mesh {
        let object = self.graph.spawn(SubNode::Visual(VisualData {
            geometry: Arc::new(geometry),
            material: material.into(),
        }));
        Mesh { object }
    }

    /// Spawns a perspective camera with vertical FOV in degrees and the
    /// given z range.
    pub fn perspective_camera<R: Into<ZRange>>(&mut self, fov_y: f32, range: R) -> Camera {
        let object = self.graph.spawn(SubNode::Camera);
        Camera {
            object,
            projection: Projection::perspective(fov_y, range),
        }
    }

    /// Adds an object to the scene root.
    pub fn add<T: Object>(&mut self, child: &T) {
        let node_id = child.as_ref().node;
        let node = self.graph.node_mut(node_id);
        if node.next_sibling.is_some() {
            error!(
                "Element {:?} is added to a scene while still having an old parent - \
                 discarding siblings",
                node.sub_node
            );
        }
        node.next_sibling = mem::replace(&mut self.first_child, Some(node_id));
    }

    /// Removes a previously added object from the scene root.
    pub fn remove<T: Object>(&mut self, child: &T) {
        let target = Some(child.as_ref().node);
        let next_sibling = self.graph.node(child.as_ref().node).next_sibling;

        if self.first_child == target {
            self.first_child = next_sibling;
            self.graph.node_mut(child.as_ref().node).next_sibling = None;
            return;
        }

        let mut cursor = self.first_child;
        while let Some(id) = cursor.take() {
            let node = self.graph.node_mut(id);
            if node.next_sibling == target {
                node.next_sibling = next_sibling;
                self.graph.node_mut(child.as_ref().node).next_sibling = None;
                return;
            }
            cursor = node.next_sibling;
        }

        error!("Unable to find child for removal");
    }

    /// Applies all pending handle operations and refreshes world transforms.
    ///
    /// The renderer calls this once per frame; tests call it directly.
    pub fn sync(&mut self) {
        self.graph.process_messages();
        self.graph.update_graph(self.first_child);
    }

    /// Resolved world-space information for an object, valid as of the last
    /// [`sync`](Scene::sync).
    pub fn resolve<T: Object>(&self, object: &T) -> Node {
        self.graph.node(object.as_ref().node).into()
    }

    /// Flat list of world-visible meshes for the render pass.
    pub(crate) fn draw_list(&self) -> Vec<DrawItem> {
        let mut list = Vec::new();
        self.graph.visit_visuals(|id, node, data| {
            list.push(DrawItem {
                node: id,
                world: node.world_transform,
                geometry: Arc::clone(&data.geometry),
                material: data.material.clone(),
            });
        });
        list
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

pub(crate) struct DrawItem {
    pub node: NodeId,
    pub world: TransformInternal,
    pub geometry: Arc<Geometry>,
    pub material: Material,
}
