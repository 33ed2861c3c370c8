//! Storage and synchronization point of the scene graph.

use std::mem;
use std::sync::mpsc;
use std::sync::Arc;

use glam::{Quat, Vec3};
use log::error;

use crate::geometry::Geometry;
use crate::material::Material;
use crate::node::{NodeId, NodeInternal, TransformInternal};
use crate::object::Base;

/// Renderable 3D content attached to a node.
#[derive(Clone, Debug)]
pub(crate) struct VisualData {
    pub geometry: Arc<Geometry>,
    pub material: Material,
}

#[derive(Debug)]
pub(crate) enum SubNode {
    /// Group of sub-nodes. Also serves as a pivot: rotating the group
    /// rotates every attached child about the group origin.
    Group { first_child: Option<NodeId> },

    /// Renderable 3D content.
    Visual(VisualData),

    /// A camera viewpoint; the projection lives on the `Camera` handle.
    Camera,
}

pub(crate) type Message = (NodeId, Operation);

pub(crate) enum Operation {
    AddChild(NodeId),
    RemoveChild(NodeId),
    SetVisible(bool),
    SetTransform(Option<Vec3>, Option<Quat>, Option<f32>),
    SetMaterial(Material),
}

/// Arena of scene nodes plus the channel every handle talks through.
///
/// Handles never touch nodes directly; they enqueue operations which are
/// drained once per frame before world transforms are refreshed. This keeps
/// the per-frame update free of aliasing and lets handles be cloned and
/// moved anywhere.
pub(crate) struct Graph {
    nodes: Vec<NodeInternal>,
    message_tx: mpsc::Sender<Message>,
    message_rx: mpsc::Receiver<Message>,
}

impl Graph {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        Graph {
            nodes: Vec::new(),
            message_tx,
            message_rx,
        }
    }

    pub(crate) fn spawn(&mut self, sub: SubNode) -> Base {
        let id = NodeId(self.nodes.len());
        self.nodes.push(sub.into());
        Base {
            node: id,
            tx: self.message_tx.clone(),
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeInternal {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeInternal {
        &mut self.nodes[id.0]
    }

    /// Drains all pending handle operations into the arena.
    pub(crate) fn process_messages(&mut self) {
        while let Ok((id, operation)) = self.message_rx.try_recv() {
            match operation {
                Operation::AddChild(child_id) => {
                    let sibling = match self.nodes[id.0].sub_node {
                        SubNode::Group {
                            ref mut first_child,
                        } => mem::replace(first_child, Some(child_id)),
                        _ => {
                            error!("AddChild is only valid on groups");
                            continue;
                        }
                    };
                    let child = &mut self.nodes[child_id.0];
                    if child.next_sibling.is_some() {
                        error!(
                            "Element {:?} is added to a group while still having an old parent - \
                             discarding siblings",
                            child.sub_node
                        );
                    }
                    child.next_sibling = sibling;
                }
                Operation::RemoveChild(child_id) => {
                    let next_sibling = self.nodes[child_id.0].next_sibling;
                    let target = Some(child_id);
                    let mut cursor = match self.nodes[id.0].sub_node {
                        SubNode::Group {
                            ref mut first_child,
                        } => {
                            if *first_child == target {
                                *first_child = next_sibling;
                                self.nodes[child_id.0].next_sibling = None;
                                continue;
                            }
                            *first_child
                        }
                        _ => {
                            error!("RemoveChild is only valid on groups");
                            continue;
                        }
                    };
                    loop {
                        let node = match cursor.take() {
                            Some(next_id) => &mut self.nodes[next_id.0],
                            None => {
                                error!("Unable to find child for removal");
                                break;
                            }
                        };
                        if node.next_sibling == target {
                            node.next_sibling = next_sibling;
                            self.nodes[child_id.0].next_sibling = None;
                            break;
                        }
                        cursor = node.next_sibling;
                    }
                }
                Operation::SetVisible(visible) => {
                    self.nodes[id.0].visible = visible;
                }
                Operation::SetTransform(pos, rot, scale) => {
                    let transform = &mut self.nodes[id.0].transform;
                    if let Some(pos) = pos {
                        transform.disp = pos;
                    }
                    if let Some(rot) = rot {
                        transform.rot = rot;
                    }
                    if let Some(scale) = scale {
                        transform.scale = scale;
                    }
                }
                Operation::SetMaterial(material) => {
                    if let SubNode::Visual(ref mut data) = self.nodes[id.0].sub_node {
                        data.material = material;
                    } else {
                        error!("SetMaterial is only valid on meshes");
                    }
                }
            }
        }
    }

    /// Depth-first refresh of world transforms and combined visibility,
    /// starting from the scene root chain.
    pub(crate) fn update_graph(&mut self, first_child: Option<NodeId>) {
        struct Item {
            parent: Option<NodeId>,
            id: NodeId,
        }

        // Nodes outside the scene tree keep stale state; mark everything
        // invisible first so detached nodes never reach the renderer.
        for node in &mut self.nodes {
            node.world_visible = false;
        }

        let mut stack = Vec::new();
        if let Some(id) = first_child {
            stack.push(Item { parent: None, id });
        }

        while let Some(item) = stack.pop() {
            let (parent_transform, parent_visible) = match item.parent {
                Some(parent) => {
                    let p = &self.nodes[parent.0];
                    (p.world_transform, p.world_visible)
                }
                None => (TransformInternal::one(), true),
            };
            {
                let node = &mut self.nodes[item.id.0];
                node.world_transform = parent_transform.concat(node.transform);
                node.world_visible = parent_visible && node.visible;
            }

            if let Some(id) = self.nodes[item.id.0].next_sibling {
                stack.push(Item {
                    parent: item.parent,
                    id,
                });
            }
            if let SubNode::Group {
                first_child: Some(id),
            } = self.nodes[item.id.0].sub_node
            {
                stack.push(Item {
                    parent: Some(item.id),
                    id,
                });
            }
        }
    }

    /// Calls `visit` for every world-visible visual node.
    pub(crate) fn visit_visuals(&self, mut visit: impl FnMut(NodeId, &NodeInternal, &VisualData)) {
        for (index, node) in self.nodes.iter().enumerate() {
            if !node.world_visible {
                continue;
            }
            if let SubNode::Visual(ref data) = node.sub_node {
                visit(NodeId(index), node, data);
            }
        }
    }
}
