use glam::{Mat4, Quat, Vec3};
use std::collections::HashMap;

use crate::math::{Tint, AABB, NEUTRAL_TINT};
use crate::types::{GeomKind, Mesh, Polyline, Usage};

/// Stable slot of a node inside the registry
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(u32);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Composition roots every node is attached to on insertion
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Root {
    Primary,
    Overlay,
    Annotation,
}

#[derive(Clone, Debug)]
pub enum LeafGeometry {
    Mesh(Mesh),
    Line(Polyline),
}

/// Finished geometry hanging under a node; `owner` is a back-reference
/// resolved through the registry
#[derive(Clone, Debug)]
pub struct GeometryLeaf {
    pub geometry: LeafGeometry,
    pub visible: bool,
    pub owner: NodeIndex,
}

impl GeometryLeaf {
    pub fn bounds(&self) -> AABB {
        match &self.geometry {
            LeafGeometry::Mesh(mesh) => mesh.bounds(),
            LeafGeometry::Line(line) => line.bounds(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: String,
    pub usage: Usage,
    pub kind: GeomKind,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub bbox: Option<AABB>,
    pub rendered: bool,
    pub visible: bool,
    pub tint: Tint,
    /// Loaded shells; the only pickable geometry
    pub object: Vec<GeometryLeaf>,
    /// Loaded toolpath lines
    pub annotation: Vec<GeometryLeaf>,
    serial: u64,
}

impl SceneNode {
    pub fn new(
        id: impl Into<String>,
        usage: Usage,
        kind: GeomKind,
        transform: Mat4,
        bbox: Option<AABB>,
    ) -> Self {
        let (scale, rotation, translation) = transform.to_scale_rotation_translation();
        Self {
            id: id.into(),
            usage,
            kind,
            translation,
            rotation,
            scale,
            bbox,
            rendered: true,
            visible: true,
            tint: NEUTRAL_TINT,
            object: Vec::new(),
            annotation: Vec::new(),
            serial: 0,
        }
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    /// Identity of this node, kept across reattach and in-place updates
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn local_to_scene(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        let (scale, rotation, translation) = transform.to_scale_rotation_translation();
        self.scale = scale;
        self.rotation = rotation;
        self.translation = translation;
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn set_visible(&mut self) {
        self.visible = true;
    }

    pub fn set_invisible(&mut self) {
        self.visible = false;
    }

    pub fn has_geometry(&self) -> bool {
        !self.object.is_empty()
    }

    /// Scene-space box over loaded shells; empty until a shell arrives
    pub fn geometry_bounds(&self) -> AABB {
        let matrix = self.local_to_scene();
        self.object
            .iter()
            .map(|leaf| leaf.bounds().transformed(&matrix))
            .fold(AABB::EMPTY, |acc, b| acc.union(&b))
    }
}

#[derive(Clone, Debug, Default)]
pub struct CompositionGroup {
    members: Vec<NodeIndex>,
}

impl CompositionGroup {
    pub fn attach(&mut self, index: NodeIndex) {
        if !self.members.contains(&index) {
            self.members.push(index);
        }
    }

    pub fn detach(&mut self, index: NodeIndex) {
        self.members.retain(|m| *m != index);
    }

    pub fn contains(&self, index: NodeIndex) -> bool {
        self.members.contains(&index)
    }

    pub fn members(&self) -> &[NodeIndex] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Authoritative id -> node map plus the three composition roots
#[derive(Debug, Default)]
pub struct EntityRegistry {
    nodes: Vec<SceneNode>,
    by_id: HashMap<String, NodeIndex>,
    primary: CompositionGroup,
    overlay: CompositionGroup,
    annotation: CompositionGroup,
    next_serial: u64,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or update the node already registered under its id.
    /// Either way the node ends up attached to all three roots.
    pub fn add(&mut self, node: SceneNode) -> NodeIndex {
        log::info!("Add Model({}): {}", node.usage, node.id);

        let index = match self.index_of(&node.id) {
            Some(index) => {
                let existing = &mut self.nodes[index.index()];
                existing.usage = node.usage;
                existing.kind = node.kind;
                existing.translation = node.translation;
                existing.rotation = node.rotation;
                existing.scale = node.scale;
                existing.tint = node.tint;
                existing.rendered = node.rendered;
                existing.visible = node.visible;
                if node.bbox.is_some() {
                    existing.bbox = node.bbox;
                }
                index
            }
            None => {
                let index = NodeIndex(self.nodes.len() as u32);
                let mut node = node;
                self.next_serial += 1;
                node.serial = self.next_serial;
                node.object.clear();
                node.annotation.clear();
                self.by_id.insert(node.id.clone(), index);
                self.nodes.push(node);
                index
            }
        };

        self.primary.attach(index);
        self.overlay.attach(index);
        self.annotation.attach(index);
        index
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&SceneNode> {
        self.index_of(id).map(|i| &self.nodes[i.index()])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SceneNode> {
        let index = self.index_of(id)?;
        self.nodes.get_mut(index.index())
    }

    pub fn node(&self, index: NodeIndex) -> Option<&SceneNode> {
        self.nodes.get(index.index())
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut SceneNode> {
        self.nodes.get_mut(index.index())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIndex(i as u32), n))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeIndex, &mut SceneNode)> {
        self.nodes
            .iter_mut()
            .enumerate()
            .map(|(i, n)| (NodeIndex(i as u32), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn group(&self, root: Root) -> &CompositionGroup {
        match root {
            Root::Primary => &self.primary,
            Root::Overlay => &self.overlay,
            Root::Annotation => &self.annotation,
        }
    }

    fn group_mut(&mut self, root: Root) -> &mut CompositionGroup {
        match root {
            Root::Primary => &mut self.primary,
            Root::Overlay => &mut self.overlay,
            Root::Annotation => &mut self.annotation,
        }
    }

    pub fn attach(&mut self, root: Root, index: NodeIndex) {
        if index.index() < self.nodes.len() {
            self.group_mut(root).attach(index);
        }
    }

    pub fn detach(&mut self, root: Root, index: NodeIndex) {
        self.group_mut(root).detach(index);
    }

    pub fn is_attached(&self, root: Root, index: NodeIndex) -> bool {
        self.group(root).contains(index)
    }

    /// Hang a finished shell under the node's object sub-tree
    pub fn attach_mesh(&mut self, index: NodeIndex, mesh: Mesh) -> bool {
        let Some(node) = self.nodes.get_mut(index.index()) else {
            return false;
        };
        node.object.push(GeometryLeaf {
            geometry: LeafGeometry::Mesh(mesh),
            visible: true,
            owner: index,
        });
        true
    }

    /// Hang finished toolpath lines under the node's annotation sub-tree
    pub fn attach_lines(&mut self, index: NodeIndex, lines: Vec<Polyline>) -> bool {
        let Some(node) = self.nodes.get_mut(index.index()) else {
            return false;
        };
        node.annotation.extend(lines.into_iter().map(|line| GeometryLeaf {
            geometry: LeafGeometry::Line(line),
            visible: true,
            owner: index,
        }));
        true
    }
}
